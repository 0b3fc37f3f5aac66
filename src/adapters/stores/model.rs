//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{shop_items, shops};

/// Database row for a shop.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = shops)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ShopRow {
    pub shop_id: String,
    pub owner_id: String,
    pub owner_name: String,
    pub world_name: String,
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub is_active: bool,
    pub created_at: String,
    pub last_updated: String,
    pub revenue_data: String,
}

/// Database row for a shop listing.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = shop_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ListingRow {
    pub item_id: String,
    pub shop_id: String,
    pub item_data: String,
    pub quantity: i32,
    pub description: String,
    pub price_data: String,
    pub is_available: bool,
}
