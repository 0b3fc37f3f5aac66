//! SQLite store implementation using Diesel.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::codec;
use super::db::DbPool;
use super::model::{ListingRow, ShopRow};
use super::schema::{shop_items, shops};
use crate::domain::{Listing, ListingId, Location, Shop, ShopId};
use crate::error::{Error, Result, StoreError};
use crate::ports::ShopStore;

/// SQLite-backed shop store.
pub struct SqliteShopStore {
    pool: DbPool,
}

impl SqliteShopStore {
    /// Create a new SQLite shop store.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool
            .get()
            .map_err(|e| StoreError::Connection(e.to_string()).into())
    }

    fn shop_to_row(shop: &Shop) -> Result<ShopRow> {
        Ok(ShopRow {
            shop_id: shop.id().to_string(),
            owner_id: shop.owner_id().to_string(),
            owner_name: shop.owner_name().to_string(),
            world_name: shop.location().world.as_str().to_string(),
            x: shop.location().x,
            y: shop.location().y,
            z: shop.location().z,
            is_active: shop.is_active(),
            created_at: shop.created_at().to_rfc3339(),
            last_updated: shop.last_updated().to_rfc3339(),
            revenue_data: codec::encode_stacks(shop.revenue())?,
        })
    }

    fn listing_to_row(shop_id: ShopId, listing: &Listing) -> Result<ListingRow> {
        Ok(ListingRow {
            item_id: listing.id().to_string(),
            shop_id: shop_id.to_string(),
            item_data: codec::encode_payload(listing.payload())?,
            quantity: i32::try_from(listing.quantity())
                .map_err(|e| StoreError::Codec(e.to_string()))?,
            description: listing.description().to_string(),
            price_data: codec::encode_stacks(listing.price().components())?,
            is_available: listing.available_flag(),
        })
    }

    fn shop_from_row(row: ShopRow, items: Vec<Listing>) -> Result<Shop> {
        let location = Location::new(row.world_name.as_str(), row.x, row.y, row.z);
        Ok(Shop::restore(
            parse_uuid(&row.shop_id)?.into(),
            parse_uuid(&row.owner_id)?.into(),
            row.owner_name,
            location,
            items,
            codec::decode_stacks(&row.revenue_data)?,
            row.is_active,
            parse_timestamp(&row.created_at)?,
            parse_timestamp(&row.last_updated)?,
        ))
    }

    fn listing_from_row(row: ListingRow) -> Result<Listing> {
        let price =
            crate::domain::PriceVector::new(codec::decode_stacks(&row.price_data)?);
        Ok(Listing::restore(
            parse_uuid(&row.item_id)?.into(),
            codec::decode_payload(&row.item_data)?,
            u32::try_from(row.quantity).map_err(|e| StoreError::Codec(e.to_string()))?,
            price,
            row.description,
            row.is_available,
        ))
    }
}

fn parse_uuid(text: &str) -> Result<Uuid> {
    Uuid::parse_str(text).map_err(|e| StoreError::Codec(e.to_string()).into())
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Codec(e.to_string()).into())
}

fn db_err(e: diesel::result::Error) -> Error {
    StoreError::Database(e.to_string()).into()
}

impl ShopStore for SqliteShopStore {
    async fn save_shop(&self, shop: &Shop) -> Result<()> {
        let row = Self::shop_to_row(shop)?;
        let mut conn = self.conn()?;

        diesel::replace_into(shops::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(db_err)?;

        Ok(())
    }

    async fn save_listing(&self, shop_id: ShopId, listing: &Listing) -> Result<()> {
        let row = Self::listing_to_row(shop_id, listing)?;
        let mut conn = self.conn()?;

        diesel::replace_into(shop_items::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(db_err)?;

        Ok(())
    }

    async fn delete_shop(&self, id: ShopId) -> Result<bool> {
        let mut conn = self.conn()?;

        let affected = diesel::update(shops::table.find(id.to_string()))
            .set(shops::is_active.eq(false))
            .execute(&mut conn)
            .map_err(db_err)?;

        Ok(affected > 0)
    }

    async fn delete_listing(&self, shop_id: ShopId, listing_id: ListingId) -> Result<bool> {
        let mut conn = self.conn()?;

        let affected = diesel::update(
            shop_items::table.filter(
                shop_items::item_id
                    .eq(listing_id.to_string())
                    .and(shop_items::shop_id.eq(shop_id.to_string())),
            ),
        )
        .set(shop_items::is_available.eq(false))
        .execute(&mut conn)
        .map_err(db_err)?;

        Ok(affected > 0)
    }

    async fn load_all(&self) -> Result<Vec<Shop>> {
        let mut conn = self.conn()?;

        let shop_rows: Vec<ShopRow> = shops::table
            .filter(shops::is_active.eq(true))
            .load(&mut conn)
            .map_err(db_err)?;

        let mut result = Vec::with_capacity(shop_rows.len());
        for shop_row in shop_rows {
            let listing_rows: Vec<ListingRow> = shop_items::table
                .filter(
                    shop_items::shop_id
                        .eq(&shop_row.shop_id)
                        .and(shop_items::is_available.eq(true))
                        .and(shop_items::quantity.gt(0)),
                )
                .load(&mut conn)
                .map_err(db_err)?;

            let items = listing_rows
                .into_iter()
                .map(Self::listing_from_row)
                .collect::<Result<Vec<_>>>()?;

            result.push(Self::shop_from_row(shop_row, items)?);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::super::db::{create_pool, run_migrations};
    use super::*;
    use crate::domain::{Actor, ItemPayload, ItemStack, PriceVector};

    fn setup_store() -> SqliteShopStore {
        let pool = create_pool(":memory:").expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        SqliteShopStore::new(pool)
    }

    fn sample_shop() -> Shop {
        let owner = Actor::new("alice");
        let mut shop = Shop::new(owner.id, owner.name, Location::new("overworld", 4, 70, -12));
        shop.add_listing(
            Listing::new(
                ItemPayload::new("emerald"),
                12,
                PriceVector::new(vec![ItemStack::new(ItemPayload::new("stone"), 2)]),
            )
            .with_description("greenest in town"),
        );
        shop
    }

    #[tokio::test]
    async fn shop_roundtrip_preserves_fields() {
        let store = setup_store();
        let shop = sample_shop();
        let listing = shop.items()[0].clone();

        store.save_shop(&shop).await.unwrap();
        store.save_listing(shop.id(), &listing).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        let restored = &loaded[0];
        assert_eq!(restored.id(), shop.id());
        assert_eq!(restored.owner_id(), shop.owner_id());
        assert_eq!(restored.owner_name(), shop.owner_name());
        assert_eq!(restored.location(), shop.location());
        assert_eq!(restored.created_at(), shop.created_at());
        assert_eq!(restored.last_updated(), shop.last_updated());
        assert_eq!(restored.items().len(), 1);
        assert_eq!(restored.items()[0], listing);
    }

    #[tokio::test]
    async fn delete_shop_is_soft() {
        let store = setup_store();
        let shop = sample_shop();

        store.save_shop(&shop).await.unwrap();
        assert!(store.delete_shop(shop.id()).await.unwrap());
        assert!(store.load_all().await.unwrap().is_empty());
        // Second delete still touches the (now inactive) row.
        assert!(store.delete_shop(shop.id()).await.unwrap());
    }

    #[tokio::test]
    async fn delete_listing_hides_it_from_reload() {
        let store = setup_store();
        let shop = sample_shop();
        let listing = shop.items()[0].clone();

        store.save_shop(&shop).await.unwrap();
        store.save_listing(shop.id(), &listing).await.unwrap();
        assert!(store.delete_listing(shop.id(), listing.id()).await.unwrap());

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded[0].items().is_empty());
    }

    #[tokio::test]
    async fn zero_stock_listings_are_not_loaded() {
        let store = setup_store();
        let mut shop = sample_shop();
        let id = shop.items()[0].id();
        shop.reduce_stock(id, 12).unwrap();
        let listing = shop.listing(id).unwrap().clone();

        store.save_shop(&shop).await.unwrap();
        store.save_listing(shop.id(), &listing).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert!(loaded[0].items().is_empty());
    }
}
