//! In-memory store implementation for testing.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{Listing, ListingId, Shop, ShopId};
use crate::error::Result;
use crate::ports::ShopStore;

/// In-memory shop store with the same soft-delete semantics as the SQLite
/// adapter. Listing rows live in their own map, mirroring the two-table
/// schema.
#[derive(Debug, Default)]
pub struct MemoryShopStore {
    shops: RwLock<HashMap<ShopId, Shop>>,
    listings: RwLock<HashMap<(ShopId, ListingId), Listing>>,
}

impl MemoryShopStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shop rows, active or not. Test helper.
    #[must_use]
    pub fn shop_rows(&self) -> usize {
        self.shops.read().len()
    }
}

impl ShopStore for MemoryShopStore {
    async fn save_shop(&self, shop: &Shop) -> Result<()> {
        self.shops.write().insert(shop.id(), shop.clone());
        Ok(())
    }

    async fn save_listing(&self, shop_id: ShopId, listing: &Listing) -> Result<()> {
        self.listings
            .write()
            .insert((shop_id, listing.id()), listing.clone());
        Ok(())
    }

    async fn delete_shop(&self, id: ShopId) -> Result<bool> {
        let mut shops = self.shops.write();
        match shops.get_mut(&id) {
            Some(shop) => {
                shop.set_active(false);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_listing(&self, shop_id: ShopId, listing_id: ListingId) -> Result<bool> {
        let mut listings = self.listings.write();
        match listings.get_mut(&(shop_id, listing_id)) {
            Some(listing) => {
                listing.set_available(false);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn load_all(&self) -> Result<Vec<Shop>> {
        let shops = self.shops.read();
        let listings = self.listings.read();

        Ok(shops
            .values()
            .filter(|s| s.is_active())
            .map(|shop| {
                let items: Vec<Listing> = listings
                    .iter()
                    .filter(|((shop_id, _), l)| {
                        *shop_id == shop.id() && l.available_flag() && l.quantity() > 0
                    })
                    .map(|(_, l)| l.clone())
                    .collect();
                Shop::restore(
                    shop.id(),
                    shop.owner_id(),
                    shop.owner_name().to_string(),
                    shop.location().clone(),
                    items,
                    shop.revenue().to_vec(),
                    shop.is_active(),
                    shop.created_at(),
                    shop.last_updated(),
                )
            })
            .collect())
    }
}
