use std::sync::atomic::{AtomicBool, Ordering};

use tradepost::domain::{Listing, ListingId, Shop, ShopId};
use tradepost::error::{Result, StoreError};
use tradepost::ports::ShopStore;

/// Store wrapper whose individual operations can be made to fail on
/// demand, for exercising rollback paths.
pub struct FlakyStore<S> {
    inner: S,
    fail_save_shop: AtomicBool,
    fail_save_listing: AtomicBool,
    fail_delete_listing: AtomicBool,
}

impl<S> FlakyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            fail_save_shop: AtomicBool::new(false),
            fail_save_listing: AtomicBool::new(false),
            fail_delete_listing: AtomicBool::new(false),
        }
    }

    pub fn fail_save_shop(&self, fail: bool) {
        self.fail_save_shop.store(fail, Ordering::SeqCst);
    }

    pub fn fail_save_listing(&self, fail: bool) {
        self.fail_save_listing.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete_listing(&self, fail: bool) {
        self.fail_delete_listing.store(fail, Ordering::SeqCst);
    }

    fn tripped(flag: &AtomicBool, op: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(StoreError::Database(format!("injected failure: {op}")).into())
        } else {
            Ok(())
        }
    }
}

impl<S: ShopStore> ShopStore for FlakyStore<S> {
    async fn save_shop(&self, shop: &Shop) -> Result<()> {
        Self::tripped(&self.fail_save_shop, "save_shop")?;
        self.inner.save_shop(shop).await
    }

    async fn save_listing(&self, shop_id: ShopId, listing: &Listing) -> Result<()> {
        Self::tripped(&self.fail_save_listing, "save_listing")?;
        self.inner.save_listing(shop_id, listing).await
    }

    async fn delete_shop(&self, id: ShopId) -> Result<bool> {
        self.inner.delete_shop(id).await
    }

    async fn delete_listing(&self, shop_id: ShopId, listing_id: ListingId) -> Result<bool> {
        Self::tripped(&self.fail_delete_listing, "delete_listing")?;
        self.inner.delete_listing(shop_id, listing_id).await
    }

    async fn load_all(&self) -> Result<Vec<Shop>> {
        self.inner.load_all().await
    }
}
