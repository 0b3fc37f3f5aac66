//! Persistence gateway port.
//!
//! The registry is the in-memory authority; a [`ShopStore`] keeps that
//! state durable across process restarts. Deletes are soft - rows stay
//! behind with their flag cleared for audit and recovery - so a reload
//! only surfaces active shops and purchasable listings.

use std::future::Future;
use std::sync::Arc;

use crate::domain::{Listing, ListingId, Shop, ShopId};
use crate::error::Result;

/// Storage operations for shops and their listings.
pub trait ShopStore: Send + Sync {
    /// Upsert a shop row, including its serialized revenue pool.
    ///
    /// Listings are persisted separately through
    /// [`save_listing`](Self::save_listing).
    fn save_shop(&self, shop: &Shop) -> impl Future<Output = Result<()>> + Send;

    /// Upsert one listing row under its shop.
    fn save_listing(
        &self,
        shop_id: ShopId,
        listing: &Listing,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Soft-delete a shop (`is_active = false`). Returns whether a row was
    /// affected.
    fn delete_shop(&self, id: ShopId) -> impl Future<Output = Result<bool>> + Send;

    /// Soft-delete a listing (`is_available = false`). Returns whether a
    /// row was affected.
    fn delete_listing(
        &self,
        shop_id: ShopId,
        listing_id: ListingId,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Reload every active shop with its purchasable listings (available
    /// and stock > 0).
    fn load_all(&self) -> impl Future<Output = Result<Vec<Shop>>> + Send;
}

impl<S: ShopStore> ShopStore for Arc<S> {
    async fn save_shop(&self, shop: &Shop) -> Result<()> {
        (**self).save_shop(shop).await
    }

    async fn save_listing(&self, shop_id: ShopId, listing: &Listing) -> Result<()> {
        (**self).save_listing(shop_id, listing).await
    }

    async fn delete_shop(&self, id: ShopId) -> Result<bool> {
        (**self).delete_shop(id).await
    }

    async fn delete_listing(&self, shop_id: ShopId, listing_id: ListingId) -> Result<bool> {
        (**self).delete_listing(shop_id, listing_id).await
    }

    async fn load_all(&self) -> Result<Vec<Shop>> {
        (**self).load_all().await
    }
}
