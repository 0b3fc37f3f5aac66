//! The in-memory shop registry: the single authority over live shops.
//!
//! Three indices - by id, by location, by owner - are kept consistent on
//! every mutation and support concurrent reads without blocking readers.
//! Each shop sits behind its own async mutex; everything that mutates a
//! shop (listing edits, purchases, settlement) runs serialized under that
//! lock, with the persistence await inside the critical section so the
//! durable store sees mutations in the same order memory does.
//!
//! Collaborators are injected at construction ([`ShopRegistry::new`] /
//! [`ShopRegistry::load`]); request-scoped capabilities such as the
//! [`InventoryOracle`] arrive with the call that needs them.

mod purchase;
mod search;

pub use purchase::PurchaseReceipt;
pub use search::{SearchHit, SearchQuery};

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::{
    Actor, ActorId, ItemMatcher, Listing, ListingId, Location, Shop, ShopId, ValidationError,
};
use crate::error::Result;
use crate::ports::{Event, InventoryOracle, Presenter, ShopStore, WorldCatalog};

/// Aggregate marketplace counters, computed by a full scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct ShopStatistics {
    pub total_shops: usize,
    pub active_shops: usize,
    pub total_listings: usize,
    pub total_revenue_items: u32,
}

/// What settlement of a removed shop delivered to the settlement target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementReport {
    /// Units that fit the target's inventory.
    pub delivered: u32,
    /// Units the oracle could not place; the platform drops them.
    pub dropped: u32,
}

pub struct ShopRegistry<S> {
    store: S,
    presenter: Arc<dyn Presenter>,
    matcher: Arc<dyn ItemMatcher>,
    shops: DashMap<ShopId, Arc<Mutex<Shop>>>,
    by_location: DashMap<Location, ShopId>,
    by_owner: DashMap<ActorId, HashSet<ShopId>>,
}

/// Removal is terminal: a caller that grabbed a shop handle right before
/// it was deindexed must be turned away once the lock is acquired.
pub(crate) fn ensure_live(shop: &Shop, id: ShopId) -> Result<()> {
    if !shop.is_active() {
        return Err(ValidationError::ShopNotFound { shop: id }.into());
    }
    Ok(())
}

fn ensure_owned(shop: &Shop, id: ShopId, actor: &Actor) -> Result<()> {
    ensure_live(shop, id)?;
    if !shop.is_owner(actor.id) {
        return Err(ValidationError::PermissionDenied {
            actor: actor.id,
            shop: id,
        }
        .into());
    }
    Ok(())
}

impl<S: ShopStore> ShopRegistry<S> {
    /// Build an empty registry around its collaborators.
    pub fn new(store: S, presenter: Arc<dyn Presenter>, matcher: Arc<dyn ItemMatcher>) -> Self {
        Self {
            store,
            presenter,
            matcher,
            shops: DashMap::new(),
            by_location: DashMap::new(),
            by_owner: DashMap::new(),
        }
    }

    /// Build a registry and populate it from the durable store.
    ///
    /// Shops whose world the catalog does not currently know are skipped
    /// with a warning and stay invisible until their world returns; their
    /// rows are untouched.
    pub async fn load(
        store: S,
        presenter: Arc<dyn Presenter>,
        matcher: Arc<dyn ItemMatcher>,
        catalog: &dyn WorldCatalog,
    ) -> Result<Self> {
        let shops = store.load_all().await?;
        let registry = Self::new(store, presenter, matcher);

        let mut restored = 0usize;
        let mut orphaned = 0usize;
        for shop in shops {
            if !catalog.is_available(&shop.location().world) {
                warn!(
                    shop = %shop.id(),
                    world = %shop.location().world,
                    "skipping orphaned shop: world unavailable"
                );
                orphaned += 1;
                continue;
            }
            registry.index_shop(shop);
            restored += 1;
        }

        info!(restored, orphaned, "shops loaded from store");
        Ok(registry)
    }

    /// Open a shop for `owner` at `location`.
    ///
    /// Rejects with `LocationOccupied` when an active shop already holds
    /// the location; the claim is atomic, so two racing creators resolve
    /// to one winner.
    pub async fn create_shop(&self, owner: &Actor, location: Location) -> Result<Shop> {
        let shop = Shop::new(owner.id, owner.name.clone(), location.clone());

        match self.by_location.entry(location.clone()) {
            Entry::Occupied(_) => {
                return Err(ValidationError::LocationOccupied { location }.into());
            }
            Entry::Vacant(vacant) => {
                vacant.insert(shop.id());
            }
        }

        if let Err(e) = self.store.save_shop(&shop).await {
            self.by_location.remove(&location);
            return Err(e);
        }

        self.shops
            .insert(shop.id(), Arc::new(Mutex::new(shop.clone())));
        self.by_owner
            .entry(owner.id)
            .or_default()
            .insert(shop.id());

        self.presenter.notify(Event::ShopCreated {
            owner: owner.id,
            shop: shop.id(),
            coordinates: shop.location().coordinates(),
        });
        Ok(shop)
    }

    /// Snapshot of the shop at `location`, if any.
    pub async fn shop_at_location(&self, location: &Location) -> Option<Shop> {
        let id = self.by_location.get(location).map(|e| *e.value())?;
        self.shop_by_id(id).await
    }

    /// Whether any shop occupies `location`.
    #[must_use]
    pub fn is_location_occupied(&self, location: &Location) -> bool {
        self.by_location.contains_key(location)
    }

    /// Snapshot of the shop with the given id, if registered.
    pub async fn shop_by_id(&self, id: ShopId) -> Option<Shop> {
        let slot = self.slot(id)?;
        let shop = slot.lock().await;
        Some(shop.clone())
    }

    /// Snapshots of every shop `owner` runs.
    pub async fn shops_by_owner(&self, owner: ActorId) -> Vec<Shop> {
        let ids: Vec<ShopId> = match self.by_owner.get(&owner) {
            Some(entry) => entry.value().iter().copied().collect(),
            None => return Vec::new(),
        };

        let mut shops = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(shop) = self.shop_by_id(id).await {
                shops.push(shop);
            }
        }
        shops
    }

    /// Snapshots of every registered shop.
    pub async fn all_shops(&self) -> Vec<Shop> {
        let mut shops = Vec::with_capacity(self.shops.len());
        for slot in self.handles() {
            let shop = slot.lock().await;
            shops.push(shop.clone());
        }
        shops
    }

    /// Remove a shop and settle its contents - remaining stock and the
    /// revenue pool - to `settlement_target` through the oracle.
    ///
    /// Owner-only. The soft delete is persisted before anything moves, so
    /// a store failure leaves the shop fully intact.
    pub async fn remove_shop(
        &self,
        id: ShopId,
        actor: &Actor,
        settlement_target: ActorId,
        oracle: &dyn InventoryOracle,
    ) -> Result<SettlementReport> {
        let slot = self
            .slot(id)
            .ok_or(ValidationError::ShopNotFound { shop: id })?;
        let mut shop = slot.lock().await;
        ensure_owned(&shop, id, actor)?;

        self.store.delete_shop(id).await?;

        let mut report = SettlementReport {
            delivered: 0,
            dropped: 0,
        };
        for listing in shop.items() {
            let stack = listing.as_stack();
            if stack.is_empty() {
                continue;
            }
            let leftover = oracle.grant(settlement_target, &stack.payload, stack.count);
            report.delivered += stack.count - leftover;
            report.dropped += leftover;
        }
        for stack in shop.take_revenue() {
            let leftover = oracle.grant(settlement_target, &stack.payload, stack.count);
            report.delivered += stack.count - leftover;
            report.dropped += leftover;
        }
        shop.set_active(false);

        let owner = shop.owner_id();
        let location = shop.location().clone();
        drop(shop);
        self.deindex(id, &location, owner);

        self.presenter.notify(Event::SettlementDelivered {
            actor: settlement_target,
            delivered: report.delivered,
            dropped: report.dropped,
        });
        self.presenter.notify(Event::ShopRemoved {
            owner,
            shop: id,
            settled: true,
        });
        Ok(report)
    }

    /// Remove a shop without settlement: the owner dropping their own shop
    /// from a management surface, or an administrator clearing someone
    /// else's. Contents are discarded.
    pub async fn force_remove_shop(&self, id: ShopId, actor: &Actor) -> Result<()> {
        let slot = self
            .slot(id)
            .ok_or(ValidationError::ShopNotFound { shop: id })?;
        let mut shop = slot.lock().await;
        ensure_live(&shop, id)?;
        if !shop.is_owner(actor.id) && !actor.admin {
            return Err(ValidationError::PermissionDenied {
                actor: actor.id,
                shop: id,
            }
            .into());
        }

        self.store.delete_shop(id).await?;
        shop.set_active(false);

        let owner = shop.owner_id();
        let location = shop.location().clone();
        drop(shop);
        self.deindex(id, &location, owner);

        self.presenter.notify(Event::ShopRemoved {
            owner,
            shop: id,
            settled: false,
        });
        Ok(())
    }

    /// Add a listing to a shop. Owner-only; the row is persisted before
    /// the in-memory shop changes.
    pub async fn add_listing(&self, shop_id: ShopId, listing: Listing, actor: &Actor) -> Result<()> {
        let slot = self
            .slot(shop_id)
            .ok_or(ValidationError::ShopNotFound { shop: shop_id })?;
        let mut shop = slot.lock().await;
        ensure_owned(&shop, shop_id, actor)?;

        self.store.save_listing(shop_id, &listing).await?;
        shop.add_listing(listing);
        Ok(())
    }

    /// Remove a listing from a shop. Owner-only; soft-deletes the row.
    pub async fn remove_listing(
        &self,
        shop_id: ShopId,
        listing_id: ListingId,
        actor: &Actor,
    ) -> Result<()> {
        let slot = self
            .slot(shop_id)
            .ok_or(ValidationError::ShopNotFound { shop: shop_id })?;
        let mut shop = slot.lock().await;
        ensure_owned(&shop, shop_id, actor)?;

        if shop.listing(listing_id).is_none() {
            return Err(ValidationError::ListingNotFound {
                shop: shop_id,
                listing: listing_id,
            }
            .into());
        }

        self.store.delete_listing(shop_id, listing_id).await?;
        shop.remove_listing(listing_id);
        Ok(())
    }

    /// Flip a listing's availability flag without touching its stock.
    /// Owner-only; the row is persisted before the live shop changes.
    pub async fn set_listing_available(
        &self,
        shop_id: ShopId,
        listing_id: ListingId,
        available: bool,
        actor: &Actor,
    ) -> Result<()> {
        let slot = self
            .slot(shop_id)
            .ok_or(ValidationError::ShopNotFound { shop: shop_id })?;
        let mut shop = slot.lock().await;
        ensure_owned(&shop, shop_id, actor)?;

        let listing = shop
            .listing(listing_id)
            .ok_or(ValidationError::ListingNotFound {
                shop: shop_id,
                listing: listing_id,
            })?;

        let mut updated = listing.clone();
        updated.set_available(available);
        self.store.save_listing(shop_id, &updated).await?;

        if let Some(live) = shop.listing_mut(listing_id) {
            live.set_available(available);
        }
        Ok(())
    }

    /// Hand the accumulated revenue pool to the shop owner. Owner-only;
    /// returns the number of units collected.
    ///
    /// The cleared pool is persisted before the oracle delivers, so a
    /// store failure puts the revenue back untouched.
    pub async fn collect_revenue(
        &self,
        shop_id: ShopId,
        actor: &Actor,
        oracle: &dyn InventoryOracle,
    ) -> Result<u32> {
        let slot = self
            .slot(shop_id)
            .ok_or(ValidationError::ShopNotFound { shop: shop_id })?;
        let mut shop = slot.lock().await;
        ensure_owned(&shop, shop_id, actor)?;

        if !shop.has_revenue() {
            return Err(ValidationError::NoRevenue { shop: shop_id }.into());
        }

        let drained = shop.take_revenue();
        if let Err(e) = self.store.save_shop(&shop).await {
            shop.replace_revenue(drained);
            return Err(e);
        }

        let mut total = 0u32;
        for stack in &drained {
            oracle.grant(actor.id, &stack.payload, stack.count);
            total += stack.count;
        }

        self.presenter.notify(Event::RevenueCollected {
            owner: actor.id,
            total_items: total,
        });
        Ok(total)
    }

    /// Aggregate counters over every registered shop. Full scan, no
    /// caching.
    pub async fn statistics(&self) -> ShopStatistics {
        let mut stats = ShopStatistics {
            total_shops: 0,
            active_shops: 0,
            total_listings: 0,
            total_revenue_items: 0,
        };
        for slot in self.handles() {
            let shop = slot.lock().await;
            stats.total_shops += 1;
            if shop.is_active() {
                stats.active_shops += 1;
            }
            stats.total_listings += shop.items().len();
            stats.total_revenue_items += shop.total_revenue_items();
        }
        stats
    }

    /// Persist every registered shop (shutdown path). Returns the number
    /// saved.
    pub async fn save_all(&self) -> Result<usize> {
        let mut saved = 0usize;
        for slot in self.handles() {
            let shop = slot.lock().await;
            self.store.save_shop(&shop).await?;
            saved += 1;
        }
        info!(saved, "shops saved to store");
        Ok(saved)
    }

    pub(crate) fn slot(&self, id: ShopId) -> Option<Arc<Mutex<Shop>>> {
        self.shops.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    pub(crate) fn handles(&self) -> Vec<Arc<Mutex<Shop>>> {
        self.shops
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn presenter(&self) -> &dyn Presenter {
        self.presenter.as_ref()
    }

    pub(crate) fn matcher(&self) -> &dyn ItemMatcher {
        self.matcher.as_ref()
    }

    fn index_shop(&self, shop: Shop) {
        let id = shop.id();
        self.by_location.insert(shop.location().clone(), id);
        self.by_owner.entry(shop.owner_id()).or_default().insert(id);
        self.shops.insert(id, Arc::new(Mutex::new(shop)));
    }

    fn deindex(&self, id: ShopId, location: &Location, owner: ActorId) {
        self.shops.remove(&id);
        self.by_location.remove(location);
        if let Some(mut entry) = self.by_owner.get_mut(&owner) {
            entry.value_mut().remove(&id);
            let emptied = entry.value().is_empty();
            drop(entry);
            if emptied {
                self.by_owner.remove_if(&owner, |_, ids| ids.is_empty());
            }
        }
    }
}
