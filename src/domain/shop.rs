//! The shop aggregate: an owned, located collection of listings plus the
//! revenue pool accumulated from sales.
//!
//! All mutation goes through methods so `last_updated` stays monotonically
//! non-decreasing and is bumped on every change - listing add/remove,
//! active toggle and revenue movement alike.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ActorId, ListingId, ShopId};
use super::listing::Listing;
use super::location::Location;
use super::matcher::ItemMatcher;
use super::payload::ItemStack;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    id: ShopId,
    owner_id: ActorId,
    owner_name: String,
    location: Location,
    items: Vec<Listing>,
    revenue: Vec<ItemStack>,
    active: bool,
    created_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
}

impl Shop {
    /// Open a new, active, empty shop at `location`.
    pub fn new(owner_id: ActorId, owner_name: impl Into<String>, location: Location) -> Self {
        let now = Utc::now();
        Self {
            id: ShopId::new(),
            owner_id,
            owner_name: owner_name.into(),
            location,
            items: Vec::new(),
            revenue: Vec::new(),
            active: true,
            created_at: now,
            last_updated: now,
        }
    }

    /// Reconstruct a shop from persisted state.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: ShopId,
        owner_id: ActorId,
        owner_name: String,
        location: Location,
        items: Vec<Listing>,
        revenue: Vec<ItemStack>,
        active: bool,
        created_at: DateTime<Utc>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            owner_name,
            location,
            items,
            revenue,
            active,
            created_at,
            last_updated,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ShopId {
        self.id
    }

    #[must_use]
    pub const fn owner_id(&self) -> ActorId {
        self.owner_id
    }

    #[must_use]
    pub fn owner_name(&self) -> &str {
        &self.owner_name
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    #[must_use]
    pub fn revenue(&self) -> &[ItemStack] {
        &self.revenue
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    #[must_use]
    pub fn is_owner(&self, actor: ActorId) -> bool {
        self.owner_id == actor
    }

    /// Look up a listing by id.
    #[must_use]
    pub fn listing(&self, id: ListingId) -> Option<&Listing> {
        self.items.iter().find(|l| l.id() == id)
    }

    pub(crate) fn listing_mut(&mut self, id: ListingId) -> Option<&mut Listing> {
        self.items.iter_mut().find(|l| l.id() == id)
    }

    /// Append a listing to the shop.
    pub fn add_listing(&mut self, listing: Listing) {
        self.items.push(listing);
        self.touch();
    }

    /// Remove a listing, returning it when present.
    pub fn remove_listing(&mut self, id: ListingId) -> Option<Listing> {
        let index = self.items.iter().position(|l| l.id() == id)?;
        let listing = self.items.remove(index);
        self.touch();
        Some(listing)
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.touch();
    }

    /// Remove `amount` units of stock from a listing, bumping
    /// `last_updated` on success.
    pub fn reduce_stock(
        &mut self,
        id: ListingId,
        amount: u32,
    ) -> Result<u32, super::error::ValidationError> {
        let shop_id = self.id;
        let listing = self
            .listing_mut(id)
            .ok_or(super::error::ValidationError::ListingNotFound {
                shop: shop_id,
                listing: id,
            })?;
        listing.reduce_stock(amount)?;
        let remaining = listing.quantity();
        self.touch();
        Ok(remaining)
    }

    /// Merge payment stacks into the revenue pool.
    ///
    /// Existing similar stacks are filled up to their payload's stack
    /// capacity first; whatever remains of an incoming stack is appended as
    /// a new stack. Empty incoming stacks are ignored.
    pub fn merge_revenue(&mut self, payment: Vec<ItemStack>, matcher: &dyn ItemMatcher) {
        let mut changed = false;
        for mut incoming in payment {
            if incoming.is_empty() {
                continue;
            }
            for existing in &mut self.revenue {
                if incoming.count == 0 {
                    break;
                }
                if !matcher.similar(&existing.payload, &incoming.payload) {
                    continue;
                }
                let capacity = existing.payload.max_stack().saturating_sub(existing.count);
                let moved = capacity.min(incoming.count);
                existing.count += moved;
                incoming.count -= moved;
            }
            if incoming.count > 0 {
                self.revenue.push(incoming);
            }
            changed = true;
        }
        if changed {
            self.touch();
        }
    }

    /// Drain the whole revenue pool, bumping `last_updated`.
    pub fn take_revenue(&mut self) -> Vec<ItemStack> {
        let drained = std::mem::take(&mut self.revenue);
        if !drained.is_empty() {
            self.touch();
        }
        drained
    }

    /// Replace the revenue pool wholesale (purchase rollback).
    pub(crate) fn replace_revenue(&mut self, revenue: Vec<ItemStack>) {
        self.revenue = revenue;
        self.touch();
    }

    #[must_use]
    pub fn has_revenue(&self) -> bool {
        !self.revenue.is_empty()
    }

    /// Total units across all revenue stacks, regardless of how they are
    /// split.
    #[must_use]
    pub fn total_revenue_items(&self) -> u32 {
        self.revenue.iter().map(|s| s.count).sum()
    }

    /// Bump `last_updated`, keeping it monotonically non-decreasing even if
    /// the wall clock steps backwards.
    fn touch(&mut self) {
        self.last_updated = self.last_updated.max(Utc::now());
    }
}
