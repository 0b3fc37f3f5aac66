//! Presenter port for outcome notifications.
//!
//! The registry reports what happened - purchases, removals, pending
//! revenue - and the presentation layer decides how to render it. Events
//! are side effects, never preconditions: an unreachable owner does not
//! fail a purchase.

use crate::domain::{ActorId, ShopId};

/// Events the marketplace emits toward the presentation layer.
#[derive(Debug, Clone)]
pub enum Event {
    /// A shop was opened.
    ShopCreated {
        owner: ActorId,
        shop: ShopId,
        coordinates: String,
    },
    /// A shop was removed; `settled` tells whether contents were returned.
    ShopRemoved {
        owner: ActorId,
        shop: ShopId,
        settled: bool,
    },
    /// Settlement of a removed shop's contents finished.
    SettlementDelivered {
        actor: ActorId,
        delivered: u32,
        dropped: u32,
    },
    /// A buyer completed a purchase.
    PurchaseCompleted {
        buyer: ActorId,
        shop: ShopId,
        item: String,
        quantity: u32,
        /// Units that did not fit the buyer's inventory.
        leftover: u32,
    },
    /// A shop owner's listing sold (owner-directed signal).
    ListingSold {
        owner: ActorId,
        buyer_name: String,
        item: String,
        quantity: u32,
    },
    /// A listing sold its last unit and was delisted.
    ListingSoldOut { owner: ActorId, item: String },
    /// Revenue is waiting for the owner to collect.
    RevenuePending { owner: ActorId, shop: ShopId },
    /// The owner collected the revenue pool.
    RevenueCollected { owner: ActorId, total_items: u32 },
}

/// Trait for notification handlers.
///
/// Implementations must be thread-safe and return quickly; `notify` is
/// called while a shop's write lock is held, so slow delivery should be
/// offloaded to a task.
pub trait Presenter: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}
