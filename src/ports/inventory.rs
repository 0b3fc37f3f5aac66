//! Inventory oracle port.
//!
//! The oracle is the external capability that holds and mutates an actor's
//! actual item holdings. The transaction core never scans inventories
//! itself; it asks the oracle, and it does so inside the same locked
//! section as the stock/revenue mutation so the all-or-nothing contract
//! holds.

use crate::domain::{ActorId, ItemPayload};

/// Access to an actor's item holdings.
///
/// Implementations must be thread-safe and independently safe per actor;
/// the core serializes calls per shop, not per oracle.
pub trait InventoryOracle: Send + Sync {
    /// Does `actor` hold at least `count` items similar to `payload`?
    fn has_at_least(&self, actor: ActorId, payload: &ItemPayload, count: u32) -> bool;

    /// Remove exactly `count` items similar to `payload` from `actor`.
    ///
    /// All-or-nothing: returns `false` and removes nothing when the actor
    /// holds fewer than `count`.
    fn remove(&self, actor: ActorId, payload: &ItemPayload, count: u32) -> bool;

    /// Give `count` units of `payload` to `actor`, returning the leftover
    /// that did not fit. The caller decides what happens to leftover
    /// (typically the platform drops it at the actor's feet).
    fn grant(&self, actor: ActorId, payload: &ItemPayload, count: u32) -> u32;
}
