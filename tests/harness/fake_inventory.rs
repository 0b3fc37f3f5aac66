use std::collections::HashMap;
use std::sync::Mutex;

use tradepost::domain::{ActorId, ItemPayload};
use tradepost::ports::InventoryOracle;

/// In-memory inventory oracle for tests: per-actor holdings keyed by exact
/// payload, with an optional total-capacity cap to exercise leftover
/// handling.
#[derive(Default)]
pub struct FakeInventory {
    holdings: Mutex<HashMap<ActorId, HashMap<ItemPayload, u32>>>,
    capacity: Mutex<HashMap<ActorId, u32>>,
}

impl FakeInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give an actor `count` units of `payload`.
    pub fn stock(&self, actor: ActorId, payload: &ItemPayload, count: u32) {
        let mut holdings = self.holdings.lock().expect("lock holdings");
        *holdings
            .entry(actor)
            .or_default()
            .entry(payload.clone())
            .or_insert(0) += count;
    }

    /// How many units of `payload` the actor currently holds.
    pub fn count(&self, actor: ActorId, payload: &ItemPayload) -> u32 {
        self.holdings
            .lock()
            .expect("lock holdings")
            .get(&actor)
            .and_then(|items| items.get(payload))
            .copied()
            .unwrap_or(0)
    }

    /// Cap the actor's total holdings; grants beyond the cap spill over as
    /// leftover.
    pub fn limit_capacity(&self, actor: ActorId, max_total: u32) {
        self.capacity
            .lock()
            .expect("lock capacity")
            .insert(actor, max_total);
    }

    fn total(&self, actor: ActorId) -> u32 {
        self.holdings
            .lock()
            .expect("lock holdings")
            .get(&actor)
            .map(|items| items.values().sum())
            .unwrap_or(0)
    }
}

impl InventoryOracle for FakeInventory {
    fn has_at_least(&self, actor: ActorId, payload: &ItemPayload, count: u32) -> bool {
        self.count(actor, payload) >= count
    }

    fn remove(&self, actor: ActorId, payload: &ItemPayload, count: u32) -> bool {
        let mut holdings = self.holdings.lock().expect("lock holdings");
        let Some(items) = holdings.get_mut(&actor) else {
            return count == 0;
        };
        match items.get_mut(payload) {
            Some(held) if *held >= count => {
                *held -= count;
                if *held == 0 {
                    items.remove(payload);
                }
                true
            }
            _ => count == 0,
        }
    }

    fn grant(&self, actor: ActorId, payload: &ItemPayload, count: u32) -> u32 {
        let free = match self.capacity.lock().expect("lock capacity").get(&actor) {
            Some(max) => max.saturating_sub(self.total(actor)),
            None => u32::MAX,
        };
        let accepted = free.min(count);
        if accepted > 0 {
            self.stock(actor, payload, accepted);
        }
        count - accepted
    }
}
