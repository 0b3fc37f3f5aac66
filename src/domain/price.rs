//! Price vectors: what one unit of a listing costs.
//!
//! A price is a list of `(payload, count)` stacks that must all be paid
//! together. An empty vector means the listing is free. Presentation layers
//! that offer a fixed grid of price slots build a [`PriceSlots`] and
//! normalize it into a [`PriceVector`] before it ever reaches the core.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::payload::ItemStack;

/// Number of price slots a presentation grid exposes.
pub const PRICE_SLOT_COUNT: usize = 8;

/// The cost of one unit of a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceVector(Vec<ItemStack>);

impl PriceVector {
    /// Build a price from components, dropping empty stacks.
    pub fn new(components: Vec<ItemStack>) -> Self {
        Self(components.into_iter().filter(|s| !s.is_empty()).collect())
    }

    /// A price with no components: the listing is free.
    #[must_use]
    pub fn free() -> Self {
        Self(Vec::new())
    }

    /// The price components, in listing order.
    #[must_use]
    pub fn components(&self) -> &[ItemStack] {
        &self.0
    }

    /// True when nothing has to be paid.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.0.is_empty()
    }

    /// The payment owed for `quantity` units: every component scaled by
    /// `quantity`.
    #[must_use]
    pub fn scaled(&self, quantity: u32) -> Vec<ItemStack> {
        self.0
            .iter()
            .map(|c| c.with_count(c.count * quantity))
            .collect()
    }
}

impl fmt::Display for PriceVector {
    /// User-facing form: `"2x stone + 1x iron ingot"`, or `"Free"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "Free");
        }
        for (i, component) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(
                f,
                "{}x {}",
                component.count,
                component.payload.display_label()
            )?;
        }
        Ok(())
    }
}

/// A fixed-size grid of optional price components, mirroring the sparse
/// slot layout a presentation layer works with. Unset and emptied slots are
/// compacted away by [`normalize`](Self::normalize).
#[derive(Debug, Clone, Default)]
pub struct PriceSlots {
    slots: [Option<ItemStack>; PRICE_SLOT_COUNT],
}

impl PriceSlots {
    /// An empty slot grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a stack into a slot, replacing whatever was there.
    ///
    /// Out-of-range indices are ignored; the grid is exactly
    /// [`PRICE_SLOT_COUNT`] wide.
    pub fn set(&mut self, index: usize, stack: ItemStack) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Some(stack);
        }
    }

    /// Empty a slot.
    pub fn clear(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Compact the grid into a dense price vector, dropping empty slots and
    /// zero-count stacks.
    #[must_use]
    pub fn normalize(&self) -> PriceVector {
        PriceVector::new(self.slots.iter().flatten().cloned().collect())
    }
}
