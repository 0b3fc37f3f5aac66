//! A single listing: one sellable offer inside a shop.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::id::ListingId;
use super::payload::{ItemPayload, ItemStack};
use super::price::PriceVector;

/// One offer in a shop: a payload template, remaining stock, the price of
/// one unit, a free-form description and an availability flag.
///
/// `quantity` can never go negative; stock changes go through
/// [`reduce_stock`](Self::reduce_stock) / [`add_stock`](Self::add_stock).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    id: ListingId,
    payload: ItemPayload,
    quantity: u32,
    price: PriceVector,
    description: String,
    available: bool,
}

impl Listing {
    /// List `quantity` units of `payload` at `price` per unit.
    pub fn new(payload: ItemPayload, quantity: u32, price: PriceVector) -> Self {
        Self {
            id: ListingId::new(),
            payload,
            quantity,
            price,
            description: String::new(),
            available: true,
        }
    }

    /// Attach a seller-provided description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Reconstruct a listing from persisted state.
    pub fn restore(
        id: ListingId,
        payload: ItemPayload,
        quantity: u32,
        price: PriceVector,
        description: String,
        available: bool,
    ) -> Self {
        Self {
            id,
            payload,
            quantity,
            price,
            description,
            available,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ListingId {
        self.id
    }

    #[must_use]
    pub fn payload(&self) -> &ItemPayload {
        &self.payload
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn price(&self) -> &PriceVector {
        &self.price
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// The raw availability flag, ignoring stock.
    #[must_use]
    pub const fn available_flag(&self) -> bool {
        self.available
    }

    /// Whether the listing can currently be bought: flagged available and
    /// at least one unit in stock.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.available && self.quantity > 0
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Remove `amount` units from stock.
    ///
    /// Rejects with `InsufficientStock` when the listing holds fewer than
    /// `amount` units; stock is left untouched in that case.
    pub fn reduce_stock(&mut self, amount: u32) -> Result<(), ValidationError> {
        if self.quantity < amount {
            return Err(ValidationError::InsufficientStock {
                requested: amount,
                available: self.quantity,
            });
        }
        self.quantity -= amount;
        Ok(())
    }

    /// Return `amount` units to stock (restock or purchase rollback).
    pub fn add_stock(&mut self, amount: u32) {
        self.quantity += amount;
    }

    /// The whole remaining stock as one stack, used when settling a removed
    /// shop back to its owner.
    #[must_use]
    pub fn as_stack(&self) -> ItemStack {
        ItemStack::new(self.payload.clone(), self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(quantity: u32) -> Listing {
        Listing::new(
            ItemPayload::new("emerald"),
            quantity,
            PriceVector::new(vec![ItemStack::new(ItemPayload::new("stone"), 2)]),
        )
    }

    #[test]
    fn availability_needs_flag_and_stock() {
        let mut l = listing(3);
        assert!(l.is_available());

        l.set_available(false);
        assert!(!l.is_available());

        l.set_available(true);
        l.reduce_stock(3).unwrap();
        assert!(!l.is_available());
        assert!(l.available_flag());
    }

    #[test]
    fn reduce_stock_rejects_overdraw() {
        let mut l = listing(2);
        let err = l.reduce_stock(3).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InsufficientStock {
                requested: 3,
                available: 2
            }
        );
        assert_eq!(l.quantity(), 2);
    }

    #[test]
    fn add_stock_restores_availability() {
        let mut l = listing(1);
        l.reduce_stock(1).unwrap();
        assert!(!l.is_available());
        l.add_stock(4);
        assert!(l.is_available());
        assert_eq!(l.quantity(), 4);
    }

    #[test]
    fn as_stack_reflects_remaining_stock() {
        let mut l = listing(5);
        l.reduce_stock(2).unwrap();
        let stack = l.as_stack();
        assert_eq!(stack.count, 3);
        assert_eq!(stack.payload.kind(), "emerald");
    }

    #[test]
    fn description_detection_ignores_whitespace() {
        let l = listing(1).with_description("   ");
        assert!(!l.has_description());
        let l = listing(1).with_description("bulk discount on fridays");
        assert!(l.has_description());
    }
}
