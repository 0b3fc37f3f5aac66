//! Purchase execution: the all-or-nothing heart of the marketplace.
//!
//! A purchase runs entirely under the shop's write lock, which serializes
//! concurrent buyers against the same listing: of two buyers racing for
//! the last unit, exactly one wins and the other gets a validation
//! rejection. Ordering inside the critical section:
//!
//! 1. validate stock, availability, affordability - zero side effects on
//!    any failure;
//! 2. take the scaled payment from the buyer (reversible via re-grant);
//! 3. merge the payment into the revenue pool;
//! 4. persist the listing delta and the shop row - a store failure here
//!    rolls back revenue and stock and refunds the buyer;
//! 5. only then hand the goods to the buyer and notify.
//!
//! The buyer's goods are granted after persistence on purpose: refunding
//! a payment is always possible, clawing delivered goods back is not.

use crate::domain::{Actor, ItemPayload, ItemStack, ListingId, ShopId, ValidationError};
use crate::error::Result;
use crate::ports::{Event, InventoryOracle, ShopStore};
use tracing::error;

use super::ShopRegistry;

/// What a completed purchase moved.
#[derive(Debug, Clone)]
pub struct PurchaseReceipt {
    pub shop: ShopId,
    pub listing: ListingId,
    /// What the buyer received.
    pub payload: ItemPayload,
    pub quantity: u32,
    /// The scaled payment taken from the buyer.
    pub payment: Vec<ItemStack>,
    /// Purchased units that did not fit the buyer's inventory.
    pub leftover: u32,
    /// The purchase drained the listing and delisted it.
    pub sold_out: bool,
}

impl<S: ShopStore> ShopRegistry<S> {
    /// Buy `quantity` units of a listing for `buyer`.
    ///
    /// Validation failures abort with zero side effects; persistence
    /// failures roll the in-memory mutation back and refund the payment.
    pub async fn purchase(
        &self,
        buyer: &Actor,
        shop_id: ShopId,
        listing_id: ListingId,
        quantity: u32,
        oracle: &dyn InventoryOracle,
    ) -> Result<PurchaseReceipt> {
        if quantity == 0 {
            return Err(ValidationError::NonPositiveQuantity { quantity }.into());
        }

        let slot = self
            .slot(shop_id)
            .ok_or(ValidationError::ShopNotFound { shop: shop_id })?;
        let mut shop = slot.lock().await;
        super::ensure_live(&shop, shop_id)?;

        let listing = shop
            .listing(listing_id)
            .ok_or(ValidationError::ListingNotFound {
                shop: shop_id,
                listing: listing_id,
            })?
            .clone();

        if !listing.is_available() {
            return Err(ValidationError::ListingUnavailable {
                listing: listing_id,
            }
            .into());
        }
        if listing.quantity() < quantity {
            return Err(ValidationError::InsufficientStock {
                requested: quantity,
                available: listing.quantity(),
            }
            .into());
        }

        let payment = listing.price().scaled(quantity);
        for component in &payment {
            if !oracle.has_at_least(buyer.id, &component.payload, component.count) {
                return Err(insufficient(component).into());
            }
        }

        // Take payment all-or-nothing: a concurrent inventory change can
        // still fail a removal, in which case earlier components go back.
        let mut taken: Vec<&ItemStack> = Vec::with_capacity(payment.len());
        for component in &payment {
            if !oracle.remove(buyer.id, &component.payload, component.count) {
                for done in taken {
                    oracle.grant(buyer.id, &done.payload, done.count);
                }
                return Err(insufficient(component).into());
            }
            taken.push(component);
        }

        // In-memory revenue first; listing stock is applied only after the
        // rows are safely down.
        let revenue_before = shop.revenue().to_vec();
        shop.merge_revenue(payment.clone(), self.matcher());

        let mut updated = listing.clone();
        updated.reduce_stock(quantity)?;
        let sold_out = updated.quantity() == 0;

        let listing_persist = if sold_out {
            self.store()
                .delete_listing(shop_id, listing_id)
                .await
                .map(|_| ())
        } else {
            self.store().save_listing(shop_id, &updated).await
        };
        if let Err(e) = listing_persist {
            shop.replace_revenue(revenue_before);
            refund(oracle, buyer, &payment);
            return Err(e);
        }

        if let Err(e) = self.store().save_shop(&shop).await {
            shop.replace_revenue(revenue_before);
            refund(oracle, buyer, &payment);
            // Best effort: put the listing row back the way it was.
            if let Err(undo) = self.store().save_listing(shop_id, &listing).await {
                error!(
                    shop = %shop_id,
                    listing = %listing_id,
                    error = %undo,
                    "failed to restore listing row after shop persist failure"
                );
            }
            return Err(e);
        }

        // Durable; apply the stock change to the live shop.
        if sold_out {
            shop.remove_listing(listing_id);
        } else {
            shop.reduce_stock(listing_id, quantity)?;
        }

        let leftover = oracle.grant(buyer.id, listing.payload(), quantity);
        let owner = shop.owner_id();
        let item = listing.payload().display_label();

        self.presenter().notify(Event::PurchaseCompleted {
            buyer: buyer.id,
            shop: shop_id,
            item: item.clone(),
            quantity,
            leftover,
        });
        self.presenter().notify(Event::ListingSold {
            owner,
            buyer_name: buyer.name.clone(),
            item: item.clone(),
            quantity,
        });
        if sold_out {
            self.presenter()
                .notify(Event::ListingSoldOut { owner, item });
        }
        self.presenter().notify(Event::RevenuePending {
            owner,
            shop: shop_id,
        });

        Ok(PurchaseReceipt {
            shop: shop_id,
            listing: listing_id,
            payload: listing.payload().clone(),
            quantity,
            payment,
            leftover,
            sold_out,
        })
    }
}

fn insufficient(component: &ItemStack) -> ValidationError {
    ValidationError::InsufficientFunds {
        item: component.payload.display_label(),
        needed: component.count,
    }
}

fn refund(oracle: &dyn InventoryOracle, buyer: &Actor, payment: &[ItemStack]) {
    for stack in payment {
        oracle.grant(buyer.id, &stack.payload, stack.count);
    }
}
