//! Presenter adapter that writes outcomes to the operator log.
//!
//! Headless deployments (the CLI, batch maintenance) have no chat surface
//! to deliver to; events still land somewhere an operator can see them.

use tracing::info;

use crate::ports::{Event, Presenter};

/// Presenter that logs every event at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn notify(&self, event: Event) {
        match event {
            Event::ShopCreated {
                owner,
                shop,
                coordinates,
            } => info!(%owner, %shop, %coordinates, "shop created"),
            Event::ShopRemoved {
                owner,
                shop,
                settled,
            } => info!(%owner, %shop, settled, "shop removed"),
            Event::SettlementDelivered {
                actor,
                delivered,
                dropped,
            } => info!(%actor, delivered, dropped, "settlement delivered"),
            Event::PurchaseCompleted {
                buyer,
                shop,
                item,
                quantity,
                leftover,
            } => info!(%buyer, %shop, %item, quantity, leftover, "purchase completed"),
            Event::ListingSold {
                owner,
                buyer_name,
                item,
                quantity,
            } => info!(%owner, %buyer_name, %item, quantity, "listing sold"),
            Event::ListingSoldOut { owner, item } => {
                info!(%owner, %item, "listing sold out");
            }
            Event::RevenuePending { owner, shop } => {
                info!(%owner, %shop, "revenue waiting for collection");
            }
            Event::RevenueCollected { owner, total_items } => {
                info!(%owner, total_items, "revenue collected");
            }
        }
    }
}
