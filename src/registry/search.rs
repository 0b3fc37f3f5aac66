//! Marketplace search over the live registry.
//!
//! Filters compose: item name fragment, seller name fragment, an origin
//! location with an optional radius. Hits are sorted nearest-first; when
//! an origin is given, shops in other worlds are excluded.

use std::cmp::Ordering;

use crate::domain::{Listing, ListingId, Location, Shop, ShopId};
use crate::ports::ShopStore;

use super::ShopRegistry;

/// A composable search request.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    /// Case-insensitive fragment of the item's display label or kind tag.
    pub name: Option<String>,
    /// Case-insensitive fragment of the seller's name.
    pub seller: Option<String>,
    /// Where the searcher stands; enables distance sorting and filtering.
    pub origin: Option<Location>,
    /// Maximum distance from `origin`; ignored without an origin.
    pub max_distance: Option<f64>,
}

impl SearchQuery {
    /// Match listings whose item name contains `fragment`.
    pub fn by_name(fragment: impl Into<String>) -> Self {
        Self {
            name: Some(fragment.into()),
            ..Self::default()
        }
    }

    /// Match shops whose seller name contains `fragment`.
    pub fn by_seller(fragment: impl Into<String>) -> Self {
        Self {
            seller: Some(fragment.into()),
            ..Self::default()
        }
    }

    /// Restrict and sort by distance from `origin`.
    #[must_use]
    pub fn near(mut self, origin: Location) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Cap the distance from the origin.
    #[must_use]
    pub fn within(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    fn matches_seller(&self, shop: &Shop) -> bool {
        match &self.seller {
            Some(fragment) => shop
                .owner_name()
                .to_lowercase()
                .contains(&fragment.to_lowercase()),
            None => true,
        }
    }

    fn matches_listing(&self, listing: &Listing) -> bool {
        match &self.name {
            Some(fragment) => {
                let fragment = fragment.to_lowercase();
                listing
                    .payload()
                    .display_label()
                    .to_lowercase()
                    .contains(&fragment)
                    || listing.payload().kind().to_lowercase().contains(&fragment)
            }
            None => true,
        }
    }

    /// Distance from the origin, or `Err(())` when the shop is filtered
    /// out on location grounds.
    fn distance_to(&self, shop: &Shop) -> Result<Option<f64>, ()> {
        let Some(origin) = &self.origin else {
            return Ok(None);
        };
        match shop.location().distance_from(origin) {
            // Other world: out of reach for a located searcher.
            None => Err(()),
            Some(d) => match self.max_distance {
                Some(max) if d > max => Err(()),
                _ => Ok(Some(d)),
            },
        }
    }
}

/// One matching listing, flattened for presentation.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub shop: ShopId,
    pub owner_name: String,
    pub location: Location,
    pub listing: ListingId,
    /// Item display label.
    pub item: String,
    pub quantity: u32,
    /// Formatted price, e.g. `"2x stone"` or `"Free"`.
    pub price: String,
    /// Distance from the query origin, when one was given.
    pub distance: Option<f64>,
}

impl<S: ShopStore> ShopRegistry<S> {
    /// Search every active shop's available listings.
    pub async fn search(&self, query: &SearchQuery) -> Vec<SearchHit> {
        let mut hits = Vec::new();

        for slot in self.handles() {
            let shop = slot.lock().await;
            if !shop.is_active() || !query.matches_seller(&shop) {
                continue;
            }
            let Ok(distance) = query.distance_to(&shop) else {
                continue;
            };

            for listing in shop.items() {
                if !listing.is_available() || !query.matches_listing(listing) {
                    continue;
                }
                hits.push(SearchHit {
                    shop: shop.id(),
                    owner_name: shop.owner_name().to_string(),
                    location: shop.location().clone(),
                    listing: listing.id(),
                    item: listing.payload().display_label(),
                    quantity: listing.quantity(),
                    price: listing.price().to_string(),
                    distance,
                });
            }
        }

        hits.sort_by(|a, b| match (a.distance, b.distance) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.item.cmp(&b.item),
        });
        hits
    }
}
