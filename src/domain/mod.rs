//! Platform-agnostic marketplace types: shops, listings, payloads, prices.

pub mod error;
pub mod id;
pub mod listing;
pub mod location;
pub mod matcher;
pub mod payload;
pub mod price;
pub mod shop;

pub use error::ValidationError;
pub use id::{Actor, ActorId, ListingId, ShopId};
pub use listing::Listing;
pub use location::{Location, WorldId};
pub use matcher::{ExactMatcher, ItemMatcher};
pub use payload::{ItemPayload, ItemStack, DEFAULT_MAX_STACK};
pub use price::{PriceSlots, PriceVector, PRICE_SLOT_COUNT};
pub use shop::Shop;
