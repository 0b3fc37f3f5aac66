//! Domain validation errors.
//!
//! Every rejected operation names *why* it was rejected - stock, funds,
//! permission or resolution - and guarantees zero side effects on the shop,
//! the buyer's inventory and the durable store.

use thiserror::Error;

use super::id::{ActorId, ListingId, ShopId};
use super::location::Location;

/// Errors that occur when a request violates a domain rule.
///
/// Validation failures are local and cheap: they are raised before any
/// mutation and never leave partial state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Another active shop already occupies the requested location.
    #[error("location {location} is already occupied by an active shop")]
    LocationOccupied {
        /// The contested location.
        location: Location,
    },

    /// The actor is not allowed to perform this operation on the shop.
    #[error("actor {actor} has no permission over shop {shop}")]
    PermissionDenied { actor: ActorId, shop: ShopId },

    /// No shop with the given id is registered.
    #[error("shop {shop} not found")]
    ShopNotFound { shop: ShopId },

    /// The shop holds no listing with the given id.
    #[error("listing {listing} not found in shop {shop}")]
    ListingNotFound { shop: ShopId, listing: ListingId },

    /// The listing exists but is not for sale (delisted or out of stock).
    #[error("listing {listing} is not available for purchase")]
    ListingUnavailable { listing: ListingId },

    /// Requested more units than the listing has in stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The buyer does not hold enough of a price component.
    #[error("insufficient funds: needs {needed} x {item}")]
    InsufficientFunds {
        /// Display label of the missing price component.
        item: String,
        /// Total units of that component the purchase requires.
        needed: u32,
    },

    /// Purchase quantities must be strictly positive.
    #[error("quantity must be positive, got {quantity}")]
    NonPositiveQuantity { quantity: u32 },

    /// Revenue collection on an empty pool.
    #[error("shop {shop} has no revenue to collect")]
    NoRevenue { shop: ShopId },
}
