//! Ports: the traits the transaction core consumes and the events it emits.

pub mod inventory;
pub mod presenter;
pub mod store;
pub mod worlds;

pub use inventory::InventoryOracle;
pub use presenter::{Event, Presenter};
pub use store::ShopStore;
pub use worlds::{AllWorlds, WorldCatalog};

// Similarity is a domain capability; re-exported here because platforms
// plug their own matcher in alongside the other ports.
pub use crate::domain::matcher::{ExactMatcher, ItemMatcher};
