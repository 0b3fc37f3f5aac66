//! World catalog port.
//!
//! A shop's location references a world that may not currently exist (an
//! unloaded dimension, a renamed map). On reload the registry consults the
//! catalog and quarantines shops whose world is gone - "orphaned shops" -
//! instead of surfacing them to users.

use crate::domain::WorldId;

/// Which worlds currently exist.
pub trait WorldCatalog: Send + Sync {
    /// Is `world` currently available?
    fn is_available(&self, world: &WorldId) -> bool;
}

/// Catalog that accepts every world. Useful for platforms with a single
/// static world and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllWorlds;

impl WorldCatalog for AllWorlds {
    fn is_available(&self, _world: &WorldId) -> bool {
        true
    }
}
