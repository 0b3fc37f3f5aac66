//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shop identifier - newtype for type safety.
///
/// Generated as UUID v4 for new shops, or reconstructed from persisted rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShopId(Uuid);

impl ShopId {
    /// Create a new `ShopId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ShopId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ShopId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Listing identifier - newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Create a new `ListingId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ListingId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Actor identifier: a shop owner, a buyer, or an administrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Uuid);

impl ActorId {
    /// Create a new `ActorId` with a generated UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ActorId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// An acting party as seen by the registry: identity, display name and
/// whether the platform granted it administrative rights.
///
/// Permission checks compare `id` against a shop's owner; `admin` only
/// widens force-removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub admin: bool,
}

impl Actor {
    /// Create a regular (non-admin) actor with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            admin: false,
        }
    }

    /// Create an administrator with a fresh id.
    pub fn administrator(name: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            admin: true,
        }
    }
}
