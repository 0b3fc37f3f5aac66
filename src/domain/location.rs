//! Shop locations: a world plus integer block coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// World identifier - newtype for type safety.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(String);

impl WorldId {
    /// Create a new `WorldId` from a string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the world name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WorldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WorldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A fixed position a shop occupies. At most one active shop may hold a
/// location at any time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub world: WorldId,
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Location {
    /// Create a location in `world` at block coordinates `(x, y, z)`.
    pub fn new(world: impl Into<WorldId>, x: i32, y: i32, z: i32) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
        }
    }

    /// Coordinates formatted for user-facing messages: `(x, y, z)`.
    #[must_use]
    pub fn coordinates(&self) -> String {
        format!("({}, {}, {})", self.x, self.y, self.z)
    }

    /// Euclidean distance to another location, or `None` when the two lie
    /// in different worlds.
    #[must_use]
    pub fn distance_from(&self, other: &Location) -> Option<f64> {
        if self.world != other.world {
            return None;
        }
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        let dz = f64::from(self.z - other.z);
        Some((dx * dx + dy * dy + dz * dz).sqrt())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.world, self.coordinates())
    }
}
