//! Item payloads and counted stacks.
//!
//! An [`ItemPayload`] describes *what kind* of item something is - a kind tag
//! plus the decorative metadata the hosting platform attaches to it -
//! independent of any quantity. An [`ItemStack`] pairs a payload with a
//! count; price vectors and revenue pools are built from stacks.
//!
//! The transaction core never inspects payload internals beyond equality:
//! similarity between stacks is decided by a pluggable
//! [`ItemMatcher`](super::matcher::ItemMatcher).

use serde::{Deserialize, Serialize};

/// Default stack capacity when the platform does not specify one.
pub const DEFAULT_MAX_STACK: u32 = 64;

/// An opaque, comparable descriptor of one kind of tradeable item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemPayload {
    kind: String,
    display_name: Option<String>,
    lore: Vec<String>,
    max_stack: u32,
}

impl ItemPayload {
    /// Create a payload for a plain item kind with default stack capacity.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            display_name: None,
            lore: Vec::new(),
            max_stack: DEFAULT_MAX_STACK,
        }
    }

    /// Attach a custom display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Attach lore lines (decorative description metadata).
    #[must_use]
    pub fn with_lore(mut self, lore: Vec<String>) -> Self {
        self.lore = lore;
        self
    }

    /// Override the stack capacity used when merging revenue stacks.
    #[must_use]
    pub fn with_max_stack(mut self, max_stack: u32) -> Self {
        self.max_stack = max_stack.max(1);
        self
    }

    /// The platform kind tag, e.g. `"stone"` or `"iron_ingot"`.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// The custom display name, if any.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Decorative lore lines.
    #[must_use]
    pub fn lore(&self) -> &[String] {
        &self.lore
    }

    /// Maximum units a single stack of this payload holds.
    #[must_use]
    pub const fn max_stack(&self) -> u32 {
        self.max_stack
    }

    /// Human-readable label: the display name when set, otherwise the kind
    /// tag with underscores spaced out.
    #[must_use]
    pub fn display_label(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => self.kind.replace('_', " "),
        }
    }
}

/// A counted stack of one payload, used in price vectors and revenue pools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub payload: ItemPayload,
    pub count: u32,
}

impl ItemStack {
    /// Create a stack of `count` units of `payload`.
    pub fn new(payload: ItemPayload, count: u32) -> Self {
        Self { payload, count }
    }

    /// A copy of this stack with a different count.
    #[must_use]
    pub fn with_count(&self, count: u32) -> Self {
        Self {
            payload: self.payload.clone(),
            count,
        }
    }

    /// `count == 0`.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}
