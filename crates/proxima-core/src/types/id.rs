//! Identifiers for catalog items and interaction matrix rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog item.
///
/// An item id is the position of the item's feature vector in the sequence a
/// spatial index was built from, and the column of the item in the
/// interaction matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(usize);

impl ItemId {
    /// Create a new `ItemId` from a catalog position.
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the raw catalog position.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl From<usize> for ItemId {
    fn from(id: usize) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A row of the interaction matrix owned by exactly one registered user.
///
/// Slots are handed out sequentially from zero and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserSlot(usize);

impl UserSlot {
    /// Create a new `UserSlot` from a row index.
    #[must_use]
    pub const fn new(row: usize) -> Self {
        Self(row)
    }

    /// Get the raw row index.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for UserSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
