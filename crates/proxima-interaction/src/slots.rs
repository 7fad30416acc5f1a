//! Assignment of external user ids to matrix rows.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use proxima_core::UserSlot;

/// Result of registering a user.
///
/// `CapacityExceeded` is a soft failure: nothing changed and the store keeps
/// serving every other request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Registration {
    /// The user was unregistered and now owns this slot.
    Assigned(UserSlot),
    /// The user already owned this slot; nothing changed.
    AlreadyRegistered(UserSlot),
    /// Every slot is taken; the user stays unregistered.
    CapacityExceeded,
}

impl Registration {
    /// The user's slot, unless registration was refused.
    #[must_use]
    pub const fn slot(self) -> Option<UserSlot> {
        match self {
            Self::Assigned(slot) | Self::AlreadyRegistered(slot) => Some(slot),
            Self::CapacityExceeded => None,
        }
    }

    /// Whether registration was refused.
    #[must_use]
    pub const fn is_capacity_exceeded(self) -> bool {
        matches!(self, Self::CapacityExceeded)
    }
}

/// Bounded, append-only map from user id to [`UserSlot`].
///
/// Slots are handed out sequentially from zero. Once assigned, a slot
/// belongs to its user for the life of the map: there is no removal, so a
/// slot is never reused.
#[derive(Debug, Clone)]
pub struct SlotMap<U> {
    capacity: usize,
    slots: HashMap<U, UserSlot>,
}

impl<U: Eq + Hash> SlotMap<U> {
    /// Create an empty map with room for `capacity` users.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { capacity, slots: HashMap::with_capacity(capacity) }
    }

    /// Assign the next free slot to `user` if it has none.
    pub fn assign(&mut self, user: U) -> Registration {
        if let Some(&slot) = self.slots.get(&user) {
            return Registration::AlreadyRegistered(slot);
        }

        // Slots are never released, so the next free slot is the count.
        let next = self.slots.len();
        if next >= self.capacity {
            return Registration::CapacityExceeded;
        }

        let slot = UserSlot::new(next);
        self.slots.insert(user, slot);
        Registration::Assigned(slot)
    }

    /// Look up the slot owned by `user`.
    #[must_use]
    pub fn get<Q>(&self, user: &Q) -> Option<UserSlot>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(user).copied()
    }

    /// Whether `user` owns a slot.
    #[must_use]
    pub fn contains<Q>(&self, user: &Q) -> bool
    where
        U: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains_key(user)
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no user is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Maximum number of users.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots still free.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity - self.slots.len()
    }

    /// Registered users ordered by slot.
    #[must_use]
    pub fn users(&self) -> Vec<(&U, UserSlot)> {
        let mut users: Vec<(&U, UserSlot)> = self.slots.iter().map(|(u, &s)| (u, s)).collect();
        users.sort_by_key(|&(_, slot)| slot);
        users
    }
}
