//! The interaction store.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;

use proxima_core::{ItemId, UserSlot};
use tracing::{debug, warn};

use crate::error::InteractionError;
use crate::matrix::{DenseMatrix, NO_INTERACTION};
use crate::slots::{Registration, SlotMap};

/// Result of writing an interaction.
///
/// `UnknownUser` is a soft failure: nothing was written. Users are never
/// registered implicitly by a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum WriteOutcome {
    /// The cell now holds the written value.
    Written,
    /// The user has no slot; the matrix is unchanged.
    UnknownUser,
}

impl WriteOutcome {
    /// Whether the value was stored.
    #[must_use]
    pub const fn is_written(self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Dense `capacity_users × num_items` matrix of interaction values keyed by
/// user id and item id.
///
/// Users must be registered before interactions can be recorded for them.
/// Registration assigns the next free row and is permanent: a registered
/// user keeps its row until the store is dropped.
///
/// Mutation takes `&mut self`, so a single owner serializes writers. Use
/// [`SharedInteractionStore`](crate::SharedInteractionStore) to share a store
/// between threads.
///
/// # Example
///
/// ```
/// use proxima_core::ItemId;
/// use proxima_interaction::{InteractionStore, WriteOutcome};
///
/// let mut store: InteractionStore<String> = InteractionStore::new(5, 5)?;
/// let _ = store.register_user("B".to_string());
///
/// assert_eq!(store.update_interaction("B", ItemId::new(2), 4.5)?, WriteOutcome::Written);
/// assert_eq!(store.get_interaction("B", ItemId::new(2))?, 4.5);
///
/// // Never registered: reads as "no interaction".
/// assert_eq!(store.get_interaction("A", ItemId::new(3))?, 0.0);
/// assert!(!store.has_user("A"));
/// # Ok::<(), proxima_interaction::InteractionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct InteractionStore<U> {
    slots: SlotMap<U>,
    matrix: DenseMatrix,
}

impl<U: Eq + Hash + Debug> InteractionStore<U> {
    /// Create a store for up to `capacity_users` users and `num_items` items.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::InvalidCapacity`] if either is zero.
    pub fn new(capacity_users: usize, num_items: usize) -> Result<Self, InteractionError> {
        if capacity_users == 0 {
            return Err(InteractionError::InvalidCapacity { param: "capacity_users", value: 0 });
        }
        if num_items == 0 {
            return Err(InteractionError::InvalidCapacity { param: "num_items", value: 0 });
        }

        Ok(Self {
            slots: SlotMap::with_capacity(capacity_users),
            matrix: DenseMatrix::zeros(capacity_users, num_items),
        })
    }

    /// Give `user` a row of the matrix.
    ///
    /// Registering an already registered user changes nothing. When every row
    /// is taken the user stays unregistered and
    /// [`Registration::CapacityExceeded`] is returned.
    pub fn register_user(&mut self, user: U) -> Registration {
        if self.slots.remaining() == 0 && !self.slots.contains(&user) {
            warn!(
                user = ?user,
                capacity = self.slots.capacity(),
                "interaction store full, user not registered"
            );
        }

        let registration = self.slots.assign(user);
        if let Registration::Assigned(slot) = registration {
            debug!(%slot, registered = self.slots.len(), "registered user");
        }
        registration
    }

    /// Record `value` as `user`'s interaction with `item`.
    ///
    /// Overwrites any previous value (last write wins). Writing for a user
    /// without a slot stores nothing and returns
    /// [`WriteOutcome::UnknownUser`].
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::ItemOutOfRange`] if `item` is not a column
    /// of the matrix. The item is checked before the user.
    pub fn update_interaction<Q>(
        &mut self,
        user: &Q,
        item: ItemId,
        value: f64,
    ) -> Result<WriteOutcome, InteractionError>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let col = self.check_item(item)?;

        let Some(slot) = self.slots.get(user) else {
            warn!(user = ?user, %item, "interaction for unknown user ignored");
            return Ok(WriteOutcome::UnknownUser);
        };

        self.matrix.set(slot.as_usize(), col, value);
        Ok(WriteOutcome::Written)
    }

    /// Read `user`'s interaction with `item`.
    ///
    /// Returns `0.0` both when nothing was recorded and when `user` is not
    /// registered. The second case also logs a warning. Use
    /// [`has_user`](Self::has_user) to tell the two apart.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::ItemOutOfRange`] if `item` is not a column
    /// of the matrix.
    pub fn get_interaction<Q>(&self, user: &Q, item: ItemId) -> Result<f64, InteractionError>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let col = self.check_item(item)?;

        match self.slots.get(user) {
            Some(slot) => Ok(self.matrix.get(slot.as_usize(), col)),
            None => {
                warn!(user = ?user, %item, "interaction read for unknown user");
                Ok(NO_INTERACTION)
            }
        }
    }

    /// Whether `user` has been registered.
    #[must_use]
    pub fn has_user<Q>(&self, user: &Q) -> bool
    where
        U: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.contains(user)
    }

    /// The row owned by `user`, if registered.
    #[must_use]
    pub fn slot_of<Q>(&self, user: &Q) -> Option<UserSlot>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(user)
    }

    /// All of `user`'s interactions, indexed by item id.
    #[must_use]
    pub fn user_row<Q>(&self, user: &Q) -> Option<&[f64]>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(user).map(|slot| self.matrix.row(slot.as_usize()))
    }

    /// Registered users ordered by slot.
    #[must_use]
    pub fn registered_users(&self) -> Vec<(&U, UserSlot)> {
        self.slots.users()
    }

    /// Number of registered users.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.slots.len()
    }

    /// Maximum number of users.
    #[must_use]
    pub fn capacity_users(&self) -> usize {
        self.matrix.rows()
    }

    /// Number of item columns.
    #[must_use]
    pub fn num_items(&self) -> usize {
        self.matrix.cols()
    }

    /// The full matrix, one row per slot. Unassigned rows are all zero.
    #[must_use]
    pub fn matrix(&self) -> &DenseMatrix {
        &self.matrix
    }

    fn check_item(&self, item: ItemId) -> Result<usize, InteractionError> {
        let col = item.as_usize();
        if col >= self.matrix.cols() {
            return Err(InteractionError::ItemOutOfRange { item: col, num_items: self.matrix.cols() });
        }
        Ok(col)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// Collects formatted `tracing` output at `WARN` and above.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn warnings_during(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::WARN)
            .with_ansi(false)
            .with_writer(captured.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn store(capacity: usize, items: usize) -> InteractionStore<String> {
        InteractionStore::new(capacity, items).unwrap()
    }

    #[test]
    fn zero_dimensions_fail() {
        let err = InteractionStore::<u64>::new(0, 5).unwrap_err();
        assert!(matches!(err, InteractionError::InvalidCapacity { param: "capacity_users", .. }));

        let err = InteractionStore::<u64>::new(5, 0).unwrap_err();
        assert!(matches!(err, InteractionError::InvalidCapacity { param: "num_items", .. }));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn starts_empty_and_zeroed() {
        let s = store(3, 4);
        assert_eq!(s.user_count(), 0);
        assert_eq!(s.capacity_users(), 3);
        assert_eq!(s.num_items(), 4);
        assert!(s.matrix().iter_rows().flatten().all(|&v| v == 0.0));
    }

    #[test]
    fn registered_user_round_trip() {
        let mut s = store(5, 5);
        assert_eq!(s.register_user("B".to_string()), Registration::Assigned(UserSlot::new(0)));
        assert_eq!(s.update_interaction("B", ItemId::new(2), 4.5).unwrap(), WriteOutcome::Written);
        assert_eq!(s.get_interaction("B", ItemId::new(2)).unwrap(), 4.5);
        assert_eq!(s.get_interaction("B", ItemId::new(1)).unwrap(), 0.0);
    }

    #[test]
    fn unknown_user_reads_zero() {
        let s = store(5, 5);
        assert_eq!(s.get_interaction("A", ItemId::new(3)).unwrap(), 0.0);
        assert!(!s.has_user("A"));
    }

    #[test]
    fn unknown_user_read_warns() {
        let mut s = store(5, 5);
        let _ = s.register_user("B".to_string());

        let logs = warnings_during(|| {
            assert_eq!(s.get_interaction("A", ItemId::new(3)).unwrap(), 0.0);
        });
        assert!(logs.contains("interaction read for unknown user"), "{logs}");

        let logs = warnings_during(|| {
            assert_eq!(s.get_interaction("B", ItemId::new(3)).unwrap(), 0.0);
        });
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn unknown_user_write_is_soft_noop() {
        let mut s = store(5, 5);
        let before = s.matrix().clone();

        let outcome = s.update_interaction("A", ItemId::new(3), 3.0).unwrap();
        assert_eq!(outcome, WriteOutcome::UnknownUser);
        assert!(!outcome.is_written());
        assert_eq!(s.matrix(), &before);
        // Writes never register users.
        assert!(!s.has_user("A"));
    }

    #[test]
    fn last_write_wins() {
        let mut s = store(2, 3);
        let _ = s.register_user("u".to_string());
        let _ = s.update_interaction("u", ItemId::new(0), 1.0).unwrap();
        let _ = s.update_interaction("u", ItemId::new(0), -2.5).unwrap();
        assert_eq!(s.get_interaction("u", ItemId::new(0)).unwrap(), -2.5);
    }

    #[test]
    fn item_out_of_range_fails() {
        let mut s = store(2, 3);
        let _ = s.register_user("u".to_string());

        let err = s.get_interaction("u", ItemId::new(3)).unwrap_err();
        assert!(matches!(err, InteractionError::ItemOutOfRange { item: 3, num_items: 3 }));

        let err = s.update_interaction("u", ItemId::new(7), 1.0).unwrap_err();
        assert!(err.is_invalid_input());

        // Range is checked even for unknown users.
        assert!(s.get_interaction("nobody", ItemId::new(3)).is_err());
        assert!(s.update_interaction("nobody", ItemId::new(3), 1.0).is_err());
    }

    #[test]
    fn double_registration_keeps_slot() {
        let mut s = store(3, 1);
        let _ = s.register_user("a".to_string());
        let _ = s.register_user("b".to_string());
        assert_eq!(s.register_user("b".to_string()), Registration::AlreadyRegistered(UserSlot::new(1)));
        assert_eq!(s.slot_of("b"), Some(UserSlot::new(1)));
        assert_eq!(s.user_count(), 2);
    }

    #[test]
    fn capacity_exceeded_leaves_state_unchanged() {
        let mut s = store(2, 2);
        let _ = s.register_user("a".to_string());
        let _ = s.register_user("b".to_string());
        let _ = s.update_interaction("a", ItemId::new(1), 9.0).unwrap();
        let before = s.matrix().clone();

        assert!(s.register_user("c".to_string()).is_capacity_exceeded());
        assert!(s.register_user("d".to_string()).is_capacity_exceeded());

        assert!(!s.has_user("c"));
        assert_eq!(s.user_count(), 2);
        assert_eq!(s.matrix(), &before);
        assert_eq!(s.slot_of("a"), Some(UserSlot::new(0)));
    }

    #[test]
    fn user_row_and_registered_users() {
        let mut s = store(3, 3);
        let _ = s.register_user("x".to_string());
        let _ = s.register_user("y".to_string());
        let _ = s.update_interaction("y", ItemId::new(2), 5.0).unwrap();

        assert_eq!(s.user_row("y"), Some(&[0.0, 0.0, 5.0][..]));
        assert_eq!(s.user_row("z"), None);

        let users: Vec<&str> = s.registered_users().into_iter().map(|(u, _)| u.as_str()).collect();
        assert_eq!(users, vec!["x", "y"]);
    }

    #[test]
    fn numeric_user_ids() {
        let mut s: InteractionStore<u64> = InteractionStore::new(2, 2).unwrap();
        let _ = s.register_user(102);
        let _ = s.update_interaction(&102, ItemId::new(1), 4.5).unwrap();
        assert_eq!(s.get_interaction(&102, ItemId::new(1)).unwrap(), 4.5);
        assert_eq!(s.get_interaction(&101, ItemId::new(1)).unwrap(), 0.0);
    }
}
