//! Thread-safe wrapper around [`InteractionStore`].

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use proxima_core::ItemId;

use crate::error::InteractionError;
use crate::slots::Registration;
use crate::store::{InteractionStore, WriteOutcome};

/// An [`InteractionStore`] behind a single reader-writer lock.
///
/// Registration and writes take the write lock, so they are serialized and a
/// reader never sees a slot assigned without its row, or half of an update.
/// Reads share the read lock and run concurrently.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
///
/// use proxima_core::ItemId;
/// use proxima_interaction::SharedInteractionStore;
///
/// let store = Arc::new(SharedInteractionStore::<u64>::new(10, 4)?);
/// let _ = store.register_user(1)?;
/// let _ = store.update_interaction(&1, ItemId::new(0), 2.0)?;
///
/// let reader = {
///     let store = Arc::clone(&store);
///     thread::spawn(move || store.get_interaction(&1, ItemId::new(0)))
/// };
/// assert_eq!(reader.join().unwrap()?, 2.0);
/// # Ok::<(), proxima_interaction::InteractionError>(())
/// ```
#[derive(Debug)]
pub struct SharedInteractionStore<U> {
    inner: RwLock<InteractionStore<U>>,
}

impl<U: Eq + Hash + Debug> SharedInteractionStore<U> {
    /// Create a shared store for up to `capacity_users` users and
    /// `num_items` items.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::InvalidCapacity`] if either is zero.
    pub fn new(capacity_users: usize, num_items: usize) -> Result<Self, InteractionError> {
        InteractionStore::new(capacity_users, num_items).map(Self::from)
    }

    /// See [`InteractionStore::register_user`].
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::LockPoisoned`] if a writer panicked.
    pub fn register_user(&self, user: U) -> Result<Registration, InteractionError> {
        Ok(self.write()?.register_user(user))
    }

    /// See [`InteractionStore::update_interaction`].
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::ItemOutOfRange`] for an unknown item and
    /// [`InteractionError::LockPoisoned`] if a writer panicked.
    pub fn update_interaction<Q>(
        &self,
        user: &Q,
        item: ItemId,
        value: f64,
    ) -> Result<WriteOutcome, InteractionError>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.write()?.update_interaction(user, item, value)
    }

    /// See [`InteractionStore::get_interaction`].
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::ItemOutOfRange`] for an unknown item and
    /// [`InteractionError::LockPoisoned`] if a writer panicked.
    pub fn get_interaction<Q>(&self, user: &Q, item: ItemId) -> Result<f64, InteractionError>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        self.read()?.get_interaction(user, item)
    }

    /// See [`InteractionStore::has_user`].
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::LockPoisoned`] if a writer panicked.
    pub fn has_user<Q>(&self, user: &Q) -> Result<bool, InteractionError>
    where
        U: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Ok(self.read()?.has_user(user))
    }

    /// Run `f` against a consistent view of the store.
    ///
    /// Writers are blocked until `f` returns.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::LockPoisoned`] if a writer panicked.
    pub fn with_read<R>(&self, f: impl FnOnce(&InteractionStore<U>) -> R) -> Result<R, InteractionError> {
        let guard = self.read()?;
        Ok(f(&*guard))
    }

    /// Unwrap into the inner store.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::LockPoisoned`] if a writer panicked.
    pub fn into_inner(self) -> Result<InteractionStore<U>, InteractionError> {
        self.inner.into_inner().map_err(|_| InteractionError::LockPoisoned)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, InteractionStore<U>>, InteractionError> {
        self.inner.read().map_err(|_| InteractionError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, InteractionStore<U>>, InteractionError> {
        self.inner.write().map_err(|_| InteractionError::LockPoisoned)
    }
}

impl<U> From<InteractionStore<U>> for SharedInteractionStore<U> {
    fn from(store: InteractionStore<U>) -> Self {
        Self { inner: RwLock::new(store) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use proxima_core::UserSlot;

    use super::*;

    #[test]
    fn delegates_to_store() {
        let store = SharedInteractionStore::<String>::new(2, 3).unwrap();
        assert!(store.register_user("a".to_string()).unwrap().slot().is_some());
        assert!(store.update_interaction("a", ItemId::new(1), 0.5).unwrap().is_written());
        assert_eq!(store.get_interaction("a", ItemId::new(1)).unwrap(), 0.5);
        assert!(store.has_user("a").unwrap());
        assert!(!store.has_user("b").unwrap());

        let count = store.with_read(InteractionStore::user_count).unwrap();
        assert_eq!(count, 1);
        assert_eq!(store.into_inner().unwrap().user_count(), 1);
    }

    #[test]
    fn with_read_sees_the_inner_store() {
        let store = SharedInteractionStore::<u64>::new(3, 2).unwrap();
        let _ = store.register_user(4).unwrap();
        let _ = store.register_user(9).unwrap();
        let _ = store.update_interaction(&9, ItemId::new(1), 2.5).unwrap();

        let (users, row) = store
            .with_read(|s| {
                let users: Vec<u64> = s.registered_users().into_iter().map(|(u, _)| *u).collect();
                (users, s.user_row(&9).map(<[f64]>::to_vec))
            })
            .unwrap();
        assert_eq!(users, vec![4, 9]);
        assert_eq!(row, Some(vec![0.0, 2.5]));
    }

    #[test]
    fn numeric_ids_need_no_suffix() {
        let store = SharedInteractionStore::<u64>::new(2, 1).unwrap();
        assert_eq!(store.register_user(1).unwrap().slot(), Some(UserSlot::new(0)));
        assert!(store.update_interaction(&1, ItemId::new(0), 1.0).unwrap().is_written());
        assert!(store.has_user(&1).unwrap());
    }

    #[test]
    fn concurrent_registration_assigns_distinct_slots() {
        let store = Arc::new(SharedInteractionStore::<u64>::new(64, 2).unwrap());

        let workers: Vec<_> = (0..8u64)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..8u64 {
                        let user = t * 8 + i;
                        let slot = store.register_user(user).unwrap().slot().unwrap();
                        let _ = store.update_interaction(&user, ItemId::new(0), user as f64).unwrap();
                        assert_eq!(store.get_interaction(&user, ItemId::new(0)).unwrap(), user as f64);
                        assert!(slot.as_usize() < 64);
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        let slots: std::collections::HashSet<_> = store
            .with_read(|s| s.registered_users().into_iter().map(|(_, slot)| slot).collect())
            .unwrap();
        assert_eq!(slots.len(), 64);
    }

    #[test]
    fn poisoned_lock_is_reported() {
        let store = Arc::new(SharedInteractionStore::<u64>::new(1, 1).unwrap());
        let poisoner = Arc::clone(&store);
        let _ = thread::spawn(move || {
            let _guard = poisoner.inner.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(store.has_user(&1), Err(InteractionError::LockPoisoned)));
    }
}
