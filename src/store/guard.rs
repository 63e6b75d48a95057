//! Owning handle to a value read from a [`TrieStore`](super::TrieStore).

use std::fmt;
use std::ops::Deref;

use crate::persistent::{ReferenceCounter, Trie};

/// A value read from a [`TrieStore`](super::TrieStore).
///
/// The guard keeps the trie version the value was read from, so the value
/// stays valid and unchanged while writers publish newer versions.
///
/// # Examples
///
/// ```rust
/// use cowtrie::store::TrieStore;
///
/// let store = TrieStore::new();
/// store.put("key", 1_u32);
///
/// let guard = store.get::<u32>("key").unwrap();
/// store.put("key", 2_u32);
///
/// assert_eq!(*guard, 1);
/// assert_eq!(guard.snapshot().get::<u32>("key"), Some(&1));
/// ```
pub struct ValueGuard<T> {
    snapshot: Trie,
    value: ReferenceCounter<T>,
}

impl<T> ValueGuard<T> {
    pub(crate) const fn new(snapshot: Trie, value: ReferenceCounter<T>) -> Self {
        Self { snapshot, value }
    }

    /// Returns the trie version this value was read from.
    #[inline]
    #[must_use]
    pub const fn snapshot(&self) -> &Trie {
        &self.snapshot
    }
}

impl<T> Deref for ValueGuard<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for ValueGuard<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_tuple("ValueGuard")
            .field(&*self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_guard_derefs_to_value() {
        let trie = Trie::new().put("a", String::from("value"));
        let value = trie.get_shared::<String>("a").expect("stored");
        let guard = ValueGuard::new(trie, value);

        assert_eq!(guard.len(), 5);
        assert_eq!(format!("{guard:?}"), "ValueGuard(\"value\")");
    }
}
