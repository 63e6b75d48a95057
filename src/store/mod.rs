//! Shared holder for the current version of a trie.
//!
//! [`Trie`] handles are immutable, so sharing one between threads needs no
//! locking. What does need coordination is deciding which version is
//! *current*. [`TrieStore`] holds that version and publishes new ones:
//!
//! - readers clone the current root under a shared read lock and then read
//!   the snapshot with no lock held
//! - writers are serialized, build the next version from the current one
//!   with no lock held other than the writer lock, and publish it by swapping
//!   the root
//!
//! Readers therefore never observe a partially built trie, and a value read
//! from the store stays valid after later writes.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//!
//! use cowtrie::store::TrieStore;
//!
//! let store = Arc::new(TrieStore::new());
//!
//! let writers: Vec<_> = (0..4_u32)
//!     .map(|index| {
//!         let store = Arc::clone(&store);
//!         thread::spawn(move || store.put(format!("key{index}"), index))
//!     })
//!     .collect();
//! for writer in writers {
//!     writer.join().unwrap();
//! }
//!
//! assert_eq!(store.version(), 4);
//! assert_eq!(store.get::<u32>("key2").as_deref(), Some(&2));
//! ```

mod guard;

pub use guard::ValueGuard;

use std::fmt;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace};

use crate::persistent::{Trie, TrieValue};

/// The published version and its sequence number.
struct Published {
    trie: Trie,
    version: u64,
}

/// A concurrently readable, serially writable current [`Trie`].
///
/// # Examples
///
/// ```rust
/// use cowtrie::store::TrieStore;
///
/// let store = TrieStore::new();
/// store.put("a", 1_u32);
/// store.put("ab", String::from("two"));
///
/// assert_eq!(store.get::<u32>("a").as_deref(), Some(&1));
/// assert!(store.remove("a"));
/// assert!(store.get::<u32>("a").is_none());
/// assert_eq!(store.get::<String>("ab").as_deref().map(String::as_str), Some("two"));
/// ```
pub struct TrieStore {
    /// Guards reads and swaps of the current root
    root: RwLock<Published>,
    /// Serializes writers
    write_lock: Mutex<()>,
}

impl TrieStore {
    /// Creates a store holding an empty trie at version 0.
    #[must_use]
    pub fn new() -> Self {
        Self::from(Trie::new())
    }

    /// Returns the currently published trie.
    ///
    /// The returned handle is a fixed snapshot: later writes to the store do
    /// not affect it.
    #[must_use]
    pub fn snapshot(&self) -> Trie {
        self.root.read().trie.clone()
    }

    /// Returns the number of versions published since the store was created.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.root.read().version
    }

    /// Looks up `key` in the current version.
    ///
    /// Returns `None` if the key is absent or stores a value of another type.
    /// The root lock is only held while taking the snapshot.
    #[must_use]
    pub fn get<T: TrieValue>(&self, key: impl AsRef<[u8]>) -> Option<ValueGuard<T>> {
        let snapshot = self.snapshot();
        let value = snapshot.get_shared::<T>(key)?;
        Some(ValueGuard::new(snapshot, value))
    }

    /// Stores `value` under `key` and publishes the new version.
    pub fn put<T: TrieValue>(&self, key: impl AsRef<[u8]>, value: T) {
        let key = key.as_ref();
        let _writer = self.write_lock.lock();
        let next = self.snapshot().put(key, value);
        self.publish(next, "put");
    }

    /// Removes the value stored under `key` and publishes the new version.
    ///
    /// Returns `false`, publishing nothing, if no value is stored under `key`.
    pub fn remove(&self, key: impl AsRef<[u8]>) -> bool {
        let key = key.as_ref();
        let _writer = self.write_lock.lock();
        let current = self.snapshot();
        let next = current.remove(key);
        if next.ptr_eq(&current) {
            debug!(key_length = key.len(), "remove found no value; nothing published");
            return false;
        }
        self.publish(next, "remove");
        true
    }

    /// Builds the next version from the current one with `operation` and
    /// publishes it as a single version.
    ///
    /// Several changes made inside `operation` become visible to readers
    /// together. Returns `false`, publishing nothing, if `operation` returns
    /// the version it was given.
    ///
    /// # Deadlocks
    ///
    /// `operation` runs while the writer lock is held, and that lock is not
    /// reentrant. Calling [`put`](Self::put), [`remove`](Self::remove) or
    /// `update` on the same store from inside `operation` never returns.
    /// Reads ([`snapshot`](Self::snapshot), [`get`](Self::get),
    /// [`version`](Self::version)) are fine.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::store::TrieStore;
    ///
    /// let store = TrieStore::new();
    /// store.update(|trie| trie.put("from", 0_u32).put("to", 10_u32));
    ///
    /// assert_eq!(store.version(), 1);
    /// assert!(!store.update(|trie| trie.remove("missing")));
    /// ```
    pub fn update<F>(&self, operation: F) -> bool
    where
        F: FnOnce(&Trie) -> Trie,
    {
        let _writer = self.write_lock.lock();
        let current = self.snapshot();
        let next = operation(&current);
        if next.ptr_eq(&current) {
            debug!("update left the trie unchanged; nothing published");
            return false;
        }
        self.publish(next, "update");
        true
    }

    fn publish(&self, trie: Trie, operation: &'static str) {
        let previous = {
            let mut published = self.root.write();
            published.version += 1;
            trace!(version = published.version, operation, "published trie version");
            std::mem::replace(&mut published.trie, trie)
        };
        // Nodes only the previous version referenced are freed outside the lock.
        drop(previous);
    }
}

impl Default for TrieStore {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl From<Trie> for TrieStore {
    fn from(trie: Trie) -> Self {
        Self {
            root: RwLock::new(Published { trie, version: 0 }),
            write_lock: Mutex::new(()),
        }
    }
}

impl fmt::Debug for TrieStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (version, trie) = {
            let published = self.root.read();
            (published.version, published.trie.clone())
        };
        formatter
            .debug_struct("TrieStore")
            .field("version", &version)
            .field("trie", &trie)
            .finish()
    }
}

static_assertions::assert_impl_all!(TrieStore: Send, Sync);
static_assertions::assert_impl_all!(ValueGuard<String>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
