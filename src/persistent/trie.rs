//! Persistent (immutable) copy-on-write trie.
//!
//! This module provides [`Trie`], an immutable trie keyed by byte sequences
//! whose values may each have a different type.
//!
//! # Overview
//!
//! Each edge consumes exactly one key byte; there is no path compression.
//! `put` and `remove` copy only the nodes on the path from the root to the
//! key and share every other subtree with the original trie:
//!
//! - O(k) get, where k is the key length (no allocation)
//! - O(k) put (k + 1 new nodes at most)
//! - O(k) remove (k + 1 new nodes at most)
//!
//! A `Trie` is a handle to a root node. Handles are cheap to clone, and an
//! existing handle never observes operations performed through another one.
//!
//! # Examples
//!
//! ```rust
//! use cowtrie::persistent::Trie;
//!
//! let empty = Trie::new();
//! let one = empty.put("a", 1_u32);
//! let two = one.put("ab", 2_u32);
//!
//! assert_eq!(two.get::<u32>("a"), Some(&1));
//! assert_eq!(two.get::<u32>("ab"), Some(&2));
//! assert_eq!(two.get::<u32>("b"), None);
//!
//! // Removing a prefix key keeps the longer key
//! let three = two.remove("a");
//! assert_eq!(three.get::<u32>("a"), None);
//! assert_eq!(three.get::<u32>("ab"), Some(&2));
//!
//! // Older versions are untouched
//! assert_eq!(two.get::<u32>("a"), Some(&1));
//! assert!(empty.is_empty());
//! ```

use std::fmt;
use std::iter::FromIterator;

use super::ReferenceCounter;
use super::error::LookupError;
use super::trie_node::TrieNode;
use super::value::{ErasedValue, TrieValue};

/// A persistent trie mapping byte strings to values of any [`TrieValue`] type.
///
/// Keys are anything that can be viewed as bytes (`&str`, `String`, `&[u8]`,
/// `Vec<u8>`, ...). Every key symbol is one byte, so a multi-byte UTF-8
/// character occupies several levels of the trie.
///
/// # Time Complexity
///
/// | Operation      | Complexity |
/// |----------------|------------|
/// | `new`          | O(1)       |
/// | `get`          | O(k)       |
/// | `put`          | O(k)       |
/// | `remove`       | O(k)       |
/// | `is_empty`     | O(1)       |
///
/// Branching nodes add an O(log b) child search per level, where b is the
/// number of children.
///
/// # Examples
///
/// ```rust
/// use cowtrie::persistent::Trie;
///
/// let trie = Trie::singleton("key", 42_u64);
/// assert_eq!(trie.get::<u64>("key"), Some(&42));
/// ```
#[derive(Clone, Default)]
pub struct Trie {
    /// Root node, absent for the empty trie
    root: Option<ReferenceCounter<TrieNode>>,
}

impl Trie {
    /// Creates a new empty trie.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new();
    /// assert!(trie.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { root: None }
    }

    /// Creates a trie containing a single key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::singleton("", "root value");
    /// assert_eq!(trie.get::<&str>(""), Some(&"root value"));
    /// ```
    #[inline]
    #[must_use]
    pub fn singleton<T: TrieValue>(key: impl AsRef<[u8]>, value: T) -> Self {
        Self::new().put(key, value)
    }

    /// Returns `true` if the trie stores no values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("a", 1_u8);
    /// assert!(!trie.is_empty());
    /// assert!(trie.remove("a").is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns `true` if both handles point at the same root node.
    ///
    /// Two empty tries are considered the same. This compares identity, not
    /// contents: equal tries built independently are not `ptr_eq`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("a", 1_u8);
    /// // Removing an absent key returns the same version
    /// assert!(trie.remove("b").ptr_eq(&trie));
    /// assert!(!trie.put("a", 1_u8).ptr_eq(&trie));
    /// ```
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(left), Some(right)) => ReferenceCounter::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        }
    }

    /// Finds the node that `key` leads to.
    fn find_node(&self, key: &[u8]) -> Option<&TrieNode> {
        let mut node = self.root.as_deref()?;
        for &symbol in key {
            node = node.child(symbol)?;
        }
        Some(node)
    }

    /// Records the nodes visited while following `key` from the root.
    ///
    /// Entry `depth` is the node reached after consuming `key[..depth]`. The
    /// walk stops at the first missing child, so the path holds
    /// `key.len() + 1` entries only when the whole key resolves, and none for
    /// the empty trie.
    fn path_to<'a>(&'a self, key: &[u8]) -> Vec<&'a TrieNode> {
        let mut path = Vec::with_capacity(key.len() + 1);
        let Some(mut node) = self.root.as_deref() else {
            return path;
        };
        path.push(node);
        for &symbol in key {
            match node.child(symbol) {
                Some(child) => {
                    node = child;
                    path.push(node);
                }
                None => break,
            }
        }
        path
    }

    /// Returns the value stored under `key` if it has type `T`.
    ///
    /// Returns `None` if the key is absent or if the stored value has a
    /// different type. This never allocates.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to look up
    ///
    /// # Complexity
    ///
    /// O(k)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("hello", 42_u32);
    ///
    /// assert_eq!(trie.get::<u32>("hello"), Some(&42));
    /// assert_eq!(trie.get::<u32>("hell"), None);  // Prefix only
    /// assert_eq!(trie.get::<i64>("hello"), None); // Wrong type
    /// ```
    #[must_use]
    pub fn get<T: TrieValue>(&self, key: impl AsRef<[u8]>) -> Option<&T> {
        self.find_node(key.as_ref())?.value()?.downcast_ref::<T>()
    }

    /// Returns the value stored under `key`, or the reason there is none.
    ///
    /// # Errors
    ///
    /// - [`LookupError::NotFound`] if no value is stored under `key`.
    /// - [`LookupError::TypeMismatch`] if the stored value is not a `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::{LookupError, Trie};
    ///
    /// let trie = Trie::new().put("a", 1_u32);
    ///
    /// assert_eq!(trie.try_get::<u32>("a"), Ok(&1));
    /// assert_eq!(trie.try_get::<u32>("b"), Err(LookupError::NotFound));
    /// ```
    pub fn try_get<T: TrieValue>(&self, key: impl AsRef<[u8]>) -> Result<&T, LookupError> {
        let value = self
            .find_node(key.as_ref())
            .and_then(TrieNode::value)
            .ok_or(LookupError::NotFound)?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| LookupError::TypeMismatch {
                requested: std::any::type_name::<T>(),
                stored: value.type_name(),
            })
    }

    /// Returns an owning handle to the value stored under `key`.
    ///
    /// The handle shares the stored value and keeps it alive after every trie
    /// that contains it has been dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("name", String::from("cowtrie"));
    /// let name = trie.get_shared::<String>("name");
    /// drop(trie);
    ///
    /// assert_eq!(name.as_deref().map(String::as_str), Some("cowtrie"));
    /// ```
    #[must_use]
    pub fn get_shared<T: TrieValue>(&self, key: impl AsRef<[u8]>) -> Option<ReferenceCounter<T>> {
        self.find_node(key.as_ref())?
            .value()?
            .downcast_shared::<T>()
    }

    /// Returns `true` if a value of any type is stored under `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("ab", 1_u8);
    ///
    /// assert!(trie.contains_key("ab"));
    /// assert!(!trie.contains_key("a"));
    /// ```
    #[must_use]
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.find_node(key.as_ref())
            .is_some_and(TrieNode::has_value)
    }

    /// Stores `value` under `key`, returning the new version.
    ///
    /// An existing value under `key` is replaced, whatever its type. Keys that
    /// extend `key` are kept. Only the nodes from the root to `key` are
    /// copied; every other subtree is shared with `self`.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to store under
    /// * `value` - The value to store, moved into the trie
    ///
    /// # Complexity
    ///
    /// O(k)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie1 = Trie::new().put("key", 1_u32);
    /// let trie2 = trie1.put("key", String::from("one"));
    ///
    /// assert_eq!(trie1.get::<u32>("key"), Some(&1)); // Original unchanged
    /// assert_eq!(trie2.get::<u32>("key"), None);     // Type replaced
    /// assert_eq!(trie2.get::<String>("key").map(String::as_str), Some("one"));
    /// ```
    #[must_use]
    pub fn put<T: TrieValue>(&self, key: impl AsRef<[u8]>, value: T) -> Self {
        let key = key.as_ref();
        let value = ErasedValue::new(value);
        let path = self.path_to(key);

        let mut node = match path.get(key.len()) {
            Some(&existing) => {
                let mut updated = existing.clone();
                updated.set_value(value);
                updated
            }
            None => TrieNode::with_value(value),
        };

        for (depth, &symbol) in key.iter().enumerate().rev() {
            let mut parent = path
                .get(depth)
                .map_or_else(TrieNode::default, |&existing| existing.clone());
            parent.set_child(symbol, ReferenceCounter::new(node));
            node = parent;
        }

        Self {
            root: Some(ReferenceCounter::new(node)),
        }
    }

    /// Removes the value stored under `key`, returning the new version.
    ///
    /// A node that loses its value but still has children stays as a plain
    /// branch. Otherwise it is unlinked, and so is every ancestor left with
    /// neither value nor children. If nothing remains, the result is empty.
    ///
    /// If no value is stored under `key`, returns `self` unchanged: the result
    /// is [`ptr_eq`](Self::ptr_eq) to `self`.
    ///
    /// # Arguments
    ///
    /// * `key` - The key to remove
    ///
    /// # Complexity
    ///
    /// O(k)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cowtrie::persistent::Trie;
    ///
    /// let trie = Trie::new().put("a", 1_u32).put("abc", 2_u32);
    /// let removed = trie.remove("abc");
    ///
    /// assert_eq!(removed.get::<u32>("abc"), None);
    /// assert_eq!(removed.get::<u32>("a"), Some(&1));
    /// assert_eq!(trie.get::<u32>("abc"), Some(&2)); // Original unchanged
    /// ```
    #[must_use]
    pub fn remove(&self, key: impl AsRef<[u8]>) -> Self {
        let key = key.as_ref();
        let path = self.path_to(key);

        let Some(&target) = path.get(key.len()) else {
            return self.clone();
        };
        if !target.has_value() {
            return self.clone();
        }

        let mut demoted = target.clone();
        demoted.clear_value();
        let mut replacement = (!demoted.is_prunable()).then_some(demoted);

        for (depth, &symbol) in key.iter().enumerate().rev() {
            let mut parent = path[depth].clone();
            match replacement {
                Some(node) => parent.set_child(symbol, ReferenceCounter::new(node)),
                None => {
                    parent.remove_child(symbol);
                }
            }
            replacement = (!parent.is_prunable()).then_some(parent);
        }

        Self {
            root: replacement.map(ReferenceCounter::new),
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: AsRef<[u8]>, T: TrieValue> FromIterator<(K, T)> for Trie {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut trie = Self::new();
        for (key, value) in iter {
            trie = trie.put(key, value);
        }
        trie
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Trie").field(&self.root).finish()
    }
}

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Trie: Send, Sync);

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Trie: Send, Sync);

// =============================================================================
// Tests
// =============================================================================
