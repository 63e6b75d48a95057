//! Persistent (immutable) copy-on-write trie.
//!
//! This module provides [`Trie`], a trie keyed by byte sequences that uses
//! path copying and structural sharing:
//!
//! - `put` and `remove` return a new version and leave the original intact
//! - only the nodes between the root and the modified key are copied
//! - every other subtree is shared, by reference, between versions
//!
//! Values are type-erased: each key stores a value of its own type, and
//! lookups name the type they expect.
//!
//! # Structural Sharing
//!
//! ```rust
//! use cowtrie::persistent::Trie;
//!
//! let base = Trie::new()
//!     .put("apple", 1_u32)
//!     .put("apply", 2_u32)
//!     .put("banana", String::from("yellow"));
//!
//! let updated = base.put("apple", 10_u32);
//! assert_eq!(base.get::<u32>("apple"), Some(&1));     // Original unchanged
//! assert_eq!(updated.get::<u32>("apple"), Some(&10)); // New version
//!
//! // The "banana" subtree is shared by both versions
//! assert_eq!(
//!     updated.get::<String>("banana").map(String::as_str),
//!     Some("yellow")
//! );
//! ```
//!
//! # Removal and Pruning
//!
//! ```rust
//! use cowtrie::persistent::Trie;
//!
//! let trie = Trie::new().put("a", 1_u32).put("abc", 2_u32);
//!
//! // Removing "abc" also drops the now useless "ab" branch
//! let pruned = trie.remove("abc");
//! assert_eq!(pruned.get::<u32>("a"), Some(&1));
//! assert!(!pruned.contains_key("abc"));
//!
//! // Removing a missing key is a no-op
//! assert!(pruned.remove("zzz").ptr_eq(&pruned));
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub type ReferenceCounter<T> = std::sync::Arc<T>;

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(not(feature = "arc"))]
pub type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod trie;
mod trie_node;
mod value;

pub use error::LookupError;
pub use trie::Trie;
pub use value::TrieValue;
