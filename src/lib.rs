//! # cowtrie
//!
//! A persistent, copy-on-write trie for Rust.
//!
//! ## Overview
//!
//! [`Trie`](persistent::Trie) is an immutable trie keyed by byte sequences.
//! Updates never modify an existing trie: `put` and `remove` return a new
//! version that shares every untouched subtree with the versions before it.
//!
//! - **Persistent Trie**: `get`, `put` and `remove` over type-erased values
//! - **Trie Store**: a thread-safe holder that publishes new versions
//!   atomically to concurrent readers
//!
//! ## Feature Flags
//!
//! - `arc`: Use `Arc` instead of `Rc` for shared nodes, making tries `Send + Sync`
//! - `store`: The [`store`] module (implies `arc`, enabled by default)
//!
//! ## Example
//!
//! ```rust
//! use cowtrie::prelude::*;
//!
//! let version1 = Trie::new().put("a", 1_u32);
//! let version2 = version1.put("ab", String::from("two"));
//!
//! assert_eq!(version2.get::<u32>("a"), Some(&1));
//! assert_eq!(version2.get::<String>("ab").map(String::as_str), Some("two"));
//! assert_eq!(version1.get::<String>("ab"), None);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use cowtrie::prelude::*;
/// ```
pub mod prelude {
    pub use crate::persistent::*;

    #[cfg(feature = "store")]
    pub use crate::store::*;
}

pub mod persistent;

#[cfg(feature = "store")]
pub mod store;
