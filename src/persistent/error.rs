//! Error types for trie lookups.
//!
//! Plain lookups through [`Trie::get`](super::Trie::get) report every failure
//! as `None`. [`Trie::try_get`](super::Trie::try_get) reports the same
//! failures as a [`LookupError`] saying why the lookup failed.

/// Represents why a typed lookup found nothing.
///
/// # Examples
///
/// ```rust
/// use cowtrie::persistent::{LookupError, Trie};
///
/// let trie = Trie::new().put("key", 1_u32);
///
/// assert_eq!(trie.try_get::<u32>("missing"), Err(LookupError::NotFound));
/// assert!(matches!(
///     trie.try_get::<String>("key"),
///     Err(LookupError::TypeMismatch { .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// No value is stored under the key.
    NotFound,
    /// A value is stored under the key, but it has a different type.
    TypeMismatch {
        /// The type the caller asked for.
        requested: &'static str,
        /// The type of the stored value.
        stored: &'static str,
    },
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(formatter, "no value stored under key"),
            Self::TypeMismatch { requested, stored } => write!(
                formatter,
                "type mismatch: requested {requested}, but key stores {stored}"
            ),
        }
    }
}

impl std::error::Error for LookupError {}
