//! Type-erased values stored in trie nodes.
//!
//! A [`Trie`](super::Trie) is not generic over its value type. Every value
//! node carries its own payload of exactly one runtime type, and lookups name
//! the type they expect. A lookup for the wrong type behaves exactly like a
//! lookup for a missing key.
//!
//! # Examples
//!
//! ```rust
//! use cowtrie::persistent::Trie;
//!
//! let trie = Trie::new()
//!     .put("answer", 42_u32)
//!     .put("greeting", String::from("hello"));
//!
//! assert_eq!(trie.get::<u32>("answer"), Some(&42));
//! assert_eq!(trie.get::<String>("greeting").map(String::as_str), Some("hello"));
//!
//! // Same key, different type: not found
//! assert_eq!(trie.get::<u64>("answer"), None);
//! ```

use std::any::{Any, type_name};
use std::fmt;

use super::ReferenceCounter;

// =============================================================================
// TrieValue
// =============================================================================

/// Types that can be stored in a [`Trie`](super::Trie).
///
/// Blanket-implemented for every `'static` type. With the `arc` feature the
/// value must also be `Send + Sync`, so that tries can cross threads.
///
/// Values are moved into the trie, never copied, so move-only types are
/// accepted.
#[cfg(feature = "arc")]
pub trait TrieValue: Any + Send + Sync {}

#[cfg(feature = "arc")]
impl<T: Any + Send + Sync> TrieValue for T {}

/// Types that can be stored in a [`Trie`](super::Trie).
///
/// Blanket-implemented for every `'static` type. With the `arc` feature the
/// value must also be `Send + Sync`, so that tries can cross threads.
///
/// Values are moved into the trie, never copied, so move-only types are
/// accepted.
#[cfg(not(feature = "arc"))]
pub trait TrieValue: Any {}

#[cfg(not(feature = "arc"))]
impl<T: Any> TrieValue for T {}

#[cfg(feature = "arc")]
type Payload = dyn Any + Send + Sync;

#[cfg(not(feature = "arc"))]
type Payload = dyn Any;

// =============================================================================
// ErasedValue
// =============================================================================

/// A shared, immutable payload of some runtime type.
///
/// Cloning shares the payload.
#[derive(Clone)]
pub(crate) struct ErasedValue {
    payload: ReferenceCounter<Payload>,
    type_name: &'static str,
}

impl ErasedValue {
    /// Moves `value` into a fresh heap allocation.
    pub(crate) fn new<T: TrieValue>(value: T) -> Self {
        Self {
            payload: ReferenceCounter::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Name of the stored type, as reported by [`std::any::type_name`].
    #[inline]
    pub(crate) const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub(crate) fn downcast_ref<T: TrieValue>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Returns an owning handle to the payload if it is a `T`.
    pub(crate) fn downcast_shared<T: TrieValue>(&self) -> Option<ReferenceCounter<T>> {
        ReferenceCounter::clone(&self.payload).downcast::<T>().ok()
    }

    #[cfg(test)]
    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for ErasedValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<{}>", self.type_name)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq)]
    struct MoveOnly(u32);

    #[rstest]
    fn test_downcast_to_stored_type() {
        let value = ErasedValue::new(7_u32);
        assert_eq!(value.downcast_ref::<u32>(), Some(&7));
    }

    #[rstest]
    fn test_downcast_to_other_type_is_none() {
        let value = ErasedValue::new(7_u32);
        assert_eq!(value.downcast_ref::<u64>(), None);
        assert!(value.downcast_shared::<i32>().is_none());
    }

    #[rstest]
    fn test_move_only_value_is_stored_by_move() {
        let value = ErasedValue::new(MoveOnly(3));
        assert_eq!(value.downcast_ref::<MoveOnly>(), Some(&MoveOnly(3)));
    }

    #[rstest]
    fn test_clone_shares_payload() {
        let value = ErasedValue::new(String::from("shared"));
        let clone = value.clone();
        assert!(value.ptr_eq(&clone));
    }

    #[rstest]
    fn test_downcast_shared_outlives_erased_value() {
        let value = ErasedValue::new(String::from("kept"));
        let shared = value.downcast_shared::<String>();
        drop(value);
        assert_eq!(shared.as_deref().map(String::as_str), Some("kept"));
    }

    #[rstest]
    #[case(ErasedValue::new(1_u8), "u8")]
    #[case(ErasedValue::new(String::new()), "String")]
    fn test_type_name_is_recorded(#[case] value: ErasedValue, #[case] expected: &str) {
        assert!(value.type_name().ends_with(expected));
        assert_eq!(format!("{value:?}"), format!("<{}>", value.type_name()));
    }
}
