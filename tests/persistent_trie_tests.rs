//! Unit tests for Trie.
//!
//! This module exercises the public `get`/`put`/`remove` behavior of the
//! persistent trie, including versioning, type erasure and pruning.

use cowtrie::persistent::{LookupError, Trie};
use rstest::rstest;

// =============================================================================
// Empty trie
// =============================================================================

#[rstest]
fn test_new_creates_empty_trie() {
    let trie = Trie::new();
    assert!(trie.is_empty());
    assert!(Trie::default().is_empty());
}

#[rstest]
#[case("")]
#[case("a")]
#[case("abc")]
fn test_get_on_empty_trie_returns_none(#[case] key: &str) {
    let trie = Trie::new();
    assert_eq!(trie.get::<u32>(key), None);
    assert!(!trie.contains_key(key));
}

// =============================================================================
// Concrete versioning scenario
// =============================================================================

#[rstest]
fn test_versioning_scenario() {
    let t0 = Trie::new();
    let t1 = t0.put("a", 1_u32);
    let t2 = t1.put("ab", 2_u32);

    assert_eq!(t2.get::<u32>("a"), Some(&1));
    assert_eq!(t2.get::<u32>("ab"), Some(&2));
    assert_eq!(t2.get::<u32>("b"), None);

    let t3 = t2.remove("a");
    assert_eq!(t3.get::<u32>("a"), None);
    assert_eq!(t3.get::<u32>("ab"), Some(&2));

    // Older versions are unchanged
    assert_eq!(t2.get::<u32>("a"), Some(&1));
    assert_eq!(t1.get::<u32>("ab"), None);
    assert!(t0.is_empty());
}

// =============================================================================
// Put
// =============================================================================

#[rstest]
fn test_put_and_get_single_key() {
    let trie = Trie::new().put("hello", 42_u32);
    assert_eq!(trie.get::<u32>("hello"), Some(&42));
    assert!(!trie.is_empty());
}

#[rstest]
fn test_put_empty_key_stores_at_root() {
    let trie = Trie::new().put("", 7_u64).put("x", 8_u64);
    assert_eq!(trie.get::<u64>(""), Some(&7));
    assert_eq!(trie.get::<u64>("x"), Some(&8));
}

#[rstest]
fn test_put_overwrites_existing_key() {
    let trie1 = Trie::new().put("key", 1_u32);
    let trie2 = trie1.put("key", 2_u32);

    assert_eq!(trie1.get::<u32>("key"), Some(&1));
    assert_eq!(trie2.get::<u32>("key"), Some(&2));
}

#[rstest]
fn test_put_overwrite_can_change_type() {
    let trie = Trie::new()
        .put("key", 1_u32)
        .put("key", String::from("one"));

    assert_eq!(trie.get::<u32>("key"), None);
    assert_eq!(trie.get::<String>("key").map(String::as_str), Some("one"));
}

#[rstest]
fn test_put_does_not_disturb_longer_keys() {
    let trie = Trie::new()
        .put("abc", 3_u32)
        .put("ab", 2_u32)
        .put("a", 1_u32)
        .put("ab", 20_u32);

    assert_eq!(trie.get::<u32>("a"), Some(&1));
    assert_eq!(trie.get::<u32>("ab"), Some(&20));
    assert_eq!(trie.get::<u32>("abc"), Some(&3));
}

#[rstest]
fn test_put_accepts_byte_keys() {
    let key: Vec<u8> = vec![0, 255, 10];
    let trie = Trie::new().put(&key, 'x');

    assert_eq!(trie.get::<char>(&key), Some(&'x'));
    assert_eq!(trie.get::<char>([0_u8, 255]), None);
}

#[rstest]
fn test_put_multibyte_characters_use_one_level_per_byte() {
    let trie = Trie::new().put("é", 1_u32);

    assert_eq!(trie.get::<u32>("é"), Some(&1));
    // "é" is two bytes; its first byte alone is only a branch
    assert_eq!(trie.get::<u32>(&"é".as_bytes()[..1]), None);
}

// =============================================================================
// Type erasure
// =============================================================================

#[derive(Debug, PartialEq)]
struct MoveBlocked {
    id: u32,
}

#[rstest]
fn test_mixed_value_types() {
    let trie = Trie::new()
        .put("u32", 32_u32)
        .put("u64", 64_u64)
        .put("string", String::from("text"))
        .put("boxed", Box::new(5_u32))
        .put("move", MoveBlocked { id: 9 });

    assert_eq!(trie.get::<u32>("u32"), Some(&32));
    assert_eq!(trie.get::<u64>("u64"), Some(&64));
    assert_eq!(trie.get::<String>("string").map(String::as_str), Some("text"));
    assert_eq!(trie.get::<Box<u32>>("boxed").map(|boxed| **boxed), Some(5));
    assert_eq!(trie.get::<MoveBlocked>("move"), Some(&MoveBlocked { id: 9 }));
}

#[rstest]
fn test_type_mismatch_is_not_found() {
    let trie = Trie::new().put("key", 1_u32);

    assert_eq!(trie.get::<u64>("key"), None);
    assert_eq!(trie.get::<i32>("key"), None);
    assert!(trie.contains_key("key"));
}

#[rstest]
fn test_try_get_reports_reason() {
    let trie = Trie::new().put("key", 1_u32).put("keys", 2_u32);

    assert_eq!(trie.try_get::<u32>("key"), Ok(&1));
    assert_eq!(trie.try_get::<u32>("ke"), Err(LookupError::NotFound));
    assert_eq!(trie.try_get::<u32>("other"), Err(LookupError::NotFound));

    match trie.try_get::<u64>("key") {
        Err(LookupError::TypeMismatch { requested, stored }) => {
            assert_eq!(requested, "u64");
            assert_eq!(stored, "u32");
        }
        other => panic!("expected type mismatch, got {other:?}"),
    }
}

#[rstest]
fn test_get_shared_outlives_trie() {
    let trie = Trie::new().put("key", String::from("value"));
    let shared = trie.get_shared::<String>("key");
    drop(trie);

    assert_eq!(shared.as_deref().map(String::as_str), Some("value"));
}

// =============================================================================
// Remove
// =============================================================================

#[rstest]
fn test_remove_existing_key() {
    let trie = Trie::new().put("a", 1_u32).put("b", 2_u32);
    let removed = trie.remove("a");

    assert_eq!(removed.get::<u32>("a"), None);
    assert_eq!(removed.get::<u32>("b"), Some(&2));
    assert_eq!(trie.get::<u32>("a"), Some(&1));
}

#[rstest]
fn test_remove_nonexistent_key_returns_same_version() {
    let trie = Trie::new().put("abc", 1_u32);

    assert!(trie.remove("abd").ptr_eq(&trie));
    assert!(trie.remove("ab").ptr_eq(&trie));
    assert!(trie.remove("abcd").ptr_eq(&trie));
    assert!(trie.remove("").ptr_eq(&trie));
}

#[rstest]
fn test_remove_from_empty_trie() {
    let trie = Trie::new();
    let removed = trie.remove("anything");
    assert!(removed.is_empty());
    assert!(removed.ptr_eq(&trie));
}

#[rstest]
fn test_remove_root_value() {
    let trie = Trie::new().put("", 0_u32).put("a", 1_u32);
    let removed = trie.remove("");

    assert_eq!(removed.get::<u32>(""), None);
    assert_eq!(removed.get::<u32>("a"), Some(&1));
    assert!(!removed.is_empty());
}

#[rstest]
fn test_remove_only_root_value_empties_trie() {
    let trie = Trie::new().put("", 0_u32);
    assert!(trie.remove("").is_empty());
}

#[rstest]
fn test_remove_prefix_key_keeps_extension() {
    let trie = Trie::new().put("test", 1_u32).put("tested", 2_u32);
    let removed = trie.remove("test");

    assert!(!removed.contains_key("test"));
    assert_eq!(removed.get::<u32>("tested"), Some(&2));
}

#[rstest]
fn test_remove_extension_keeps_prefix() {
    let trie = Trie::new().put("test", 1_u32).put("tested", 2_u32);
    let removed = trie.remove("tested");

    assert_eq!(removed.get::<u32>("test"), Some(&1));
    assert!(!removed.contains_key("tested"));
    // The pruned branch is gone, so removing again is a no-op
    assert!(removed.remove("tested").ptr_eq(&removed));
}

#[rstest]
fn test_remove_all_keys_empties_trie() {
    let keys = ["a", "ab", "abc", "b", "bcd", ""];
    let trie: Trie = keys.iter().map(|key| (*key, key.len())).collect();

    let emptied = keys.iter().fold(trie.clone(), |trie, key| trie.remove(key));

    assert!(emptied.is_empty());
    for key in keys {
        assert_eq!(trie.get::<usize>(key), Some(&key.len()));
    }
}

#[rstest]
fn test_remove_then_put_again() {
    let trie = Trie::new().put("key", 1_u32).remove("key").put("key", 2_u32);
    assert_eq!(trie.get::<u32>("key"), Some(&2));
}

// =============================================================================
// Construction helpers
// =============================================================================

#[rstest]
fn test_singleton() {
    let trie = Trie::singleton("only", 1_i8);
    assert_eq!(trie.get::<i8>("only"), Some(&1));
}

#[rstest]
fn test_from_iterator_later_entries_win() {
    let trie: Trie = vec![("a", 1_u32), ("b", 2_u32), ("a", 3_u32)]
        .into_iter()
        .collect();

    assert_eq!(trie.get::<u32>("a"), Some(&3));
    assert_eq!(trie.get::<u32>("b"), Some(&2));
}

#[rstest]
fn test_clone_shares_root() {
    let trie = Trie::new().put("a", 1_u32);
    let clone = trie.clone();
    assert!(clone.ptr_eq(&trie));
    assert!(!Trie::new().put("a", 1_u32).ptr_eq(&trie));
}
