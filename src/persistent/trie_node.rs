//! Internal node structure for [`Trie`](super::Trie).
//!
//! A node is immutable once it is reachable from any published trie. Updates
//! never touch a reachable node: they take a shallow copy with [`Clone`],
//! change the copy, and link the copy into a new parent. The copy shares every
//! child and the stored value with the original, so the cost of a copy is one
//! reference count increment per child.

use std::fmt;

use smallvec::SmallVec;

use super::ReferenceCounter;
use super::value::ErasedValue;

/// One key symbol. Each edge of the trie consumes exactly one.
pub(crate) type Symbol = u8;

/// Children stored inline before spilling to the heap.
const INLINE_CHILDREN: usize = 4;

/// Child edges, sorted by symbol with no duplicates.
type Children = SmallVec<[(Symbol, ReferenceCounter<TrieNode>); INLINE_CHILDREN]>;

/// A trie node: a plain branch, or a value node when `value` is present.
///
/// `Clone` is the copy-on-write primitive. It produces a new node with the
/// same child references and the same value reference.
#[derive(Clone, Default)]
pub(crate) struct TrieNode {
    children: Children,
    value: Option<ErasedValue>,
}

impl TrieNode {
    /// Creates a childless value node.
    pub(crate) fn with_value(value: ErasedValue) -> Self {
        Self {
            children: Children::new(),
            value: Some(value),
        }
    }

    #[inline]
    pub(crate) const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    pub(crate) const fn value(&self) -> Option<&ErasedValue> {
        self.value.as_ref()
    }

    /// Turns this node into a value node holding `value`, keeping its children.
    #[inline]
    pub(crate) fn set_value(&mut self, value: ErasedValue) {
        self.value = Some(value);
    }

    /// Turns this node into a plain node, keeping its children.
    #[inline]
    pub(crate) fn clear_value(&mut self) {
        self.value = None;
    }

    #[inline]
    pub(crate) fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// A node with neither children nor value must not stay reachable.
    #[inline]
    pub(crate) fn is_prunable(&self) -> bool {
        !self.has_value() && !self.has_children()
    }

    #[inline]
    fn position(&self, symbol: Symbol) -> Result<usize, usize> {
        self.children
            .binary_search_by(|(child_symbol, _)| child_symbol.cmp(&symbol))
    }

    /// Returns the child reached through `symbol`.
    pub(crate) fn child(&self, symbol: Symbol) -> Option<&Self> {
        self.position(symbol)
            .ok()
            .map(|position| &*self.children[position].1)
    }

    /// Links `child` under `symbol`, replacing any existing edge.
    pub(crate) fn set_child(&mut self, symbol: Symbol, child: ReferenceCounter<Self>) {
        match self.position(symbol) {
            Ok(position) => self.children[position].1 = child,
            Err(position) => self.children.insert(position, (symbol, child)),
        }
    }

    /// Unlinks the edge for `symbol`, returning the detached child.
    pub(crate) fn remove_child(&mut self, symbol: Symbol) -> Option<ReferenceCounter<Self>> {
        self.position(symbol)
            .ok()
            .map(|position| self.children.remove(position).1)
    }

    /// Iterates over child edges in ascending symbol order.
    pub(crate) fn children(&self) -> impl Iterator<Item = (Symbol, &ReferenceCounter<Self>)> {
        self.children.iter().map(|(symbol, child)| (*symbol, child))
    }
}

impl Drop for TrieNode {
    /// Frees the subtree with an explicit work stack.
    ///
    /// The derived drop would recurse once per level, so a long key could
    /// overflow the stack. Children still shared with another version are
    /// only released, never descended into.
    fn drop(&mut self) {
        if self.children.is_empty() {
            return;
        }
        let mut pending: Vec<ReferenceCounter<Self>> = std::mem::take(&mut self.children)
            .into_iter()
            .map(|(_, child)| child)
            .collect();
        while let Some(child) = pending.pop() {
            if let Ok(mut node) = ReferenceCounter::try_unwrap(child) {
                pending.extend(
                    std::mem::take(&mut node.children)
                        .into_iter()
                        .map(|(_, grandchild)| grandchild),
                );
            }
        }
    }
}

struct ChildrenDebug<'a>(&'a TrieNode);

impl fmt::Debug for ChildrenDebug<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(
                self.0
                    .children()
                    .map(|(symbol, child)| (char::from(symbol), &**child)),
            )
            .finish()
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = formatter.debug_struct("TrieNode");
        if let Some(value) = &self.value {
            debug.field("value", value);
        }
        if self.has_children() {
            debug.field("children", &ChildrenDebug(self));
        }
        debug.finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
