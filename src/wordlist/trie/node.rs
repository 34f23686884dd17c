use std::fmt::{Debug, Formatter};
use std::num::NonZeroU32;

use crate::alphabet::{Symbol, ALPHABET};

/// Index of a non-root node in the trie's arena.
///
/// Slot 0 is always the root and is never anybody's child, so child links can
/// use a `NonZeroU32` and `Option<NodeId>` stays four bytes wide.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub(crate) struct NodeId(NonZeroU32);

impl NodeId {
    pub(crate) fn new(idx: usize) -> Option<NodeId> {
        u32::try_from(idx).ok().and_then(NonZeroU32::new).map(NodeId)
    }

    pub(crate) fn index(self) -> usize {
        self.0.get() as usize
    }
}

#[derive(Clone, Default, Eq, PartialEq)]
pub(crate) struct Node {
    pub(crate) children: [Option<NodeId>; ALPHABET.len()],
    pub(crate) is_word_end: bool,
}

impl Node {
    pub(crate) fn child(&self, symbol: Symbol) -> Option<NodeId> {
        self.children[symbol.index()]
    }

    pub(crate) fn set_child(&mut self, symbol: Symbol, child: NodeId) {
        self.children[symbol.index()] = Some(child);
    }

    pub(crate) fn child_count(&self) -> usize {
        self.children.iter().filter(|x| x.is_some()).count()
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("is_word_end", &self.is_word_end)
            .field("children", &Symbol::all()
                .filter(|s| self.child(*s).is_some())
                .map(Symbol::as_char)
                .collect::<String>(),
            )
            .finish()
    }
}
