use std::fmt::{Debug, Formatter};
use std::mem::size_of;

use crate::alphabet::Symbol;
use crate::error::{TrieError, TrieResult};
use crate::wordlist::trie::node::{Node, NodeId};
use crate::wordlist::trie::trie_builder::TrieBuilder;

pub(crate) const ROOT: usize = 0;

/// Every slot must be addressable by a 32-bit [`NodeId`].
pub(crate) const MAX_NODES: usize = u32::MAX as usize;

/// A set of words over `a`..`z`, stored as a prefix tree.
///
/// All nodes live in one arena owned by the trie, with the root in slot 0.
/// A finished `Trie` has no mutating methods; use a [`TrieBuilder`] to make
/// one.
#[derive(Clone)]
pub struct Trie {
    pub(crate) nodes: Vec<Node>,
    pub(crate) words: usize,
    pub(crate) node_limit: usize,
}

/// A borrowed view of one node.
#[derive(Copy, Clone)]
pub struct NodeRef<'a> {
    pub(crate) trie: &'a Trie,
    pub(crate) idx: usize,
}

impl Trie {
    pub(crate) fn new() -> Trie {
        Trie {
            nodes: vec![Node::default()],
            words: 0,
            node_limit: MAX_NODES,
        }
    }

    /// Builds a trie from `words` with the default configuration.
    pub fn from_words<I, S>(words: I) -> TrieResult<Trie>
        where I: IntoIterator<Item=S>, S: AsRef<str> {
        let mut builder = TrieBuilder::new();
        builder.build(words)?;
        Ok(builder.finish())
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef { trie: self, idx: ROOT }
    }

    /// Number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct words.
    pub fn word_count(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Bytes owned by this trie: the handle plus the whole node arena.
    pub fn estimated_bytes(&self) -> usize {
        size_of::<Trie>() + self.nodes.capacity() * size_of::<Node>()
    }

    /// Walks `word` from the root. `None` if some step has no child, including
    /// characters that are not in the alphabet.
    pub fn traverse(&self, word: &str) -> Option<NodeRef<'_>> {
        let mut cursor = self.root();
        for c in word.chars() {
            cursor = cursor.child(c)?;
        }
        Some(cursor)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.traverse(word).map(|x| x.is_word_end()).unwrap_or(false)
    }

    /// Walks `symbols` from the root, creating missing nodes, and marks the end.
    /// Returns whether the word was new.
    ///
    /// Fails with [`TrieError::CapacityExceeded`] before touching the arena if
    /// the missing nodes do not fit, so a failed insert leaves no partial path.
    pub(crate) fn insert_symbols(&mut self, symbols: &[Symbol]) -> TrieResult<bool> {
        let mut current = ROOT;
        let mut matched = 0;
        for &symbol in symbols {
            match self.nodes[current].child(symbol) {
                Some(child) => current = child.index(),
                None => break,
            }
            matched += 1;
        }
        self.ensure_room(symbols.len() - matched)?;
        for &symbol in &symbols[matched..] {
            current = self.get_or_create_child(current, symbol)?;
        }

        let end = &mut self.nodes[current];
        let is_new = !end.is_word_end;
        end.is_word_end = true;
        if is_new {
            self.words += 1;
        }
        Ok(is_new)
    }

    fn ensure_room(&self, extra: usize) -> TrieResult<()> {
        if self.nodes.len().saturating_add(extra) > self.node_limit {
            return Err(TrieError::CapacityExceeded { nodes: self.node_limit });
        }
        Ok(())
    }

    pub(crate) fn get_or_create_child(&mut self, parent: usize, symbol: Symbol) -> TrieResult<usize> {
        if let Some(child) = self.nodes[parent].child(symbol) {
            return Ok(child.index());
        }
        self.ensure_room(1)?;
        let child = NodeId::new(self.nodes.len())
            .ok_or(TrieError::CapacityExceeded { nodes: self.node_limit })?;
        self.nodes.push(Node::default());
        self.nodes[parent].set_child(symbol, child);
        Ok(child.index())
    }
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.trie.nodes[self.idx]
    }

    pub fn is_word_end(&self) -> bool {
        self.node().is_word_end
    }

    pub fn is_root(&self) -> bool {
        self.idx == ROOT
    }

    pub fn child(&self, c: char) -> Option<NodeRef<'a>> {
        self.child_symbol(Symbol::from_char(c)?)
    }

    pub fn child_symbol(&self, symbol: Symbol) -> Option<NodeRef<'a>> {
        self.node().child(symbol).map(|id| NodeRef { trie: self.trie, idx: id.index() })
    }

    pub fn child_count(&self) -> usize {
        self.node().child_count()
    }

    pub fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }

    /// Two nodes are the same shape if they have the same word-end flag and
    /// the same letters below them, recursively. Arena slot numbers are
    /// ignored, so tries built in different orders compare equal.
    pub fn same_shape(&self, other: &NodeRef<'_>) -> bool {
        let mut stack = vec![(*self, *other)];
        while let Some((a, b)) = stack.pop() {
            if a.is_word_end() != b.is_word_end() {
                return false;
            }
            for symbol in Symbol::all() {
                match (a.child_symbol(symbol), b.child_symbol(symbol)) {
                    (None, None) => {}
                    (Some(x), Some(y)) => stack.push((x, y)),
                    _ => return false,
                }
            }
        }
        true
    }
}

impl PartialEq for Trie {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
            && self.nodes.len() == other.nodes.len()
            && self.root().same_shape(&other.root())
    }
}

impl Eq for Trie {}

impl Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.node().fmt(f)
    }
}

impl Debug for Trie {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trie")
            .field("nodes", &self.nodes.len())
            .field("words", &self.words)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::wordlist::trie::trie::Trie;

    fn trie_of(words: &[&str]) -> Trie {
        Trie::from_words(words).unwrap()
    }

    #[test]
    fn finds_words_in_trie() {
        let words = vec!["hello", "help", "goodbye", "good"];
        let trie = trie_of(&words);
        (&words).iter().for_each(|word| assert!(trie.contains(word)));
        assert_eq!(trie.word_count(), 4);
    }

    #[test]
    fn doesnt_finds_words_not_in_trie() {
        let words = vec!["hello", "help", "goodbye", "good"];
        let bad_words = vec!["he", "h", "lol", "banana", "helpful", "", "Hello"];
        let trie = trie_of(&words);
        (&bad_words).iter().for_each(|word| assert!(!trie.contains(word)));
    }

    #[test]
    fn shares_common_prefix() {
        let trie = trie_of(&["cat", "car"]);
        let a = trie.traverse("ca").unwrap();
        assert_eq!(trie.root().child_count(), 1);
        assert_eq!(trie.traverse("c").unwrap().child_count(), 1);
        assert_eq!(a.child_count(), 2);
        assert!(!a.is_word_end());
        let ends = ['t', 'r'].iter()
            .map(|&c| a.child(c).unwrap())
            .filter(|n| n.is_word_end() && n.is_leaf())
            .count();
        assert_eq!(ends, 2);
        // root, c, a, t, r
        assert_eq!(trie.node_count(), 5);
    }

    #[test]
    fn chain_of_prefix_words() {
        let trie = trie_of(&["a", "an", "and"]);
        assert_eq!(trie.node_count(), 4);
        let mut cursor = trie.root();
        assert!(!cursor.is_word_end());
        for c in "and".chars() {
            assert_eq!(cursor.child_count(), 1);
            cursor = cursor.child(c).unwrap();
            assert!(cursor.is_word_end());
        }
        assert!(cursor.is_leaf());
    }

    #[test]
    fn empty_word_marks_root() {
        let trie = trie_of(&[""]);
        assert!(trie.root().is_word_end());
        assert!(trie.root().is_leaf());
        assert_eq!(trie.node_count(), 1);
        assert!(trie.contains(""));
    }

    #[test]
    fn empty_input_is_bare_root() {
        let trie = trie_of(&[]);
        assert!(trie.is_empty());
        assert!(!trie.root().is_word_end());
        assert_eq!(trie.node_count(), 1);
    }

    #[test]
    fn duplicate_word_is_idempotent() {
        let once = trie_of(&["ab"]);
        let twice = trie_of(&["ab", "ab"]);
        assert_eq!(once, twice);
        assert_eq!(twice.node_count(), 3);
        assert_eq!(twice.word_count(), 1);
    }

    #[test]
    fn traverse_stops_at_foreign_characters() {
        let trie = trie_of(&["cat"]);
        assert!(trie.traverse("c4t").is_none());
        assert!(trie.traverse("ca").is_some());
        assert!(trie.traverse("cats").is_none());
    }

    #[test]
    fn estimated_bytes_tracks_arena() {
        let small = trie_of(&["a"]);
        let large = trie_of(&["abcdefghij", "klmnopqrst"]);
        assert!(large.estimated_bytes() > small.estimated_bytes());
    }

    fn word() -> impl Strategy<Value=String> {
        "[a-z]{0,8}"
    }

    proptest! {
        #[test]
        fn every_inserted_word_is_found(words in prop::collection::vec(word(), 0..40)) {
            let trie = Trie::from_words(&words).unwrap();
            for w in &words {
                prop_assert!(trie.contains(w));
            }
        }

        #[test]
        fn no_false_positives(words in prop::collection::vec(word(), 0..40), query in word()) {
            let trie = Trie::from_words(&words).unwrap();
            prop_assert_eq!(trie.contains(&query), words.contains(&query));
        }

        #[test]
        fn duplicates_change_nothing(words in prop::collection::vec(word(), 0..40)) {
            let once = Trie::from_words(&words).unwrap();
            let twice = Trie::from_words(words.iter().chain(words.iter())).unwrap();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn insertion_order_is_irrelevant(words in prop::collection::vec(word(), 0..40)) {
            let forward = Trie::from_words(&words).unwrap();
            let backward = Trie::from_words(words.iter().rev()).unwrap();
            prop_assert_eq!(forward.node_count(), backward.node_count());
            prop_assert_eq!(forward, backward);
        }
    }
}
