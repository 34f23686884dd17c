use crate::alphabet::{Symbol, ALPHABET};
use crate::wordlist::trie::trie::{NodeRef, Trie};

/// Children of one node in alphabet order.
#[derive(Debug)]
pub struct Children<'a> {
    idx: usize,
    node: NodeRef<'a>,
}

impl<'a> Iterator for Children<'a> {
    type Item = (Symbol, NodeRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < ALPHABET.len() {
            let symbol = Symbol::from_index(self.idx)?;
            self.idx += 1;
            if let Some(child) = self.node.child_symbol(symbol) {
                return Some((symbol, child));
            }
        }
        None
    }
}

impl<'a> NodeRef<'a> {
    pub fn children(&self) -> Children<'a> {
        Children { idx: 0, node: *self }
    }
}

impl<'a> IntoIterator for NodeRef<'a> {
    type Item = (Symbol, NodeRef<'a>);
    type IntoIter = Children<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.children()
    }
}

/// One step of a prefix-order walk: the node, its depth (root is 0) and the
/// letter that leads to it (`None` for the root).
#[derive(Copy, Clone, Debug)]
pub struct Visit<'a> {
    pub depth: usize,
    pub letter: Option<Symbol>,
    pub node: NodeRef<'a>,
}

/// Prefix-order walk over the whole trie, children in alphabet order.
pub struct PrefixWalk<'a> {
    stack: Vec<Visit<'a>>,
}

impl<'a> Iterator for PrefixWalk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let visit = self.stack.pop()?;
        let mut children = visit.node.children()
            .map(|(letter, node)| Visit { depth: visit.depth + 1, letter: Some(letter), node })
            .collect::<Vec<_>>();
        children.reverse();
        self.stack.extend(children);
        Some(visit)
    }
}

impl Trie {
    pub fn traverse_prefix(&self) -> PrefixWalk<'_> {
        PrefixWalk {
            stack: vec![Visit { depth: 0, letter: None, node: self.root() }],
        }
    }
}
