use rayon::prelude::*;

use crate::wordlist::trie::trie::Trie;

impl Trie {
    /// Checks `words` against the trie on the rayon pool and returns the ones
    /// that are not in it, in input order.
    pub fn missing<'w, S>(&self, words: &'w [S]) -> Vec<&'w str>
        where S: AsRef<str> + Sync {
        words.par_iter()
            .map(|w| w.as_ref())
            .filter(|w| !self.contains(w))
            .collect()
    }
}
