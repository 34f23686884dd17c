use std::fmt::{Display, Formatter};

use derive_new::new;
use serde::Serialize;

use crate::wordlist::trie::Trie;

const MEGABYTE: f64 = 1024.0 * 1024.0;

/// How big a built trie is.
#[derive(new, Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MemoryReport {
    pub nodes: usize,
    pub words: usize,
    pub bytes: usize,
}

impl MemoryReport {
    pub fn of(trie: &Trie) -> MemoryReport {
        MemoryReport::new(trie.node_count(), trie.word_count(), trie.estimated_bytes())
    }

    pub fn megabytes(&self) -> f64 {
        self.bytes as f64 / MEGABYTE
    }
}

impl Display for MemoryReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "The script uses approximately {:.2} MB", self.megabytes())
    }
}
