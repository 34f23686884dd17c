//! Builds a prefix tree from a word list and reports how much memory it takes.

pub mod alphabet;
pub mod error;
pub mod report;
pub mod wordlist;

pub use error::{TrieError, TrieResult};
pub use report::MemoryReport;
pub use wordlist::trie::{BuildConfig, BuildStats, InvalidWordPolicy, NodeRef, Trie, TrieBuilder};
pub use wordlist::wordlist::{FileFormat, Wordlist};
