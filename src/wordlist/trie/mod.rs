pub mod trie;
pub mod trie_builder;
pub mod iterators;
pub mod multithreaded_lookup;

mod node;
mod snapshot;

pub use trie::{NodeRef, Trie};
pub use trie_builder::{BuildConfig, BuildStats, InvalidWordPolicy, TrieBuilder};
