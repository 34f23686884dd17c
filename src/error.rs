//! Error types for building and loading tries.

use std::io;
use std::path::PathBuf;

/// Errors that can occur while loading a word list or building a trie.
#[derive(Debug, thiserror::Error)]
pub enum TrieError {
    /// A word contains a character outside `a`..`z`.
    #[error("invalid character {character:?} at position {position} in word {word:?}")]
    InvalidCharacter {
        word: String,
        position: usize,
        character: char,
    },

    /// The word needs more nodes than the trie is allowed to hold.
    #[error("trie cannot hold more than {nodes} nodes")]
    CapacityExceeded { nodes: usize },

    /// A delimited line has fewer columns than the format asks for.
    #[error("line {line} has no column {column}")]
    MissingColumn { line: usize, column: usize },

    #[error("failed to open word list {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Result type for trie operations.
pub type TrieResult<T> = Result<T, TrieError>;
