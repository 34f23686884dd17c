use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use metrics::{counter, gauge};
use serde::Serialize;
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::alphabet::{check_word, normalize, symbols_of, Symbol};
use crate::error::{TrieError, TrieResult};
use crate::wordlist::trie::trie::{Trie, MAX_NODES};

/// What to do with a word that has characters outside `a`..`z`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InvalidWordPolicy {
    /// Fail the whole build with [`TrieError::InvalidCharacter`].
    Reject,
    /// Leave the word out.
    Skip,
    /// Lowercase the word and drop foreign characters before inserting it.
    Normalize,
}

impl Default for InvalidWordPolicy {
    fn default() -> Self {
        InvalidWordPolicy::Reject
    }
}

impl InvalidWordPolicy {
    /// The symbols `word` will be inserted as, or `None` if it is skipped.
    pub fn prepare(self, word: &str) -> TrieResult<Option<Vec<Symbol>>> {
        match self.resolve(word)? {
            Some(w) => symbols_of(&w).map(Some),
            None => Ok(None),
        }
    }

    /// The form of `word` that ends up in the trie, if any.
    pub fn apply<'w>(self, word: &'w str) -> Option<Cow<'w, str>> {
        self.resolve(word).ok().flatten()
    }

    /// A word that is non-empty but normalizes to nothing is skipped; it does
    /// not become the empty word.
    fn resolve<'w>(self, word: &'w str) -> TrieResult<Option<Cow<'w, str>>> {
        match self {
            InvalidWordPolicy::Reject => check_word(word).map(|_| Some(Cow::Borrowed(word))),
            InvalidWordPolicy::Skip => Ok(check_word(word).ok().map(|_| Cow::Borrowed(word))),
            InvalidWordPolicy::Normalize => {
                let normalized = normalize(word);
                if normalized.is_empty() && !word.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(normalized))
                }
            }
        }
    }
}

impl FromStr for InvalidWordPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(InvalidWordPolicy::Reject),
            "skip" => Ok(InvalidWordPolicy::Skip),
            "normalize" => Ok(InvalidWordPolicy::Normalize),
            other => Err(format!("unknown policy {:?} (expected reject, skip or normalize)", other)),
        }
    }
}

impl Display for InvalidWordPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            InvalidWordPolicy::Reject => "reject",
            InvalidWordPolicy::Skip => "skip",
            InvalidWordPolicy::Normalize => "normalize",
        })
    }
}

#[derive(TypedBuilder, Clone, Debug, Default)]
pub struct BuildConfig {
    #[builder(default)]
    pub on_invalid: InvalidWordPolicy,
    /// Expected number of nodes, reserved up front.
    #[builder(default, setter(strip_option))]
    pub node_capacity: Option<usize>,
    /// Most nodes the trie may hold, root included. Capped at what a 32-bit
    /// node index can address.
    #[builder(default, setter(strip_option))]
    pub max_nodes: Option<usize>,
}

/// Counters collected while building.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct BuildStats {
    pub words_seen: usize,
    pub words_added: usize,
    pub duplicates: usize,
    pub skipped: usize,
    pub nodes_created: usize,
}

pub struct TrieBuilder {
    trie: Trie,
    config: BuildConfig,
    stats: BuildStats,
}

impl TrieBuilder {
    pub fn new() -> TrieBuilder {
        TrieBuilder::with_config(BuildConfig::default())
    }

    pub fn with_config(config: BuildConfig) -> TrieBuilder {
        let mut trie = Trie::new();
        if let Some(capacity) = config.node_capacity {
            trie.nodes.reserve(capacity.saturating_sub(1));
        }
        if let Some(max_nodes) = config.max_nodes {
            trie.node_limit = max_nodes.min(MAX_NODES);
        }
        TrieBuilder {
            trie,
            config,
            stats: BuildStats::default(),
        }
    }

    /// Adds one word. The word is checked against the policy and the node
    /// limit before any node is created, so a failed insert leaves the trie as
    /// it was.
    pub fn insert(&mut self, word: &str) -> TrieResult<&mut TrieBuilder> {
        self.stats.words_seen += 1;
        let symbols = match self.config.on_invalid.prepare(word)? {
            Some(symbols) => symbols,
            None => {
                debug!(word, policy = %self.config.on_invalid, "skipping word");
                counter!("trie.words_skipped", 1);
                self.stats.skipped += 1;
                return Ok(self);
            }
        };

        let before = self.trie.node_count();
        if self.trie.insert_symbols(&symbols)? {
            counter!("trie.words_added", 1);
            self.stats.words_added += 1;
        } else {
            self.stats.duplicates += 1;
        }
        self.stats.nodes_created += self.trie.node_count() - before;
        Ok(self)
    }

    /// Inserts every word of `words`, in order, stopping at the first error.
    pub fn build<I, S>(&mut self, words: I) -> TrieResult<&mut TrieBuilder>
        where I: IntoIterator<Item=S>, S: AsRef<str> {
        for word in words {
            self.insert(word.as_ref())?;
        }
        Ok(self)
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Hands over the finished trie with its arena trimmed to size.
    pub fn finish(self) -> Trie {
        let mut trie = self.trie;
        trie.nodes.shrink_to_fit();
        gauge!("trie.nodes", trie.node_count() as f64);
        trie
    }
}

impl Default for TrieBuilder {
    fn default() -> Self {
        TrieBuilder::new()
    }
}
