//! Serde support for [`Trie`].
//!
//! A trie is written as a flat sequence of entries in prefix order, root
//! first. Each entry carries its depth, so reading it back only needs a stack
//! of the current path.

use std::fmt::Formatter;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::alphabet::Symbol;
use crate::wordlist::trie::trie::{Trie, ROOT};

#[derive(Serialize, Deserialize, Debug)]
struct Entry {
    depth: usize,
    letter: Option<char>,
    is_word_end: bool,
}

impl Serialize for Trie {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut seq = serializer.serialize_seq(Some(self.node_count()))?;
        for visit in self.traverse_prefix() {
            seq.serialize_element(&Entry {
                depth: visit.depth,
                letter: visit.letter.map(Symbol::as_char),
                is_word_end: visit.node.is_word_end(),
            })?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Trie {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        deserializer.deserialize_seq(TrieVisitor {})
    }
}

struct TrieVisitor {}

impl<'de> Visitor<'de> for TrieVisitor {
    type Value = Trie;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        write!(formatter, "a sequence of trie entries in prefix order")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error> where A: SeqAccess<'de> {
        let mut trie = Trie::new();
        if let Some(hint) = seq.size_hint() {
            trie.nodes.reserve(hint.saturating_sub(1));
        }

        match seq.next_element::<Entry>()? {
            Some(Entry { depth: 0, letter: None, is_word_end }) => {
                trie.nodes[ROOT].is_word_end = is_word_end;
            }
            Some(entry) => return Err(de::Error::custom(format!("expected root entry, found {:?}", entry))),
            None => return Err(de::Error::invalid_length(0, &self)),
        }

        // Arena slots of the nodes on the current path; stack[d] has depth d.
        let mut stack = vec![ROOT];
        while let Some(entry) = seq.next_element::<Entry>()? {
            if entry.depth == 0 || entry.depth > stack.len() {
                return Err(de::Error::custom(format!("unexpected depth {}", entry.depth)));
            }
            stack.truncate(entry.depth);

            let letter = entry.letter
                .ok_or_else(|| <A::Error as de::Error>::custom("missing letter on non-root entry"))?;
            let symbol = Symbol::from_char(letter)
                .ok_or_else(|| <A::Error as de::Error>::custom(format!("invalid letter {:?}", letter)))?;

            let parent = stack[stack.len() - 1];
            if trie.nodes[parent].child(symbol).is_some() {
                return Err(de::Error::custom(format!("duplicate child {:?}", letter)));
            }
            let child = trie.get_or_create_child(parent, symbol).map_err(<A::Error as de::Error>::custom)?;
            if entry.is_word_end {
                trie.nodes[child].is_word_end = true;
            }
            stack.push(child);
        }

        let dangling = trie.traverse_prefix()
            .any(|v| !v.node.is_root() && v.node.is_leaf() && !v.node.is_word_end());
        if dangling {
            return Err(de::Error::custom("leaf node that ends no word"));
        }
        trie.words = trie.nodes.iter().filter(|n| n.is_word_end).count();
        Ok(trie)
    }
}

#[cfg(test)]
mod tests {
    use crate::wordlist::trie::trie::Trie;

    #[test]
    fn test_serialize_deserialize() {
        let words = vec!["hello", "help", "goodbye", "good", ""];
        let trie = Trie::from_words(&words).unwrap();

        let serialized = serde_json::to_string(&trie).unwrap();
        let new_trie = serde_json::from_str::<Trie>(&serialized).unwrap();

        (&words).iter().for_each(|word| assert!(new_trie.contains(word)));
        assert_eq!(new_trie, trie);
        assert_eq!(new_trie.word_count(), 5);
    }

    #[test]
    fn serializes_entries_in_prefix_order() {
        let trie = Trie::from_words(["ab"]).unwrap();
        assert_eq!(
            serde_json::to_string(&trie).unwrap(),
            r#"[{"depth":0,"letter":null,"is_word_end":false},{"depth":1,"letter":"a","is_word_end":false},{"depth":2,"letter":"b","is_word_end":true}]"#
        );
    }

    fn parse(json: &str) -> Result<Trie, serde_json::Error> {
        serde_json::from_str::<Trie>(json)
    }

    #[test]
    fn rejects_malformed_snapshots() {
        // empty
        assert!(parse("[]").is_err());
        // first entry is not the root
        assert!(parse(r#"[{"depth":1,"letter":"a","is_word_end":true}]"#).is_err());
        // depth jumps two levels
        assert!(parse(r#"[{"depth":0,"letter":null,"is_word_end":false},
                          {"depth":2,"letter":"a","is_word_end":true}]"#).is_err());
        // letter outside the alphabet
        assert!(parse(r#"[{"depth":0,"letter":null,"is_word_end":false},
                          {"depth":1,"letter":"A","is_word_end":true}]"#).is_err());
        // same child twice
        assert!(parse(r#"[{"depth":0,"letter":null,"is_word_end":false},
                          {"depth":1,"letter":"a","is_word_end":true},
                          {"depth":1,"letter":"a","is_word_end":true}]"#).is_err());
        // leaf that is not a word
        assert!(parse(r#"[{"depth":0,"letter":null,"is_word_end":false},
                          {"depth":1,"letter":"a","is_word_end":false}]"#).is_err());
    }

    #[test]
    fn bare_root_round_trips() {
        let trie = parse(r#"[{"depth":0,"letter":null,"is_word_end":false}]"#).unwrap();
        assert!(trie.is_empty());
        assert_eq!(trie.node_count(), 1);
    }
}
