use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};

use crate::error::{TrieError, TrieResult};

pub const ALPHABET: &[u8] = "abcdefghijklmnopqrstuvwxyz".as_bytes();

/// One letter of [`ALPHABET`], stored as its offset from `a`.
///
/// The only way to get a `Symbol` is through a checked constructor, so every
/// value is in `0..ALPHABET.len()` and can index a child table directly.
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Symbol(u8);

impl Symbol {
    pub fn from_char(c: char) -> Option<Symbol> {
        if c.is_ascii_lowercase() {
            Some(Symbol(c as u8 - b'a'))
        } else {
            None
        }
    }

    pub fn from_index(idx: usize) -> Option<Symbol> {
        if idx < ALPHABET.len() {
            Some(Symbol(idx as u8))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn as_char(self) -> char {
        ALPHABET[self.index()] as char
    }

    pub fn all() -> impl Iterator<Item = Symbol> {
        (0..ALPHABET.len() as u8).map(Symbol)
    }
}

impl Debug for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({:?})", self.as_char())
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Maps a lowercase ASCII letter to its symbol (`a` is 0, `z` is 25).
///
/// Anything else is an [`TrieError::InvalidCharacter`] with position 0; use
/// [`symbols_of`] to get errors that point into a whole word.
pub fn symbol_of(c: char) -> TrieResult<Symbol> {
    Symbol::from_char(c).ok_or_else(|| TrieError::InvalidCharacter {
        word: c.to_string(),
        position: 0,
        character: c,
    })
}

/// Checks that every character of `word` is in the alphabet. `position` in
/// the error counts characters, not bytes.
pub fn check_word(word: &str) -> TrieResult<()> {
    match word.chars().enumerate().find(|(_, c)| Symbol::from_char(*c).is_none()) {
        Some((position, character)) => Err(TrieError::InvalidCharacter {
            word: word.to_string(),
            position,
            character,
        }),
        None => Ok(()),
    }
}

/// Maps every character of `word`, failing on the first one outside the
/// alphabet.
pub fn symbols_of(word: &str) -> TrieResult<Vec<Symbol>> {
    check_word(word)?;
    Ok(word.chars().filter_map(Symbol::from_char).collect())
}

/// Lowercases ASCII and drops everything that is not in the alphabet.
pub fn normalize(s: &str) -> Cow<str> {
    if s.chars().all(|c| c.is_ascii_lowercase()) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(
            s.chars()
                .map(|c| c.to_ascii_lowercase())
                .filter(|c| c.is_ascii_lowercase())
                .collect(),
        )
    }
}
