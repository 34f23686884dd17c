use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use delegate::delegate;
use rayon::prelude::*;
use tracing::{debug, info, warn};
use typed_builder::TypedBuilder;

use crate::error::{TrieError, TrieResult};
use crate::wordlist::trie::{BuildConfig, BuildStats, NodeRef, Trie, TrieBuilder};

/// How to pull a word out of each line of a word list.
#[derive(TypedBuilder, Clone, Debug)]
pub struct FileFormat {
    #[builder(default, setter(strip_option))]
    delimiter: Option<char>,
    #[builder(default, setter(strip_option))]
    word_column: Option<usize>,
    #[builder(default)]
    skip_blank_lines: bool,
}

impl Default for FileFormat {
    fn default() -> Self {
        FileFormat::builder().build()
    }
}

impl FileFormat {
    /// The word on `line`, or `None` if the line is to be ignored.
    /// `line_no` is 1-based and only used in errors.
    fn parse_line<'a>(&self, line: &'a str, line_no: usize) -> TrieResult<Option<&'a str>> {
        if self.skip_blank_lines && line.trim().is_empty() {
            return Ok(None);
        }
        let word = match self.delimiter {
            None => line,
            Some(delimiter) => {
                let column = self.word_column.unwrap_or(0);
                line.split(delimiter)
                    .nth(column)
                    .map(str::trim)
                    .ok_or(TrieError::MissingColumn { line: line_no, column })?
            }
        };
        if self.skip_blank_lines && word.is_empty() {
            return Ok(None);
        }
        Ok(Some(word))
    }
}

/// Reads one word per line. Lines end in `\n` or `\r\n`; a final newline does
/// not add an empty word. Lines that are not UTF-8 are skipped.
pub fn read_words<R: BufRead>(reader: R, format: &FileFormat) -> TrieResult<Vec<String>> {
    let mut words = Vec::new();
    let mut failures: usize = 0;

    for (idx, line) in reader.lines().enumerate() {
        match line {
            Ok(line) => {
                if let Some(word) = format.parse_line(&line, idx + 1)? {
                    words.push(word.to_string());
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                warn!(line = idx + 1, "skipping line: {}", e);
                failures += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
    if failures > 0 {
        warn!(failures, "some lines could not be decoded");
    }
    Ok(words)
}

pub fn read_words_from_file<P: AsRef<Path>>(path: P, format: &FileFormat) -> TrieResult<Vec<String>> {
    let path = path.as_ref();
    info!("Reading words from {:?}", path);
    let file = File::open(path).map_err(|source| TrieError::Open { path: path.to_path_buf(), source })?;
    read_words(BufReader::new(file), format)
}

/// A built trie together with how it was built.
pub struct Wordlist {
    trie: Trie,
    config: BuildConfig,
    stats: BuildStats,
}

impl Wordlist {
    pub fn from_file<P: AsRef<Path>>(path: P, format: &FileFormat, config: BuildConfig) -> TrieResult<Wordlist> {
        let start = Instant::now();
        let words = read_words_from_file(path, format)?;
        info!("Reading took {:.3}s", start.elapsed().as_secs_f64());
        Wordlist::from_words(&words, config)
    }

    pub fn from_words<I, S>(words: I, config: BuildConfig) -> TrieResult<Wordlist>
        where I: IntoIterator<Item=S>, S: AsRef<str> {
        let start = Instant::now();
        let mut builder = TrieBuilder::with_config(config.clone());
        for word in words {
            builder.insert(word.as_ref())?;
            let seen = builder.stats().words_seen;
            if seen % 100_000 == 0 {
                debug!(seen, nodes = builder.trie().node_count(), "building");
            }
        }
        let stats = *builder.stats();
        let trie = builder.finish();

        let elapsed = start.elapsed();
        info!("Read {} words in {:.3}s ({} nodes, {} skipped, {} duplicates)",
              stats.words_seen, elapsed.as_secs_f64(), trie.node_count(), stats.skipped, stats.duplicates);
        Ok(Wordlist { trie, config, stats })
    }

    delegate! {
        to self.trie {
            pub fn contains(&self, word: &str) -> bool;
            pub fn traverse(&self, word: &str) -> Option<NodeRef<'_>>;
            pub fn node_count(&self) -> usize;
            pub fn word_count(&self) -> usize;
            pub fn estimated_bytes(&self) -> usize;
        }
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn stats(&self) -> &BuildStats {
        &self.stats
    }

    /// Words from `words` that are not in the list, after applying the same
    /// policy used when building. Words the policy skips are not reported.
    pub fn missing<'w, S>(&self, words: &'w [S]) -> Vec<&'w str>
        where S: AsRef<str> + Sync {
        let policy = self.config.on_invalid;
        words.par_iter()
            .map(|w| w.as_ref())
            .filter(|w| policy.apply(w).map(|x| !self.trie.contains(&x)).unwrap_or(false))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use tempfile::NamedTempFile;

    use super::*;
    use crate::wordlist::trie::InvalidWordPolicy;

    fn read(input: &[u8], format: FileFormat) -> TrieResult<Vec<String>> {
        read_words(Cursor::new(input), &format)
    }

    #[test]
    fn splits_unix_and_windows_line_endings() {
        let words = read(b"cat\r\ncar\ndog\r\n", FileFormat::default()).unwrap();
        assert_eq!(words, vec!["cat", "car", "dog"]);
    }

    #[test]
    fn blank_lines_are_empty_words_unless_skipped() {
        assert_eq!(read(b"a\n\nb\n", FileFormat::default()).unwrap(), vec!["a", "", "b"]);
        assert_eq!(read(b"\n", FileFormat::default()).unwrap(), vec![""]);
        assert!(read(b"", FileFormat::default()).unwrap().is_empty());

        let format = FileFormat::builder().skip_blank_lines(true).build();
        assert_eq!(read(b"a\n\r\n\nb", format).unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn picks_delimited_column() {
        let format = FileFormat::builder().delimiter('\t').word_column(1).build();
        let words = read(b"12\tapple\n7\tpear\n", format).unwrap();
        assert_eq!(words, vec!["apple", "pear"]);
    }

    #[test]
    fn blank_column_is_skipped_with_blank_lines() {
        let format = FileFormat::builder().delimiter('\t').word_column(1).skip_blank_lines(true).build();
        let words = read(b"1\tcat\n\n2\t\n3\t  \n", format).unwrap();
        assert_eq!(words, vec!["cat"]);

        let wl = Wordlist::from_words(&words, BuildConfig::default()).unwrap();
        assert!(!wl.trie().root().is_word_end());
    }

    #[test]
    fn missing_column_is_an_error() {
        let format = FileFormat::builder().delimiter(',').word_column(2).build();
        match read(b"a,b,c\nd,e\n", format) {
            Err(TrieError::MissingColumn { line, column }) => {
                assert_eq!(line, 2);
                assert_eq!(column, 2);
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn skips_undecodable_lines() {
        let words = read(b"ok\n\xff\xfe\nfine\n", FileFormat::default()).unwrap();
        assert_eq!(words, vec!["ok", "fine"]);
    }

    #[test]
    fn loads_wordlist_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "a\nan\nand\nand\n").unwrap();

        let wl = Wordlist::from_file(file.path(), &FileFormat::default(), BuildConfig::default()).unwrap();
        assert_eq!(wl.word_count(), 3);
        assert_eq!(wl.node_count(), 4);
        assert_eq!(wl.stats().duplicates, 1);
        assert!(wl.contains("an"));
        assert!(wl.traverse("and").unwrap().is_leaf());
    }

    #[test]
    fn open_error_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.txt");
        match Wordlist::from_file(&path, &FileFormat::default(), BuildConfig::default()) {
            Err(TrieError::Open { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Open error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn missing_applies_build_policy() {
        let config = BuildConfig::builder().on_invalid(InvalidWordPolicy::Normalize).build();
        let wl = Wordlist::from_words(["Cat", "dog"], config).unwrap();
        let queries = vec!["cat", "CAT", "Dog", "cow", "!!"];
        assert_eq!(wl.missing(&queries), vec!["cow"]);

        let wl = Wordlist::from_words(["cat"], BuildConfig::default()).unwrap();
        assert_eq!(wl.missing(&["cat", "Cat", "cow"]), vec!["cow"]);
    }
}
