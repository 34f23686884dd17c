use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trie_footprint::wordlist::wordlist::read_words_from_file;
use trie_footprint::{BuildConfig, FileFormat, InvalidWordPolicy, MemoryReport, Wordlist};

/// Build a trie from a word list and report how much memory it takes.
#[derive(StructOpt)]
struct Cli {
    /// The word list, one word per line
    #[structopt(parse(from_os_str))]
    path: PathBuf,

    /// What to do with words containing characters outside a-z
    #[structopt(long, default_value = "reject", possible_values = &["reject", "skip", "normalize"])]
    on_invalid: InvalidWordPolicy,

    /// Split lines on this character and take one column as the word
    #[structopt(long)]
    delimiter: Option<char>,

    /// Column holding the word when --delimiter is set
    #[structopt(long, requires = "delimiter")]
    word_column: Option<usize>,

    /// Ignore blank lines instead of inserting the empty word
    #[structopt(long)]
    skip_blank_lines: bool,

    /// Print the report as JSON
    #[structopt(long)]
    json: bool,

    /// Check that every word of the list can be found after building
    #[structopt(long)]
    verify: bool,

    /// Write the built trie to this file as JSON
    #[structopt(long, parse(from_os_str))]
    snapshot: Option<PathBuf>,
}

impl Cli {
    fn file_format(&self) -> FileFormat {
        match (self.delimiter, self.word_column) {
            (Some(d), Some(c)) => FileFormat::builder().delimiter(d).word_column(c)
                .skip_blank_lines(self.skip_blank_lines).build(),
            (Some(d), None) => FileFormat::builder().delimiter(d)
                .skip_blank_lines(self.skip_blank_lines).build(),
            _ => FileFormat::builder().skip_blank_lines(self.skip_blank_lines).build(),
        }
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let args = Cli::from_args();

    let words = read_words_from_file(&args.path, &args.file_format())
        .with_context(|| format!("could not read {:?}", args.path))?;
    let config = BuildConfig::builder().on_invalid(args.on_invalid).build();
    let wl = Wordlist::from_words(&words, config)
        .context("could not build trie")?;

    if args.verify {
        let start = Instant::now();
        let missing = wl.missing(&words);
        info!("Verified {} words in {:.3}s", words.len(), start.elapsed().as_secs_f64());
        if !missing.is_empty() {
            bail!("{} words missing after build, first: {:?}", missing.len(), missing[0]);
        }
    }

    if let Some(path) = &args.snapshot {
        let file = File::create(path).with_context(|| format!("could not create {:?}", path))?;
        serde_json::to_writer(BufWriter::new(file), wl.trie())
            .with_context(|| format!("could not write snapshot to {:?}", path))?;
        info!("Wrote snapshot to {:?}", path);
    }

    let report = MemoryReport::of(wl.trie());
    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
