//! Corpus collaborators: where titles and token streams come from.
//!
//! The generator only needs two things from a corpus, both behind the
//! [`CorpusSource`] trait:
//! - the deduplicated list of real titles (for the uniqueness filter)
//! - the boundary-flagged token stream (for the chain)

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::TitleError;
use crate::io;
use crate::model::token::Token;

/// A named source of titles.
///
/// Implementations must return titles deduplicated by exact text, first
/// occurrence kept.
pub trait CorpusSource {
	/// Returns the deduplicated titles of `corpus_id`.
	fn fetch_titles(&self, corpus_id: &str) -> Result<Vec<String>, TitleError>;

	/// Returns the token stream of `corpus_id`.
	///
	/// The default implementation tokenizes every title of
	/// [`fetch_titles`](Self::fetch_titles) with [`tokenize_title`] and
	/// concatenates the results in order.
	fn fetch_tokens(&self, corpus_id: &str) -> Result<Vec<Token>, TitleError> {
		let titles = self.fetch_titles(corpus_id)?;
		Ok(titles.iter().flat_map(|title| tokenize_title(title)).collect())
	}
}

impl<T: CorpusSource + ?Sized> CorpusSource for Box<T> {
	fn fetch_titles(&self, corpus_id: &str) -> Result<Vec<String>, TitleError> {
		(**self).fetch_titles(corpus_id)
	}

	fn fetch_tokens(&self, corpus_id: &str) -> Result<Vec<Token>, TitleError> {
		(**self).fetch_tokens(corpus_id)
	}
}

/// Splits a title into flagged tokens.
///
/// - Splits on any whitespace
/// - Drops tokens made only of emoji
/// - Flags the first remaining token as a title start and the last one as a
///   title end (a single token gets both)
///
/// A title with no remaining token yields an empty vector.
pub fn tokenize_title(title: &str) -> Vec<Token> {
	let mut tokens: Vec<Token> = title
		.split_whitespace()
		.filter(|word| !is_emoji_token(word))
		.map(Token::new)
		.collect();

	if let Some(first) = tokens.first_mut() {
		first.is_title_start = true;
	}
	if let Some(last) = tokens.last_mut() {
		last.is_title_end = true;
	}
	tokens
}

/// Whether a whitespace-delimited word is exactly one emoji.
///
/// Looks the whole word up in the Unicode emoji list, including skin-tone
/// and zero-width-joiner sequences. Symbols that are not emoji (`★`, `✓`),
/// words mixing emoji and text, and runs of several emoji are kept.
pub fn is_emoji_token(word: &str) -> bool {
	emojis::get(word).is_some()
}

/// Removes exact duplicates, keeping the first occurrence of each title.
pub fn dedup_titles<I: IntoIterator<Item = String>>(titles: I) -> Vec<String> {
	let mut seen = HashSet::new();
	titles
		.into_iter()
		.filter(|title| seen.insert(title.clone()))
		.collect()
}

/// In-memory corpora, keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct MemoryCorpus {
	corpora: HashMap<String, Vec<String>>,
}

impl MemoryCorpus {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers (or replaces) a corpus. Titles are deduplicated on insert.
	pub fn insert<I, S>(&mut self, corpus_id: &str, titles: I)
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let titles = dedup_titles(titles.into_iter().map(Into::into));
		self.corpora.insert(corpus_id.to_owned(), titles);
	}
}

impl CorpusSource for MemoryCorpus {
	fn fetch_titles(&self, corpus_id: &str) -> Result<Vec<String>, TitleError> {
		self.corpora
			.get(corpus_id)
			.cloned()
			.ok_or_else(|| TitleError::CorpusNotFound { corpus: corpus_id.to_owned() })
	}
}

/// Configuration of a [`FileCorpus`].
///
/// Files hold one title per line.
/// - Without categories, corpus `news` is read from `<data_dir>/news.<extension>`.
/// - With categories, it is read from `<data_dir>/news/<category>.<extension>`
///   for each category in order. Missing category files are skipped, but at
///   least one must exist.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CorpusConfig {
	pub data_dir: String,
	pub extension: String,
	pub categories: Vec<String>,
}

impl Default for CorpusConfig {
	fn default() -> Self {
		Self {
			data_dir: "./data".to_owned(),
			extension: "dat".to_owned(),
			categories: Vec::new(),
		}
	}
}

/// Corpus read from text files on disk.
///
/// Nothing is cached: every fetch reads the files again, so each generation
/// request sees the corpus as it is at that moment.
#[derive(Clone, Debug)]
pub struct FileCorpus {
	config: CorpusConfig,
	data_dir: PathBuf,
}

impl FileCorpus {
	/// Creates a file corpus.
	///
	/// # Errors
	/// Returns an error if `data_dir` is not a directory or the extension is
	/// empty.
	pub fn new(config: CorpusConfig) -> Result<Self, TitleError> {
		let data_dir = io::normalize_folder(&config.data_dir);
		if !data_dir.is_dir() {
			return Err(TitleError::InvalidConfig(format!("Expected a directory, got: {}", data_dir.display())));
		}
		if config.extension.is_empty() {
			return Err(TitleError::InvalidConfig("extension cannot be empty".to_owned()));
		}
		Ok(Self { config, data_dir })
	}

	/// Lists the corpus identifiers available in the data directory, sorted.
	pub fn list_corpora(&self) -> Result<Vec<String>, TitleError> {
		if !self.config.categories.is_empty() {
			return Ok(io::list_dirs(&self.data_dir)?);
		}

		io::list_files(&self.data_dir, &self.config.extension)?
			.iter()
			.map(|file| io::get_filename(file).map_err(TitleError::from))
			.collect()
	}

	fn corpus_files(&self, corpus_id: &str) -> Vec<PathBuf> {
		if self.config.categories.is_empty() {
			return vec![self.data_dir.join(format!("{}.{}", corpus_id, self.config.extension))];
		}

		let corpus_dir = self.data_dir.join(corpus_id);
		self.config
			.categories
			.iter()
			.map(|category| corpus_dir.join(format!("{}.{}", category, self.config.extension)))
			.collect()
	}
}

/// Rejects identifiers that would escape the data directory.
fn is_valid_corpus_id(corpus_id: &str) -> bool {
	!corpus_id.is_empty()
		&& corpus_id != "."
		&& corpus_id != ".."
		&& !corpus_id.contains(['/', '\\'])
}

impl CorpusSource for FileCorpus {
	fn fetch_titles(&self, corpus_id: &str) -> Result<Vec<String>, TitleError> {
		let not_found = || TitleError::CorpusNotFound { corpus: corpus_id.to_owned() };
		if !is_valid_corpus_id(corpus_id) {
			return Err(not_found());
		}

		let mut titles = Vec::new();
		let mut found = false;
		for path in self.corpus_files(corpus_id) {
			if !path.is_file() {
				debug!("Skipping missing corpus file {}", path.display());
				continue;
			}
			found = true;
			titles.extend(
				io::read_file(&path)?
					.into_iter()
					.map(|line| line.trim().to_owned())
					.filter(|line| !line.is_empty()),
			);
		}
		if !found {
			return Err(not_found());
		}

		let total = titles.len();
		let titles = dedup_titles(titles);
		debug!("Loaded {} titles for '{}' ({} duplicates removed)", titles.len(), corpus_id, total - titles.len());
		Ok(titles)
	}
}
