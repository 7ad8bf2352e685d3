use log::debug;
use rand::Rng;

use super::generation_config::GenerationConfig;
use super::start_selector::{choose_start, has_start, sample_start};
use super::token::Token;
use super::transition_table::TransitionTable;
use crate::error::TitleError;

/// A token stream together with the transition table built from it.
///
/// Keeping both in one value guarantees that start selection and the walk
/// use the same snapshot, which is what makes a `ChainLookupFailure`
/// structurally impossible for a well-formed stream.
#[derive(Clone, Debug)]
pub struct TitleChain {
	stream: Vec<Token>,
	table: TransitionTable,
}

impl TitleChain {
	/// Builds the table for `stream` and takes ownership of both.
	pub fn new(stream: Vec<Token>) -> Self {
		let table = TransitionTable::build(&stream);
		Self { stream, table }
	}

	pub fn stream(&self) -> &[Token] {
		&self.stream
	}

	pub fn table(&self) -> &TransitionTable {
		&self.table
	}

	/// Generates one title. See [`generate_title`].
	pub fn generate<R: Rng + ?Sized>(&self, config: &GenerationConfig, rng: &mut R) -> Result<String, TitleError> {
		generate_title(&self.table, &self.stream, config, rng)
	}

	/// Generates `count` titles. See [`generate_titles`].
	pub fn generate_many<R: Rng + ?Sized>(&self, count: usize, config: &GenerationConfig, rng: &mut R) -> Result<Vec<String>, TitleError> {
		generate_titles(&self.table, &self.stream, count, config, rng)
	}
}

/// Walks the chain once and returns the generated title.
///
/// # Behavior
/// - Picks a start index with [`choose_start`].
/// - A start token that also ends a title is returned alone.
/// - Otherwise the title begins with the start token and its successor in
///   the stream. If that successor ends a title, the table is never
///   consulted.
/// - Then tokens are drawn from the table for the last two tokens until one
///   carries the end flag, or until the title reaches
///   `config.max_title_chars()` characters, in which case it is returned as
///   accumulated.
///
/// # Errors
/// - `EmptyCorpus` if the stream holds no start token
/// - `TruncatedStream` if the start token is the last of the stream and
///   does not end a title
/// - `ChainLookupFailure` if the current key is missing from the table.
///   This is fatal: the walk is not restarted from another start token.
pub fn generate_title<R: Rng + ?Sized>(
	table: &TransitionTable,
	stream: &[Token],
	config: &GenerationConfig,
	rng: &mut R,
) -> Result<String, TitleError> {
	let start = choose_start(stream, rng)?;
	walk_from(table, stream, start, config, rng)
}

/// Walks the chain from a known start index.
fn walk_from<R: Rng + ?Sized>(
	table: &TransitionTable,
	stream: &[Token],
	start: usize,
	config: &GenerationConfig,
	rng: &mut R,
) -> Result<String, TitleError> {
	let first = &stream[start];
	if first.is_title_end {
		return Ok(first.text.clone());
	}

	let second = stream
		.get(start + 1)
		.ok_or(TitleError::TruncatedStream { index: start })?;

	let mut title = format!("{} {}", first.text, second.text);
	if second.is_title_end {
		return Ok(title);
	}

	let max_chars = config.max_title_chars();
	let mut title_chars = title.chars().count();
	let mut key = (first, second);

	while title_chars < max_chars {
		let next = table.predict(key.0, key.1, rng)?;
		title.push(' ');
		title.push_str(&next.text);
		title_chars += 1 + next.text.chars().count();

		if next.is_title_end {
			return Ok(title);
		}
		key = (key.1, next);
	}

	debug!("Title reached the {max_chars} character cap without an end token");
	Ok(title)
}

/// Generates `count` titles with independent walks over the same table and
/// stream.
///
/// The stream is checked for a start token once per batch, not once per
/// title. No deduplication is done: titles may repeat each other or the
/// source corpus. The first error aborts the batch.
pub fn generate_titles<R: Rng + ?Sized>(
	table: &TransitionTable,
	stream: &[Token],
	count: usize,
	config: &GenerationConfig,
	rng: &mut R,
) -> Result<Vec<String>, TitleError> {
	if count == 0 {
		return Ok(Vec::new());
	}
	if !has_start(stream) {
		return Err(TitleError::EmptyCorpus { corpus: String::new() });
	}

	(0..count)
		.map(|_| {
			let start = sample_start(stream, rng);
			walk_from(table, stream, start, config, rng)
		})
		.collect()
}
