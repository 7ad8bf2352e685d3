use std::collections::HashMap;

use log::debug;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::token::Token;
use crate::error::TitleError;

/// Second-order transition table built from a token stream.
///
/// Each key `(stream[i], stream[i + 1])` maps to every token observed at
/// `stream[i + 2]`, in order of appearance and with duplicates kept. There is
/// no weight field: a successor seen `k` times is stored `k` times and is
/// therefore `k` times as likely to be drawn.
///
/// Keys are stored as two nested levels (first token, then second token) so
/// lookups borrow the tokens instead of building an owned pair.
///
/// ## Invariants
/// - Every successor list is non-empty, and no inner map is empty
/// - The table is never updated after construction; a new stream means a
///   new table
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransitionTable {
	transitions: HashMap<Token, HashMap<Token, Vec<Token>>>,
	keys: usize,
}

impl TransitionTable {
	/// Builds the table from a token stream.
	///
	/// Streams shorter than three tokens contain no triple and give an
	/// empty table. Boundary flags are not filtered: they are part of the
	/// tokens and flow through the keys and successors unchanged.
	pub fn build(stream: &[Token]) -> Self {
		let mut transitions: HashMap<Token, HashMap<Token, Vec<Token>>> = HashMap::new();
		let mut keys = 0;

		for window in stream.windows(3) {
			let successors = transitions
				.entry(window[0].clone())
				.or_default()
				.entry(window[1].clone())
				.or_insert_with(|| {
					keys += 1;
					Vec::new()
				});
			successors.push(window[2].clone());
		}

		debug!("Built transition table: {} keys from {} tokens", keys, stream.len());
		Self { transitions, keys }
	}

	/// Number of distinct keys.
	pub fn len(&self) -> usize {
		self.keys
	}

	pub fn is_empty(&self) -> bool {
		self.keys == 0
	}

	/// Returns the successor list recorded for `(first, second)`.
	pub fn successors(&self, first: &Token, second: &Token) -> Option<&[Token]> {
		self.transitions
			.get(first)?
			.get(second)
			.map(Vec::as_slice)
	}

	/// Iterates over `(first, second, successors)` in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = (&Token, &Token, &[Token])> {
		self.transitions.iter().flat_map(|(first, seconds)| {
			seconds
				.iter()
				.map(move |(second, successors)| (first, second, successors.as_slice()))
		})
	}

	/// Draws the next token after `(first, second)`.
	///
	/// The draw is uniform over the successor list, so multiplicity is the
	/// only weighting.
	///
	/// # Errors
	/// Returns `ChainLookupFailure` if the key was never observed. No
	/// default successor is substituted.
	pub fn predict<R: Rng + ?Sized>(&self, first: &Token, second: &Token, rng: &mut R) -> Result<&Token, TitleError> {
		self.successors(first, second)
			.and_then(|successors| successors.choose(rng))
			.ok_or_else(|| TitleError::ChainLookupFailure {
				first: first.to_marked(),
				second: second.to_marked(),
			})
	}
}
