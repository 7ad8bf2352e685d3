use rand::Rng;

use super::token::Token;
use crate::error::TitleError;

/// Whether any token of the stream opens a title.
pub fn has_start(stream: &[Token]) -> bool {
	stream.iter().any(|token| token.is_title_start)
}

/// Picks a random stream index whose token opens a title.
///
/// Samples uniformly over the whole stream and rejects indices whose token
/// lacks the start flag. Titles are therefore chosen with a probability
/// proportional to how often their first token occurs, not uniformly per
/// title.
///
/// The existence of at least one start token is checked first, so the
/// rejection loop terminates. Batches check once with [`has_start`] and then
/// sample without re-checking.
///
/// The returned index may be the last one of the stream; callers must not
/// assume a successor exists.
///
/// # Errors
/// Returns `EmptyCorpus` if no token carries the start flag (this includes
/// the empty stream).
pub fn choose_start<R: Rng + ?Sized>(stream: &[Token], rng: &mut R) -> Result<usize, TitleError> {
	if !has_start(stream) {
		return Err(TitleError::EmptyCorpus { corpus: String::new() });
	}
	Ok(sample_start(stream, rng))
}

/// Rejection-samples a start index without checking that one exists.
///
/// Only call this on a stream for which [`has_start`] returned `true`;
/// otherwise it never returns.
pub(crate) fn sample_start<R: Rng + ?Sized>(stream: &[Token], rng: &mut R) -> usize {
	loop {
		let index = rng.random_range(0..stream.len());
		if stream[index].is_title_start {
			return index;
		}
	}
}
