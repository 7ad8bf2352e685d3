use std::collections::HashSet;

use log::{debug, info, warn};
use rand::Rng;

use crate::corpus::CorpusSource;
use crate::error::TitleError;
use crate::model::chain::TitleChain;
use crate::model::generation_config::GenerationConfig;
use crate::model::report::EvaluationReport;
use crate::model::start_selector::has_start;

/// High-level title generator over a corpus collaborator.
///
/// # Responsibilities
/// - Fetch a fresh token stream and build a fresh chain for every request
/// - Generate batches of titles
/// - Filter out titles that copy a real one, topping up in bounded rounds
/// - Produce duplicate reports
///
/// Nothing is cached between requests: the stream and the table live only
/// for the request that built them.
///
/// Every operation comes in two flavours: `*_with` takes the random source
/// explicitly, the plain one uses the thread-local generator.
#[derive(Debug)]
pub struct Generator<C: CorpusSource> {
	corpus: C,
	config: GenerationConfig,
}

impl<C: CorpusSource> Generator<C> {
	pub fn new(corpus: C, config: GenerationConfig) -> Self {
		Self { corpus, config }
	}

	pub fn config_mut(&mut self) -> &mut GenerationConfig {
		&mut self.config
	}

	/// Fetches the token stream of `corpus_id` and builds its chain.
	///
	/// # Errors
	/// - Corpus errors from the collaborator
	/// - `EmptyCorpus` if the stream has no title-start token
	pub fn build_chain(&self, corpus_id: &str) -> Result<TitleChain, TitleError> {
		let stream = self.corpus.fetch_tokens(corpus_id)?;
		if !has_start(&stream) {
			return Err(TitleError::EmptyCorpus { corpus: corpus_id.to_owned() });
		}
		Ok(TitleChain::new(stream))
	}

	/// Generates `count` titles, duplicates of real titles included.
	pub fn generate_with<R: Rng + ?Sized>(&self, corpus_id: &str, count: usize, rng: &mut R) -> Result<Vec<String>, TitleError> {
		let chain = self.build_chain(corpus_id)?;
		info!(
			"Generating {} titles for '{}' ({} tokens, {} transitions)",
			count,
			corpus_id,
			chain.stream().len(),
			chain.table().len()
		);
		chain.generate_many(count, &self.config, rng)
	}

	pub fn generate(&self, corpus_id: &str, count: usize) -> Result<Vec<String>, TitleError> {
		self.generate_with(corpus_id, count, &mut rand::rng())
	}

	/// Generates `count` titles that are not copies of a real title.
	///
	/// # Behavior
	/// - Each round fetches the real titles and a fresh chain, generates the
	///   missing number of titles and keeps those not exactly equal to a
	///   real title.
	/// - Stops as soon as `count` titles are kept.
	/// - Generated titles may still repeat each other.
	///
	/// # Errors
	/// - `UnboundedUniquenessRetry` with the titles kept so far if
	///   `config.max_rounds()` rounds were not enough. Small corpora with
	///   little branching may only ever reproduce real titles.
	/// - Any corpus or chain error, unchanged. Chain errors are not retried.
	pub fn generate_unique_with<R: Rng + ?Sized>(&self, corpus_id: &str, count: usize, rng: &mut R) -> Result<Vec<String>, TitleError> {
		let mut unique: Vec<String> = Vec::with_capacity(count);
		if count == 0 {
			return Ok(unique);
		}

		let max_rounds = self.config.max_rounds();
		for round in 1..=max_rounds {
			let missing = count - unique.len();
			let chain = self.build_chain(corpus_id)?;
			let source: HashSet<String> = self.corpus.fetch_titles(corpus_id)?.into_iter().collect();

			let generated = chain.generate_many(missing, &self.config, rng)?;
			let kept_before = unique.len();
			unique.extend(generated.into_iter().filter(|title| !source.contains(title)));
			debug!(
				"Round {}: kept {} of {} generated titles for '{}'",
				round,
				unique.len() - kept_before,
				missing,
				corpus_id
			);

			if unique.len() == count {
				info!("Generated {} unique titles for '{}' in {} rounds", count, corpus_id, round);
				return Ok(unique);
			}
		}

		warn!(
			"Gave up on '{}' after {} rounds with {} of {} unique titles",
			corpus_id,
			max_rounds,
			unique.len(),
			count
		);
		Err(TitleError::UnboundedUniquenessRetry {
			requested: count,
			rounds: max_rounds,
			titles: unique,
		})
	}

	pub fn generate_unique(&self, corpus_id: &str, count: usize) -> Result<Vec<String>, TitleError> {
		self.generate_unique_with(corpus_id, count, &mut rand::rng())
	}

	/// Generates `count` titles and counts how many copy a real title.
	pub fn evaluate_with<R: Rng + ?Sized>(&self, corpus_id: &str, count: usize, rng: &mut R) -> Result<EvaluationReport, TitleError> {
		let generated = self.generate_with(corpus_id, count, rng)?;
		let source = self.corpus.fetch_titles(corpus_id)?;
		let report = EvaluationReport::new(corpus_id, generated, &source);
		info!(
			"'{}': {} of {} generated titles are duplicates",
			corpus_id,
			report.duplicate_count,
			count
		);
		Ok(report)
	}

	pub fn evaluate(&self, corpus_id: &str, count: usize) -> Result<EvaluationReport, TitleError> {
		self.evaluate_with(corpus_id, count, &mut rand::rng())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::corpus::MemoryCorpus;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn generator() -> Generator<MemoryCorpus> {
		let mut corpus = MemoryCorpus::new();
		corpus.insert("pets", ["a cat sat on the mat", "a dog sat on the rug"]);
		corpus.insert("single", ["nothing new here"]);
		corpus.insert("emoji", ["😀 🎉"]);
		Generator::new(corpus, GenerationConfig::default())
	}

	#[test]
	fn generate_returns_the_requested_count() {
		let generator = generator();
		let mut rng = StdRng::seed_from_u64(1);
		assert!(generator.generate_with("pets", 0, &mut rng).unwrap().is_empty());

		let titles = generator.generate_with("pets", 25, &mut rng).unwrap();
		assert_eq!(titles.len(), 25);
		let possible = ["a cat sat on the mat", "a dog sat on the rug", "a cat sat on the rug", "a dog sat on the mat"];
		assert!(titles.iter().all(|title| possible.contains(&title.as_str())));
	}

	#[test]
	fn unique_titles_never_copy_the_source() {
		let generator = generator();
		let mut rng = StdRng::seed_from_u64(2);
		let titles = generator.generate_unique_with("pets", 10, &mut rng).unwrap();

		assert_eq!(titles.len(), 10);
		assert!(titles.iter().all(|title| title == "a cat sat on the rug" || title == "a dog sat on the mat"));
	}

	#[test]
	fn unique_zero_is_empty() {
		let mut rng = StdRng::seed_from_u64(2);
		assert!(generator().generate_unique_with("single", 0, &mut rng).unwrap().is_empty());
	}

	#[test]
	fn infeasible_corpus_stops_after_max_rounds() {
		let mut generator = generator();
		generator.config_mut().set_max_rounds(5).unwrap();
		let mut rng = StdRng::seed_from_u64(3);

		match generator.generate_unique_with("single", 4, &mut rng) {
			Err(TitleError::UnboundedUniquenessRetry { requested, rounds, titles }) => {
				assert_eq!(requested, 4);
				assert_eq!(rounds, 5);
				assert!(titles.is_empty());
			}
			other => panic!("expected partial result, got {other:?}"),
		}
	}

	#[test]
	fn corpus_without_tokens_is_empty() {
		let mut rng = StdRng::seed_from_u64(4);
		match generator().generate_with("emoji", 1, &mut rng) {
			Err(TitleError::EmptyCorpus { corpus }) => assert_eq!(corpus, "emoji"),
			other => panic!("expected empty corpus, got {other:?}"),
		}
	}

	#[test]
	fn unknown_corpus_is_reported() {
		let mut rng = StdRng::seed_from_u64(4);
		assert!(matches!(
			generator().generate_unique_with("missing", 3, &mut rng),
			Err(TitleError::CorpusNotFound { .. })
		));
	}

	#[test]
	fn evaluation_counts_copies() {
		let mut rng = StdRng::seed_from_u64(5);
		let report = generator().evaluate_with("single", 6, &mut rng).unwrap();
		assert_eq!(report.corpus, "single");
		assert_eq!(report.generated, vec!["nothing new here"; 6]);
		assert_eq!(report.duplicate_count, 6);
		assert_eq!(report.unique_fraction, 0.0);
	}
}
