use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Duplicate statistics for a batch of generated titles.
///
/// This is what the reporting side (charts, HTTP clients) consumes: the
/// generated titles as plain strings and how many of them are copies of a
/// real title.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EvaluationReport {
	pub corpus: String,
	pub generated: Vec<String>,
	pub duplicate_count: usize,
	/// `1 - duplicate_count / generated.len()`, or 1.0 for an empty batch.
	pub unique_fraction: f64,
}

impl EvaluationReport {
	/// Computes the report for `generated` against the `source` titles.
	pub fn new(corpus: &str, generated: Vec<String>, source: &[String]) -> Self {
		let duplicate_count = count_duplicates(&generated, source);
		let unique_fraction = unique_fraction(duplicate_count, generated.len());
		Self {
			corpus: corpus.to_owned(),
			generated,
			duplicate_count,
			unique_fraction,
		}
	}

	pub fn unique_count(&self) -> usize {
		self.generated.len() - self.duplicate_count
	}
}

/// Counts generated titles that are exactly equal to a source title.
///
/// Each generated title counts at most once, however many times it appears
/// in the source.
pub fn count_duplicates(generated: &[String], source: &[String]) -> usize {
	let source: HashSet<&str> = source.iter().map(String::as_str).collect();
	generated.iter().filter(|title| source.contains(title.as_str())).count()
}

/// Fraction of unique titles in a batch of `total`.
pub fn unique_fraction(duplicate_count: usize, total: usize) -> f64 {
	if total == 0 {
		return 1.0;
	}
	1.0 - duplicate_count as f64 / total as f64
}
