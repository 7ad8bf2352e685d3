use crate::error::TitleError;

/// Default cap on the length of a generated title, in characters.
pub const DEFAULT_MAX_TITLE_CHARS: usize = 300;

/// Default number of generate-and-filter rounds of the uniqueness filter.
pub const DEFAULT_MAX_ROUNDS: usize = 100;

/// Parameters shared by the chain walker and the uniqueness filter.
///
/// # Invariants
/// - `max_title_chars >= 1`
/// - `max_rounds >= 1`
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationConfig {
	/// A walk stops growing once the title reaches this many characters.
	max_title_chars: usize,

	/// Ceiling on the rounds of the uniqueness filter.
	max_rounds: usize,
}

impl Default for GenerationConfig {
	fn default() -> Self {
		Self {
			max_title_chars: DEFAULT_MAX_TITLE_CHARS,
			max_rounds: DEFAULT_MAX_ROUNDS,
		}
	}
}

impl GenerationConfig {
	pub fn max_title_chars(&self) -> usize {
		self.max_title_chars
	}

	pub fn max_rounds(&self) -> usize {
		self.max_rounds
	}

	/// Sets the title length cap.
	///
	/// # Errors
	/// Returns an error if `max_title_chars` is 0.
	pub fn set_max_title_chars(&mut self, max_title_chars: usize) -> Result<(), TitleError> {
		if max_title_chars == 0 {
			return Err(TitleError::InvalidConfig("max_title_chars must be >= 1".to_owned()));
		}
		self.max_title_chars = max_title_chars;
		Ok(())
	}

	/// Sets the round ceiling of the uniqueness filter.
	///
	/// # Errors
	/// Returns an error if `max_rounds` is 0.
	pub fn set_max_rounds(&mut self, max_rounds: usize) -> Result<(), TitleError> {
		if max_rounds == 0 {
			return Err(TitleError::InvalidConfig("max_rounds must be >= 1".to_owned()));
		}
		self.max_rounds = max_rounds;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults() {
		let config = GenerationConfig::default();
		assert_eq!(config.max_title_chars(), 300);
		assert_eq!(config.max_rounds(), 100);
	}

	#[test]
	fn zero_values_are_rejected() {
		let mut config = GenerationConfig::default();
		assert!(config.set_max_title_chars(0).is_err());
		assert!(config.set_max_rounds(0).is_err());
		assert_eq!(config, GenerationConfig::default());

		config.set_max_title_chars(40).unwrap();
		config.set_max_rounds(3).unwrap();
		assert_eq!(config.max_title_chars(), 40);
		assert_eq!(config.max_rounds(), 3);
	}
}
