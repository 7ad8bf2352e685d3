use thiserror::Error;

/// Errors raised while loading a corpus or walking the chain.
///
/// Every variant is detected close to its source (corpus loading, start
/// selection, chain walk) and handed back to the immediate caller. The only
/// intentional retry in the crate is the bounded top-up of the uniqueness
/// filter, which reports exhaustion through `UnboundedUniquenessRetry`.
#[derive(Error, Debug)]
pub enum TitleError {
	/// No token of the stream carries the title-start flag.
	#[error("corpus '{corpus}' has no title-start token")]
	EmptyCorpus { corpus: String },

	/// A transition key was not found in the table during generation.
	///
	/// Means the table and the stream were not built from the same snapshot.
	#[error("no transition recorded for key ('{first}', '{second}')")]
	ChainLookupFailure { first: String, second: String },

	/// A start token sits at the end of the stream without an end flag.
	#[error("token stream truncated after start token at index {index}")]
	TruncatedStream { index: usize },

	/// The uniqueness filter ran out of rounds.
	///
	/// `titles` holds the unique titles collected before giving up.
	#[error("only {} of {requested} unique titles after {rounds} rounds", .titles.len())]
	UnboundedUniquenessRetry {
		requested: usize,
		rounds: usize,
		titles: Vec<String>,
	},

	/// The corpus collaborator does not know this identifier.
	#[error("corpus '{corpus}' not found")]
	CorpusNotFound { corpus: String },

	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),
}
