//! Second-order Markov title generation library.
//!
//! This crate provides a word-level title generator including:
//! - Token streams with explicit title-boundary flags
//! - Second-order transition tables and chain walking
//! - Batch generation with filtering of copies of real titles
//! - Duplicate reports for the generated batches
//! - Corpus collaborators reading titles from memory or from disk
//!
//! Every generation request builds its own token stream and table; nothing
//! is persisted or shared between requests.

/// Chain construction, generation and reporting.
pub mod model;

/// Corpus collaborators (`CorpusSource`, `FileCorpus`, `MemoryCorpus`).
pub mod corpus;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (file loading, directory listing).
///
/// Not exposed
pub(crate) mod io;

pub use corpus::{CorpusConfig, CorpusSource, FileCorpus, MemoryCorpus};
pub use error::TitleError;
pub use model::generation_config::GenerationConfig;
pub use model::generator::Generator;
pub use model::report::EvaluationReport;
pub use model::token::Token;
