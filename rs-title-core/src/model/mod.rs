//! Second-order Markov chain over title tokens.
//!
//! This module provides:
//! - Flagged tokens (`Token`)
//! - The transition table built from a token stream (`TransitionTable`)
//! - Start selection and the chain walk (`start_selector`, `chain`)
//! - Generation parameters (`GenerationConfig`)
//! - The request-level pipeline with uniqueness filtering (`Generator`)
//! - Duplicate reporting (`EvaluationReport`)

/// Boundary-flagged tokens and the legacy `^`/`*` marker format.
pub mod token;

/// Mapping from a pair of consecutive tokens to the tokens seen after it.
///
/// Built once per stream and never updated.
pub mod transition_table;

/// Random choice of a title-start position in a stream.
pub mod start_selector;

/// Single-title walk and batch generation over a table and its stream.
pub mod chain;

/// Length cap and round ceiling used during generation.
pub mod generation_config;

/// High-level interface: corpus in, titles or reports out.
///
/// Owns the corpus collaborator and applies the bounded uniqueness filter.
pub mod generator;

/// Duplicate counting against the source titles.
pub mod report;
