//! Error types produced by the harness.

use std::path::PathBuf;

use thiserror::Error;

use crate::{SchemaCategory, SchemaValidationError};

/// Errors raised while loading, discovering or checking test cases.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CasesError {
    /// A case file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A case file does not have the expected document shape.
    #[error("invalid test cases in '{path}': {source}")]
    Format {
        /// File holding the malformed document.
        path: PathBuf,
        /// Deserializer failure.
        #[source]
        source: serde_yaml::Error,
    },

    /// A schema directory pattern could not be compiled.
    #[error("invalid schema directory pattern '{pattern}': {source}")]
    Pattern {
        /// Offending glob pattern.
        pattern: String,
        /// Glob compilation failure.
        #[source]
        source: glob::PatternError,
    },

    /// A positive case failed validation.
    #[error("positive case error for {category} values of module '{module}': {source}")]
    PositiveRejected {
        /// Module whose schema rejected the case.
        module: String,
        /// Schema category the case was checked against.
        category: SchemaCategory,
        /// Rejection reported by the validator.
        #[source]
        source: SchemaValidationError,
    },

    /// A negative case passed validation.
    #[error(
        "negative case error for {category} values of module '{module}': test case should not pass validation:\n{rendered}"
    )]
    NegativeAccepted {
        /// Module whose schema accepted the case.
        module: String,
        /// Schema category the case was checked against.
        category: SchemaCategory,
        /// YAML rendering of the offending instance.
        rendered: String,
    },

    /// Harness configuration could not be extracted.
    #[error("failed to load harness configuration: {0}")]
    Config(#[from] Box<figment::Error>),
}

/// Result alias for harness operations.
pub type CasesResult<T> = Result<T, CasesError>;
