//! Error types shared by both smoke checks.

use std::fmt;

use thiserror::Error;

use crate::config::loader::ConfigError;

/// A structural property the rendered page failed to satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// `document.title` was empty or whitespace.
    EmptyTitle,
    /// Fewer input elements than required were present.
    TooFewInputs { found: usize, required: usize },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::EmptyTitle => write!(f, "page title is empty"),
            Mismatch::TooFewInputs { found, required } => {
                write!(f, "found {} input elements, expected at least {}", found, required)
            }
        }
    }
}

/// Errors surfaced by the smoke checks.
#[derive(Debug, Error)]
pub enum SmokeError {
    /// The status endpoint never answered with an accepted status.
    #[error("API health endpoint not reachable in time ({url}, {attempts} attempts)")]
    LivenessTimeout { url: String, attempts: u32 },

    /// A probe request could not even be issued.
    #[error("health probe for {url} cannot be sent: {message}")]
    ProbeFatal { url: String, message: String },

    /// The dashboard page rendered without the expected structure.
    #[error("dashboard page structure mismatch: {}", join_mismatches(.0))]
    StructuralMismatch(Vec<Mismatch>),

    /// Browser launch, navigation, inspection or teardown failed.
    #[error("browser error: {0}")]
    Browser(String),

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for smoke check operations.
pub type SmokeResult<T> = Result<T, SmokeError>;

fn join_mismatches(mismatches: &[Mismatch]) -> String {
    mismatches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
