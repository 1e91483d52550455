//! Error types for the analysis engine
//!
//! Only caller bugs end up here. Malformed user input (half-typed duration
//! suffixes, unparseable key fields) is tolerated with fallbacks instead,
//! because the document is being edited live and is almost never complete.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Tonic or mode text that does not name a diatonic key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Scale degree outside 1-7
    #[error("Invalid scale degree: {0} (must be 1-7)")]
    InvalidDegree(u8),

    /// Extension level that is not a triad, 7, 9, 11 or 13
    #[error("Invalid chord extension: {0} (expected 3, 7, 9, 11 or 13)")]
    InvalidExtension(u8),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
