//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Only whole-run failures travel as errors. A kind that cannot be located is
//! reported as `None` by the locators, and malformed declaration lines or
//! schema fragments are skipped where they are found.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A document could not be decoded as JSON.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// A table could not be read or written.
    #[display("CSV Error: {_0}")]
    Csv(csv::Error),

    /// A file-name pattern was rejected by the glob matcher.
    #[display("Pattern Error: {_0}")]
    Pattern(glob::PatternError),

    /// A required input (table, directory) does not exist.
    #[from(ignore)]
    #[display("Not Found: {_0}")]
    NotFound(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
