//! Parse Error Types

use thiserror::Error;

/// Errors that can occur while parsing a datalog export
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input had fewer than a header row plus one data row
    #[error("log file needs a header row and at least one data row")]
    TooFewLines,

    /// Strict mode requires a recognizable time channel
    #[error("no recognizable time channel in the header row")]
    MissingTimeChannel,
}
