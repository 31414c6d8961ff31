use std::fmt;

/// Endpoint table validation error
///
/// Returned by [`EndpointTable::compile`](super::EndpointTable::compile) when a
/// descriptor cannot be turned into a matcher. Unknown handler kinds are not
/// errors; they are logged and the endpoint stays unsupported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The method is not a valid HTTP method token
    InvalidMethod {
        /// Position of the descriptor in the table
        index: usize,
        /// The rejected method string
        method: String,
    },
    /// The path pattern is not a valid regular expression
    InvalidPattern {
        /// Position of the descriptor in the table
        index: usize,
        /// The rejected pattern
        pattern: String,
        /// Compiler diagnostic from the regex engine
        reason: String,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::InvalidMethod { index, method } => {
                write!(
                    f,
                    "Endpoint table error: entry {} has invalid method '{}'",
                    index, method
                )
            }
            TableError::InvalidPattern {
                index,
                pattern,
                reason,
            } => {
                write!(
                    f,
                    "Endpoint table error: entry {} has invalid path pattern '{}': {}",
                    index, pattern, reason
                )
            }
        }
    }
}

impl std::error::Error for TableError {}
