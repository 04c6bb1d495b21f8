//! Merge engine errors.

use thiserror::Error;

/// Errors raised by the merge engine and the header-mapping parser.
///
/// None of these are transient; they describe inputs that can never merge
/// as given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Not enough information to resolve the join.
    #[error("{0}")]
    Configuration(String),

    /// Required columns absent from a supplied table.
    #[error("{message}")]
    Schema { message: String, missing: Vec<String> },

    /// A `--metrics-cols` fragment without a `:` separator.
    #[error("Bad --metrics-cols pair: {pair}. Use expected:source")]
    MalformedMapping { pair: String },
}

impl MergeError {
    pub fn schema(message: impl Into<String>, missing: &[&str]) -> Self {
        Self::Schema {
            message: message.into(),
            missing: missing.iter().map(|m| m.to_string()).collect(),
        }
    }

    /// Columns named by a schema error; empty for other variants.
    pub fn missing_columns(&self) -> &[String] {
        match self {
            Self::Schema { missing, .. } => missing,
            _ => &[],
        }
    }
}
