//! Load and lookup errors
//!
//! None of these stop the game. Callers log them and fall back to an empty
//! bank, default settings, or a no-op interaction.

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// A data file (question bank, settings) is missing or malformed
    Data {
        /// File path or storage key that was read
        source_name: String,
        reason: String,
    },
    /// A quiz tag has no entry in the question bank
    Lookup { tag: String },
}

impl LoadError {
    pub fn data(source_name: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::Data {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data {
                source_name,
                reason,
            } => write!(f, "failed to load {source_name}: {reason}"),
            Self::Lookup { tag } => write!(f, "question {tag} not found"),
        }
    }
}

impl Error for LoadError {}
