//! Error types for the diff crate.

/// Errors that can occur around a diff computation.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The edit distance reached the search budget; the script is incomplete.
    #[error("edit distance reached the budget of {budget}; edit script is incomplete")]
    BudgetExceeded { budget: usize },

    /// A configuration could not be parsed or sets conflicting options.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Reading an input or configuration file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
