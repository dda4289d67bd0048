//! Symbol table errors

use crate::logging::codes;

/// Result type for symbol table operations
pub type SymbolResult<T> = Result<T, ConflictError>;

/// Declaration conflicts. The display text is the message used in reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("variable \"{name}\" is already defined locally")]
    DuplicateLocal { name: String, line: u32 },

    #[error("variable \"{name}\" is already defined globally")]
    DuplicateGlobal { name: String, line: u32 },

    #[error("too many symbols (max {max})")]
    TooManySymbols { max: usize, line: u32 },

    #[error("too many routines (max {max})")]
    TooManyRoutines { max: usize, line: u32 },
}

impl ConflictError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ConflictError::DuplicateLocal { .. } => codes::symbols::DUPLICATE_LOCAL,
            ConflictError::DuplicateGlobal { .. } => codes::symbols::DUPLICATE_GLOBAL,
            ConflictError::TooManySymbols { .. } | ConflictError::TooManyRoutines { .. } => {
                codes::symbols::TOO_MANY_SYMBOLS
            }
        }
    }

    /// Line of the later, conflicting declaration
    pub fn line(&self) -> u32 {
        match self {
            ConflictError::DuplicateLocal { line, .. }
            | ConflictError::DuplicateGlobal { line, .. }
            | ConflictError::TooManySymbols { line, .. }
            | ConflictError::TooManyRoutines { line, .. } => *line,
        }
    }
}
