//! Error types for CST construction and structural validation

use crate::logging::codes;

/// Result type for CST operations
pub type StructuralResult<T> = Result<T, StructuralError>;

/// What a reserved word was misused as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameContext {
    Variable,
    Function,
}

impl NameContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameContext::Variable => "variable",
            NameContext::Function => "function",
        }
    }
}

impl std::fmt::Display for NameContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural errors. The display text is the message used in reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("no tokens to build a tree from.")]
    EmptyTree,

    #[error("array declaration size must be a positive integer.")]
    NegativeArraySize { line: u32 },

    #[error("reserved word \"{word}\" cannot be used for the name of a {context}.")]
    ReservedWordAsName {
        word: String,
        context: NameContext,
        line: u32,
    },

    #[error("too many tree nodes (max {max}).")]
    TooManyNodes { max: usize, line: u32 },
}

impl StructuralError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            StructuralError::EmptyTree => codes::structure::EMPTY_TREE,
            StructuralError::NegativeArraySize { .. } => codes::structure::NEGATIVE_ARRAY_SIZE,
            StructuralError::ReservedWordAsName { .. } => codes::structure::RESERVED_WORD_AS_NAME,
            StructuralError::TooManyNodes { .. } => codes::structure::TOO_MANY_NODES,
        }
    }

    /// Line of the offending node; an empty tree has none
    pub fn line(&self) -> Option<u32> {
        match self {
            StructuralError::EmptyTree => None,
            StructuralError::NegativeArraySize { line }
            | StructuralError::ReservedWordAsName { line, .. }
            | StructuralError::TooManyNodes { line, .. } => Some(*line),
        }
    }

    pub fn reserved_word(word: &str, context: NameContext, line: u32) -> Self {
        Self::ReservedWordAsName {
            word: word.to_string(),
            context,
            line,
        }
    }
}
