//! Codes for every event the front end emits, with their metadata
//!
//! Prefixes: `ERR` system, `E` stage error, `W` warning, `I` success.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Error, warning or success code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Registry entry, `None` for success and ad-hoc codes
    pub fn metadata(&self) -> Option<&'static ErrorMetadata> {
        get_error_metadata(self.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const OUTPUT_WRITE_FAILURE: Code = Code::new("ERR003");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

/// Comment filter warnings, never fatal
pub mod comments {
    use super::Code;

    pub const STRAY_TERMINATOR: Code = Code::new("W015");
    pub const UNTERMINATED_BLOCK: Code = Code::new("W016");
}

pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const MALFORMED_INTEGER: Code = Code::new("E022");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const STRING_TOO_LARGE: Code = Code::new("E024");
    pub const TOO_MANY_TOKENS: Code = Code::new("E025");
}

/// Tree construction and structural validation
pub mod structure {
    use super::Code;

    pub const EMPTY_TREE: Code = Code::new("E040");
    pub const NEGATIVE_ARRAY_SIZE: Code = Code::new("E041");
    pub const RESERVED_WORD_AS_NAME: Code = Code::new("E042");
    pub const TOO_MANY_NODES: Code = Code::new("E043");
}

pub mod symbols {
    use super::Code;

    pub const DUPLICATE_LOCAL: Code = Code::new("E090");
    pub const DUPLICATE_GLOBAL: Code = Code::new("E091");
    pub const TOO_MANY_SYMBOLS: Code = Code::new("E092");
    pub const INVALID_ARRAY_SIZE: Code = Code::new("W093");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const COMMENT_FILTER_COMPLETE: Code = Code::new("I015");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const CST_CONSTRUCTION_COMPLETE: Code = Code::new("I040");
    pub const STRUCTURAL_VALIDATION_PASSED: Code = Code::new("I041");
    pub const SYMBOL_TABLE_COMPLETE: Code = Code::new("I090");
    pub const CONFLICT_CHECK_PASSED: Code = Code::new("I091");
    pub const REPORT_WRITTEN: Code = Code::new("I100");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Pipeline stage a code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    System,
    FileProcessing,
    Comments,
    Lexical,
    Structure,
    Symbols,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::System => "System",
            Category::FileProcessing => "FileProcessing",
            Category::Comments => "Comments",
            Category::Lexical => "Lexical",
            Category::Structure => "Structure",
            Category::Symbols => "Symbols",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: Category,
    pub severity: Severity,
    /// Warnings are recoverable; stage errors end the run
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    const fn error(
        code: Code,
        category: Category,
        severity: Severity,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code: code.0,
            category,
            severity,
            recoverable: false,
            description,
            recommended_action,
        }
    }

    const fn warning(
        code: Code,
        category: Category,
        severity: Severity,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            recoverable: true,
            ..Self::error(code, category, severity, description, recommended_action)
        }
    }

    pub fn requires_halt(&self) -> bool {
        !self.recoverable
    }
}

use Category::*;
use Severity::*;

const METADATA: &[ErrorMetadata] = &[
    ErrorMetadata::error(system::INTERNAL_ERROR, System, Critical,
        "Internal front end error",
        "File a bug report with the input that triggered it"),
    ErrorMetadata::error(system::INITIALIZATION_FAILURE, System, Critical,
        "System initialization failed",
        "Check the runtime configuration and TOYC_* environment variables"),
    ErrorMetadata::error(system::OUTPUT_WRITE_FAILURE, System, High,
        "Report file could not be written",
        "Check write permissions on the input directory"),
    ErrorMetadata::error(file_processing::FILE_NOT_FOUND, FileProcessing, High,
        "Input file not found",
        "Verify the file path"),
    ErrorMetadata::error(file_processing::INVALID_EXTENSION, FileProcessing, Medium,
        "Input file does not have the required .c extension",
        "Rename the file or unset TOYC_REQUIRE_C_EXTENSION"),
    ErrorMetadata::error(file_processing::FILE_TOO_LARGE, FileProcessing, High,
        "Input file exceeds the compile-time size limit",
        "Split the file or rebuild with a larger max_file_size"),
    ErrorMetadata::error(file_processing::EMPTY_FILE, FileProcessing, Low,
        "Input file is empty",
        "Provide source text to analyze"),
    ErrorMetadata::error(file_processing::PERMISSION_DENIED, FileProcessing, High,
        "Permission denied reading input file",
        "Check file permissions"),
    ErrorMetadata::error(file_processing::INVALID_ENCODING, FileProcessing, High,
        "Input file is not valid UTF-8",
        "Re-encode the file as UTF-8"),
    ErrorMetadata::error(file_processing::IO_ERROR, FileProcessing, High,
        "I/O error reading input file",
        "Check the file system and retry"),
    ErrorMetadata::error(file_processing::INVALID_PATH, FileProcessing, High,
        "Input path is empty or not a regular file",
        "Pass the path of a source file"),
    ErrorMetadata::warning(comments::STRAY_TERMINATOR, Comments, Low,
        "Comment terminator found outside a block comment",
        "Remove the stray */ or open the comment with /*"),
    ErrorMetadata::warning(comments::UNTERMINATED_BLOCK, Comments, Medium,
        "Block comment reaches end of input without */",
        "Close the block comment"),
    ErrorMetadata::error(lexical::INVALID_CHARACTER, Lexical, High,
        "Character does not start any token",
        "Remove the character or place it inside a string literal"),
    ErrorMetadata::error(lexical::UNTERMINATED_STRING, Lexical, High,
        "Quoted literal reaches end of input without its closing quote",
        "Add the matching closing quote"),
    ErrorMetadata::error(lexical::MALFORMED_INTEGER, Lexical, High,
        "Integer literal runs directly into a letter",
        "Separate the number from the identifier"),
    ErrorMetadata::error(lexical::IDENTIFIER_TOO_LONG, Lexical, Medium,
        "Identifier exceeds the compile-time length limit",
        "Shorten the identifier"),
    ErrorMetadata::error(lexical::STRING_TOO_LARGE, Lexical, Medium,
        "String literal exceeds the compile-time size limit",
        "Shorten the string literal"),
    ErrorMetadata::error(lexical::TOO_MANY_TOKENS, Lexical, High,
        "Token count exceeds the compile-time limit",
        "Split the input into smaller files"),
    ErrorMetadata::error(structure::EMPTY_TREE, Structure, Low,
        "No tokens to build a tree from",
        "Provide source text containing declarations"),
    ErrorMetadata::error(structure::NEGATIVE_ARRAY_SIZE, Structure, High,
        "Array declared with a negative size",
        "Declare arrays with a positive integer size"),
    ErrorMetadata::error(structure::RESERVED_WORD_AS_NAME, Structure, High,
        "Reserved word used as a variable or function name",
        "Rename the declaration"),
    ErrorMetadata::error(structure::TOO_MANY_NODES, Structure, High,
        "Tree node count exceeds the compile-time limit",
        "Split the input into smaller files"),
    ErrorMetadata::error(symbols::DUPLICATE_LOCAL, Symbols, Medium,
        "Name declared twice in the same scope",
        "Use unique names within each scope"),
    ErrorMetadata::error(symbols::DUPLICATE_GLOBAL, Symbols, Medium,
        "Name redeclared after a global declaration",
        "Rename the later declaration or the global"),
    ErrorMetadata::error(symbols::TOO_MANY_SYMBOLS, Symbols, High,
        "Symbol or routine count exceeds the compile-time limit",
        "Split the input into smaller files"),
    ErrorMetadata::warning(symbols::INVALID_ARRAY_SIZE, Symbols, Low,
        "Array size is not an integer literal and was recorded as 0",
        "Use an integer literal for array sizes"),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| METADATA.iter().map(|m| (m.code, m)).collect())
}

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Unknown codes count as medium severity
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code).map_or(Severity::Medium, |m| m.severity)
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown", |m| m.category.as_str())
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown error", |m| m.description)
}

/// Check that every code in `codes` has a registry entry
pub fn ensure_registered(codes: &[Code]) -> Result<(), String> {
    match codes.iter().find(|code| code.metadata().is_none()) {
        Some(missing) => Err(format!("Missing metadata for code {}", missing)),
        None => Ok(()),
    }
}
