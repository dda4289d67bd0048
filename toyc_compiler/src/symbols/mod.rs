//! Symbol table construction and the duplicate declaration pass
//!
//! Scope 0 holds file-level declarations. Each routine opens the next
//! scope number; blocks inside a routine share its scope.

pub mod builder;
pub mod conflicts;
pub mod error;
pub mod table;

pub use builder::SymbolTableBuilder;
pub use conflicts::check_conflicts;
pub use error::{ConflictError, SymbolResult};
pub use table::{DeclKind, Symbol, SymbolRegistry, GLOBAL_SCOPE, PROCEDURE_DATATYPE};

use crate::cst::ConcreteSyntaxTree;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};

/// Discover every declaration in `tree` and reject duplicates
pub fn build(tree: &ConcreteSyntaxTree) -> SymbolResult<SymbolRegistry> {
    log_debug!("Starting symbol discovery", "nodes" => tree.len());

    let mut builder = SymbolTableBuilder::new(tree);
    let registry = builder.build().map_err(|error| {
        log_error!(error.error_code(), "Symbol discovery failed",
            "reason" => &error,
            "line" => error.line());
        error
    })?;

    log_success!(
        codes::success::SYMBOL_TABLE_COMPLETE,
        "Symbol table built",
        "symbols" => registry.len(),
        "routines" => registry.routine_count(),
        "parameters" => registry.parameters().count(),
        "invalid_array_sizes" => builder.invalid_array_sizes()
    );

    if let Err(error) = check_conflicts(&registry) {
        log_error!(error.error_code(), "Duplicate declaration",
            "reason" => &error,
            "line" => error.line());
        return Err(error);
    }

    log_success!(
        codes::success::CONFLICT_CHECK_PASSED,
        "No conflicting declarations",
        "symbols" => registry.len()
    );

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::LexicalPreferences;
    use crate::lexical::tokenize_with_preferences;
    use assert_matches::assert_matches;

    fn build_from(source: &str) -> SymbolResult<SymbolRegistry> {
        let tokens = tokenize_with_preferences(
            source,
            LexicalPreferences {
                contextual_signs: false,
                collect_detailed_metrics: false,
            },
        )
        .unwrap();
        let tree = crate::cst::build(&tokens).unwrap();
        build(&tree)
    }

    #[test]
    fn test_two_globals() {
        assert_matches!(
            build_from("int x;\nint x;"),
            Err(ConflictError::DuplicateGlobal { ref name, line: 2 }) if name == "x"
        );
    }

    #[test]
    fn test_global_then_local() {
        let source = "int x;\nprocedure p(void)\n{\n  int x;\n}";
        assert_matches!(
            build_from(source),
            Err(ConflictError::DuplicateGlobal { line: 4, .. })
        );
    }

    #[test]
    fn test_same_local_in_two_routines() {
        let source = "procedure a(void) { int x; }\nprocedure b(void) { int x; }";
        let registry = build_from(source).unwrap();
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_duplicate_local() {
        let source = "function int f(int n)\n{\n  bool n;\n}";
        assert_matches!(
            build_from(source),
            Err(ConflictError::DuplicateLocal { line: 3, .. })
        );
    }
}
