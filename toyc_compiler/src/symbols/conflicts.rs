//! Duplicate declaration pass

use super::error::{ConflictError, SymbolResult};
use super::table::{Symbol, SymbolRegistry};

/// Compare every symbol with each later one. A later declaration clashes
/// when it reuses a name already declared globally, or a name in the same
/// routine scope. The first clash in registry order is returned.
pub fn check_conflicts(registry: &SymbolRegistry) -> SymbolResult<()> {
    let symbols = registry.symbols();

    for (index, earlier) in symbols.iter().enumerate() {
        for later in &symbols[index + 1..] {
            if let Some(conflict) = conflict_between(earlier, later) {
                return Err(conflict);
            }
        }
    }

    Ok(())
}

fn conflict_between(earlier: &Symbol, later: &Symbol) -> Option<ConflictError> {
    if earlier.name != later.name {
        return None;
    }

    // A global earlier declaration is reported as such even when the later
    // one is also global
    if earlier.is_global() {
        Some(ConflictError::DuplicateGlobal {
            name: later.name.clone(),
            line: later.line,
        })
    } else if earlier.scope == later.scope {
        Some(ConflictError::DuplicateLocal {
            name: later.name.clone(),
            line: later.line,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::table::{DeclKind, GLOBAL_SCOPE};
    use assert_matches::assert_matches;

    fn registry_of(symbols: Vec<Symbol>) -> SymbolRegistry {
        let mut registry = SymbolRegistry::new();
        for symbol in symbols {
            registry.push(symbol);
        }
        registry
    }

    #[test]
    fn test_duplicate_global() {
        let registry = registry_of(vec![
            Symbol::variable("x", "int", GLOBAL_SCOPE, 1),
            Symbol::variable("x", "int", GLOBAL_SCOPE, 2),
        ]);
        let error = check_conflicts(&registry).unwrap_err();
        assert_matches!(error, ConflictError::DuplicateGlobal { line: 2, .. });
    }

    #[test]
    fn test_global_shadowed_in_routine() {
        let registry = registry_of(vec![
            Symbol::variable("count", "int", GLOBAL_SCOPE, 1),
            Symbol::routine("f", DeclKind::Procedure, "NOT APPLICABLE", 1, 2),
            Symbol::variable("count", "char", 1, 4),
        ]);
        let error = check_conflicts(&registry).unwrap_err();
        assert_eq!(
            error,
            ConflictError::DuplicateGlobal {
                name: "count".into(),
                line: 4
            }
        );
        assert_eq!(
            error.to_string(),
            "variable \"count\" is already defined globally"
        );
    }

    #[test]
    fn test_locals_in_different_routines() {
        let registry = registry_of(vec![
            Symbol::routine("f", DeclKind::Procedure, "NOT APPLICABLE", 1, 1),
            Symbol::variable("i", "int", 1, 2),
            Symbol::routine("g", DeclKind::Procedure, "NOT APPLICABLE", 2, 4),
            Symbol::variable("i", "int", 2, 5),
        ]);
        assert!(check_conflicts(&registry).is_ok());
    }

    #[test]
    fn test_local_before_global_is_not_a_conflict() {
        let registry = registry_of(vec![
            Symbol::variable("t", "int", 1, 2),
            Symbol::variable("t", "int", GLOBAL_SCOPE, 5),
        ]);
        assert!(check_conflicts(&registry).is_ok());
    }

    #[test]
    fn test_parameter_clashes_with_local() {
        let registry = registry_of(vec![
            Symbol::parameter("a", "int", 1, "f", 1),
            Symbol::variable("a", "bool", 1, 3),
        ]);
        assert_matches!(
            check_conflicts(&registry),
            Err(ConflictError::DuplicateLocal { ref name, line: 3 }) if name == "a"
        );
    }
}
