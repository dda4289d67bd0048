//! Concrete syntax tree construction and structural validation
//!
//! The tree is a binary left-child/right-sibling encoding of the token
//! list: statements run along sibling links and every `{`, `}` or token
//! following a `{`, `}` or `;` starts a new chain as a child.

pub mod builder;
pub mod error;
pub mod tree;
pub mod validator;

pub use builder::TreeBuilder;
pub use error::{NameContext, StructuralError, StructuralResult};
pub use tree::{ConcreteSyntaxTree, NodeId, TreeNode, Walk};
pub use validator::StructuralValidator;

use crate::logging::codes;
use crate::tokens::Token;
use crate::{log_debug, log_error, log_success};

/// Build the tree and run the structural checks
pub fn build(tokens: &[Token]) -> StructuralResult<ConcreteSyntaxTree> {
    log_debug!("Starting CST construction", "tokens" => tokens.len());

    let tree = TreeBuilder::new().build(tokens).map_err(|error| {
        log_error!(error.error_code(), "CST construction failed",
            "reason" => &error,
            "line" => error.line().unwrap_or(0));
        error
    })?;

    log_success!(
        codes::success::CST_CONSTRUCTION_COMPLETE,
        "CST constructed",
        "nodes" => tree.len()
    );

    let mut validator = StructuralValidator::new(&tree);
    if let Err(error) = validator.validate() {
        log_error!(error.error_code(), "Structural validation failed",
            "reason" => &error,
            "line" => error.line().unwrap_or(0),
            "nodes_visited" => validator.nodes_visited());
        return Err(error);
    }

    log_success!(
        codes::success::STRUCTURAL_VALIDATION_PASSED,
        "Structural validation passed",
        "nodes_visited" => validator.nodes_visited()
    );

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    #[test]
    fn test_build_runs_validation() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "bool", 1),
            Token::new(TokenKind::Identifier, "char", 1),
            Token::new(TokenKind::Semicolon, ";", 1),
        ];
        assert_matches!(
            build(&tokens),
            Err(StructuralError::ReservedWordAsName { line: 1, .. })
        );
    }

    #[test]
    fn test_build_empty() {
        assert_matches!(build(&[]), Err(StructuralError::EmptyTree));
    }
}
