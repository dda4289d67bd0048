//! Token list to left-child/right-sibling tree

use super::error::{StructuralError, StructuralResult};
use super::tree::ConcreteSyntaxTree;
use crate::config::compile_time::cst::MAX_TREE_NODES;
use crate::tokens::Token;

/// Tokens after which the next token opens a new child chain
fn starts_new_chain(text: &str) -> bool {
    matches!(text, "{" | "}" | ";")
}

/// Tokens that always hang below the previous node
fn is_brace(text: &str) -> bool {
    matches!(text, "{" | "}")
}

/// Builds the raw tree without any validation
pub struct TreeBuilder {
    max_nodes: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            max_nodes: MAX_TREE_NODES,
        }
    }

    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self { max_nodes }
    }

    pub fn build(&self, tokens: &[Token]) -> StructuralResult<ConcreteSyntaxTree> {
        let (first, rest) = tokens.split_first().ok_or(StructuralError::EmptyTree)?;

        let mut tree = ConcreteSyntaxTree::with_root(first.text.clone(), first.line);
        let mut cursor = tree.root();
        let mut next_is_child = starts_new_chain(&first.text);

        for token in rest {
            if tree.len() >= self.max_nodes {
                return Err(StructuralError::TooManyNodes {
                    max: self.max_nodes,
                    line: token.line,
                });
            }

            cursor = if next_is_child || is_brace(&token.text) {
                tree.attach_child(cursor, token.text.clone(), token.line)
            } else {
                tree.attach_sibling(cursor, token.text.clone(), token.line)
            };
            next_is_child = starts_new_chain(&token.text);
        }

        Ok(tree)
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize_with_preferences;
    use crate::config::runtime::LexicalPreferences;
    use assert_matches::assert_matches;

    fn tokens(source: &str) -> Vec<Token> {
        tokenize_with_preferences(
            source,
            LexicalPreferences {
                contextual_signs: false,
                collect_detailed_metrics: false,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_empty_token_list() {
        assert_matches!(TreeBuilder::new().build(&[]), Err(StructuralError::EmptyTree));
    }

    #[test]
    fn test_statement_chains() {
        let tree = TreeBuilder::new().build(&tokens("int x;\nint y;")).unwrap();
        let root = tree.root();
        assert_eq!(tree.text(root), "int");

        let x = tree.sibling(root).unwrap();
        let semi = tree.sibling(x).unwrap();
        assert_eq!(tree.text(semi), ";");
        assert_eq!(tree.sibling(semi), None);

        let second = tree.child(semi).unwrap();
        assert_eq!(tree.text(second), "int");
        assert_eq!(tree.line(second), 2);
    }

    #[test]
    fn test_braces_are_children() {
        let tree = TreeBuilder::new()
            .build(&tokens("procedure main(void) { int a; }"))
            .unwrap();
        let close_paren = tree
            .walk()
            .find(|id| tree.text(*id) == ")")
            .unwrap();
        let open_brace = tree.child(close_paren).unwrap();
        assert_eq!(tree.text(open_brace), "{");
        assert_eq!(tree.sibling(close_paren), None);

        let first_in_body = tree.child(open_brace).unwrap();
        assert_eq!(tree.text(first_in_body), "int");

        let semi = tree.sibling(tree.sibling(first_in_body).unwrap()).unwrap();
        let close_brace = tree.child(semi).unwrap();
        assert_eq!(tree.text(close_brace), "}");
        assert_eq!(tree.len(), 10);
    }

    #[test]
    fn test_node_limit() {
        let result = TreeBuilder::with_max_nodes(2).build(&tokens("int x;"));
        assert_matches!(result, Err(StructuralError::TooManyNodes { max: 2, line: 1 }));
    }
}
