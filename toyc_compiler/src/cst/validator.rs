//! Structural checks over a finished tree
//!
//! One forward walk. At each visited node the checks run in order and each
//! may move the cursor to the node it inspects, so a later check sees the
//! node an earlier one landed on. The first violation stops the walk.

use super::error::{NameContext, StructuralError, StructuralResult};
use super::tree::{ConcreteSyntaxTree, NodeId};
use crate::tokens::keywords::{is_reserved_word, is_type_keyword, FUNCTION_KEYWORD};

pub struct StructuralValidator<'a> {
    tree: &'a ConcreteSyntaxTree,
    nodes_visited: usize,
}

impl<'a> StructuralValidator<'a> {
    pub fn new(tree: &'a ConcreteSyntaxTree) -> Self {
        Self {
            tree,
            nodes_visited: 0,
        }
    }

    pub fn nodes_visited(&self) -> usize {
        self.nodes_visited
    }

    pub fn validate(&mut self) -> StructuralResult<()> {
        let tree = self.tree;
        let mut cursor = tree.root();

        while tree.has_successor(cursor) {
            self.nodes_visited += 1;

            if tree.text(cursor) == "[" {
                if let Some(size) = tree.sibling(cursor) {
                    cursor = size;
                    if tree.text(size).starts_with('-') {
                        return Err(StructuralError::NegativeArraySize {
                            line: tree.line(size),
                        });
                    }
                }
            }

            if is_type_keyword(tree.text(cursor)) {
                if let Some(name) = tree.sibling(cursor) {
                    cursor = name;
                    self.check_name(name, NameContext::Variable)?;
                }
            }

            if tree.text(cursor) == FUNCTION_KEYWORD {
                // function <return type> <name>
                if let Some(name) = tree.sibling(cursor).and_then(|t| tree.sibling(t)) {
                    cursor = name;
                    self.check_name(name, NameContext::Function)?;
                }
            }

            match tree.next_in_walk(cursor) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Ok(())
    }

    fn check_name(&self, id: NodeId, context: NameContext) -> StructuralResult<()> {
        let word = self.tree.text(id);
        if is_reserved_word(word) {
            return Err(StructuralError::reserved_word(
                word,
                context,
                self.tree.line(id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::LexicalPreferences;
    use crate::cst::builder::TreeBuilder;
    use crate::lexical::tokenize_with_preferences;
    use assert_matches::assert_matches;

    fn validate(source: &str) -> StructuralResult<()> {
        let tokens = tokenize_with_preferences(
            source,
            LexicalPreferences {
                contextual_signs: false,
                collect_detailed_metrics: false,
            },
        )
        .unwrap();
        let tree = TreeBuilder::new().build(&tokens).unwrap();
        StructuralValidator::new(&tree).validate()
    }

    #[test]
    fn test_valid_program() {
        let source = "int total;\nfunction int sum(int a, int b)\n{\n  int c;\n  c = a + b;\n}\n";
        assert!(validate(source).is_ok());
    }

    #[test]
    fn test_negative_array_size() {
        assert_matches!(
            validate("char buf[4];\nint x[-1];"),
            Err(StructuralError::NegativeArraySize { line: 2 })
        );
    }

    #[test]
    fn test_reserved_variable_name() {
        let result = validate("int if;");
        assert_matches!(
            result,
            Err(StructuralError::ReservedWordAsName {
                ref word,
                context: NameContext::Variable,
                line: 1
            }) if word == "if"
        );
    }

    #[test]
    fn test_reserved_function_name() {
        let result = validate("int a;\nfunction bool printf(void) { }");
        assert_matches!(
            result,
            Err(StructuralError::ReservedWordAsName {
                ref word,
                context: NameContext::Function,
                line: 2
            }) if word == "printf"
        );
    }

    #[test]
    fn test_function_return_type_is_not_a_variable_name() {
        // `int` after `function` is the return type; the cursor then sits
        // on the name, which is fine
        assert!(validate("function int main(void) { }").is_ok());
    }

    #[test]
    fn test_first_violation_wins() {
        let result = validate("int x[-2];\nint else;");
        assert_matches!(result, Err(StructuralError::NegativeArraySize { line: 1 }));
    }

    #[test]
    fn test_final_node_is_not_checked() {
        // A lone trailing type keyword has no successor and is never visited
        assert!(validate("x = 1;\nint").is_ok());
    }
}
