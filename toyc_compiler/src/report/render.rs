//! Text renderers for each pipeline product

use crate::cst::ConcreteSyntaxTree;
use crate::symbols::{Symbol, SymbolRegistry};
use crate::tokens::Token;

/// Which prefix a single-line diagnostic gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Lexer and tree errors
    Syntax,
    /// Symbol table conflicts
    Conflict,
}

/// `Syntax error on line N: msg` or `Error on line N: msg`
pub fn render_diagnostic(kind: DiagnosticKind, line: u32, message: &str) -> String {
    match kind {
        DiagnosticKind::Syntax => format!("Syntax error on line {}: {}\n", line, message),
        DiagnosticKind::Conflict => format!("Error on line {}: {}\n", line, message),
    }
}

pub fn render_tokens(tokens: &[Token]) -> String {
    if tokens.is_empty() {
        return String::new();
    }

    let mut out = String::from("Token list:\n\n");
    for token in tokens {
        out.push_str(&format!(
            "Token type: {}\nToken:      {}\n\n",
            token.kind.as_str(),
            token.text
        ));
    }
    out
}

/// Sibling chains on one line each; a chain that continues through a child
/// ends with `-> NULL` and the next line is labelled with its parent
pub fn render_cst(tree: &ConcreteSyntaxTree) -> String {
    let mut out = String::new();
    let mut current = tree.root();

    loop {
        out.push_str(tree.text(current));
        if let Some(sibling) = tree.sibling(current) {
            out.push_str(" -> ");
            current = sibling;
        } else if let Some(child) = tree.child(current) {
            out.push_str(&format!(" -> NULL\nchild of {}: ", tree.text(current)));
            current = child;
        } else {
            out.push_str(" -> NULL\n");
            break;
        }
    }

    out
}

/// Parameter blocks leave out `IDENTIFIER_TYPE`
fn symbol_block(symbol: &Symbol, with_identifier_type: bool) -> String {
    let identifier_type = if with_identifier_type {
        format!("IDENTIFIER_TYPE: {}\n", symbol.decl_kind.as_str())
    } else {
        String::new()
    };

    format!(
        "IDENTIFIER_NAME: {}\n{}DATATYPE: {}\nDATATYPE_IS_ARRAY: {}\nDATATYPE_ARRAY_SIZE: {}\nSCOPE: {}\n\n",
        symbol.name,
        identifier_type,
        symbol.datatype,
        if symbol.is_array { "yes" } else { "no" },
        symbol.array_size,
        symbol.scope
    )
}

/// Declarations first, then parameters grouped under their routine
pub fn render_symbol_table(registry: &SymbolRegistry) -> String {
    let mut out: String = registry
        .declarations()
        .map(|symbol| symbol_block(symbol, true))
        .collect();

    let mut current_owner: Option<&str> = None;
    for symbol in registry.parameters() {
        let owner = symbol.owner_routine.as_deref();
        if owner != current_owner {
            current_owner = owner;
            out.push_str(&format!("PARAMETER LIST FOR: {}\n", owner.unwrap_or_default()));
        }
        out.push_str(&symbol_block(symbol, false));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::LexicalPreferences;
    use crate::lexical::tokenize_with_preferences;

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
    fn test_diagnostics() {
        assert_eq!(
            render_diagnostic(DiagnosticKind::Syntax, 3, "invalid integer."),
            "Syntax error on line 3: invalid integer.\n"
        );
        assert_eq!(
            render_diagnostic(
                DiagnosticKind::Conflict,
                9,
                "variable \"x\" is already defined globally"
            ),
            "Error on line 9: variable \"x\" is already defined globally\n"
        );
    }

    #[test]
    fn test_token_listing() {
        let listing = render_tokens(&tokens("int x;"));
        assert_eq!(
            listing,
            "Token list:\n\n\
             Token type: IDENTIFIER\nToken:      int\n\n\
             Token type: IDENTIFIER\nToken:      x\n\n\
             Token type: SEMICOLON\nToken:      ;\n\n"
        );
        assert_eq!(render_tokens(&[]), "");
    }

    #[test]
    fn test_cst_listing() {
        let tree = crate::cst::build(&tokens("procedure main(void)\n{\n  int a;\n}")).unwrap();
        assert_eq!(
            render_cst(&tree),
            "procedure -> main -> ( -> void -> ) -> NULL\n\
             child of ): { -> NULL\n\
             child of {: int -> a -> ; -> NULL\n\
             child of ;: } -> NULL\n"
        );
    }

    #[test]
    fn test_symbol_table_listing() {
        let tree = crate::cst::build(&tokens(
            "int g;\nfunction int f(int a, char b[4]) { int c; }",
        ))
        .unwrap();
        let registry = crate::symbols::build(&tree).unwrap();

        let expected = "\
IDENTIFIER_NAME: g
IDENTIFIER_TYPE: datatype
DATATYPE: int
DATATYPE_IS_ARRAY: no
DATATYPE_ARRAY_SIZE: 0
SCOPE: 0

IDENTIFIER_NAME: f
IDENTIFIER_TYPE: function
DATATYPE: int
DATATYPE_IS_ARRAY: no
DATATYPE_ARRAY_SIZE: 0
SCOPE: 1

IDENTIFIER_NAME: c
IDENTIFIER_TYPE: datatype
DATATYPE: int
DATATYPE_IS_ARRAY: no
DATATYPE_ARRAY_SIZE: 0
SCOPE: 1

PARAMETER LIST FOR: f
IDENTIFIER_NAME: a
DATATYPE: int
DATATYPE_IS_ARRAY: no
DATATYPE_ARRAY_SIZE: 0
SCOPE: 1

IDENTIFIER_NAME: b
DATATYPE: char
DATATYPE_IS_ARRAY: yes
DATATYPE_ARRAY_SIZE: 4
SCOPE: 1

";
        assert_eq!(render_symbol_table(&registry), expected);
    }

    #[test]
    fn test_parameter_headers_per_routine() {
        let tree = crate::cst::build(&tokens(
            "procedure p(int a) { }\nprocedure q(bool b, bool c) { }",
        ))
        .unwrap();
        let registry = crate::symbols::build(&tree).unwrap();
        let listing = render_symbol_table(&registry);
        assert_eq!(listing.matches("PARAMETER LIST FOR: p").count(), 1);
        assert_eq!(listing.matches("PARAMETER LIST FOR: q").count(), 1);
        assert!(listing.contains("IDENTIFIER_TYPE: procedure\nDATATYPE: NOT APPLICABLE\n"));
    }

    #[test]
    fn test_parameter_block_has_no_identifier_type() {
        let param = Symbol::parameter("n", "int", 2, "f", 7).with_array_size(3);
        assert_eq!(
            symbol_block(&param, false),
            "IDENTIFIER_NAME: n\nDATATYPE: int\nDATATYPE_IS_ARRAY: yes\nDATATYPE_ARRAY_SIZE: 3\nSCOPE: 2\n\n"
        );
        assert!(symbol_block(&param, true).contains("IDENTIFIER_TYPE: datatype\n"));
    }
}
