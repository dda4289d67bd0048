//! Reserved words and declaration keywords

/// Words that may not name a variable or a function
pub const RESERVED_WORDS: &[&str] = &[
    "char", "int", "bool", "void", "if", "else", "function", "printf",
];

/// Words that start a variable declaration
pub const TYPE_KEYWORDS: &[&str] = &["char", "int", "bool"];

pub const FUNCTION_KEYWORD: &str = "function";
pub const PROCEDURE_KEYWORD: &str = "procedure";
pub const VOID_KEYWORD: &str = "void";

pub fn is_reserved_word(text: &str) -> bool {
    RESERVED_WORDS.contains(&text)
}

pub fn is_type_keyword(text: &str) -> bool {
    TYPE_KEYWORDS.contains(&text)
}

/// `function` or `procedure`
pub fn is_routine_keyword(text: &str) -> bool {
    text == FUNCTION_KEYWORD || text == PROCEDURE_KEYWORD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_keywords_are_reserved() {
        for word in TYPE_KEYWORDS {
            assert!(is_reserved_word(word));
        }
    }

    #[test]
    fn test_procedure_is_not_reserved() {
        // Only `function` is guarded; a procedure name is never checked
        assert!(!is_reserved_word("procedure"));
        assert!(is_routine_keyword("procedure"));
        assert!(is_routine_keyword("function"));
        assert!(!is_routine_keyword("main"));
    }
}
