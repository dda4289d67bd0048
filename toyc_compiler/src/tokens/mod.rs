//! Token types for the toy procedural language
//!
//! Tokens are flat: a kind, the exact source text, and the line the token
//! starts on. Keywords are ordinary identifiers; the tree and symbol stages
//! decide keyword-ness with the helpers in [`keywords`].

pub mod keywords;
pub mod token;

pub use keywords::{is_reserved_word, is_type_keyword, RESERVED_WORDS, TYPE_KEYWORDS};
pub use token::{Token, TokenKind};
