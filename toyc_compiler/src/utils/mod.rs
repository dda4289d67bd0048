//! Shared primitive types used across the front end stages

pub mod span;

pub use span::{Position, Span};
