//! Symbol records and the append-only registry

use serde::Serialize;
use std::fmt;

/// Scope number of file-level declarations
pub const GLOBAL_SCOPE: u32 = 0;

/// Datatype recorded for procedures, which return nothing
pub const PROCEDURE_DATATYPE: &str = "NOT APPLICABLE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclKind {
    Function,
    Procedure,
    Variable,
}

impl DeclKind {
    /// Name printed in the IDENTIFIER_TYPE field
    pub fn as_str(&self) -> &'static str {
        match self {
            DeclKind::Function => "function",
            DeclKind::Procedure => "procedure",
            DeclKind::Variable => "datatype",
        }
    }

    pub fn is_routine(&self) -> bool {
        matches!(self, DeclKind::Function | DeclKind::Procedure)
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub name: String,
    pub decl_kind: DeclKind,
    pub datatype: String,
    pub is_array: bool,
    /// Meaningful only when `is_array`
    pub array_size: usize,
    pub scope: u32,
    pub is_parameter: bool,
    /// Routine a parameter belongs to
    pub owner_routine: Option<String>,
    pub line: u32,
}

impl Symbol {
    pub fn variable(name: &str, datatype: &str, scope: u32, line: u32) -> Self {
        Self {
            name: name.to_string(),
            decl_kind: DeclKind::Variable,
            datatype: datatype.to_string(),
            is_array: false,
            array_size: 0,
            scope,
            is_parameter: false,
            owner_routine: None,
            line,
        }
    }

    pub fn parameter(name: &str, datatype: &str, scope: u32, owner: &str, line: u32) -> Self {
        Self {
            is_parameter: true,
            owner_routine: Some(owner.to_string()),
            ..Self::variable(name, datatype, scope, line)
        }
    }

    pub fn routine(name: &str, kind: DeclKind, datatype: &str, scope: u32, line: u32) -> Self {
        Self {
            decl_kind: kind,
            ..Self::variable(name, datatype, scope, line)
        }
    }

    pub fn with_array_size(mut self, size: usize) -> Self {
        self.is_array = true;
        self.array_size = size;
        self
    }

    pub fn is_global(&self) -> bool {
        self.scope == GLOBAL_SCOPE
    }
}

/// Symbols in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymbolRegistry {
    symbols: Vec<Symbol>,
}

impl SymbolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, symbol: Symbol) {
        self.symbols.push(symbol);
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Declarations that are not parameters
    pub fn declarations(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| !s.is_parameter)
    }

    pub fn parameters(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().filter(|s| s.is_parameter)
    }

    pub fn parameters_of<'a>(&'a self, routine: &'a str) -> impl Iterator<Item = &'a Symbol> {
        self.parameters()
            .filter(move |s| s.owner_routine.as_deref() == Some(routine))
    }

    /// First symbol with `name` in `scope`
    pub fn lookup(&self, name: &str, scope: u32) -> Option<&Symbol> {
        self.symbols
            .iter()
            .find(|s| s.name == name && s.scope == scope)
    }

    pub fn routine_count(&self) -> usize {
        self.symbols
            .iter()
            .filter(|s| s.decl_kind.is_routine())
            .count()
    }
}

impl<'a> IntoIterator for &'a SymbolRegistry {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}
