//! Symbol discovery over the CST
//!
//! The walk uses the same sibling-then-child order as structural
//! validation. Each reader starts at a keyword node and returns the node it
//! stopped on; the main walk resumes from there.

use super::error::{ConflictError, SymbolResult};
use super::table::{DeclKind, Symbol, SymbolRegistry, GLOBAL_SCOPE, PROCEDURE_DATATYPE};
use crate::config::compile_time::symbols::{MAX_ROUTINES, MAX_SYMBOLS};
use crate::cst::{ConcreteSyntaxTree, NodeId};
use crate::log_warning;
use crate::logging::codes;
use crate::tokens::keywords::{
    is_routine_keyword, is_type_keyword, FUNCTION_KEYWORD, VOID_KEYWORD,
};

/// Where an array suffix `[ size ]` ended
struct ArrayTail {
    size: usize,
    last: NodeId,
    after: Option<NodeId>,
}

pub struct SymbolTableBuilder<'a> {
    tree: &'a ConcreteSyntaxTree,
    registry: SymbolRegistry,
    /// Scope of the most recent routine
    scope: u32,
    invalid_array_sizes: usize,
}

impl<'a> SymbolTableBuilder<'a> {
    pub fn new(tree: &'a ConcreteSyntaxTree) -> Self {
        Self {
            tree,
            registry: SymbolRegistry::new(),
            scope: GLOBAL_SCOPE,
            invalid_array_sizes: 0,
        }
    }

    /// Array sizes that were not integers and were recorded as 0
    pub fn invalid_array_sizes(&self) -> usize {
        self.invalid_array_sizes
    }

    /// Walk the tree once; the builder keeps its counters afterwards
    pub fn build(&mut self) -> SymbolResult<SymbolRegistry> {
        let tree = self.tree;
        let mut cursor = Some(tree.root());

        while let Some(node) = cursor {
            if !tree.has_successor(node) {
                break;
            }

            let text = tree.text(node);
            let stop = if is_routine_keyword(text) {
                Some(self.read_routine(node)?)
            } else if is_type_keyword(text) {
                Some(self.read_variables(node, GLOBAL_SCOPE)?)
            } else {
                None
            };

            cursor = match stop {
                Some(stop) if stop != node => Some(stop),
                _ => tree.next_in_walk(node),
            };
        }

        Ok(std::mem::take(&mut self.registry))
    }

    fn add(&mut self, symbol: Symbol) -> SymbolResult<()> {
        if self.registry.len() >= MAX_SYMBOLS {
            return Err(ConflictError::TooManySymbols {
                max: MAX_SYMBOLS,
                line: symbol.line,
            });
        }
        self.registry.push(symbol);
        Ok(())
    }

    /// `function <type> <name>` or `procedure <name>`, optional parameter
    /// list, then the braced body
    fn read_routine(&mut self, keyword: NodeId) -> SymbolResult<NodeId> {
        let tree = self.tree;

        let (kind, datatype, name) = if tree.text(keyword) == FUNCTION_KEYWORD {
            let Some(return_type) = tree.sibling(keyword) else {
                return Ok(keyword);
            };
            let Some(name) = tree.sibling(return_type) else {
                return Ok(return_type);
            };
            (DeclKind::Function, tree.text(return_type), name)
        } else {
            let Some(name) = tree.sibling(keyword) else {
                return Ok(keyword);
            };
            (DeclKind::Procedure, PROCEDURE_DATATYPE, name)
        };

        if self.registry.routine_count() >= MAX_ROUTINES {
            return Err(ConflictError::TooManyRoutines {
                max: MAX_ROUTINES,
                line: tree.line(keyword),
            });
        }

        self.scope += 1;
        let scope = self.scope;
        let routine_name = tree.text(name).to_string();
        self.add(Symbol::routine(
            &routine_name,
            kind,
            datatype,
            scope,
            tree.line(keyword),
        ))?;

        let mut current = name;
        if let Some(open) = tree.sibling(name).filter(|n| tree.text(*n) == "(") {
            current = self.read_parameters(open, scope, &routine_name)?;
        }

        self.read_body(current, scope)
    }

    /// Parameters up to the closing `)`; a lone `void` means none
    fn read_parameters(&mut self, open: NodeId, scope: u32, owner: &str) -> SymbolResult<NodeId> {
        let tree = self.tree;
        let Some(mut current) = tree.sibling(open) else {
            return Ok(open);
        };
        if tree.text(current) == VOID_KEYWORD {
            return Ok(current);
        }

        while tree.text(current) != ")" {
            if is_type_keyword(tree.text(current)) {
                let Some(name) = tree.sibling(current) else {
                    return Ok(current);
                };
                let mut symbol = Symbol::parameter(
                    tree.text(name),
                    tree.text(current),
                    scope,
                    owner,
                    tree.line(name),
                );
                let mut last = name;
                let mut after = tree.sibling(name);

                if let Some(bracket) = after.filter(|n| tree.text(*n) == "[") {
                    let tail = self.read_array(bracket);
                    symbol = symbol.with_array_size(tail.size);
                    last = tail.last;
                    after = tail.after;
                }
                self.add(symbol)?;

                match after {
                    Some(next) => current = next,
                    None => return Ok(last),
                }
            } else {
                // commas and anything that cannot start a parameter
                match tree.sibling(current) {
                    Some(next) => current = next,
                    None => return Ok(current),
                }
            }
        }

        Ok(current)
    }

    /// Scan the body, tracking brace depth, until its closing brace
    fn read_body(&mut self, start: NodeId, scope: u32) -> SymbolResult<NodeId> {
        let tree = self.tree;
        let mut depth: i64 = 0;
        let mut current = start;

        while let Some(next) = tree.next_in_walk(current) {
            current = next;
            match tree.text(current) {
                "{" => depth += 1,
                "}" => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(current);
                    }
                }
                text if is_type_keyword(text) => {
                    current = self.read_variables(current, scope)?;
                }
                _ => {}
            }
        }

        Ok(current)
    }

    /// `<type> name [ [size] ] { , name [ [size] ] } ;`
    ///
    /// Initializers after a name are skipped up to the next `,` or `;`.
    fn read_variables(&mut self, type_keyword: NodeId, scope: u32) -> SymbolResult<NodeId> {
        let tree = self.tree;
        let datatype = tree.text(type_keyword);
        let mut current = type_keyword;

        loop {
            let Some(name) = tree.sibling(current) else {
                return Ok(current);
            };
            if tree.text(name) == ";" {
                return Ok(name);
            }

            let mut symbol = Symbol::variable(tree.text(name), datatype, scope, tree.line(name));
            current = name;
            let mut next = tree.sibling(name);

            if let Some(bracket) = next.filter(|n| tree.text(*n) == "[") {
                let tail = self.read_array(bracket);
                symbol = symbol.with_array_size(tail.size);
                current = tail.last;
                next = tail.after;
            }
            self.add(symbol)?;

            loop {
                let Some(node) = next else {
                    return Ok(current);
                };
                current = node;
                match tree.text(node) {
                    ";" => return Ok(node),
                    "," => break,
                    _ => next = tree.sibling(node),
                }
            }
        }
    }

    fn read_array(&mut self, bracket: NodeId) -> ArrayTail {
        let tree = self.tree;
        let Some(size_node) = tree.sibling(bracket) else {
            return ArrayTail {
                size: 0,
                last: bracket,
                after: None,
            };
        };

        let size = self.parse_array_size(size_node);
        if tree.text(size_node) == "]" {
            return ArrayTail {
                size,
                last: size_node,
                after: tree.sibling(size_node),
            };
        }

        match tree.sibling(size_node) {
            Some(close) if tree.text(close) == "]" => ArrayTail {
                size,
                last: close,
                after: tree.sibling(close),
            },
            other => ArrayTail {
                size,
                last: size_node,
                after: other,
            },
        }
    }

    fn parse_array_size(&mut self, size_node: NodeId) -> usize {
        let text = self.tree.text(size_node);
        match text.parse::<usize>() {
            Ok(size) => size,
            Err(_) => {
                self.invalid_array_sizes += 1;
                log_warning!(code = codes::symbols::INVALID_ARRAY_SIZE,
                    "Array size is not an integer, recording 0",
                    "size" => text,
                    "line" => self.tree.line(size_node));
                0
            }
        }
    }
}
