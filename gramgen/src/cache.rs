use once_cell::sync::OnceCell;

use crate::ast::Grammar;
use crate::error::Error;
use crate::parser;

/// Owns a grammar source and parses it at most once. The first `get` parses
/// and stores the result; later calls return the stored tree. Concurrent
/// first access is serialized by the cell.
pub struct GrammarCache {
    source: String,
    grammar: OnceCell<Grammar>,
}

impl GrammarCache {
    pub fn new(source: impl Into<String>) -> Self {
        GrammarCache {
            source: source.into(),
            grammar: OnceCell::new(),
        }
    }

    pub fn get(&self) -> Result<&Grammar, Error> {
        self.grammar.get_or_try_init(|| parser::parse(&self.source))
    }

    /// Drop the cached tree and switch to a new source. The next `get`
    /// parses again.
    pub fn reload(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.grammar = OnceCell::new();
    }
}
