//! The three named tables a session works with: built-in matchers, user
//! rules and captures.

use crate::rules::default_rules;
use crate::traits::MatchRule;
use grammar_common::ByteSlice;
use std::collections::HashMap;
use std::sync::Arc;

/// The fixed set of built-in matchers, keyed by token.
///
/// Built once and never mutated afterwards; sessions share it through an
/// `Arc`.
pub struct BuiltinTable {
    rules: HashMap<&'static str, Box<dyn MatchRule>>,
    symbols: Vec<u8>,
}

impl BuiltinTable {
    /// Creates a table from the given rules. Every symbol token joins the
    /// symbol accept-set. A symbol is read as a single byte, so a symbol rule
    /// whose token is not exactly one byte long is skipped with a warning.
    pub fn new(rules: Vec<Box<dyn MatchRule>>) -> Self {
        let mut symbols = Vec::new();
        let mut table = HashMap::with_capacity(rules.len());
        for rule in rules {
            if rule.is_symbol() {
                let &[symbol] = rule.token().as_bytes() else {
                    log::warn!(
                        "skipping built-in {}: symbol token '{}' is not a single byte",
                        rule.name(),
                        rule.token()
                    );
                    continue;
                };
                symbols.push(symbol);
            }
            table.insert(rule.token(), rule);
        }
        Self {
            rules: table,
            symbols,
        }
    }

    /// Looks up a built-in by token.
    pub fn get(&self, token: &str) -> Option<&dyn MatchRule> {
        self.rules.get(token).map(|rule| rule.as_ref())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.rules.contains_key(token)
    }

    /// The bytes that start a symbol built-in.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn MatchRule> {
        self.rules.values().map(|rule| rule.as_ref())
    }
}

impl Default for BuiltinTable {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl std::fmt::Debug for BuiltinTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokens: Vec<_> = self.rules.keys().collect();
        tokens.sort();
        f.debug_struct("BuiltinTable")
            .field("tokens", &tokens)
            .field("symbols", &String::from_utf8_lossy(&self.symbols))
            .finish()
    }
}

/// User rules: identifier to unparsed expression text.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: HashMap<String, Arc<[u8]>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a rule, returning the expression it replaced.
    pub fn insert<N, E>(&mut self, name: N, expression: E) -> Option<Arc<[u8]>>
    where
        N: Into<String>,
        E: Into<Arc<[u8]>>,
    {
        self.rules.insert(name.into(), expression.into())
    }

    /// Returns the expression stored under `name`.
    pub fn get(&self, name: &str) -> Option<Arc<[u8]>> {
        self.rules.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.rules.clear();
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.rules
            .iter()
            .map(|(name, expression)| (name.as_str(), expression.as_ref()))
    }
}

/// Captured input ranges, keyed by capture name, in match order.
///
/// Every push is journaled so that the evaluator can discard the captures of
/// an alternative that failed after some of its steps had matched.
#[derive(Debug, Clone, Default)]
pub struct CaptureTable {
    entries: HashMap<String, Vec<ByteSlice>>,
    journal: Vec<String>,
}

impl CaptureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `span` to the list recorded under `name`.
    pub fn push(&mut self, name: String, span: ByteSlice) {
        self.entries.entry(name.clone()).or_default().push(span);
        self.journal.push(name);
    }

    /// Returns the spans captured under `name`, first match first.
    pub fn get(&self, name: &str) -> Option<&[ByteSlice]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Returns a marker for [`truncate`](Self::truncate).
    pub fn snapshot(&self) -> usize {
        self.journal.len()
    }

    /// Removes every capture pushed since `snapshot` was taken.
    pub fn truncate(&mut self, snapshot: usize) {
        while self.journal.len() > snapshot {
            let Some(name) = self.journal.pop() else {
                break;
            };
            if let Some(spans) = self.entries.get_mut(&name) {
                spans.pop();
                if spans.is_empty() {
                    self.entries.remove(&name);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.journal.clear();
    }

    /// Number of distinct capture names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ByteSlice])> {
        self.entries
            .iter()
            .map(|(name, spans)| (name.as_str(), spans.as_slice()))
    }
}
