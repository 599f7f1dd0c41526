//! Error types for grammar evaluation, parsing and grammar loading.
//!
//! A [`GrammarError`] is fatal: the grammar itself is malformed and the
//! current parse stops at once. A plain mismatch is not an error at all, it is
//! [`Outcome::NoMatch`](crate::Outcome::NoMatch); only when no alternative of
//! the entry rule matches does it surface as [`ParseError::NoMatch`].

use cursor_framework::Cursor;
use grammar_common::Position;
use std::path::PathBuf;

/// A structural defect in a grammar expression.
///
/// Every variant carries the expression text being read and the byte offset
/// inside it where the defect was found.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("rule missing at offset {offset} of `{expression}`")]
    RuleMissing { expression: String, offset: usize },

    #[error("capture name missing at offset {offset} of `{expression}`")]
    CaptureNameMissing { expression: String, offset: usize },

    #[error("erroneous rule '{rule}' at offset {offset} of `{expression}`")]
    Erroneous {
        rule: &'static str,
        expression: String,
        offset: usize,
    },

    #[error("rule not found '{name}' at offset {offset} of `{expression}`")]
    RuleNotFound {
        name: String,
        expression: String,
        offset: usize,
    },
}

impl GrammarError {
    pub(crate) fn rule_missing(grammar: &Cursor) -> Self {
        Self::RuleMissing {
            expression: expression_text(grammar),
            offset: grammar.offset(),
        }
    }

    pub(crate) fn capture_name_missing(grammar: &Cursor) -> Self {
        Self::CaptureNameMissing {
            expression: expression_text(grammar),
            offset: grammar.offset(),
        }
    }

    pub(crate) fn erroneous(rule: &'static str, grammar: &Cursor) -> Self {
        Self::Erroneous {
            rule,
            expression: expression_text(grammar),
            offset: grammar.offset(),
        }
    }

    pub(crate) fn rule_not_found(name: &str, grammar: &Cursor) -> Self {
        Self::RuleNotFound {
            name: name.to_string(),
            expression: expression_text(grammar),
            offset: grammar.offset(),
        }
    }

    /// Short description without location details.
    pub fn message(&self) -> &'static str {
        match self {
            GrammarError::RuleMissing { .. } => "rule missing",
            GrammarError::CaptureNameMissing { .. } => "capture name missing",
            GrammarError::Erroneous { .. } => "erroneous rule",
            GrammarError::RuleNotFound { .. } => "rule not found",
        }
    }

    /// The rule the error is about, if any.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            GrammarError::Erroneous { rule, .. } => Some(*rule),
            GrammarError::RuleNotFound { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// The expression text in which the error was found.
    pub fn expression(&self) -> &str {
        match self {
            GrammarError::RuleMissing { expression, .. }
            | GrammarError::CaptureNameMissing { expression, .. }
            | GrammarError::Erroneous { expression, .. }
            | GrammarError::RuleNotFound { expression, .. } => expression.as_str(),
        }
    }

    /// Byte offset inside [`expression`](Self::expression).
    pub fn offset(&self) -> usize {
        match self {
            GrammarError::RuleMissing { offset, .. }
            | GrammarError::CaptureNameMissing { offset, .. }
            | GrammarError::Erroneous { offset, .. }
            | GrammarError::RuleNotFound { offset, .. } => *offset,
        }
    }
}

fn expression_text(grammar: &Cursor) -> String {
    String::from_utf8_lossy(grammar.as_bytes()).into_owned()
}

/// Why a call to [`Session::parse`](crate::Session::parse) failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("no entry point @{rule}")]
    NoEntryPoint { rule: String },

    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("no match, input matched up to {position}")]
    NoMatch { position: Position },

    #[error("unexpected input after match at {position}")]
    TrailingInput { position: Position },
}

impl ParseError {
    /// Short description without location details.
    pub fn message(&self) -> &'static str {
        match self {
            ParseError::NoEntryPoint { .. } => "no entry point",
            ParseError::Grammar(err) => err.message(),
            ParseError::NoMatch { .. } => "no match",
            ParseError::TrailingInput { .. } => "unexpected input after match",
        }
    }

    /// The rule the error is about, if any.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            ParseError::NoEntryPoint { rule } => Some(rule.as_str()),
            ParseError::Grammar(err) => err.parameter(),
            _ => None,
        }
    }

    /// Byte offset of the error: inside the grammar expression for
    /// [`ParseError::Grammar`], inside the input otherwise.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::NoEntryPoint { .. } => 0,
            ParseError::Grammar(err) => err.offset(),
            ParseError::NoMatch { position } | ParseError::TrailingInput { position } => {
                position.offset
            }
        }
    }

    /// Returns true for errors caused by the grammar rather than the input.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::NoEntryPoint { .. } | ParseError::Grammar(_))
    }
}

/// Failure to load a grammar file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read grammar file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
