use crate::error::GrammarError;
use crate::evaluator::Evaluator;
use cursor_framework::Cursor;

/// Result of evaluating one rule reference or expression against the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Match,
    NoMatch,
}

impl Outcome {
    pub fn is_match(self) -> bool {
        matches!(self, Outcome::Match)
    }
}

impl From<bool> for Outcome {
    fn from(matched: bool) -> Self {
        if matched {
            Outcome::Match
        } else {
            Outcome::NoMatch
        }
    }
}

/// `Ok` carries a match verdict, `Err` a fatal grammar defect that aborts the
/// whole parse.
pub type EvalResult = Result<Outcome, GrammarError>;

/// A built-in matcher.
///
/// Built-ins are looked up by their token before user rules are. A symbol
/// built-in (`"`, `[`, `*`, ...) is recognised by its single leading byte; a
/// keyword built-in (`digit`, `num`, ...) by an identifier equal to its token.
pub trait MatchRule: Send + Sync {
    /// The trigger: one symbol byte, or a keyword.
    fn token(&self) -> &'static str;

    /// Display name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Returns true if the token is a symbol rather than a keyword.
    fn is_symbol(&self) -> bool;

    /// Matches against the evaluator's input.
    ///
    /// `grammar` is positioned just past the token, so a built-in that takes
    /// arguments (a quoted body, a number, a bracketed sub-expression, the
    /// reference to repeat) consumes them from there. A built-in that returns
    /// [`Outcome::NoMatch`] must leave the input where it found it.
    fn try_match(&self, eval: &mut Evaluator<'_>, grammar: &mut Cursor) -> EvalResult;
}
