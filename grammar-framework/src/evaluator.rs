use crate::error::GrammarError;
use crate::table::{BuiltinTable, CaptureTable, RuleTable};
use crate::traits::{EvalResult, Outcome};
use cursor_framework::Cursor;

/// Separates the alternatives of an expression.
pub const ALTERNATION: u8 = b'|';

/// Separates a rule name from its capture name.
pub const CAPTURE: u8 = b':';

/// One step of a sequence: a rule name and an optional capture name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRef {
    pub name: String,
    pub capture: Option<String>,
}

/// Interprets grammar expressions against an input.
///
/// The evaluator borrows the session's tables for the duration of one parse.
/// Grammar text is always read through a cursor passed in by the caller, so
/// the grammar cursor and the input cursor never alias.
pub struct Evaluator<'a> {
    builtins: &'a BuiltinTable,
    rules: &'a RuleTable,
    input: &'a mut Cursor,
    captures: &'a mut CaptureTable,
}

impl<'a> Evaluator<'a> {
    pub fn new(
        builtins: &'a BuiltinTable,
        rules: &'a RuleTable,
        input: &'a mut Cursor,
        captures: &'a mut CaptureTable,
    ) -> Self {
        Self {
            builtins,
            rules,
            input,
            captures,
        }
    }

    /// The input cursor.
    pub fn input(&mut self) -> &mut Cursor {
        &mut *self.input
    }

    /// Evaluates a whole expression read from `grammar`.
    pub fn evaluate(&mut self, mut grammar: Cursor) -> EvalResult {
        self.eval_sequence(&mut grammar)
    }

    /// Evaluates alternatives from `grammar` in order until one matches.
    ///
    /// Every step of an alternative is evaluated even after an earlier one
    /// failed, since the steps have to be read to find the next `|`. When an
    /// alternative fails, the input and the captures are restored to where
    /// they were before it.
    pub fn eval_sequence(&mut self, grammar: &mut Cursor) -> EvalResult {
        let save = self.input.checkpoint();
        let captured = self.captures.snapshot();
        loop {
            let mut matched = true;
            loop {
                grammar.skip_whitespace();
                if grammar.is_eof() || grammar.peek() == Some(ALTERNATION) {
                    break;
                }
                let reference = self.read_reference(grammar)?;
                matched &= self.eval_reference(&reference, grammar)?.is_match();
            }
            if matched {
                return Ok(Outcome::Match);
            }
            self.input.restore(save);
            self.captures.truncate(captured);
            if !grammar.eat(ALTERNATION) {
                return Ok(Outcome::NoMatch);
            }
        }
    }

    /// Reads one rule reference: a built-in symbol, or an identifier with an
    /// optional `:capture` suffix.
    pub fn read_reference(&self, grammar: &mut Cursor) -> Result<RuleRef, GrammarError> {
        let mark = grammar.mark();
        if grammar.eat_one_of(self.builtins.symbols()) {
            return Ok(RuleRef {
                name: grammar.extract(mark).to_string(),
                capture: None,
            });
        }
        if !grammar.eat_identifier() {
            return Err(GrammarError::rule_missing(grammar));
        }
        let name = grammar.extract(mark).to_string();
        if !grammar.eat(CAPTURE) {
            return Ok(RuleRef {
                name,
                capture: None,
            });
        }
        let mark = grammar.mark();
        if !grammar.eat_identifier() {
            return Err(GrammarError::capture_name_missing(grammar));
        }
        Ok(RuleRef {
            name,
            capture: Some(grammar.extract(mark).to_string()),
        })
    }

    /// Evaluates one rule reference, built-ins first, then user rules.
    pub fn eval_reference(&mut self, reference: &RuleRef, grammar: &mut Cursor) -> EvalResult {
        log::trace!(
            "rule `{}` at input offset {}",
            reference.name,
            self.input.offset()
        );
        let start = reference.capture.as_ref().map(|_| self.input.mark());
        let builtins = self.builtins;
        let rules = self.rules;

        let outcome = if let Some(builtin) = builtins.get(&reference.name) {
            builtin.try_match(self, grammar)?
        } else if let Some(expression) = rules.get(&reference.name) {
            self.evaluate(Cursor::with_arc(expression))?
        } else {
            return Err(GrammarError::rule_not_found(&reference.name, grammar));
        };

        if let (Outcome::Match, Some(name), Some(start)) = (outcome, &reference.capture, start) {
            let span = self.input.extract(start);
            self.captures.push(name.clone(), span);
        }
        Ok(outcome)
    }
}
