use crate::error::GrammarError;
use crate::evaluator::Evaluator;
use crate::traits::{EvalResult, MatchRule, Outcome};
use cursor_framework::{predicate, ByteSlice, Cursor};

/// `"text"`: matches `text` exactly.
pub struct StringRule;

impl MatchRule for StringRule {
    fn token(&self) -> &'static str {
        "\""
    }

    fn name(&self) -> &'static str {
        "STRING"
    }

    fn is_symbol(&self) -> bool {
        true
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, grammar: &mut Cursor) -> EvalResult {
        let text = token_body(self, grammar, b'"')?;
        Ok(eval.input().eat_text(&text, false).into())
    }
}

/// `` `text` ``: matches `text` ignoring ASCII case.
pub struct NoCaseStringRule;

impl MatchRule for NoCaseStringRule {
    fn token(&self) -> &'static str {
        "`"
    }

    fn name(&self) -> &'static str {
        "NO_CASE_STRING"
    }

    fn is_symbol(&self) -> bool {
        true
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, grammar: &mut Cursor) -> EvalResult {
        let text = token_body(self, grammar, b'`')?;
        Ok(eval.input().eat_text(&text, true).into())
    }
}

/// `[ expr ]`: evaluates `expr` and succeeds whether or not it matched.
pub struct OptionalRule;

impl MatchRule for OptionalRule {
    fn token(&self) -> &'static str {
        "["
    }

    fn name(&self) -> &'static str {
        "OPTIONAL"
    }

    fn is_symbol(&self) -> bool {
        true
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, grammar: &mut Cursor) -> EvalResult {
        let body = token_body(self, grammar, b']')?;
        eval.evaluate(Cursor::from(body))?;
        Ok(Outcome::Match)
    }
}

/// `( expr )`: evaluates `expr` as a unit.
pub struct GroupRule;

impl MatchRule for GroupRule {
    fn token(&self) -> &'static str {
        "("
    }

    fn name(&self) -> &'static str {
        "GROUP"
    }

    fn is_symbol(&self) -> bool {
        true
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, grammar: &mut Cursor) -> EvalResult {
        let body = token_body(self, grammar, b')')?;
        eval.evaluate(Cursor::from(body))
    }
}

/// `$`: skips any run of whitespace in the input, including none.
pub struct WhitespaceRule;

impl MatchRule for WhitespaceRule {
    fn token(&self) -> &'static str {
        "$"
    }

    fn name(&self) -> &'static str {
        "WHITESPACES"
    }

    fn is_symbol(&self) -> bool {
        true
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, _grammar: &mut Cursor) -> EvalResult {
        eval.input().skip_whitespace();
        Ok(Outcome::Match)
    }
}

/// A keyword built-in matching bytes of one class: either exactly one byte,
/// or a run of at least one.
pub struct ClassRule {
    token: &'static str,
    name: &'static str,
    class: fn(u8) -> bool,
    run: bool,
}

impl ClassRule {
    /// `digit`
    pub fn digit() -> Self {
        Self::single("digit", "DIGIT", predicate::is_digit)
    }

    /// `num`
    pub fn number() -> Self {
        Self::run("num", "NUMBER", predicate::is_digit)
    }

    /// `alpha`
    pub fn alpha() -> Self {
        Self::single("alpha", "ALPHA", predicate::is_alpha)
    }

    /// `word`
    pub fn word() -> Self {
        Self::run("word", "WORD", predicate::is_alpha)
    }

    /// `alnum`
    pub fn alnum() -> Self {
        Self::single("alnum", "ALPHA_NUMERIC", predicate::is_alphanumeric)
    }

    /// `eol`: one carriage return or line feed.
    pub fn end_of_line() -> Self {
        Self::single("eol", "END_OF_LINE", |b| b == b'\r' || b == b'\n')
    }

    pub fn single(token: &'static str, name: &'static str, class: fn(u8) -> bool) -> Self {
        Self {
            token,
            name,
            class,
            run: false,
        }
    }

    pub fn run(token: &'static str, name: &'static str, class: fn(u8) -> bool) -> Self {
        Self {
            token,
            name,
            class,
            run: true,
        }
    }
}

impl MatchRule for ClassRule {
    fn token(&self) -> &'static str {
        self.token
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn is_symbol(&self) -> bool {
        false
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, _grammar: &mut Cursor) -> EvalResult {
        let input = eval.input();
        let matched = if self.run {
            input.eat_while(self.class) > 0
        } else {
            input.eat_if(self.class)
        };
        Ok(matched.into())
    }
}

/// `* ref` and `+ ref`: evaluates the single rule reference that follows as
/// many times as it matches.
pub struct RepeatRule {
    token: &'static str,
    name: &'static str,
    min: usize,
}

impl RepeatRule {
    pub fn zero_or_more() -> Self {
        Self {
            token: "*",
            name: "MULTIPLE",
            min: 0,
        }
    }

    pub fn one_or_more() -> Self {
        Self {
            token: "+",
            name: "ONE_MULTIPLE",
            min: 1,
        }
    }
}

impl MatchRule for RepeatRule {
    fn token(&self) -> &'static str {
        self.token
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn is_symbol(&self) -> bool {
        true
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, grammar: &mut Cursor) -> EvalResult {
        grammar.skip_whitespace();
        let start = grammar.checkpoint();
        let mut count = 0;
        loop {
            // Each iteration reads the same reference again, so the grammar
            // cursor ends up just past it however many times it matched.
            grammar.restore(start);
            let reference = eval.read_reference(grammar)?;
            let before = eval.input().offset();
            if !eval.eval_reference(&reference, grammar)?.is_match() {
                break;
            }
            count += 1;
            if eval.input().offset() == before {
                break;
            }
        }
        Ok((count >= self.min).into())
    }
}

/// `~NNN`: one input byte whose value is the decimal `NNN`.
pub struct ByteRule;

impl MatchRule for ByteRule {
    fn token(&self) -> &'static str {
        "~"
    }

    fn name(&self) -> &'static str {
        "BYTE"
    }

    fn is_symbol(&self) -> bool {
        true
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, grammar: &mut Cursor) -> EvalResult {
        let value = byte_value(self, grammar)?;
        Ok(eval.input().eat(value).into())
    }
}

/// `#LOW-HIGH`: one input byte whose value lies within `LOW..=HIGH`.
pub struct BetweenRule;

impl MatchRule for BetweenRule {
    fn token(&self) -> &'static str {
        "#"
    }

    fn name(&self) -> &'static str {
        "BETWEEN"
    }

    fn is_symbol(&self) -> bool {
        true
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, grammar: &mut Cursor) -> EvalResult {
        let low = byte_value(self, grammar)?;
        if !grammar.eat(b'-') {
            return Err(GrammarError::erroneous(self.name(), grammar));
        }
        let high = byte_value(self, grammar)?;
        Ok(eval.input().eat_range(low, high).into())
    }
}

/// Reads the body of a token whose opening delimiter was the rule's own
/// symbol, up to `close`.
fn token_body(
    rule: &dyn MatchRule,
    grammar: &mut Cursor,
    close: u8,
) -> Result<ByteSlice, GrammarError> {
    grammar
        .eat_until(close)
        .ok_or_else(|| GrammarError::erroneous(rule.name(), grammar))
}

/// Reads a decimal byte value (0 to 255).
fn byte_value(rule: &dyn MatchRule, grammar: &mut Cursor) -> Result<u8, GrammarError> {
    let mark = grammar.mark();
    if grammar.eat_while(predicate::is_digit) == 0 {
        return Err(GrammarError::erroneous(rule.name(), grammar));
    }
    let digits = grammar.extract(mark);
    digits
        .as_str()
        .and_then(|digits| digits.parse::<u8>().ok())
        .ok_or_else(|| GrammarError::erroneous(rule.name(), grammar))
}

/// Returns the full set of built-in matchers.
pub fn default_rules() -> Vec<Box<dyn MatchRule>> {
    vec![
        Box::new(StringRule),
        Box::new(NoCaseStringRule),
        Box::new(OptionalRule),
        Box::new(GroupRule),
        Box::new(WhitespaceRule),
        Box::new(ClassRule::digit()),
        Box::new(ClassRule::number()),
        Box::new(ClassRule::alpha()),
        Box::new(ClassRule::word()),
        Box::new(ClassRule::alnum()),
        Box::new(ClassRule::end_of_line()),
        Box::new(RepeatRule::zero_or_more()),
        Box::new(RepeatRule::one_or_more()),
        Box::new(ByteRule),
        Box::new(BetweenRule),
    ]
}
