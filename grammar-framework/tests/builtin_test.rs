//! Built-in matchers, one by one, and custom built-ins through `MatchRule`.

use grammar_framework::{
    default_rules, BuiltinTable, Cursor, EvalResult, Evaluator, MatchRule, Outcome, Session,
    SessionConfig,
};
use std::sync::Arc;

fn matches(grammar: &str, input: &str) -> bool {
    let mut session = Session::new();
    session.load_str(grammar);
    session.parse(input)
}

#[test]
fn test_string_is_case_sensitive() {
    assert!(matches("ENTRY = \"ABC\"", "ABC"));
    assert!(!matches("ENTRY = \"ABC\"", "abc"));
    assert!(!matches("ENTRY = \"ABC\"", "AB"));
}

#[test]
fn test_string_keeps_inner_spaces() {
    assert!(matches("ENTRY = \"a b\"", "a b"));
    assert!(!matches("ENTRY = \"a b\"", "ab"));
}

#[test]
fn test_string_may_hold_grammar_symbols() {
    let grammar = "ENTRY = \"|\" | \"[x]\" | \"(*)\"";
    assert!(matches(grammar, "|"));
    assert!(matches(grammar, "[x]"));
    assert!(matches(grammar, "(*)"));
}

#[test]
fn test_no_case_string() {
    for input in ["abc", "ABC", "aBc"] {
        assert!(matches("ENTRY = `ABC`", input), "input {input:?}");
    }
    assert!(!matches("ENTRY = `ABC`", "abd"));
}

#[test]
fn test_digit_matches_one_byte() {
    assert!(matches("ENTRY = digit", "7"));
    assert!(!matches("ENTRY = digit", "77"));
    assert!(!matches("ENTRY = digit", "x"));
}

#[test]
fn test_num_needs_one_digit() {
    assert!(matches("ENTRY = num", "0"));
    assert!(matches("ENTRY = num", "9876543210"));
    assert!(!matches("ENTRY = num", ""));
    assert!(!matches("ENTRY = num", "-1"));
}

#[test]
fn test_alpha_and_word() {
    assert!(matches("ENTRY = alpha", "q"));
    assert!(!matches("ENTRY = alpha", "qq"));
    assert!(!matches("ENTRY = alpha", "1"));
    assert!(matches("ENTRY = word", "Hello"));
    assert!(!matches("ENTRY = word", ""));
    assert!(!matches("ENTRY = word", "snake_case"));
}

#[test]
fn test_alnum() {
    assert!(matches("ENTRY = alnum", "a"));
    assert!(matches("ENTRY = alnum", "1"));
    assert!(!matches("ENTRY = alnum", "_"));
}

#[test]
fn test_end_of_line() {
    assert!(matches("ENTRY = eol", "\n"));
    assert!(matches("ENTRY = eol", "\r"));
    assert!(matches("ENTRY = eol eol", "\r\n"));
    assert!(!matches("ENTRY = eol", " "));
}

#[test]
fn test_whitespace_matches_any_run() {
    let grammar = "ENTRY = \"a\" $ \"b\"";
    assert!(matches(grammar, "ab"));
    assert!(matches(grammar, "a \t\r\n b"));
    assert!(!matches(grammar, "a_b"));
}

#[test]
fn test_byte_value() {
    assert!(matches("ENTRY = ~65", "A"));
    assert!(!matches("ENTRY = ~65", "B"));
    assert!(matches("ENTRY = ~9 ~10", "\t\n"));
}

#[test]
fn test_between_is_inclusive() {
    for digit in b'0'..=b'9' {
        let input = String::from(digit as char);
        assert!(matches("ENTRY = #48-57", &input), "input {input:?}");
    }
    assert!(!matches("ENTRY = #48-57", "/"));
    assert!(!matches("ENTRY = #48-57", ":"));
    assert!(!matches("ENTRY = #48-57", "a"));
}

#[test]
fn test_between_with_empty_range_never_matches() {
    assert!(!matches("ENTRY = #57-48", "5"));
}

#[test]
fn test_repeat_of_user_rule() {
    let grammar = "ENTRY = + pair\npair = alpha digit";
    assert!(matches(grammar, "a1b2c3"));
    assert!(!matches(grammar, "a1b"));
}

#[test]
fn test_default_table() {
    let table = BuiltinTable::default();
    assert_eq!(table.len(), default_rules().len());
    for token in ["\"", "`", "[", "(", "$", "*", "+", "~", "#"] {
        let rule = table.get(token).expect("symbol built-in");
        assert!(rule.is_symbol(), "token {token}");
    }
    for token in ["digit", "num", "alpha", "word", "alnum", "eol"] {
        let rule = table.get(token).expect("keyword built-in");
        assert!(!rule.is_symbol(), "token {token}");
    }
    assert_eq!(table.get("num").map(|rule| rule.name()), Some("NUMBER"));
    assert!(table.get("ENTRY").is_none());
}

// Matches one ASCII hex digit.
struct HexRule;

impl MatchRule for HexRule {
    fn token(&self) -> &'static str {
        "hex"
    }

    fn name(&self) -> &'static str {
        "HEX"
    }

    fn is_symbol(&self) -> bool {
        false
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, _grammar: &mut Cursor) -> EvalResult {
        Ok(eval.input().eat_if(|b| b.is_ascii_hexdigit()).into())
    }
}

// Matches any single byte.
struct AnyRule;

impl MatchRule for AnyRule {
    fn token(&self) -> &'static str {
        "@"
    }

    fn name(&self) -> &'static str {
        "ANY"
    }

    fn is_symbol(&self) -> bool {
        true
    }

    fn try_match(&self, eval: &mut Evaluator<'_>, _grammar: &mut Cursor) -> EvalResult {
        Ok(match eval.input().advance() {
            Some(_) => Outcome::Match,
            None => Outcome::NoMatch,
        })
    }
}

fn extended_builtins() -> Arc<BuiltinTable> {
    let mut rules = default_rules();
    rules.push(Box::new(HexRule));
    rules.push(Box::new(AnyRule));
    Arc::new(BuiltinTable::new(rules))
}

#[test]
fn test_custom_keyword_builtin() {
    let mut session = Session::with_builtins(SessionConfig::default(), extended_builtins());
    session.load_str("ENTRY = \"0x\" + hex:digit");
    assert!(session.parse("0x1F"));
    let digits: Vec<String> = session
        .get("digit")
        .unwrap()
        .iter()
        .map(|span| span.to_string())
        .collect();
    assert_eq!(digits, ["1", "F"]);
    assert!(!session.parse("0xg"));
}

#[test]
fn test_custom_symbol_builtin() {
    let builtins = extended_builtins();
    assert!(builtins.symbols().contains(&b'@'));

    let mut session = Session::with_builtins(SessionConfig::default(), builtins);
    session.load_str("ENTRY = \"<\" @ @ \">\"");
    assert!(session.parse("<ab>"));
    assert!(session.parse("<\0\u{7f}>"));
    assert!(!session.parse("<a>"));
}

#[test]
fn test_sessions_share_builtins() {
    let builtins = extended_builtins();
    let mut first = Session::with_builtins(SessionConfig::default(), Arc::clone(&builtins));
    let mut second = Session::with_builtins(SessionConfig::default(), Arc::clone(&builtins));
    first.load_str("ENTRY = hex");
    second.load_str("ENTRY = @");
    assert!(first.parse("a"));
    assert!(second.parse("!"));
    assert_eq!(Arc::strong_count(&builtins), 3);
}
