//! Named captures: ordering, rollback on failed alternatives and reset
//! between parses.

use grammar_framework::Session;

fn session(grammar: &str) -> Session {
    let mut session = Session::new();
    session.load_str(grammar);
    session
}

fn captured(session: &Session, name: &str) -> Vec<String> {
    session
        .get(name)
        .map(|spans| spans.iter().map(|span| span.to_string()).collect())
        .unwrap_or_default()
}

#[test]
fn test_captures_in_match_order() {
    let mut session = session("ENTRY = num:n \" \" num:n");
    assert!(session.parse("12 34"));
    assert_eq!(captured(&session, "n"), ["12", "34"]);
}

#[test]
fn test_captures_inside_repetition() {
    let mut session = session("ENTRY = + item\nitem = num:n $");
    assert!(session.parse("1 22 333"));
    assert_eq!(captured(&session, "n"), ["1", "22", "333"]);

    let mut session = self::session("ENTRY = * digit:d");
    assert!(session.parse("123"));
    assert_eq!(captured(&session, "d"), ["1", "2", "3"]);
}

#[test]
fn test_capture_of_user_rule_spans_whole_match() {
    let mut session = session("ENTRY = pair:p\npair = word \"=\" num:v");
    assert!(session.parse("abc=42"));
    assert_eq!(captured(&session, "p"), ["abc=42"]);
    assert_eq!(captured(&session, "v"), ["42"]);
}

#[test]
fn test_group_captured_through_user_rule() {
    let mut session = session("ENTRY = key:key [ num:value ]\nkey = ( word \":\" )");
    assert!(session.parse("port:80"));
    assert_eq!(captured(&session, "key"), ["port:"]);
    assert_eq!(captured(&session, "value"), ["80"]);

    assert!(session.parse("port:"));
    assert!(session.get("value").is_none());
}

#[test]
fn test_several_names() {
    let mut session = session("ENTRY = word:key $ \"=\" $ num:value");
    assert!(session.parse("width = 80"));
    assert_eq!(captured(&session, "key"), ["width"]);
    assert_eq!(captured(&session, "value"), ["80"]);
    assert_eq!(session.captures().len(), 2);

    let mut names: Vec<&str> = session.captures().iter().map(|(name, _)| name).collect();
    names.sort();
    assert_eq!(names, ["key", "value"]);
}

#[test]
fn test_failed_alternative_drops_its_captures() {
    let mut session = session("ENTRY = num:n \"x\" | num:n \"y\"");
    assert!(session.parse("5y"));
    assert_eq!(captured(&session, "n"), ["5"]);
}

#[test]
fn test_failed_optional_drops_its_captures() {
    let mut session = session("ENTRY = [ num:n \"x\" ] num:m");
    assert!(session.parse("12"));
    assert!(session.get("n").is_none());
    assert_eq!(captured(&session, "m"), ["12"]);
}

#[test]
fn test_failed_repetition_step_drops_its_captures() {
    let mut session = session("ENTRY = * pair word:tail\npair = word:k \"=\"");
    assert!(session.parse("a=b=c"));
    assert_eq!(captured(&session, "k"), ["a", "b"]);
    assert_eq!(captured(&session, "tail"), ["c"]);
}

#[test]
fn test_failed_step_is_not_captured() {
    let mut session = session("ENTRY = [ num:n ] word:w");
    assert!(session.parse("abc"));
    assert!(session.get("n").is_none());
    assert_eq!(captured(&session, "w"), ["abc"]);
}

#[test]
fn test_parse_resets_captures() {
    let mut session = session("ENTRY = num:n | word:w");
    assert!(session.parse("12"));
    assert_eq!(captured(&session, "n"), ["12"]);

    assert!(session.parse("ab"));
    assert!(session.get("n").is_none());
    assert_eq!(captured(&session, "w"), ["ab"]);
}

#[test]
fn test_failed_parse_leaves_no_captures() {
    let mut session = session("ENTRY = num:n \";\"");
    assert!(!session.parse("12"));
    assert!(session.captures().is_empty());

    assert!(!session.parse("12;;"));
    assert!(session.captures().is_empty());
}

#[test]
fn test_capture_spans_point_into_input() {
    let mut session = session("ENTRY = word $ num:n");
    assert!(session.parse("id 7"));
    let span = &session.get("n").unwrap()[0];
    assert_eq!(span.start(), 3);
    assert_eq!(span.end(), 4);
    assert_eq!(span.as_str(), Some("7"));
}

#[test]
fn test_binary_capture() {
    let mut session = session("ENTRY = high:high\nhigh = #128-255");
    assert!(session.parse(vec![0xffu8]));
    let span = &session.get("high").unwrap()[0];
    assert_eq!(&span[..], &[0xffu8][..]);
    assert_eq!(span.as_str(), None);
}
