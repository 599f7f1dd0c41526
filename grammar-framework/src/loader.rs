//! Line-based grammar text: one `name = expression` rule per line.

use cursor_framework::{ByteSlice, Cursor};

/// What a single grammar line holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarLine {
    /// Empty or whitespace only.
    Blank,
    /// `name = expression`. The expression is everything after the `=`.
    Rule { name: String, expression: ByteSlice },
    /// Anything else.
    Malformed,
}

/// Reads one line, without its line terminator.
pub fn parse_line(line: &[u8]) -> GrammarLine {
    let mut cursor = Cursor::new(line);
    cursor.skip_whitespace();
    if cursor.is_eof() {
        return GrammarLine::Blank;
    }
    let mark = cursor.mark();
    if !cursor.eat_identifier() {
        return GrammarLine::Malformed;
    }
    let name = cursor.extract(mark).to_string();
    cursor.skip_whitespace();
    if !cursor.eat(b'=') {
        return GrammarLine::Malformed;
    }
    GrammarLine::Rule {
        name,
        expression: cursor.eat_to_end(),
    }
}

/// Splits grammar text into lines, dropping `\n` and `\r\n` terminators.
pub fn lines(text: &[u8]) -> impl Iterator<Item = &[u8]> {
    text.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_line() {
        let line = parse_line(b"  number = + digit");
        assert_eq!(
            line,
            GrammarLine::Rule {
                name: "number".to_string(),
                expression: ByteSlice::from(" + digit"),
            }
        );
    }

    #[test]
    fn test_rule_line_without_spaces() {
        let GrammarLine::Rule { name, expression } = parse_line(b"A=\"a\"|\"b\"") else {
            panic!("expected a rule");
        };
        assert_eq!(name, "A");
        assert_eq!(expression, "\"a\"|\"b\"");
    }

    #[test]
    fn test_expression_keeps_equals_signs() {
        let GrammarLine::Rule { expression, .. } = parse_line(b"eq = \"=\" ~61") else {
            panic!("expected a rule");
        };
        assert_eq!(expression, " \"=\" ~61");
    }

    #[test]
    fn test_blank_lines() {
        assert_eq!(parse_line(b""), GrammarLine::Blank);
        assert_eq!(parse_line(b" \t "), GrammarLine::Blank);
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(parse_line(b"= \"a\""), GrammarLine::Malformed);
        assert_eq!(parse_line(b"name \"a\""), GrammarLine::Malformed);
        assert_eq!(parse_line(b"1abc = \"a\""), GrammarLine::Malformed);
    }

    #[test]
    fn test_lines_strip_terminators() {
        let split: Vec<&[u8]> = lines(b"a = b\r\nc = d\n").collect();
        assert_eq!(split, vec![&b"a = b"[..], &b"c = d"[..], &b""[..]]);
    }
}
