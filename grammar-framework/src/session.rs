use crate::config::SessionConfig;
use crate::error::{LoadError, ParseError};
use crate::evaluator::Evaluator;
use crate::loader::{self, GrammarLine};
use crate::table::{BuiltinTable, CaptureTable, RuleTable};
use cursor_framework::{ByteSlice, Cursor};
use grammar_common::Position;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

/// A grammar together with the state of its most recent parse.
///
/// Load a grammar with [`load_str`](Self::load_str) or
/// [`load_file`](Self::load_file), then call [`parse`](Self::parse) as many
/// times as needed. Each parse starts from the configured entry rule and
/// clears the captures and the error of the previous one.
///
/// A session is mutated in place while parsing and must not be shared
/// between threads without external synchronisation.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    builtins: Arc<BuiltinTable>,
    rules: RuleTable,
    captures: CaptureTable,
    input: Cursor,
    error: Option<ParseError>,
}

impl Session {
    /// Creates a session with the default configuration and built-ins.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_builtins(config, Arc::new(BuiltinTable::default()))
    }

    /// Creates a session sharing an existing built-in table.
    pub fn with_builtins(config: SessionConfig, builtins: Arc<BuiltinTable>) -> Self {
        Self {
            config,
            builtins,
            rules: RuleTable::new(),
            captures: CaptureTable::new(),
            input: Cursor::default(),
            error: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn builtins(&self) -> &BuiltinTable {
        &self.builtins
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Replaces the loaded rules with those read from the file at `path`.
    /// Returns the number of rule lines read. The previous rules are cleared
    /// even when the file cannot be read.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, LoadError> {
        let path = path.as_ref();
        self.rules.clear();
        let text = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loading grammar from {}", path.display());
        Ok(self.load_bytes(&text))
    }

    pub fn load_str(&mut self, text: &str) -> usize {
        self.load_bytes(text.as_bytes())
    }

    /// Replaces the loaded rules with those in `text`, one `name = expression`
    /// per line. Malformed lines are skipped with a warning. A later line
    /// overrides an earlier one with the same name. Returns the number of rule
    /// lines read.
    pub fn load_bytes(&mut self, text: &[u8]) -> usize {
        self.rules.clear();
        let mut count = 0;
        for (number, line) in loader::lines(text).enumerate() {
            match loader::parse_line(line) {
                GrammarLine::Blank => {}
                GrammarLine::Rule { name, expression } => {
                    self.insert_rule(name, expression);
                    count += 1;
                }
                GrammarLine::Malformed => {
                    log::warn!(
                        "rule missing on grammar line {}: '{}'",
                        number + 1,
                        String::from_utf8_lossy(line)
                    );
                }
            }
        }
        log::debug!("loaded {} grammar rules", self.rules.len());
        count
    }

    /// Adds or replaces a single rule.
    pub fn define(&mut self, name: &str, expression: &str) {
        self.insert_rule(name.to_string(), ByteSlice::from(expression));
    }

    fn insert_rule(&mut self, name: String, expression: ByteSlice) {
        if self.builtins.contains(&name) {
            log::warn!("rule '{}' is shadowed by the built-in of the same name", name);
        }
        self.rules.insert(name, &expression[..]);
    }

    /// Parses `input` from the entry rule. Returns true if the entry rule
    /// matched the whole input; otherwise the reason is available from
    /// [`error`](Self::error).
    pub fn parse<B: Into<Vec<u8>>>(&mut self, input: B) -> bool {
        self.try_parse(input).is_ok()
    }

    /// Like [`parse`](Self::parse), returning the reason for a failure.
    pub fn try_parse<B: Into<Vec<u8>>>(&mut self, input: B) -> Result<(), ParseError> {
        self.reset();
        let result = self.run(input.into());
        if let Err(err) = &result {
            if err.is_fatal() {
                log::error!("{}", err);
            } else {
                log::debug!("{}", err);
            }
            self.captures.clear();
            self.error = Some(err.clone());
        }
        result
    }

    fn run(&mut self, input: Vec<u8>) -> Result<(), ParseError> {
        let entry = self
            .rules
            .get(self.config.entry_rule())
            .ok_or_else(|| ParseError::NoEntryPoint {
                rule: self.config.entry_rule().to_string(),
            })?;
        self.input = Cursor::new(input);
        log::debug!(
            "parsing {} bytes from rule {}",
            self.input.len(),
            self.config.entry_rule()
        );

        let outcome = Evaluator::new(
            &self.builtins,
            &self.rules,
            &mut self.input,
            &mut self.captures,
        )
        .evaluate(Cursor::with_arc(entry))?;

        if !outcome.is_match() {
            return Err(ParseError::NoMatch {
                position: Position::locate(self.input.as_bytes(), self.input.furthest()),
            });
        }
        if !self.input.is_eof() {
            return Err(ParseError::TrailingInput {
                position: self.input.position(),
            });
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.captures.clear();
        self.error = None;
    }

    /// Returns the spans captured under `name` by the last successful parse,
    /// in match order.
    pub fn get(&self, name: &str) -> Option<&[ByteSlice]> {
        self.captures.get(name)
    }

    pub fn captures(&self) -> &CaptureTable {
        &self.captures
    }

    /// The input of the most recent parse that reached its entry rule.
    pub fn input(&self) -> &Cursor {
        &self.input
    }

    /// The reason the last parse failed.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Writes the last error, the offending line of the grammar expression
    /// or input, and a caret under the error position.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(err) = &self.error else {
            return Ok(());
        };
        match err.parameter() {
            Some(parameter) => writeln!(
                out,
                "error:{}: {} ({})",
                err.offset(),
                err.message(),
                parameter
            )?,
            None => writeln!(out, "error:{}: {}", err.offset(), err.message())?,
        }
        let buffer = match err {
            ParseError::NoEntryPoint { .. } => return Ok(()),
            ParseError::Grammar(grammar) => grammar.expression().as_bytes(),
            ParseError::NoMatch { .. } | ParseError::TrailingInput { .. } => {
                self.input.as_bytes()
            }
        };
        let (line, column) = line_at(buffer, err.offset());
        writeln!(out, "\t{}", String::from_utf8_lossy(line))?;
        writeln!(out, "\t{:width$}^", "", width = column)
    }

    /// Writes [`report`](Self::report) to standard error.
    pub fn print_error(&self) {
        // Nothing useful can be done if stderr is gone.
        let _ = self.report(&mut io::stderr().lock());
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the line of `buffer` containing `offset` and the column of
/// `offset` inside it.
fn line_at(buffer: &[u8], offset: usize) -> (&[u8], usize) {
    let offset = offset.min(buffer.len());
    let start = buffer[..offset]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    let end = buffer[offset..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(buffer.len(), |i| offset + i);
    (&buffer[start..end], offset - start)
}
