//! grammar-match 示例
//! 从文件加载语法，对输入进行匹配，并打印捕获的内容
//!
//! ```text
//! grammar-match grammars/key_value.peg --text "port = 80; host = 'local'"
//! echo "1,two,3" | grammar-match grammars/csv.peg --capture field
//! ```
//!
//! Exit status is 0 when the input matches, 1 when it does not and 2 when
//! the grammar or the input could not be used.

use anyhow::{Context, Result};
use clap::Parser;
use grammar_framework::{ParseError, Session, SessionConfig, ENTRY_RULE};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "grammar-match", version)]
#[command(about = "Match an input against a line-based PEG grammar")]
struct Args {
    /// Path to the grammar file
    grammar: PathBuf,

    /// Read the input from a file instead of stdin
    #[arg(short, long, conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Use the given string as the input
    #[arg(short, long)]
    text: Option<String>,

    /// Rule to start matching from
    #[arg(short, long, default_value = ENTRY_RULE)]
    entry: String,

    /// Only print captures with this name; may be repeated
    #[arg(short, long = "capture", value_name = "NAME")]
    captures: Vec<String>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn run(args: &Args) -> Result<ExitCode> {
    let config = SessionConfig::new().with_entry_rule(args.entry.as_str());
    let mut session = Session::with_config(config);
    let count = session.load_file(&args.grammar)?;
    log::info!("loaded {} rules from {}", count, args.grammar.display());

    let input = read_input(args)?;
    if !session.parse(input) {
        session.print_error();
        let fatal = session.error().is_some_and(ParseError::is_fatal);
        return Ok(ExitCode::from(if fatal { 2 } else { 1 }));
    }

    print_captures(&session, &args.captures).context("failed to write captures")?;
    Ok(ExitCode::SUCCESS)
}

fn read_input(args: &Args) -> Result<Vec<u8>> {
    if let Some(text) = &args.text {
        return Ok(text.clone().into_bytes());
    }
    if let Some(path) = &args.input {
        return std::fs::read(path)
            .with_context(|| format!("failed to read input file {}", path.display()));
    }
    let mut input = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut input)
        .context("failed to read input from stdin")?;
    Ok(input)
}

/// Prints one `name<TAB>text` line per captured span, names in sorted order
/// and spans in match order.
fn print_captures(session: &Session, only: &[String]) -> io::Result<()> {
    let mut captures: Vec<_> = session
        .captures()
        .iter()
        .filter(|(name, _)| only.is_empty() || only.iter().any(|o| o.as_str() == *name))
        .collect();
    captures.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = io::stdout().lock();
    for (name, spans) in captures {
        for span in spans {
            writeln!(out, "{}\t{}", name, span)?;
        }
    }
    Ok(())
}
