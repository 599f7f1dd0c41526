//! A line-based PEG grammar interpreter.
//!
//! A grammar is a set of `name = expression` rules. Expressions are read and
//! interpreted directly, no matcher code is generated:
//!
//! ```text
//! ENTRY  = pair * ( "," pair )
//! pair   = word:key "=" num:value
//! ```
//!
//! ```
//! use grammar_framework::Session;
//!
//! let mut session = Session::new();
//! session.load_str("ENTRY = pair * ( \",\" pair )\npair = word:key \"=\" num:value");
//! assert!(session.parse("a=1,b=22"));
//! let values: Vec<String> = session
//!     .get("value")
//!     .unwrap()
//!     .iter()
//!     .map(|span| span.to_string())
//!     .collect();
//! assert_eq!(values, ["1", "22"]);
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod loader;
pub mod rules;
pub mod session;
pub mod table;
pub mod traits;

pub use config::{SessionConfig, ENTRY_RULE};
pub use cursor_framework::{ByteSlice, Cursor};
pub use error::{GrammarError, LoadError, ParseError};
pub use evaluator::{Evaluator, RuleRef};
pub use grammar_common::Position;
pub use rules::default_rules;
pub use session::Session;
pub use table::{BuiltinTable, CaptureTable, RuleTable};
pub use traits::{EvalResult, MatchRule, Outcome};
