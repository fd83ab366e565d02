//! # How zstack source turns into stack effects
//!
//! User's source code: `: square dup * ; 10 0 for I square . end`

//! ## Scanning
//!
//! The scanner splits the text on whitespace into tokens. `:` `;` `[` `]` `{`
//! `}` are punctuation, `var` `if` `else` `then` `for` `end` are keywords,
//! numbers and strings are literals, and everything else is a word.
//!
//! Tokens are produced lazily, the parser pulls them one at a time.

//! ## Parsing
//!
//! There are no precedence rules in a postfix language, the only structure is
//! nesting. The parser keeps a stack of open scopes, every token either lands
//! in the innermost scope, opens a new one, or closes it.
//!
//! ``` markdown
//! forest
//! ├── : square (WordDefinition)
//! │   ├── dup (WordReference)
//! │   └── * (WordReference)
//! ├── 10 (NumberLiteral)
//! ├── 0 (NumberLiteral)
//! └── for (Loop)
//!     ├── I (WordReference)
//!     ├── square (WordReference)
//!     └── . (WordReference)
//! ```
//!
//! A closing token that does not match the innermost scope, or a scope still
//! open at the end of input, is a parse error.

//! ## Evaluation
//!
//! A tree-walk: each node runs against the environment right after parsing.
//! Literals push onto the data stack, words pop their operands and push their
//! results. Loops keep their limit and index on a second stack, the return
//! stack, so they nest freely.
//!
//! Word names are resolved at call time, user words before builtins. Popping
//! an empty stack or pushing a full one aborts the statement with a stack
//! error, every other mismatch is silently ignored.

pub mod cli;
mod environment;
mod error;
mod interpreter;
mod parser;
mod scanner;
mod stacker;
mod utils;

pub use environment::{DEFAULT_STACK_SIZE, Environment, Stack};
pub use error::{
	StackerError,
	interpreter::InterpreterError,
	parser::{ParseError, ParseErrorType},
};
pub use interpreter::{Interpreter, builtin::Builtin, callable::Word, list::List, pipe::{Channel, Pipe}, value::Value};
pub use parser::{CollectionKind, Node, Parser, ScopeKind};
pub use scanner::{Scanner, Token, TokenType};
pub use stacker::Stacker;
