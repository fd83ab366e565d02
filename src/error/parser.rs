use crate::parser::ScopeKind;

/// A structure error with the source offset of the token that caused it.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("offset {offset}: {type}")]
pub struct ParseError {
	offset: usize,
	r#type: ParseErrorType,
}

impl ParseError {
	pub fn new(offset: usize, r#type: ParseErrorType) -> Self { Self { offset, r#type } }

	pub fn offset(&self) -> usize { self.offset }

	pub fn error_type(&self) -> &ParseErrorType { &self.r#type }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
	/// `:` or `var` not followed by a word.
	ExpectedName(&'static str),
	/// A closing token with no scope open.
	UnexpectedClose(String),
	/// A closing token that does not match the innermost open scope.
	MismatchedClose { close: String, open: ScopeKind },
	ElseOutsideIf,
	/// Input ended while a scope was still open.
	UnclosedScope(ScopeKind),
}

impl std::fmt::Display for ParseErrorType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		use ParseErrorType::*;
		match self {
			ExpectedName(after) => {
				write!(f, "expected name after `{after}`")
			}
			UnexpectedClose(close) => {
				write!(f, "unexpected `{close}` with no open scope")
			}
			MismatchedClose { close, open } => {
				write!(f, "unexpected `{close}` inside {open}")
			}
			ElseOutsideIf => {
				write!(f, "expecting `else` to be inside `if`")
			}
			UnclosedScope(open) => {
				write!(f, "unclosed {open} at end of input")
			}
		}
	}
}
