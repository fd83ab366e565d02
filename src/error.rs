pub mod interpreter;
pub mod parser;

/// StackerError is the top-level error type for the zstack interpreter.
#[derive(thiserror::Error, Debug)]
pub enum StackerError {
	/// Internal error, e.g. a script file that could not be read
	#[error("InternalError: {0:#}")]
	InternalError(#[from] anyhow::Error),
	/// The source is not properly nested
	#[error("Parse error: {0}")]
	ParseError(#[from] parser::ParseError),
	/// Runtime errors encountered during interpretation
	#[error("Runtime error: {0}")]
	RuntimeError(#[from] interpreter::InterpreterError),
}
