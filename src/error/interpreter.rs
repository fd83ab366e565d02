#[derive(thiserror::Error, Debug)]
/// Errors that can occur during interpretation
pub enum InterpreterError {
	/// Popping or peeking past the bottom of a stack, pushing past its
	/// capacity, or nesting word calls deeper than the return stack allows.
	#[error("stack under/overflow")]
	StackError,
	/// Rendering with `.` failed to write to the output sink.
	#[error("Failed write output: {0}")]
	Output(#[from] std::io::Error),
}
