mod stack;

use std::{
	collections::HashMap,
	fmt,
	io::{self, Write},
	rc::Rc,
};

pub use stack::Stack;
use tracing::debug;

use crate::{
	interpreter::{
		builtin::{self, Builtin},
		callable::Word,
		value::Value,
	},
	parser::Node,
};

/// Default capacity of both the data stack and the return stack.
pub const DEFAULT_STACK_SIZE: usize = 1024;

/// Everything a running program can observe or change. Words and variables
/// outlive a single call to the interpreter, so a REPL can define things on
/// one line and use them on the next.
pub struct Environment {
	/// The operand stack.
	pub data:      Stack,
	/// Loop bookkeeping, the innermost loop index is on top.
	pub returns:   Stack,
	/// User words, later definitions replace earlier ones.
	words:         HashMap<String, Rc<Vec<Node>>>,
	variables:     HashMap<String, Value>,
	builtins:      HashMap<&'static str, Builtin>,
	/// Where `.` renders to.
	output:        Box<dyn Write>,
}

impl Environment {
	pub fn new(stack_size: usize) -> Self { Self::with_output(stack_size, io::stdout()) }

	pub fn with_output(stack_size: usize, output: impl Write + 'static) -> Self {
		Self {
			data:      Stack::new(stack_size),
			returns:   Stack::new(stack_size),
			words:     HashMap::new(),
			variables: HashMap::new(),
			builtins:  builtin::builtins(),
			output:    Box::new(output),
		}
	}

	/// Define or redefine a user word. A user word shadows a builtin of the
	/// same name.
	pub fn define(&mut self, name: &str, body: Rc<Vec<Node>>) {
		debug!(name, len = body.len(), "define word");
		self.words.insert(name.to_string(), body);
	}

	/// Resolve a word by name, user words first.
	pub fn lookup(&self, name: &str) -> Option<Word> {
		self.words
			.get(name)
			.map(|body| Word::User(body.clone()))
			.or_else(|| self.builtins.get(name).map(|builtin| Word::Native(*builtin)))
	}

	pub fn store(&mut self, name: String, value: Value) { self.variables.insert(name, value); }

	/// The value stored under `name`, [`Value::Nil`] if nothing was stored.
	pub fn load(&self, name: &str) -> Value { self.variables.get(name).cloned().unwrap_or(Value::Nil) }

	pub fn output(&mut self) -> &mut dyn Write { &mut self.output }

	pub fn flush_output(&mut self) -> io::Result<()> { self.output.flush() }
}

impl fmt::Debug for Environment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Environment")
			.field("data", &self.data)
			.field("returns", &self.returns)
			.field("words", &self.words.keys().collect::<Vec<_>>())
			.field("variables", &self.variables)
			.finish_non_exhaustive()
	}
}

impl Default for Environment {
	fn default() -> Self { Self::new(DEFAULT_STACK_SIZE) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn user_words_shadow_builtins() {
		let mut environment = Environment::default();
		assert!(matches!(environment.lookup("dup"), Some(Word::Native(_))));
		environment.define("dup", Rc::new(vec![Node::NumberLiteral(1.0)]));
		assert!(matches!(environment.lookup("dup"), Some(Word::User(_))));
		assert!(environment.lookup("nope").is_none());
	}

	#[test]
	fn variables_default_to_nil() {
		let mut environment = Environment::default();
		assert_eq!(environment.load("x"), Value::Nil);
		environment.store("x".to_string(), Value::Number(2.0));
		assert_eq!(environment.load("x"), Value::Number(2.0));
	}
}
