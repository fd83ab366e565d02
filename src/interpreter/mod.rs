//! Tree-walking evaluator.
//!
//! The interpreter executes the forest produced by the parser node by node
//! against an [`Environment`]. Words are resolved by name every time they are
//! referenced, so a word may call one that is only defined later.
//!
//! # Node Types
//!
//! - **Literals**: numbers and strings are pushed onto the data stack
//! - **Words**: user definitions first, then builtins; unknown names do nothing
//! - **Variables**: `var name` installs a word pushing a reference to `name`
//! - **Conditionals**: `if ... else ... then` on the popped value
//! - **Loops**: `limit start for ... end`, the index lives on the return stack
//! - **Collections**: `[ ... ]` and `{ ... }` literals

pub mod builtin;
pub mod callable;
pub mod capability;
pub mod list;
pub mod pipe;
pub mod value;

use std::rc::Rc;

use callable::Word;
use list::List;
use tracing::trace;
use value::Value;

use crate::{
	environment::Environment,
	error::interpreter::InterpreterError,
	parser::{CollectionKind, Node},
};

/// Deepest nesting of user word calls. Calls recurse on the native stack, so
/// this stays well below what a 2 MiB thread can hold in a debug build. A
/// smaller return stack lowers the limit further.
pub const MAX_CALL_DEPTH: usize = 128;

/// Interpreter that evaluates parsed programs.
#[derive(Debug)]
pub struct Interpreter {
	environment: Environment,
	/// Nesting of user word calls in progress.
	depth:       usize,
}

impl Interpreter {
	pub fn new(environment: Environment) -> Self { Self { environment, depth: 0 } }

	pub fn environment(&self) -> &Environment { &self.environment }

	pub fn environment_mut(&mut self) -> &mut Environment { &mut self.environment }

	/// Execute top-level nodes in order, stopping at the first error. Words
	/// and variables committed before the error stay, loop bookkeeping does
	/// not.
	pub fn interpret(&mut self, nodes: &[Node]) -> Result<(), InterpreterError> {
		let result = self.execute_block(nodes);
		if result.is_err() {
			self.environment.returns.clear();
			self.depth = 0;
		}
		result
	}

	fn execute_block(&mut self, nodes: &[Node]) -> Result<(), InterpreterError> {
		nodes.iter().try_for_each(|node| self.execute(node))
	}

	fn execute(&mut self, node: &Node) -> Result<(), InterpreterError> {
		let data = &mut self.environment.data;
		match node {
			Node::WordDefinition { name, body } => {
				self.environment.define(name, body.clone());
				Ok(())
			}
			Node::WordReference(name) => self.call(name),
			Node::NumberLiteral(n) => data.push(Value::Number(*n)),
			Node::StringLiteral(s) => data.push(Value::String(s.clone())),
			Node::VariableDeclaration(name) => {
				self.environment.define(name, Rc::new(vec![Node::Reference(name.clone())]));
				self.environment.data.push(Value::Reference(name.clone()))
			}
			Node::Reference(name) => data.push(Value::Reference(name.clone())),
			Node::Conditional { then_body, else_body } => {
				let condition = data.pop().is_ok_and(|value| value.is_truthy());
				self.execute_block(if condition { then_body } else { else_body })
			}
			Node::Loop(body) => self.run_loop(body),
			Node::Collection { kind, body } => data.push(collection(*kind, body)),
		}
	}

	fn call(&mut self, name: &str) -> Result<(), InterpreterError> {
		let Some(word) = self.environment.lookup(name) else {
			trace!(name, "unknown word");
			return Ok(());
		};
		trace!(name, depth = self.depth, "call word");
		match word {
			Word::Native(builtin) => builtin(&mut self.environment),
			Word::User(body) => {
				if self.depth >= MAX_CALL_DEPTH.min(self.environment.returns.capacity()) {
					return Err(InterpreterError::StackError);
				}
				self.depth += 1;
				let result = self.execute_block(&body);
				self.depth -= 1;
				result
			}
		}
	}

	/// `limit start for ... end`. The limit sits on the return stack under the
	/// running index. A limit of `0` never stops the loop by itself.
	fn run_loop(&mut self, body: &[Node]) -> Result<(), InterpreterError> {
		let data = &mut self.environment.data;
		data.swap()?;
		let limit = data.pop()?;
		let start = data.pop()?;
		self.environment.returns.push(limit)?;
		self.environment.returns.push(start)?;
		loop {
			let index = self.environment.returns.pop()?;
			let (Value::Number(i), Value::Number(limit)) = (&index, self.environment.returns.peek()?) else { break };
			let i = *i;
			if !(i < *limit || *limit == 0.0) {
				break;
			}
			self.environment.returns.push(index)?;
			self.execute_block(body)?;
			self.environment.returns.drop()?;
			self.environment.returns.push(Value::Number(i + 1.0))?;
		}
		self.environment.returns.drop()
	}
}

/// Build the value of a collection literal. Word references other than `true`
/// and `false` are not evaluated here, each of them adds a [`Value::Nil`].
fn collection(kind: CollectionKind, body: &[Node]) -> Value {
	let elements = body.iter().map(|node| literal(node).unwrap_or(Value::Nil));
	match kind {
		CollectionKind::List => Value::List(elements.collect::<List>()),
		CollectionKind::Vector => Value::Vector(elements.collect()),
	}
}

fn literal(node: &Node) -> Option<Value> {
	match node {
		Node::NumberLiteral(n) => Some(Value::Number(*n)),
		Node::StringLiteral(s) => Some(Value::String(s.clone())),
		Node::WordReference(name) if name == "true" => Some(Value::Boolean(true)),
		Node::WordReference(name) if name == "false" => Some(Value::Boolean(false)),
		Node::Collection { kind, body } => Some(collection(*kind, body)),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use std::{
		cell::RefCell,
		io::{self, Write},
		rc::Rc,
	};

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::{parser::Parser, scanner::Scanner};

	#[derive(Clone, Default)]
	struct Output(Rc<RefCell<Vec<u8>>>);

	impl Write for Output {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> { self.0.borrow_mut().write(buf) }

		fn flush(&mut self) -> io::Result<()> { Ok(()) }
	}

	impl Output {
		fn text(&self) -> String { String::from_utf8_lossy(&self.0.borrow()).into_owned() }
	}

	fn interpreter(stack_size: usize) -> (Interpreter, Output) {
		let output = Output::default();
		(Interpreter::new(Environment::with_output(stack_size, output.clone())), output)
	}

	fn run(interpreter: &mut Interpreter, source: &str) -> Result<(), InterpreterError> {
		let nodes = Parser::new(Scanner::new(source)).parse().unwrap();
		interpreter.interpret(&nodes)
	}

	fn output_of(source: &str) -> String {
		let (mut interpreter, output) = interpreter(64);
		run(&mut interpreter, source).unwrap();
		output.text()
	}

	#[test]
	fn counted_loop() {
		assert_eq!(output_of("10 0 for I . end"), "0123456789");
		assert_eq!(output_of("3 3 for I . end"), "");
	}

	#[test]
	fn nested_loops_see_their_own_index() {
		assert_eq!(output_of("2 0 for 2 0 for I . end I . end"), "010011");
	}

	#[test]
	fn loop_leaves_return_stack_empty() {
		let (mut interpreter, _) = interpreter(64);
		run(&mut interpreter, "4 0 for end").unwrap();
		assert!(interpreter.environment().returns.is_empty());
	}

	#[test]
	fn unbounded_loop_ends_on_stack_error() {
		let (mut interpreter, output) = interpreter(64);
		let result = run(&mut interpreter, "0 0 for I dup . 9 = if . then end");
		assert!(matches!(result, Err(InterpreterError::StackError)));
		assert_eq!(output.text(), "0123456789");
		assert!(interpreter.environment().returns.is_empty());
	}

	#[test]
	fn non_numeric_bounds_stop_silently() {
		assert_eq!(output_of("\"a\" 0 for I . end 1 ."), "1");
	}

	#[test]
	fn conditionals() {
		assert_eq!(output_of("1 1 = if \"foo\" else \"bar\" then ."), "foo");
		assert_eq!(output_of("1 0 = if \"foo\" else \"bar\" then ."), "bar");
		assert_eq!(output_of("1 if \"one\" . then 2 if \"two\" . then"), "one");
		assert_eq!(output_of("if \"yes\" else \"no\" then ."), "no");
	}

	#[test]
	fn words_are_late_bound() {
		let (mut interpreter, output) = interpreter(64);
		run(&mut interpreter, ": greet name . ;").unwrap();
		run(&mut interpreter, ": name \"zstack\" ;").unwrap();
		run(&mut interpreter, "greet").unwrap();
		assert_eq!(output.text(), "zstack");
	}

	#[test]
	fn user_words_shadow_builtins() {
		assert_eq!(output_of(": dup \"shadowed\" ; 1 dup ."), "shadowed");
	}

	#[test]
	fn unknown_words_do_nothing() {
		assert_eq!(output_of("1 frobnicate ."), "1");
	}

	#[test]
	fn variables() {
		assert_eq!(output_of("var foo \"bar\" ! \"foo\" foo @ ."), "bar");
		assert_eq!(output_of("var x drop &x 5 ! x @ ."), "5");
		assert_eq!(output_of("&unset @ ."), "<nil>");
	}

	#[test]
	fn collection_literals() {
		assert_eq!(output_of("{ \"foo\" \"bar\" \"baz\" } 1 # ."), "bar");
		assert_eq!(output_of("[ 1 2 3 ] 0 # . 2 # ."), "13");
		assert_eq!(output_of("{ { 1 2 } true } 0 # 1 # . drop 1 # ."), "2true");
		assert_eq!(output_of("{ 1 dup 2 } len ."), "3");
		assert_eq!(output_of("{ 1 dup 2 } 1 # ."), "<nil>");
		assert_eq!(output_of("[ foo &bar ] 0 # . 1 # ."), "<nil><nil>");
	}

	#[test]
	fn runaway_recursion_is_a_stack_error() {
		let (mut interpreter, _) = interpreter(16);
		let result = run(&mut interpreter, ": forever forever ; forever");
		assert!(matches!(result, Err(InterpreterError::StackError)));
		run(&mut interpreter, ": once 1 ; once").unwrap();
		assert_eq!(interpreter.environment().data.values(), &[Value::Number(1.0)]);
	}

	#[test]
	fn recursion_depth_is_capped() {
		let (mut interpreter, output) = interpreter(crate::environment::DEFAULT_STACK_SIZE);
		let result = run(&mut interpreter, ": f 1 if f then ; f");
		assert!(matches!(result, Err(InterpreterError::StackError)));
		run(&mut interpreter, ": down dup 0 = if drop else 1 - down then ; 100 down \"done\" .").unwrap();
		assert_eq!(output.text(), "done");
	}

	#[test]
	fn errors_keep_committed_state() {
		let (mut interpreter, output) = interpreter(64);
		let result = run(&mut interpreter, "var x 1 ! : two 2 ; .");
		assert!(matches!(result, Err(InterpreterError::StackError)));
		run(&mut interpreter, "x @ . two .").unwrap();
		assert_eq!(output.text(), "12");
	}
}
