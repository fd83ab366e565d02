use std::{
	fs::read_to_string,
	io::{self, BufRead, Write},
	path::Path,
};

use anyhow::Context;
use tracing::warn;

use crate::{
	StackerError,
	environment::{DEFAULT_STACK_SIZE, Environment},
	interpreter::Interpreter,
	parser::Parser,
	scanner::Scanner,
};

/// Stacker runs zstack programs against one long-lived environment.
#[derive(Debug)]
pub struct Stacker {
	interpreter: Interpreter,
}

impl Stacker {
	/// Create a Stacker printing to stdout.
	pub fn new(stack_size: usize) -> Self { Self { interpreter: Interpreter::new(Environment::new(stack_size)) } }

	/// Create a Stacker that renders `.` into `output`.
	pub fn with_output(stack_size: usize, output: impl Write + 'static) -> Self {
		Self { interpreter: Interpreter::new(Environment::with_output(stack_size, output)) }
	}

	/// Run a whole script file.
	pub fn run_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), StackerError> {
		let source = read_to_string(path).context("Failed open source file")?;
		self.run(&source)
	}

	/// Run the REPL prompt. Words and variables persist from line to line.
	pub fn run_prompt(&mut self) {
		let mut input = String::new();
		let mut stdin = io::stdin().lock();
		loop {
			input.clear();
			print!("repl> ");
			if let Err(e) = io::stdout().flush() {
				eprintln!("Failed flush: {e}");
			}
			match stdin.read_line(&mut input) {
				Ok(0) => {
					println!("\nExited zstack repl");
					break;
				}
				Ok(_) => {}
				Err(e) => {
					eprintln!("Failed read line: {e}");
					continue;
				}
			}
			if let Err(e) = self.run(input.trim()) {
				eprintln!("Failed run prompt: {e}");
			}
		}
	}

	/// Parse and run `source`. Output is flushed even when running fails.
	pub fn run(&mut self, source: &str) -> Result<(), StackerError> {
		let nodes = Parser::new(Scanner::new(source)).parse()?;
		let result = self.interpreter.interpret(&nodes);
		if let Err(e) = &result {
			warn!(error = %e, "statement aborted");
		}
		self.interpreter.environment_mut().flush_output().context("Failed flush output")?;
		Ok(result?)
	}

	pub fn environment(&self) -> &Environment { self.interpreter.environment() }
}

impl Default for Stacker {
	fn default() -> Self { Self::new(DEFAULT_STACK_SIZE) }
}
