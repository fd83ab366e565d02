//! The primitive words every environment starts with.
//!
//! Builtins take their operands from the data stack. A missing operand is a
//! stack error like any other, but operands of the wrong type are consumed
//! and nothing is pushed in their place.
//!
//! Words that touch the outside world push their results followed by a
//! status: `0` on success, or an error message and `1` on failure.

use std::{collections::HashMap, io};

use crate::{
	environment::Environment,
	error::interpreter::InterpreterError,
	interpreter::{pipe::Pipe, value::Value},
};

/// Largest buffer a single `recv` reads into.
pub const MAX_RECV: usize = 64 * 1024;

/// A primitive word
pub type Builtin = fn(&mut Environment) -> Result<(), InterpreterError>;

pub(crate) fn builtins() -> HashMap<&'static str, Builtin> {
	let table: &[(&'static str, Builtin)] = &[
		("+", |env| binary(env, Value::plus)),
		("-", |env| binary(env, Value::minus)),
		("*", |env| binary(env, Value::star)),
		("/", |env| binary(env, Value::slash)),
		("%", |env| binary(env, Value::percent)),
		("<", |env| binary(env, Value::less)),
		(">", |env| binary(env, Value::greater)),
		("=", |env| binary(env, Value::equal)),
		("dup", |env| env.data.dup()),
		("drop", |env| env.data.drop()),
		("swap", |env| env.data.swap()),
		("over", |env| env.data.over()),
		("rot", |env| env.data.rot()),
		(".", print),
		("LF", |env| env.data.push(Value::String("\n".to_string()))),
		("CR", |env| env.data.push(Value::String("\r".to_string()))),
		("true", |env| env.data.push(Value::Boolean(true))),
		("false", |env| env.data.push(Value::Boolean(false))),
		("!", store),
		("@", load),
		("I", loop_index),
		("#", index),
		("len", len),
		("insert", insert),
		("spread", spread),
		("blob", |env| env.data.push(Value::Blob(Vec::new()))),
		("open", |env| open_with(env, Pipe::open)),
		("create", |env| open_with(env, Pipe::create)),
		("dial", dial),
		("send", send),
		("recv", recv),
		("close", close),
	];
	table.iter().copied().collect()
}

/// Pop two operands and push `op(left, right)` when it has a result.
fn binary(env: &mut Environment, op: fn(&Value, &Value) -> Option<Value>) -> Result<(), InterpreterError> {
	let right = env.data.pop()?;
	let left = env.data.pop()?;
	match op(&left, &right) {
		Some(value) => env.data.push(value),
		None => {
			tracing::trace!(left = left.type_name(), right = right.type_name(), "operands ignored");
			Ok(())
		}
	}
}

/// `.`: render the top value to the output.
fn print(env: &mut Environment) -> Result<(), InterpreterError> {
	let value = env.data.pop()?;
	write!(env.output(), "{value}")?;
	Ok(())
}

/// `!`: `ref value --`
fn store(env: &mut Environment) -> Result<(), InterpreterError> {
	let value = env.data.pop()?;
	if let Value::Reference(name) = env.data.pop()? {
		env.store(name, value);
	}
	Ok(())
}

/// `@`: `ref -- value`
fn load(env: &mut Environment) -> Result<(), InterpreterError> {
	match env.data.pop()? {
		Value::Reference(name) => {
			let value = env.load(&name);
			env.data.push(value)
		}
		_ => Ok(()),
	}
}

/// `I`: the index of the innermost running loop.
fn loop_index(env: &mut Environment) -> Result<(), InterpreterError> {
	let index = env.returns.peek()?.clone();
	env.data.push(index)
}

/// `#`: `coll index -- coll element`
fn index(env: &mut Environment) -> Result<(), InterpreterError> {
	let index = env.data.pop()?;
	let element = match env.data.peek()?.as_indexable() {
		Some(collection) => collection.index(&index),
		None => return Ok(()),
	};
	env.data.push(element)
}

/// `len`: `coll -- coll n`
fn len(env: &mut Environment) -> Result<(), InterpreterError> {
	let size = match env.data.peek()?.as_sizeable() {
		Some(sizeable) => sizeable.size(),
		None => return Ok(()),
	};
	env.data.push(Value::Number(size as f64))
}

/// `insert`: `coll value -- coll`
fn insert(env: &mut Environment) -> Result<(), InterpreterError> {
	let value = env.data.pop()?;
	if let Some(collection) = env.data.peek_mut()?.as_insertable() {
		collection.insert(value);
	}
	Ok(())
}

/// `spread`: `coll -- coll e0 e1 ...`
fn spread(env: &mut Environment) -> Result<(), InterpreterError> {
	let elements: Vec<Value> = match env.data.peek()?.as_iterable() {
		Some(iterable) => iterable.elements().collect(),
		None => return Ok(()),
	};
	elements.into_iter().try_for_each(|element| env.data.push(element))
}

/// Push `values` then `0`, or the error message then `1`.
fn status(env: &mut Environment, result: io::Result<Vec<Value>>) -> Result<(), InterpreterError> {
	match result {
		Ok(values) => {
			for value in values {
				env.data.push(value)?;
			}
			env.data.push(Value::Number(0.0))
		}
		Err(error) => {
			tracing::debug!(%error, "pipe operation failed");
			env.data.push(Value::String(error.to_string()))?;
			env.data.push(Value::Number(1.0))
		}
	}
}

/// `open` / `create`: `path -- pipe 0`
fn open_with(env: &mut Environment, open: fn(&str) -> io::Result<Pipe>) -> Result<(), InterpreterError> {
	match env.data.pop()? {
		Value::String(path) => status(env, open(&path).map(|pipe| vec![Value::Pipe(pipe)])),
		_ => Ok(()),
	}
}

/// `dial`: `protocol address -- pipe 0`
fn dial(env: &mut Environment) -> Result<(), InterpreterError> {
	let address = env.data.pop()?;
	let protocol = env.data.pop()?;
	match (protocol, address) {
		(Value::String(protocol), Value::String(address)) => {
			status(env, Pipe::dial(&protocol, &address).map(|pipe| vec![Value::Pipe(pipe)]))
		}
		_ => Ok(()),
	}
}

/// The pipe on top of the stack, left in place.
fn peek_pipe(env: &Environment) -> Result<Option<Pipe>, InterpreterError> {
	Ok(match env.data.peek()? {
		Value::Pipe(pipe) => Some(pipe.clone()),
		_ => None,
	})
}

/// `send`: `pipe payload -- pipe count 0`
fn send(env: &mut Environment) -> Result<(), InterpreterError> {
	let payload = env.data.pop()?;
	let Some(pipe) = peek_pipe(env)? else { return Ok(()) };
	let bytes = match payload {
		Value::String(s) => s.into_bytes(),
		Value::Blob(blob) => blob,
		_ => Vec::new(),
	};
	status(env, pipe.write(&bytes).map(|count| vec![Value::Number(count as f64)]))
}

/// `recv`: `pipe n -- pipe blob count 0`, reads at most `n` bytes and never
/// more than [`MAX_RECV`].
fn recv(env: &mut Environment) -> Result<(), InterpreterError> {
	let Value::Number(limit) = env.data.pop()? else { return Ok(()) };
	let Some(pipe) = peek_pipe(env)? else { return Ok(()) };
	let mut buffer = vec![0; limit.clamp(0.0, MAX_RECV as f64) as usize];
	let result = pipe.read(&mut buffer).map(|count| {
		buffer.truncate(count);
		vec![Value::Blob(buffer), Value::Number(count as f64)]
	});
	status(env, result)
}

/// `close`: `pipe -- 0`
fn close(env: &mut Environment) -> Result<(), InterpreterError> {
	let Some(pipe) = peek_pipe(env)? else { return Ok(()) };
	env.data.drop()?;
	status(env, pipe.close().map(|()| Vec::new()))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn call(env: &mut Environment, name: &str) -> Result<(), InterpreterError> { builtins()[name](env) }

	fn with_stack(values: Vec<Value>) -> Environment {
		let mut env = Environment::with_output(16, io::sink());
		for value in values {
			env.data.push(value).unwrap();
		}
		env
	}

	#[test]
	fn mismatched_operands_are_consumed() {
		let mut env = with_stack(vec![Value::Number(1.0), Value::String("a".into())]);
		call(&mut env, "+").unwrap();
		assert!(env.data.is_empty());

		let mut env = with_stack(vec![Value::String("a".into()), Value::Number(1.0)]);
		call(&mut env, "<").unwrap();
		assert!(env.data.is_empty());
	}

	#[test]
	fn missing_operand_is_a_stack_error() {
		let mut env = with_stack(vec![Value::Number(1.0)]);
		assert!(matches!(call(&mut env, "+"), Err(InterpreterError::StackError)));
		assert!(matches!(call(&mut env, "I"), Err(InterpreterError::StackError)));
	}

	#[test]
	fn store_and_load() {
		let mut env = with_stack(vec![Value::Reference("x".into()), Value::Number(4.0)]);
		call(&mut env, "!").unwrap();
		env.data.push(Value::Reference("x".into())).unwrap();
		call(&mut env, "@").unwrap();
		env.data.push(Value::Reference("y".into())).unwrap();
		call(&mut env, "@").unwrap();
		assert_eq!(env.data.values(), &[Value::Number(4.0), Value::Nil]);
	}

	#[test]
	fn store_needs_a_reference() {
		let mut env = with_stack(vec![Value::String("x".into()), Value::Number(4.0)]);
		call(&mut env, "!").unwrap();
		assert!(env.data.is_empty());
		assert_eq!(env.load("x"), Value::Nil);
	}

	#[test]
	fn collection_words_keep_the_collection() {
		let vector = Value::Vector(vec![Value::Number(7.0), Value::Number(8.0)]);
		let mut env = with_stack(vec![vector.clone()]);
		call(&mut env, "len").unwrap();
		assert_eq!(env.data.values(), &[vector.clone(), Value::Number(2.0)]);

		let mut env = with_stack(vec![vector.clone()]);
		call(&mut env, "spread").unwrap();
		assert_eq!(env.data.values(), &[vector, Value::Number(7.0), Value::Number(8.0)]);
	}

	#[test]
	fn index_on_non_collection_is_a_no_op() {
		let mut env = with_stack(vec![Value::Number(7.0), Value::Number(0.0)]);
		call(&mut env, "#").unwrap();
		assert_eq!(env.data.values(), &[Value::Number(7.0)]);
	}

	#[test]
	fn open_missing_file_reports_status() {
		let mut env = with_stack(vec![Value::String("/definitely/not/here.zs".into())]);
		call(&mut env, "open").unwrap();
		assert_eq!(env.data.len(), 2);
		assert_eq!(env.data.pop().unwrap(), Value::Number(1.0));
		assert!(matches!(env.data.pop().unwrap(), Value::String(message) if !message.is_empty()));
	}

	#[test]
	fn pipe_words_ignore_non_pipes() {
		let mut env = with_stack(vec![Value::Number(1.0), Value::String("payload".into())]);
		call(&mut env, "send").unwrap();
		assert_eq!(env.data.values(), &[Value::Number(1.0)]);
		call(&mut env, "close").unwrap();
		assert_eq!(env.data.values(), &[Value::Number(1.0)]);
	}
}
