use crate::{error::interpreter::InterpreterError, interpreter::value::Value};

/// A fixed capacity LIFO stack of values. Every access past the bottom or
/// beyond the capacity is a [`InterpreterError::StackError`].
#[derive(Debug)]
pub struct Stack {
	values:   Vec<Value>,
	capacity: usize,
}

impl Stack {
	pub fn new(capacity: usize) -> Self { Self { values: Vec::with_capacity(capacity.min(1024)), capacity } }

	pub fn push(&mut self, value: Value) -> Result<(), InterpreterError> {
		if self.values.len() >= self.capacity {
			return Err(InterpreterError::StackError);
		}
		self.values.push(value);
		Ok(())
	}

	pub fn pop(&mut self) -> Result<Value, InterpreterError> { self.values.pop().ok_or(InterpreterError::StackError) }

	pub fn peek(&self) -> Result<&Value, InterpreterError> { self.values.last().ok_or(InterpreterError::StackError) }

	pub fn peek_mut(&mut self) -> Result<&mut Value, InterpreterError> {
		self.values.last_mut().ok_or(InterpreterError::StackError)
	}

	/// `a -- a a`
	pub fn dup(&mut self) -> Result<(), InterpreterError> {
		let top = self.peek()?.clone();
		self.push(top)
	}

	/// `a --`
	pub fn drop(&mut self) -> Result<(), InterpreterError> { self.pop().map(|_| ()) }

	/// `a b -- b a`
	pub fn swap(&mut self) -> Result<(), InterpreterError> {
		let len = self.depth_at_least(2)?;
		self.values.swap(len - 1, len - 2);
		Ok(())
	}

	/// `a b -- a b a`
	pub fn over(&mut self) -> Result<(), InterpreterError> {
		let len = self.depth_at_least(2)?;
		let second = self.values[len - 2].clone();
		self.push(second)
	}

	/// `a b c -- b c a`
	pub fn rot(&mut self) -> Result<(), InterpreterError> {
		let len = self.depth_at_least(3)?;
		self.values[len - 3..].rotate_left(1);
		Ok(())
	}

	pub fn len(&self) -> usize { self.values.len() }

	pub fn is_empty(&self) -> bool { self.values.is_empty() }

	pub fn capacity(&self) -> usize { self.capacity }

	pub fn clear(&mut self) { self.values.clear() }

	/// Values from the bottom of the stack to the top.
	pub fn values(&self) -> &[Value] { &self.values }

	fn depth_at_least(&self, depth: usize) -> Result<usize, InterpreterError> {
		let len = self.values.len();
		if len < depth { Err(InterpreterError::StackError) } else { Ok(len) }
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn numbers(stack: &Stack) -> Vec<f64> {
		stack
			.values()
			.iter()
			.map(|value| match value {
				Value::Number(n) => *n,
				_ => f64::NAN,
			})
			.collect()
	}

	fn stack_of(values: &[f64]) -> Stack {
		let mut stack = Stack::new(8);
		for value in values {
			stack.push(Value::Number(*value)).unwrap();
		}
		stack
	}

	#[test]
	fn shuffles() {
		let mut stack = stack_of(&[1.0, 2.0, 3.0]);
		stack.rot().unwrap();
		assert_eq!(numbers(&stack), vec![2.0, 3.0, 1.0]);
		stack.swap().unwrap();
		assert_eq!(numbers(&stack), vec![2.0, 1.0, 3.0]);
		stack.over().unwrap();
		assert_eq!(numbers(&stack), vec![2.0, 1.0, 3.0, 1.0]);
		stack.dup().unwrap();
		stack.drop().unwrap();
		stack.drop().unwrap();
		assert_eq!(numbers(&stack), vec![2.0, 1.0, 3.0]);
	}

	#[test]
	fn underflow() {
		let mut stack = stack_of(&[1.0]);
		assert!(matches!(stack.swap(), Err(InterpreterError::StackError)));
		assert!(matches!(stack.rot(), Err(InterpreterError::StackError)));
		stack.drop().unwrap();
		assert!(matches!(stack.pop(), Err(InterpreterError::StackError)));
		assert!(matches!(stack.peek(), Err(InterpreterError::StackError)));
		assert!(matches!(stack.dup(), Err(InterpreterError::StackError)));
	}

	#[test]
	fn overflow() {
		let mut stack = Stack::new(2);
		stack.push(Value::Nil).unwrap();
		stack.push(Value::Nil).unwrap();
		assert!(matches!(stack.push(Value::Nil), Err(InterpreterError::StackError)));
		assert!(matches!(stack.dup(), Err(InterpreterError::StackError)));
		assert_eq!(stack.len(), 2);
	}
}
