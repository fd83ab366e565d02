use std::{fmt, rc::Rc};

use crate::interpreter::value::Value;

type Link = Option<Rc<Cell>>;

struct Cell {
	value: Value,
	next:  Link,
}

/// A persistent singly linked list. Prepending shares the existing cells, so
/// cloning a list is cheap and never copies its elements.
#[derive(Clone, Default)]
pub struct List {
	head: Link,
	len:  usize,
}

impl List {
	pub fn new() -> Self { Self::default() }

	/// A new list with `value` in front of this one.
	pub fn prepend(&self, value: Value) -> Self {
		Self { head: Some(Rc::new(Cell { value, next: self.head.clone() })), len: self.len + 1 }
	}

	pub fn push_front(&mut self, value: Value) { *self = self.prepend(value); }

	pub fn len(&self) -> usize { self.len }

	pub fn is_empty(&self) -> bool { self.len == 0 }

	pub fn get(&self, index: usize) -> Option<&Value> { self.iter().nth(index) }

	pub fn iter(&self) -> Iter<'_> { Iter { next: self.head.as_deref() } }
}

pub struct Iter<'a> {
	next: Option<&'a Cell>,
}

impl<'a> Iterator for Iter<'a> {
	type Item = &'a Value;

	fn next(&mut self) -> Option<Self::Item> {
		self.next.map(|cell| {
			self.next = cell.next.as_deref();
			&cell.value
		})
	}
}

impl FromIterator<Value> for List {
	/// Keeps iteration order, the first value ends up at the head.
	fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
		let values: Vec<Value> = iter.into_iter().collect();
		values.into_iter().rev().fold(List::new(), |list, value| list.prepend(value))
	}
}

impl PartialEq for List {
	fn eq(&self, other: &Self) -> bool { self.len == other.len && self.iter().eq(other.iter()) }
}

impl fmt::Debug for List {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.debug_list().entries(self.iter()).finish() }
}

// Unlink cells one at a time, a long list would overflow the stack through
// recursive drops otherwise.
impl Drop for List {
	fn drop(&mut self) {
		let mut next = self.head.take();
		while let Some(cell) = next {
			match Rc::try_unwrap(cell) {
				Ok(mut cell) => next = cell.next.take(),
				Err(_) => break,
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn numbers(list: &List) -> Vec<f64> {
		list.iter()
			.map(|value| match value {
				Value::Number(n) => *n,
				_ => f64::NAN,
			})
			.collect()
	}

	#[test]
	fn collect_keeps_order() {
		let list: List = (1..=3).map(|n| Value::Number(n as f64)).collect();
		assert_eq!(list.len(), 3);
		assert_eq!(numbers(&list), vec![1.0, 2.0, 3.0]);
		assert_eq!(list.get(2), Some(&Value::Number(3.0)));
		assert_eq!(list.get(3), None);
	}

	#[test]
	fn prepend_shares_tail() {
		let tail: List = [Value::Number(2.0)].into_iter().collect();
		let list = tail.prepend(Value::Number(1.0));
		assert_eq!(numbers(&tail), vec![2.0]);
		assert_eq!(numbers(&list), vec![1.0, 2.0]);
		drop(tail);
		assert_eq!(numbers(&list), vec![1.0, 2.0]);
	}

	#[test]
	fn long_list_drops() {
		let list: List = (0..200_000).map(|n| Value::Number(n as f64)).collect();
		assert_eq!(list.len(), 200_000);
		drop(list);
	}
}
