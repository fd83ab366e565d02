//! Behaviour shared by some, but not all, value variants.
//!
//! Builtins like `len`, `#`, `insert` and `spread` ask a value for the
//! capability they need and silently do nothing when it is missing.

use crate::interpreter::{list::List, value::Value};

/// Has a length
pub trait Sizeable {
	fn size(&self) -> usize;
}

/// Supports `#` with a number index or a two number `{ start end }` range
pub trait Indexable {
	/// Element at `index`, a slice when `index` is a range, [`Value::Nil`] when
	/// out of range or not an index at all.
	fn index(&self, index: &Value) -> Value;
}

/// Accepts new elements
pub trait Insertable {
	fn insert(&mut self, value: Value);
}

/// Produces each element in order
pub trait Iterable {
	fn elements(&self) -> Box<dyn Iterator<Item = Value> + '_>;
}

impl Value {
	pub fn as_sizeable(&self) -> Option<&dyn Sizeable> {
		match self {
			Value::String(s) => Some(s),
			Value::Blob(blob) => Some(blob),
			Value::List(list) => Some(list),
			Value::Vector(vector) => Some(vector),
			_ => None,
		}
	}

	pub fn as_indexable(&self) -> Option<&dyn Indexable> {
		match self {
			Value::Blob(blob) => Some(blob),
			Value::List(list) => Some(list),
			Value::Vector(vector) => Some(vector),
			_ => None,
		}
	}

	pub fn as_insertable(&mut self) -> Option<&mut dyn Insertable> {
		match self {
			Value::Blob(blob) => Some(blob),
			Value::List(list) => Some(list),
			Value::Vector(vector) => Some(vector),
			_ => None,
		}
	}

	pub fn as_iterable(&self) -> Option<&dyn Iterable> {
		match self {
			Value::Blob(blob) => Some(blob),
			Value::List(list) => Some(list),
			Value::Vector(vector) => Some(vector),
			_ => None,
		}
	}
}

enum Index {
	At(usize),
	Range(usize, usize),
}

impl Index {
	fn from_value(value: &Value) -> Option<Self> {
		match value {
			Value::Number(n) => position(*n).map(Index::At),
			Value::Vector(range) => range_of(range.iter()),
			Value::List(range) => range_of(range.iter()),
			_ => None,
		}
	}
}

/// Indexes truncate toward zero, negative ones never match.
fn position(n: f64) -> Option<usize> { (n >= 0.0).then(|| n as usize) }

fn range_of<'a>(mut values: impl Iterator<Item = &'a Value>) -> Option<Index> {
	match (values.next()?, values.next()?) {
		(Value::Number(start), Value::Number(end)) => Some(Index::Range(position(*start)?, position(*end)?)),
		_ => None,
	}
}

/// Resolve `index` against a sequence of `len` elements, `get` fetches one and
/// `slice` builds a sub-sequence from a valid range.
fn lookup(
	index: &Value,
	len: usize,
	get: impl FnOnce(usize) -> Option<Value>,
	slice: impl FnOnce(usize, usize) -> Value,
) -> Value {
	let value = match Index::from_value(index) {
		Some(Index::At(at)) => get(at),
		Some(Index::Range(start, end)) if start <= end && end <= len => Some(slice(start, end)),
		_ => None,
	};
	value.unwrap_or(Value::Nil)
}

impl Sizeable for String {
	fn size(&self) -> usize { self.len() }
}

impl Sizeable for Vec<u8> {
	fn size(&self) -> usize { self.len() }
}

impl Indexable for Vec<u8> {
	fn index(&self, index: &Value) -> Value {
		lookup(index, self.len(), |at| self.get(at).copied().map(Value::Byte), |start, end| {
			Value::Blob(self[start..end].to_vec())
		})
	}
}

/// Bytes, or numbers that fit in a byte. Anything else is dropped.
impl Insertable for Vec<u8> {
	fn insert(&mut self, value: Value) {
		match value {
			Value::Byte(b) => self.push(b),
			Value::Number(n) if n.fract() == 0.0 && (0.0..=255.0).contains(&n) => self.push(n as u8),
			_ => {}
		}
	}
}

impl Iterable for Vec<u8> {
	fn elements(&self) -> Box<dyn Iterator<Item = Value> + '_> { Box::new(self.iter().copied().map(Value::Byte)) }
}

impl Sizeable for List {
	fn size(&self) -> usize { self.len() }
}

impl Indexable for List {
	fn index(&self, index: &Value) -> Value {
		lookup(index, self.len(), |at| self.get(at).cloned(), |start, end| {
			Value::List(self.iter().skip(start).take(end - start).cloned().collect())
		})
	}
}

/// Lists only grow at the front.
impl Insertable for List {
	fn insert(&mut self, value: Value) { self.push_front(value) }
}

impl Iterable for List {
	fn elements(&self) -> Box<dyn Iterator<Item = Value> + '_> { Box::new(self.iter().cloned()) }
}

impl Sizeable for Vec<Value> {
	fn size(&self) -> usize { self.len() }
}

impl Indexable for Vec<Value> {
	fn index(&self, index: &Value) -> Value {
		lookup(index, self.len(), |at| self.get(at).cloned(), |start, end| Value::Vector(self[start..end].to_vec()))
	}
}

impl Insertable for Vec<Value> {
	fn insert(&mut self, value: Value) { self.push(value) }
}

impl Iterable for Vec<Value> {
	fn elements(&self) -> Box<dyn Iterator<Item = Value> + '_> { Box::new(self.iter().cloned()) }
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn strings(values: &[&str]) -> Vec<Value> { values.iter().map(|s| Value::String(s.to_string())).collect() }

	fn range(start: f64, end: f64) -> Value { Value::Vector(vec![Value::Number(start), Value::Number(end)]) }

	#[test]
	fn index_vector() {
		let vector = Value::Vector(strings(&["foo", "bar", "baz"]));
		let indexable = vector.as_indexable().unwrap();
		assert_eq!(indexable.index(&Value::Number(1.0)), Value::String("bar".into()));
		assert_eq!(indexable.index(&Value::Number(1.9)), Value::String("bar".into()));
		assert_eq!(indexable.index(&Value::Number(3.0)), Value::Nil);
		assert_eq!(indexable.index(&Value::Number(-1.0)), Value::Nil);
		assert_eq!(indexable.index(&range(1.0, 3.0)), Value::Vector(strings(&["bar", "baz"])));
		assert_eq!(indexable.index(&range(2.0, 4.0)), Value::Nil);
		assert_eq!(indexable.index(&range(2.0, 1.0)), Value::Nil);
		assert_eq!(indexable.index(&Value::Vector(vec![Value::Number(1.0)])), Value::Nil);
		assert_eq!(indexable.index(&Value::String("0".into())), Value::Nil);
	}

	#[test]
	fn index_list_and_blob() {
		let list = Value::List(strings(&["a", "b", "c"]).into_iter().collect());
		let indexable = list.as_indexable().unwrap();
		assert_eq!(indexable.index(&Value::Number(0.0)), Value::String("a".into()));
		assert_eq!(indexable.index(&range(1.0, 2.0)), Value::List(strings(&["b"]).into_iter().collect()));

		let blob = Value::Blob(b"hey".to_vec());
		let indexable = blob.as_indexable().unwrap();
		assert_eq!(indexable.index(&Value::Number(0.0)), Value::Byte(b'h'));
		assert_eq!(indexable.index(&range(1.0, 3.0)), Value::Blob(b"ey".to_vec()));
	}

	#[test]
	fn insert_by_variant() {
		let mut vector = Value::Vector(strings(&["foo"]));
		vector.as_insertable().unwrap().insert(Value::String("bar".into()));
		assert_eq!(vector, Value::Vector(strings(&["foo", "bar"])));

		let mut list = Value::List(strings(&["foo"]).into_iter().collect());
		list.as_insertable().unwrap().insert(Value::String("bar".into()));
		assert_eq!(list, Value::List(strings(&["bar", "foo"]).into_iter().collect()));

		let mut blob = Value::Blob(Vec::new());
		let insertable = blob.as_insertable().unwrap();
		insertable.insert(Value::Byte(1));
		insertable.insert(Value::Number(255.0));
		insertable.insert(Value::Number(256.0));
		insertable.insert(Value::Number(1.5));
		insertable.insert(Value::String("x".into()));
		assert_eq!(blob, Value::Blob(vec![1, 255]));

		assert!(Value::String("foo".into()).as_insertable().is_none());
	}

	#[test]
	fn sizes() {
		assert_eq!(Value::String("hello".into()).as_sizeable().unwrap().size(), 5);
		assert_eq!(Value::Vector(strings(&["a", "b"])).as_sizeable().unwrap().size(), 2);
		assert_eq!(Value::List(List::new()).as_sizeable().unwrap().size(), 0);
		assert!(Value::Number(3.0).as_sizeable().is_none());
	}

	#[test]
	fn iterate_in_order() {
		let list = Value::List(strings(&["a", "b"]).into_iter().collect());
		assert_eq!(list.as_iterable().unwrap().elements().collect::<Vec<_>>(), strings(&["a", "b"]));
		let blob = Value::Blob(vec![7, 8]);
		assert_eq!(blob.as_iterable().unwrap().elements().collect::<Vec<_>>(), vec![Value::Byte(7), Value::Byte(8)]);
		assert!(Value::String("ab".into()).as_iterable().is_none());
	}
}
