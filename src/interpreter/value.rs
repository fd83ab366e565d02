use std::fmt::Display;

use crate::interpreter::{list::List, pipe::Pipe};

/// Value represents a runtime value on the stacks and in variables.
#[derive(Debug, Clone)]
pub enum Value {
	/// The absence of a value, e.g. an unset variable or an index out of range.
	Nil,
	Number(f64),
	String(String),
	Byte(u8),
	Boolean(bool),
	/// The name of a variable slot.
	Reference(String),
	Blob(Vec<u8>),
	List(List),
	Vector(Vec<Value>),
	Pipe(Pipe),
}

impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Nil => write!(f, "<nil>"),
			Value::Number(n) => fmt_number(*n, f),
			Value::String(s) => write!(f, "{s}"),
			Value::Byte(b) => write!(f, "{b}"),
			Value::Boolean(b) => write!(f, "{b}"),
			Value::Reference(name) => write!(f, "{name}"),
			Value::Blob(_) => write!(f, "<blob>"),
			Value::List(_) => write!(f, "<list>"),
			Value::Vector(_) => write!(f, "<vector>"),
			Value::Pipe(_) => write!(f, "<pipe>"),
		}
	}
}

/// Shortest decimal form of `n`. Exponents below -4 or from 6 up switch to
/// `1e+06` style, infinities render as `+Inf` and `-Inf`.
fn fmt_number(n: f64, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
	if n.is_nan() {
		return write!(f, "NaN");
	}
	if n.is_infinite() {
		return write!(f, "{}Inf", if n > 0.0 { '+' } else { '-' });
	}
	if n == 0.0 {
		return write!(f, "{n}");
	}
	let scientific = format!("{n:e}");
	let Some((mantissa, exponent)) = scientific.split_once('e') else { return write!(f, "{n}") };
	match exponent.parse::<i32>() {
		Ok(exponent) if !(-4..6).contains(&exponent) => {
			let sign = if exponent < 0 { '-' } else { '+' };
			write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
		}
		_ => write!(f, "{n}"),
	}
}

/// Raw equality: values of different variants are never equal, pipes are
/// equal only to copies of themselves.
impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Nil, Value::Nil) => true,
			(Value::Number(l), Value::Number(r)) => l == r,
			(Value::String(l), Value::String(r)) => l == r,
			(Value::Byte(l), Value::Byte(r)) => l == r,
			(Value::Boolean(l), Value::Boolean(r)) => l == r,
			(Value::Reference(l), Value::Reference(r)) => l == r,
			(Value::Blob(l), Value::Blob(r)) => l == r,
			(Value::List(l), Value::List(r)) => l == r,
			(Value::Vector(l), Value::Vector(r)) => l == r,
			(Value::Pipe(l), Value::Pipe(r)) => l.ptr_eq(r),
			_ => false,
		}
	}
}

impl Value {
	/// Only `true` and the number `1` select the `if` branch of a conditional.
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Boolean(b) => *b,
			Value::Number(n) => *n == 1.0,
			_ => false,
		}
	}

	/// Name of the variant, for diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Nil => "nil",
			Value::Number(_) => "number",
			Value::String(_) => "string",
			Value::Byte(_) => "byte",
			Value::Boolean(_) => "boolean",
			Value::Reference(_) => "reference",
			Value::Blob(_) => "blob",
			Value::List(_) => "list",
			Value::Vector(_) => "vector",
			Value::Pipe(_) => "pipe",
		}
	}

	/// Tries to add two values together, strings concatenate.
	pub fn plus(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Value::Number(l), Value::Number(r)) => Some(Value::Number(l + r)),
			(Value::String(l), Value::String(r)) => Some(Value::String(format!("{l}{r}"))),
			_ => None,
		}
	}

	/// Tries to subtract two values.
	pub fn minus(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Value::Number(l), Value::Number(r)) => Some(Value::Number(l - r)),
			_ => None,
		}
	}

	/// Tries to multiply two values together.
	pub fn star(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Value::Number(l), Value::Number(r)) => Some(Value::Number(l * r)),
			_ => None,
		}
	}

	/// Tries to divide two values.
	pub fn slash(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Value::Number(l), Value::Number(r)) => Some(Value::Number(l / r)),
			_ => None,
		}
	}

	/// Integer remainder of both operands truncated. Modulo zero has no result.
	pub fn percent(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Value::Number(l), Value::Number(r)) => {
				let (l, r) = (*l as i64, *r as i64);
				l.checked_rem(r).map(|n| Value::Number(n as f64))
			}
			_ => None,
		}
	}

	/// Tries to compare if self is less than other.
	pub fn less(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Value::Number(l), Value::Number(r)) => Some(Value::Boolean(l < r)),
			_ => None,
		}
	}

	/// Tries to compare two values for greater-than.
	pub fn greater(&self, other: &Self) -> Option<Value> {
		match (self, other) {
			(Value::Number(l), Value::Number(r)) => Some(Value::Boolean(l > r)),
			_ => None,
		}
	}

	/// Equality of the raw values, always has a result. A string and a
	/// reference are both raw text and compare equal when the text matches.
	pub fn equal(&self, other: &Self) -> Option<Value> {
		let equal = match (self, other) {
			(Value::String(l) | Value::Reference(l), Value::String(r) | Value::Reference(r)) => l == r,
			_ => self == other,
		};
		Some(Value::Boolean(equal))
	}
}
