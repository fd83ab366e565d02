//! Syntax tree nodes
//!
//! A program is a forest of [`Node`]s. Leaves push something or name a word,
//! the remaining variants own the nodes of the scope they were parsed from.

use std::{fmt, rc::Rc};

/// Syntax tree nodes
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
	/// A word to look up and invoke when executed.
	WordReference(String),
	/// `&name`, pushes a reference to a variable slot.
	Reference(String),
	NumberLiteral(f64),
	StringLiteral(String),
	/// `var name`
	VariableDeclaration(String),
	/// `: name ... ;`. The body is shared with the words table once defined.
	WordDefinition { name: String, body: Rc<Vec<Node>> },
	/// `if ... else ... then`
	Conditional { then_body: Vec<Node>, else_body: Vec<Node> },
	/// `for ... end`
	Loop(Vec<Node>),
	/// `[ ... ]` or `{ ... }`
	Collection { kind: CollectionKind, body: Vec<Node> },
}

/// Which collection a literal builds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
	/// `[ ... ]`, a persistent linked list
	List,
	/// `{ ... }`, a growable vector
	Vector,
}

impl fmt::Display for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Node::WordReference(name) => write!(f, "{name}"),
			Node::Reference(name) => write!(f, "&{name}"),
			Node::NumberLiteral(n) => write!(f, "{n}"),
			Node::StringLiteral(s) => write!(f, "{s:?}"),
			Node::VariableDeclaration(name) => write!(f, "var {name}"),
			Node::WordDefinition { name, body } => write!(f, ": {name}{} ;", Body(body)),
			Node::Conditional { then_body, else_body } if else_body.is_empty() => {
				write!(f, "if{} then", Body(then_body))
			}
			Node::Conditional { then_body, else_body } => {
				write!(f, "if{} else{} then", Body(then_body), Body(else_body))
			}
			Node::Loop(body) => write!(f, "for{} end", Body(body)),
			Node::Collection { kind: CollectionKind::List, body } => write!(f, "[{} ]", Body(body)),
			Node::Collection { kind: CollectionKind::Vector, body } => write!(f, "{{{} }}", Body(body)),
		}
	}
}

/// Renders each node of a body with a leading space.
struct Body<'a>(&'a [Node]);

impl fmt::Display for Body<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		self.0.iter().try_for_each(|node| write!(f, " {node}"))
	}
}
