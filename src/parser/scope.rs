use std::{fmt, rc::Rc};

use crate::parser::node::{CollectionKind, Node};

/// The kind of construct a scope was opened by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
	WordDefinition,
	Conditional,
	Loop,
	List,
	Vector,
}

impl fmt::Display for ScopeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		use ScopeKind::*;
		match self {
			WordDefinition => write!(f, "word definition"),
			Conditional => write!(f, "`if`"),
			Loop => write!(f, "`for`"),
			List => write!(f, "`[`"),
			Vector => write!(f, "`{{`"),
		}
	}
}

/// A scope that has been opened but not yet closed. Nodes parsed while it is
/// the innermost open scope are appended to it.
#[derive(Debug)]
pub(super) enum Scope {
	WordDefinition { name: String, body: Vec<Node> },
	Conditional { then_body: Vec<Node>, else_body: Vec<Node>, in_else: bool },
	Loop(Vec<Node>),
	Collection { kind: CollectionKind, body: Vec<Node> },
}

impl Scope {
	pub fn kind(&self) -> ScopeKind {
		match self {
			Scope::WordDefinition { .. } => ScopeKind::WordDefinition,
			Scope::Conditional { .. } => ScopeKind::Conditional,
			Scope::Loop(_) => ScopeKind::Loop,
			Scope::Collection { kind: CollectionKind::List, .. } => ScopeKind::List,
			Scope::Collection { kind: CollectionKind::Vector, .. } => ScopeKind::Vector,
		}
	}

	pub fn append(&mut self, node: Node) {
		match self {
			Scope::WordDefinition { body, .. }
			| Scope::Conditional { then_body: body, in_else: false, .. }
			| Scope::Conditional { else_body: body, in_else: true, .. }
			| Scope::Loop(body)
			| Scope::Collection { body, .. } => body.push(node),
		}
	}

	pub fn into_node(self) -> Node {
		match self {
			Scope::WordDefinition { name, body } => Node::WordDefinition { name, body: Rc::new(body) },
			Scope::Conditional { then_body, else_body, .. } => Node::Conditional { then_body, else_body },
			Scope::Loop(body) => Node::Loop(body),
			Scope::Collection { kind, body } => Node::Collection { kind, body },
		}
	}
}
