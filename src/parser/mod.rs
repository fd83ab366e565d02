//! The `Scanner` uses the lexical grammar, the `Parser` uses the syntactic
//! grammar, its alphabet is tokens and its strings are nested scopes.
//!
//! There are no precedence levels in a postfix language, so the only thing
//! the parser has to get right is nesting. Every construct that owns a body
//! (word definitions, both branches of a conditional, loops, collection
//! literals) opens a scope, and the innermost open scope receives whatever is
//! parsed next:
//!
//! ``` text
//! program     → item* ;
//! item        → WORD | NUMBER | STRING | "var" WORD
//!             | ":" WORD item* ";"
//!             | "if" item* ( "else" item* )? "then"
//!             | "for" item* "end"
//!             | "[" item* "]" | "{" item* "}" ;
//! ```
//!
//! Closing tokens must match the innermost open scope, anything else is a
//! structure error and parsing stops there.
//!
//! A word definition nested inside another scope is also added to the
//! top-level forest when it closes, so the caller sees it right away. A
//! definition that is already at the top level appears there exactly once.

mod node;
mod scope;

pub use node::{CollectionKind, Node};
use scope::Scope;
pub use scope::ScopeKind;
use tracing::debug;

use crate::{
	error::parser::{ParseError, ParseErrorType},
	scanner::{Token, TokenType},
};

/// Builds a forest of [`Node`]s from a token stream.
pub struct Parser<I> {
	/// The tokens to parse.
	tokens: I,
	/// Completed top-level nodes.
	forest: Vec<Node>,
	/// Open scopes with the offset of the token that opened them, innermost
	/// last.
	scopes: Vec<(Scope, usize)>,
}

impl<'a, I: Iterator<Item = Token<'a>>> Parser<I> {
	pub fn new(tokens: impl IntoIterator<IntoIter = I>) -> Self {
		Self { tokens: tokens.into_iter(), forest: Vec::new(), scopes: Vec::new() }
	}

	pub fn parse(mut self) -> Result<Vec<Node>, ParseError> {
		while let Some(token) = self.tokens.next() {
			match token.r#type {
				TokenType::Eof => break,
				TokenType::Number(n) => self.insert(Node::NumberLiteral(n)),
				TokenType::String => self.insert(Node::StringLiteral(unescape(token.lexeme))),
				TokenType::Word => self.insert(word(token.lexeme)),
				TokenType::Var => {
					let name = self.name_after(&token, "var")?;
					self.insert(Node::VariableDeclaration(name));
				}
				TokenType::Colon => {
					let name = self.name_after(&token, ":")?;
					self.open(Scope::WordDefinition { name, body: Vec::new() }, &token);
				}
				TokenType::If => {
					let scope = Scope::Conditional { then_body: Vec::new(), else_body: Vec::new(), in_else: false };
					self.open(scope, &token);
				}
				TokenType::Else => self.switch_to_else(&token)?,
				TokenType::For => self.open(Scope::Loop(Vec::new()), &token),
				TokenType::LeftBracket => {
					self.open(Scope::Collection { kind: CollectionKind::List, body: Vec::new() }, &token)
				}
				TokenType::LeftBrace => {
					self.open(Scope::Collection { kind: CollectionKind::Vector, body: Vec::new() }, &token)
				}
				TokenType::Semicolon => self.close(&token, ScopeKind::WordDefinition)?,
				TokenType::Then => self.close(&token, ScopeKind::Conditional)?,
				TokenType::End => self.close(&token, ScopeKind::Loop)?,
				TokenType::RightBracket => self.close(&token, ScopeKind::List)?,
				TokenType::RightBrace => self.close(&token, ScopeKind::Vector)?,
			}
		}

		if let Some((scope, offset)) = self.scopes.last() {
			return Err(ParseError::new(*offset, ParseErrorType::UnclosedScope(scope.kind())));
		}
		Ok(self.forest)
	}

	/// Append a node to the innermost open scope, or to the top level.
	fn insert(&mut self, node: Node) {
		match self.scopes.last_mut() {
			Some((scope, _)) => scope.append(node),
			None => self.forest.push(node),
		}
	}

	fn open(&mut self, scope: Scope, token: &Token<'a>) {
		debug!(kind = %scope.kind(), offset = token.offset, depth = self.scopes.len(), "open scope");
		self.scopes.push((scope, token.offset));
	}

	/// Close the innermost scope, which must be of kind `expected`, and append
	/// the finished node to its parent.
	fn close(&mut self, token: &Token<'a>, expected: ScopeKind) -> Result<(), ParseError> {
		let scope = match self.scopes.pop() {
			Some((scope, _)) if scope.kind() == expected => scope,
			Some((scope, _)) => {
				let close = token.lexeme.to_string();
				return Err(ParseError::new(token.offset, ParseErrorType::MismatchedClose { close, open: scope.kind() }));
			}
			None => {
				return Err(ParseError::new(token.offset, ParseErrorType::UnexpectedClose(token.lexeme.to_string())));
			}
		};
		debug!(kind = %expected, offset = token.offset, depth = self.scopes.len(), "close scope");

		let node = scope.into_node();
		// A definition nested in another scope is also surfaced at the top level.
		if !self.scopes.is_empty() && matches!(node, Node::WordDefinition { .. }) {
			self.forest.push(node.clone());
		}
		self.insert(node);
		Ok(())
	}

	fn switch_to_else(&mut self, token: &Token<'a>) -> Result<(), ParseError> {
		match self.scopes.last_mut() {
			Some((Scope::Conditional { in_else, .. }, _)) if !*in_else => {
				*in_else = true;
				Ok(())
			}
			_ => Err(ParseError::new(token.offset, ParseErrorType::ElseOutsideIf)),
		}
	}

	/// Consume the word naming a definition or variable.
	fn name_after(&mut self, token: &Token<'a>, keyword: &'static str) -> Result<String, ParseError> {
		match self.tokens.next() {
			Some(Token { r#type: TokenType::Word, lexeme, .. }) => Ok(lexeme.to_string()),
			_ => Err(ParseError::new(token.offset, ParseErrorType::ExpectedName(keyword))),
		}
	}
}

/// `&name` is a reference to a variable, anything else names a word.
fn word(lexeme: &str) -> Node {
	match lexeme.strip_prefix('&') {
		Some(name) if !name.is_empty() => Node::Reference(name.to_string()),
		_ => Node::WordReference(lexeme.to_string()),
	}
}

/// Resolve the escape sequences of a raw string literal.
fn unescape(raw: &str) -> String {
	let mut value = String::with_capacity(raw.len());
	let mut chars = raw.chars();
	while let Some(c) = chars.next() {
		if c != '\\' {
			value.push(c);
			continue;
		}
		match chars.next() {
			Some('n') => value.push('\n'),
			Some('t') => value.push('\t'),
			Some('r') => value.push('\r'),
			Some(c @ ('"' | '\\')) => value.push(c),
			Some(c) => {
				value.push('\\');
				value.push(c);
			}
			None => value.push('\\'),
		}
	}
	value
}
