/// A token produced by the scanner
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
	pub r#type: TokenType,
	/// Literal text of the token. For strings this is the raw text between the
	/// quotes, escapes still unresolved.
	pub lexeme: &'a str,
	/// Byte offset of the first character of the token in the source.
	pub offset: usize,
}

impl<'a> Token<'a> {
	pub fn new(r#type: TokenType, lexeme: &'a str, offset: usize) -> Self { Self { r#type, lexeme, offset } }
}

/// The different types of tokens, the copying is lightweight
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenType {
	/// Any whitespace separated run of characters that is not a keyword.
	Word,
	/// Number literal, e.g. `-12.5`.
	Number(f64),
	/// String literal, e.g. `"hello"`.
	String,
	/// Colon `:`, opens a word definition.
	Colon,
	/// Semicolon `;`, closes a word definition.
	Semicolon,
	/// Left bracket `[`.
	LeftBracket,
	/// Right bracket `]`.
	RightBracket,
	/// Left brace `{`.
	LeftBrace,
	/// Right brace `}`.
	RightBrace,
	/// Variable declaration keyword.
	Var,
	/// If keyword.
	If,
	/// Else keyword.
	Else,
	/// Then keyword, closes an `if`.
	Then,
	/// For loop keyword.
	For,
	/// End keyword, closes a `for`.
	End,
	/// End of input.
	Eof,
}

impl TokenType {
	pub fn keyword_or_word(value: &str) -> Self {
		match value {
			"var" => TokenType::Var,
			"if" => TokenType::If,
			"else" => TokenType::Else,
			"then" => TokenType::Then,
			"for" => TokenType::For,
			"end" => TokenType::End,
			_ => TokenType::Word,
		}
	}
}
