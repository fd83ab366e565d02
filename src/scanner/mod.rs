//! Turns source text into tokens.
//!
//! The lexical grammar is tiny: whitespace separates tokens, a handful of
//! punctuation characters are recognised at the start of a token, and
//! everything else is a word. Keywords are words with a reserved spelling, so
//! we can only tell them apart once the whole word has been read, this is
//! `maximal munch`.
//!
//! Tokens are produced lazily. The scanner always holds exactly one token of
//! look-ahead, which is what [`Scanner::has_more`] inspects.
mod token;

use std::{iter::Peekable, mem, str::CharIndices};

use TokenType::*;
pub use token::*;

/// A scanner for source code
pub struct Scanner<'a> {
	/// User input source code
	source:      &'a str,
	/// User input source code iterator
	source_iter: Peekable<CharIndices<'a>>,
	/// Points at the beginning of the current lexeme
	start:       usize,
	/// Points at the character currently being considered
	cursor:      usize,
	/// The buffered look-ahead token
	current:     Token<'a>,
}

impl<'a> Scanner<'a> {
	pub fn new(source: &'a str) -> Self {
		let source_iter = source.char_indices().peekable();
		let mut scanner = Self { source, source_iter, start: 0, cursor: 0, current: Token::new(Eof, "", 0) };
		scanner.current = scanner.scan_token();
		scanner
	}

	/// Whether a token other than end-of-input is buffered.
	pub fn has_more(&self) -> bool { self.current.r#type != Eof }

	/// Hand out the buffered token and scan the one after it. Once the input is
	/// exhausted this keeps returning [`TokenType::Eof`].
	pub fn next_token(&mut self) -> Token<'a> {
		let next = self.scan_token();
		mem::replace(&mut self.current, next)
	}

	/// Scan a single token from the source code
	fn scan_token(&mut self) -> Token<'a> {
		self.skip_whitespace();
		let Some(&(index, next_char)) = self.source_iter.peek() else {
			return Token::new(Eof, "", self.source.len());
		};
		// We are at the beginning of the next lexeme.
		self.start = index;
		self.cursor = index;

		#[rustfmt::skip]
		let r#type = match next_char {
			':' => { self.advance(); Colon }
			';' => { self.advance(); Semicolon }
			'[' => { self.advance(); LeftBracket }
			']' => { self.advance(); RightBracket }
			'{' => { self.advance(); LeftBrace }
			'}' => { self.advance(); RightBrace }
			'"' => return self.string(),
			c if c.is_ascii_digit() || c == '-' => self.number(),
			_ => self.word(),
		};

		Token::new(r#type, &self.source[self.start..self.cursor], self.start)
	}

	/// Advance to the next character
	fn advance(&mut self) -> Option<char> {
		let (i, c) = self.source_iter.next()?;
		self.cursor = i + c.len_utf8();
		Some(c)
	}

	/// Peek the current character
	fn peek(&mut self) -> Option<char> { self.source_iter.peek().map(|&(_, c)| c) }

	fn skip_whitespace(&mut self) {
		while self.peek().is_some_and(is_whitespace) {
			self.advance();
		}
	}

	/// Scan a string literal. An unterminated string runs to the end of input.
	fn string(&mut self) -> Token<'a> {
		self.advance(); // The opening "
		let content_start = self.cursor;
		while let Some(c) = self.peek() {
			if c == '"' {
				break;
			}
			if c == '\\' {
				self.advance();
			}
			self.advance();
		}
		let lexeme = &self.source[content_start..self.cursor];
		self.advance(); // The closing ", if any
		Token::new(String, lexeme, self.start)
	}

	/// Scan a number literal greedily. Text that does not form a number, like a
	/// lone `-`, is a word instead.
	fn number(&mut self) -> TokenType {
		while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.' || c == '-') {
			self.advance();
		}
		match self.source[self.start..self.cursor].parse() {
			Ok(n) => Number(n),
			Err(_) => Word,
		}
	}

	/// Scan a word or keyword
	fn word(&mut self) -> TokenType {
		while self.peek().is_some_and(|c| !is_whitespace(c)) {
			self.advance();
		}
		TokenType::keyword_or_word(&self.source[self.start..self.cursor])
	}
}

impl<'a> Iterator for Scanner<'a> {
	type Item = Token<'a>;

	fn next(&mut self) -> Option<Self::Item> { self.has_more().then(|| self.next_token()) }
}

fn is_whitespace(c: char) -> bool { matches!(c, ' ' | '\t' | '\n' | '\r') }

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn scan(input: &str) -> Vec<(TokenType, &str)> {
		Scanner::new(input).map(|token| (token.r#type, token.lexeme)).collect()
	}

	#[test]
	fn scan_tokens() {
		let input = "5 -5 5.5 + : square ; \"string\"\tfor end if else then { 1 } [ 1 ] var -";
		assert_eq!(scan(input), vec![
			(Number(5.0), "5"),
			(Number(-5.0), "-5"),
			(Number(5.5), "5.5"),
			(Word, "+"),
			(Colon, ":"),
			(Word, "square"),
			(Semicolon, ";"),
			(String, "string"),
			(For, "for"),
			(End, "end"),
			(If, "if"),
			(Else, "else"),
			(Then, "then"),
			(LeftBrace, "{"),
			(Number(1.0), "1"),
			(RightBrace, "}"),
			(LeftBracket, "["),
			(Number(1.0), "1"),
			(RightBracket, "]"),
			(Var, "var"),
			(Word, "-"),
		]);
	}

	#[test]
	fn scan_unterminated_string() {
		assert_eq!(scan("\"unterminated string"), vec![(String, "unterminated string")]);
	}

	#[test]
	fn scan_escaped_quote() {
		assert_eq!(scan(r#""say \"hi\"" ."#), vec![(String, r#"say \"hi\""#), (Word, ".")]);
	}

	#[test]
	fn scan_malformed_number_as_word() {
		assert_eq!(scan("1-2 -foo"), vec![(Word, "1-2"), (Word, "-"), (Word, "foo")]);
	}

	#[test]
	fn scan_words() {
		assert_eq!(scan("&foo dup swap. variable"), vec![
			(Word, "&foo"),
			(Word, "dup"),
			(Word, "swap."),
			(Word, "variable"),
		]);
	}

	#[test]
	fn scan_offsets() {
		let offsets: Vec<usize> = Scanner::new("  1 \"ab\"  foo").map(|token| token.offset).collect();
		assert_eq!(offsets, vec![2, 4, 10]);
	}

	#[test]
	fn scan_lookahead() {
		let mut scanner = Scanner::new(" \n\t ");
		assert!(!scanner.has_more());
		assert_eq!(scanner.next_token().r#type, Eof);

		let mut scanner = Scanner::new("dup");
		assert!(scanner.has_more());
		assert_eq!(scanner.next_token().lexeme, "dup");
		assert!(!scanner.has_more());
		assert_eq!(scanner.next_token().r#type, Eof);
	}
}
