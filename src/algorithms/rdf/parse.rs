use iref::Iri;
use std::{iter::Peekable, str::CharIndices};

use super::{Literal, Quad, Term};
use crate::{algorithms::Error, vocab::xsd};

/// Parses an N-Quads document.
///
/// Empty lines and comments are skipped.
pub fn parse_nquads(input: &str) -> Result<Vec<Quad>, Error> {
	let mut quads = Vec::new();
	for (i, line) in input.lines().enumerate() {
		let mut parser = LineParser {
			line: i + 1,
			source: line,
			chars: line.char_indices().peekable(),
		};

		if let Some(quad) = parser.quad()? {
			quads.push(quad)
		}
	}

	Ok(quads)
}

struct LineParser<'a> {
	line: usize,
	source: &'a str,
	chars: Peekable<CharIndices<'a>>,
}

impl<'a> LineParser<'a> {
	fn error(&self, message: impl Into<String>) -> Error {
		Error::InvalidNQuads {
			line: self.line,
			message: message.into(),
		}
	}

	fn skip_whitespace(&mut self) {
		while self.chars.next_if(|(_, c)| *c == ' ' || *c == '\t').is_some() {}
	}

	fn peek(&mut self) -> Option<char> {
		self.chars.peek().map(|(_, c)| *c)
	}

	fn expect(&mut self, expected: char) -> Result<(), Error> {
		match self.chars.next() {
			Some((_, c)) if c == expected => Ok(()),
			Some((_, c)) => Err(self.error(format!("expected `{expected}`, found `{c}`"))),
			None => Err(self.error(format!("expected `{expected}`"))),
		}
	}

	fn at_end(&mut self) -> bool {
		self.skip_whitespace();
		matches!(self.peek(), None | Some('#'))
	}

	fn quad(&mut self) -> Result<Option<Quad>, Error> {
		if self.at_end() {
			return Ok(None);
		}

		let subject = match self.term()? {
			term @ (Term::Iri(_) | Term::Blank(_)) => term,
			Term::Literal(_) => return Err(self.error("literal subject")),
		};

		self.skip_whitespace();
		let predicate = match self.term()? {
			Term::Iri(iri) => iri,
			_ => return Err(self.error("predicate must be an IRI")),
		};

		self.skip_whitespace();
		let object = self.term()?;

		self.skip_whitespace();
		let graph = match self.peek() {
			Some('.') => None,
			_ => match self.term()? {
				Term::Literal(_) => return Err(self.error("literal graph name")),
				term => Some(term),
			},
		};

		self.skip_whitespace();
		self.expect('.')?;
		if !self.at_end() {
			return Err(self.error("unexpected content after `.`"));
		}

		Ok(Some(Quad {
			subject,
			predicate,
			object,
			graph,
		}))
	}

	fn term(&mut self) -> Result<Term, Error> {
		match self.peek() {
			Some('<') => self.iri().map(Term::Iri),
			Some('_') => self.blank_node(),
			Some('"') => self.literal(),
			Some(c) => Err(self.error(format!("unexpected `{c}`"))),
			None => Err(self.error("unexpected end of line")),
		}
	}

	fn iri(&mut self) -> Result<String, Error> {
		self.expect('<')?;
		let mut iri = String::new();
		loop {
			match self.chars.next() {
				Some((_, '>')) => break,
				Some((_, '\\')) => iri.push(self.unicode_escape()?),
				Some((_, c)) => iri.push(c),
				None => return Err(self.error("unterminated IRI")),
			}
		}

		if Iri::new(iri.as_str()).is_err() {
			return Err(self.error(format!("invalid IRI `{iri}`")));
		}

		Ok(iri)
	}

	fn blank_node(&mut self) -> Result<Term, Error> {
		self.expect('_')?;
		self.expect(':')?;

		let start = match self.chars.peek() {
			Some((i, _)) => *i,
			None => return Err(self.error("empty blank node label")),
		};

		let mut end = start;
		while let Some((i, c)) = self
			.chars
			.next_if(|(_, c)| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
		{
			end = i + c.len_utf8();
		}

		// A label cannot end with `.`, which is the end of the statement.
		let source = self.source;
		let mut label = &source[start..end];
		while let Some(stripped) = label.strip_suffix('.') {
			label = stripped;
		}

		if label.is_empty() {
			return Err(self.error("empty blank node label"));
		}

		if label.len() < end - start {
			// Put the trailing dots back.
			let rest = &source[start + label.len()..];
			self.source = rest;
			self.chars = rest.char_indices().peekable();
		}

		Ok(Term::Blank(label.to_owned()))
	}

	fn literal(&mut self) -> Result<Term, Error> {
		self.expect('"')?;
		let mut value = String::new();
		loop {
			match self.chars.next() {
				Some((_, '"')) => break,
				Some((_, '\\')) => value.push(self.escape()?),
				Some((_, c)) => value.push(c),
				None => return Err(self.error("unterminated literal")),
			}
		}

		let literal = match self.peek() {
			Some('@') => {
				self.chars.next();
				let mut language = String::new();
				while let Some((_, c)) = self
					.chars
					.next_if(|(_, c)| c.is_ascii_alphanumeric() || *c == '-')
				{
					language.push(c)
				}

				if language.is_empty() {
					return Err(self.error("empty language tag"));
				}

				Literal::lang_string(value, language)
			}
			Some('^') => {
				self.expect('^')?;
				self.expect('^')?;
				Literal::typed(value, self.iri()?)
			}
			_ => Literal::typed(value, xsd::STRING),
		};

		Ok(Term::Literal(literal))
	}

	fn escape(&mut self) -> Result<char, Error> {
		match self.peek() {
			Some('u' | 'U') => self.unicode_escape(),
			_ => match self.chars.next() {
				Some((_, 't')) => Ok('\t'),
				Some((_, 'b')) => Ok('\u{8}'),
				Some((_, 'n')) => Ok('\n'),
				Some((_, 'r')) => Ok('\r'),
				Some((_, 'f')) => Ok('\u{c}'),
				Some((_, '"')) => Ok('"'),
				Some((_, '\'')) => Ok('\''),
				Some((_, '\\')) => Ok('\\'),
				_ => Err(self.error("invalid escape sequence")),
			},
		}
	}

	/// Parses the `uXXXX` or `UXXXXXXXX` part of a unicode escape.
	fn unicode_escape(&mut self) -> Result<char, Error> {
		let len = match self.chars.next() {
			Some((_, 'u')) => 4,
			Some((_, 'U')) => 8,
			_ => return Err(self.error("invalid escape sequence")),
		};

		let mut code = 0u32;
		for _ in 0..len {
			let digit = self
				.chars
				.next()
				.and_then(|(_, c)| c.to_digit(16))
				.ok_or_else(|| self.error("invalid unicode escape"))?;
			code = code * 16 + digit;
		}

		char::from_u32(code).ok_or_else(|| self.error("invalid unicode escape"))
	}
}
