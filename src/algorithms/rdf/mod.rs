//! RDF datasets: quads, N-Quads syntax, and conversion from and to expanded
//! JSON-LD documents.
use std::fmt;

use crate::vocab::xsd;

mod from_rdf;
mod parse;
mod to_rdf;

pub use from_rdf::from_rdf;
pub use parse::parse_nquads;
pub use to_rdf::{to_rdf, ToRdfOptions};

/// RDF term.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
	Iri(String),

	/// Blank node, identified by its label without the `_:` prefix.
	Blank(String),

	Literal(Literal),
}

impl Term {
	pub fn as_iri(&self) -> Option<&str> {
		match self {
			Self::Iri(iri) => Some(iri),
			_ => None,
		}
	}

	pub fn as_blank(&self) -> Option<&str> {
		match self {
			Self::Blank(label) => Some(label),
			_ => None,
		}
	}

	pub fn is_blank(&self) -> bool {
		matches!(self, Self::Blank(_))
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "<{iri}>"),
			Self::Blank(label) => write!(f, "_:{label}"),
			Self::Literal(literal) => literal.fmt(f),
		}
	}
}

/// RDF literal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal {
	pub value: String,

	/// Datatype IRI. `xsd:string` for plain strings, `rdf:langString` for
	/// language-tagged strings.
	pub datatype: String,

	pub language: Option<String>,
}

impl Literal {
	pub fn string(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			datatype: xsd::STRING.to_owned(),
			language: None,
		}
	}

	pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			datatype: datatype.into(),
			language: None,
		}
	}

	pub fn lang_string(value: impl Into<String>, language: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			datatype: crate::vocab::rdf::LANG_STRING.to_owned(),
			language: Some(language.into()),
		}
	}
}

impl fmt::Display for Literal {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("\"")?;
		for c in self.value.chars() {
			match c {
				'\\' => f.write_str("\\\\")?,
				'"' => f.write_str("\\\"")?,
				'\n' => f.write_str("\\n")?,
				'\r' => f.write_str("\\r")?,
				c => fmt::Write::write_char(f, c)?,
			}
		}
		f.write_str("\"")?;

		match &self.language {
			Some(language) => write!(f, "@{language}"),
			None if self.datatype == xsd::STRING => Ok(()),
			None => write!(f, "^^<{}>", self.datatype),
		}
	}
}

/// RDF quad. `graph` is `None` for the default graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quad {
	pub subject: Term,
	pub predicate: String,
	pub object: Term,
	pub graph: Option<Term>,
}

impl Quad {
	/// Blank node components of the quad, with their position (`s`, `o` or
	/// `g`).
	pub(crate) fn blank_nodes(&self) -> impl Iterator<Item = (char, &str)> {
		[
			('s', Some(&self.subject)),
			('o', Some(&self.object)),
			('g', self.graph.as_ref()),
		]
		.into_iter()
		.filter_map(|(position, term)| term.and_then(Term::as_blank).map(|label| (position, label)))
	}

	/// Returns the same quad with every blank node label replaced.
	pub(crate) fn map_blank_nodes(&self, f: impl Fn(&str) -> String) -> Self {
		let map = |term: &Term| match term {
			Term::Blank(label) => Term::Blank(f(label)),
			other => other.clone(),
		};

		Self {
			subject: map(&self.subject),
			predicate: self.predicate.clone(),
			object: map(&self.object),
			graph: self.graph.as_ref().map(map),
		}
	}
}

/// Formats the quad as an N-Quads line, without the trailing newline.
impl fmt::Display for Quad {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} <{}> {}", self.subject, self.predicate, self.object)?;
		if let Some(graph) = &self.graph {
			write!(f, " {graph}")?;
		}

		f.write_str(" .")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn display() {
		let quad = Quad {
			subject: Term::Blank("b0".to_owned()),
			predicate: "https://example.org/ns#name".to_owned(),
			object: Term::Literal(Literal::lang_string("say \"hi\"\n", "en")),
			graph: Some(Term::Iri("https://example.org/g".to_owned())),
		};
		assert_eq!(
			quad.to_string(),
			"_:b0 <https://example.org/ns#name> \"say \\\"hi\\\"\\n\"@en <https://example.org/g> ."
		);

		let literal = Literal::typed("3", xsd::INTEGER);
		assert_eq!(
			literal.to_string(),
			"\"3\"^^<http://www.w3.org/2001/XMLSchema#integer>"
		);
		assert_eq!(Literal::string("a").to_string(), "\"a\"");
	}
}
