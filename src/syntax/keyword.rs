use std::fmt;

/// JSON-LD keywords.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Keyword {
	/// `@base`.
	/// Used to set the base IRI against which to resolve those relative IRI references
	/// which are otherwise interpreted relative to the document.
	Base,

	/// `@container`.
	/// Used to set the default container type for a term.
	Container,

	/// `@context`.
	/// Used to define the short-hand names that are used throughout a JSON-LD document.
	Context,

	/// `@direction`.
	Direction,

	/// `@graph`.
	/// Used to express a graph.
	Graph,

	/// `@id`.
	/// Used to uniquely identify node objects that are being described in the document with IRIs
	/// or blank node identifiers.
	Id,

	/// `@import`.
	Import,

	/// `@included`.
	Included,

	/// `@index`.
	Index,

	/// `@json`.
	/// Used as the @type value of a JSON literal.
	Json,

	/// `@language`.
	/// Used to specify the language for a particular string value or the default language of a
	/// JSON-LD document.
	Language,

	/// `@list`.
	/// Used to express an ordered set of data.
	List,

	/// `@nest`.
	Nest,

	/// `@none`.
	None,

	/// `@prefix`.
	/// With the value true, allows this term to be used to construct a compact IRI when
	/// compacting.
	Prefix,

	/// `@propagate`.
	Propagate,

	/// `@protected`.
	Protected,

	/// `@reverse`.
	Reverse,

	/// `@set`.
	/// Used to express an unordered set of data and to ensure that values are always represented
	/// as arrays.
	Set,

	/// `@type`.
	/// Used to set the type of a node or the datatype of a typed value.
	Type,

	/// `@value`.
	/// Used to specify the data that is associated with a particular property in the graph.
	Value,

	/// `@version`.
	Version,

	/// `@vocab`.
	/// Used to expand properties and values in @type with a common prefix IRI.
	Vocab,
}

impl Keyword {
	pub fn into_str(self) -> &'static str {
		use Keyword::*;
		match self {
			Base => "@base",
			Container => "@container",
			Context => "@context",
			Direction => "@direction",
			Graph => "@graph",
			Id => "@id",
			Import => "@import",
			Included => "@included",
			Index => "@index",
			Json => "@json",
			Language => "@language",
			List => "@list",
			Nest => "@nest",
			None => "@none",
			Prefix => "@prefix",
			Propagate => "@propagate",
			Protected => "@protected",
			Reverse => "@reverse",
			Set => "@set",
			Type => "@type",
			Value => "@value",
			Version => "@version",
			Vocab => "@vocab",
		}
	}

	pub fn as_str(&self) -> &'static str {
		self.into_str()
	}
}

#[derive(Clone, Copy, Debug, thiserror::Error)]
#[error("`{0}` is not a keyword")]
pub struct NotAKeyword<'a>(pub &'a str);

impl<'a> TryFrom<&'a str> for Keyword {
	type Error = NotAKeyword<'a>;

	fn try_from(s: &'a str) -> Result<Keyword, NotAKeyword<'a>> {
		use Keyword::*;
		match s {
			"@base" => Ok(Base),
			"@container" => Ok(Container),
			"@context" => Ok(Context),
			"@direction" => Ok(Direction),
			"@graph" => Ok(Graph),
			"@id" => Ok(Id),
			"@import" => Ok(Import),
			"@included" => Ok(Included),
			"@index" => Ok(Index),
			"@json" => Ok(Json),
			"@language" => Ok(Language),
			"@list" => Ok(List),
			"@nest" => Ok(Nest),
			"@none" => Ok(None),
			"@prefix" => Ok(Prefix),
			"@propagate" => Ok(Propagate),
			"@protected" => Ok(Protected),
			"@reverse" => Ok(Reverse),
			"@set" => Ok(Set),
			"@type" => Ok(Type),
			"@value" => Ok(Value),
			"@version" => Ok(Version),
			"@vocab" => Ok(Vocab),
			_ => Err(NotAKeyword(s)),
		}
	}
}

impl fmt::Display for Keyword {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.into_str().fmt(f)
	}
}

/// Checks if the given string is a keyword.
pub fn is_keyword(s: &str) -> bool {
	Keyword::try_from(s).is_ok()
}

/// Checks if the given string has the form of a keyword
/// (`@` followed by one or more ALPHA characters).
pub fn is_keyword_like(s: &str) -> bool {
	match s.strip_prefix('@') {
		Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphabetic()),
		None => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn keyword_like() {
		assert!(is_keyword_like("@foo"));
		assert!(!is_keyword_like("@"));
		assert!(!is_keyword_like("@foo1"));
		assert!(!is_keyword_like("foo"));
		assert!(is_keyword("@vocab"));
		assert!(!is_keyword("@foo"));
	}
}
