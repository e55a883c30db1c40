//! Processed (active) contexts.
use indexmap::IndexMap;
use iref::{Iri, IriBuf, IriRef};
use once_cell::sync::OnceCell;
use std::fmt;

use crate::syntax::{is_keyword_like, Container, Keyword, Value};

mod inverse;

pub use inverse::InverseContext;

/// Identifier, keyword or `@null`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
	/// `@null` value.
	Null,

	/// Node identifier: an IRI, a blank node identifier, or a string that
	/// could not be expanded into either.
	Id(String),

	/// Keyword.
	Keyword(Keyword),
}

impl Term {
	/// Checks if this term is `@null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Term::Null)
	}

	/// Checks if this term is a keyword.
	pub fn is_keyword(&self) -> bool {
		matches!(self, Term::Keyword(_))
	}

	/// Returns the identifier if this term is an absolute IRI or a blank node
	/// identifier.
	pub fn as_id(&self) -> Option<&str> {
		match self {
			Term::Id(id) if is_absolute(id) => Some(id),
			_ => None,
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Term::Id(id) => id,
			Term::Keyword(k) => k.into_str(),
			Term::Null => "",
		}
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Term::Null => "null".fmt(f),
			other => other.as_str().fmt(f),
		}
	}
}

/// Checks if the given identifier is a blank node identifier (`_:label`).
pub fn is_blank(id: &str) -> bool {
	id.len() > 2 && id.starts_with("_:")
}

/// Checks if the given identifier is an absolute IRI or a blank node
/// identifier.
pub fn is_absolute(id: &str) -> bool {
	is_blank(id) || Iri::new(id).is_ok()
}

/// Type mapping of a term definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
	Id,
	Json,
	None,
	Vocab,
	Iri(String),
}

impl Type {
	pub fn as_str(&self) -> &str {
		match self {
			Self::Id => "@id",
			Self::Json => "@json",
			Self::None => "@none",
			Self::Vocab => "@vocab",
			Self::Iri(iri) => iri,
		}
	}

	/// Datatype IRI, if this mapping designates one.
	pub fn as_iri(&self) -> Option<&str> {
		match self {
			Self::Iri(iri) => Some(iri),
			_ => None,
		}
	}
}

/// Term definition.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TermDefinition {
	/// IRI mapping. `None` means the term is explicitly mapped to `null`,
	/// which prevents it from being expanded.
	pub value: Option<Term>,

	/// Prefix flag.
	pub prefix: bool,

	/// Protected flag.
	pub protected: bool,

	/// Type mapping.
	pub typ: Option<Type>,

	/// Container mapping.
	pub container: Container,

	/// Language mapping. `Some(None)` means the mapping is explicitly `null`.
	pub language: Option<Option<String>>,

	/// Property-scoped context, left unprocessed until the term is used.
	pub context: Option<Value>,

	/// Base URL against which the scoped context is processed.
	pub base_url: Option<IriBuf>,
}

impl TermDefinition {
	/// Returns the IRI mapping if it is an identifier.
	pub fn iri(&self) -> Option<&str> {
		match &self.value {
			Some(Term::Id(id)) => Some(id),
			_ => None,
		}
	}

	/// Returns the keyword this term is an alias of, if any.
	pub fn keyword(&self) -> Option<Keyword> {
		match &self.value {
			Some(Term::Keyword(k)) => Some(*k),
			_ => None,
		}
	}
}

/// Processed JSON-LD context.
///
/// Represents the result of the context processing algorithm implemented
/// in [`algorithms::context_processing`](crate::algorithms::context_processing).
/// It holds all the term definitions used to expand or compact a JSON-LD
/// value.
#[derive(Debug, Clone, Default)]
pub struct Context {
	original_base_url: Option<IriBuf>,
	base_iri: Option<IriBuf>,
	vocabulary: Option<Term>,
	default_language: Option<String>,
	definitions: IndexMap<String, TermDefinition>,
	inverse: OnceCell<InverseContext>,
}

impl Context {
	/// Creates a new context with the given base IRI.
	pub fn new(base_iri: Option<IriBuf>) -> Self {
		Self {
			original_base_url: base_iri.clone(),
			base_iri,
			..Default::default()
		}
	}

	/// Returns a reference to the given `term` definition, if any.
	pub fn get(&self, term: &str) -> Option<&TermDefinition> {
		self.definitions.get(term)
	}

	/// Returns the given `term` along with its definition, if any.
	pub fn get_key_value(&self, term: &str) -> Option<(&str, &TermDefinition)> {
		self.definitions
			.get_key_value(term)
			.map(|(t, d)| (t.as_str(), d))
	}

	/// Checks if the given `term` is defined.
	pub fn contains_term(&self, term: &str) -> bool {
		self.definitions.contains_key(term)
	}

	/// Original base URL of the context.
	pub fn original_base_url(&self) -> Option<&Iri> {
		self.original_base_url.as_deref()
	}

	/// Current *base IRI* of the context.
	pub fn base_iri(&self) -> Option<&Iri> {
		self.base_iri.as_deref()
	}

	/// Optional vocabulary mapping.
	pub fn vocabulary(&self) -> Option<&Term> {
		self.vocabulary.as_ref()
	}

	/// Optional default language.
	pub fn default_language(&self) -> Option<&str> {
		self.default_language.as_deref()
	}

	/// Returns an iterator over the term definitions of the context.
	pub fn definitions(&self) -> impl Iterator<Item = (&str, &TermDefinition)> {
		self.definitions.iter().map(|(t, d)| (t.as_str(), d))
	}

	/// Checks if the context has protected term definitions.
	pub fn has_protected_items(&self) -> bool {
		self.definitions.values().any(|d| d.protected)
	}

	pub fn len(&self) -> usize {
		self.definitions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.definitions.is_empty()
	}

	/// Sets the normal definition for the given term `key`.
	pub fn set(&mut self, key: &str, definition: Option<TermDefinition>) -> Option<TermDefinition> {
		self.inverse.take();
		match definition {
			Some(definition) => self.definitions.insert(key.to_owned(), definition),
			None => self.definitions.shift_remove(key),
		}
	}

	/// Sets the base IRI.
	pub fn set_base_iri(&mut self, iri: Option<IriBuf>) {
		self.base_iri = iri
	}

	/// Sets the vocabulary.
	pub fn set_vocabulary(&mut self, vocab: Option<Term>) {
		self.inverse.take();
		self.vocabulary = vocab;
	}

	/// Sets the default language.
	pub fn set_default_language(&mut self, lang: Option<String>) {
		self.inverse.take();
		self.default_language = lang;
	}

	/// Returns the inverse of this context, computed on first use.
	pub fn inverse(&self) -> &InverseContext {
		self.inverse.get_or_init(|| InverseContext::new(self))
	}

	/// Expands the given string against this context, following the
	/// `https://www.w3.org/TR/json-ld11-api/#iri-expansion` algorithm.
	///
	/// Default values for `document_relative` and `vocab` should be `false`
	/// and `true`.
	pub fn expand_iri(&self, value: &str, document_relative: bool, vocab: bool) -> Term {
		if let Ok(keyword) = Keyword::try_from(value) {
			return Term::Keyword(keyword);
		}

		if is_keyword_like(value) {
			return Term::Null;
		}

		if let Some(term_definition) = self.get(value) {
			// If active context has a term definition for value, and the
			// associated IRI mapping is a keyword, return that keyword.
			if let Some(keyword) = term_definition.keyword() {
				return Term::Keyword(keyword);
			}

			// If vocab is true and the active context has a term definition
			// for value, return the associated IRI mapping.
			if vocab {
				return term_definition.value.clone().unwrap_or(Term::Null);
			}
		}

		if let Some((prefix, suffix)) = split_compact_iri(value) {
			// If prefix is underscore (_) or suffix begins with double-forward-slash
			// (//), return value as it is already an IRI or a blank node identifier.
			if prefix == "_" || suffix.starts_with("//") {
				return Term::Id(value.to_owned());
			}

			// If active context contains a term definition for prefix having a
			// non-null IRI mapping and the prefix flag of the term definition is
			// true, return the result of concatenating the IRI mapping associated
			// with prefix and suffix.
			if let Some(term_definition) = self.get(prefix) {
				if term_definition.prefix {
					if let Some(mapping) = term_definition.iri() {
						return Term::Id(format!("{mapping}{suffix}"));
					}
				}
			}

			// If value has the form of an IRI, return value.
			if Iri::new(value).is_ok() {
				return Term::Id(value.to_owned());
			}
		}

		// If vocab is true, and active context has a vocabulary mapping, return
		// the result of concatenating the vocabulary mapping with value.
		if vocab {
			if let Some(Term::Id(mapping)) = &self.vocabulary {
				return Term::Id(format!("{mapping}{value}"));
			}
		}

		// Otherwise, if document relative is true set value to the result of
		// resolving value against the base IRI.
		if document_relative {
			if let (Ok(iri_ref), Some(base_iri)) = (IriRef::new(value), &self.base_iri) {
				return Term::Id(iri_ref.resolved(base_iri).as_str().to_owned());
			}
		}

		Term::Id(value.to_owned())
	}
}

impl PartialEq for Context {
	fn eq(&self, other: &Self) -> bool {
		self.base_iri == other.base_iri
			&& self.vocabulary == other.vocabulary
			&& self.default_language == other.default_language
			&& self.definitions == other.definitions
	}
}

/// Splits a string containing a colon at other than the first position into
/// its prefix and suffix.
pub(crate) fn split_compact_iri(value: &str) -> Option<(&str, &str)> {
	match value.find(':') {
		Some(i) if i > 0 => Some((&value[..i], &value[i + 1..])),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use static_iref::iri;

	fn context() -> Context {
		let mut context = Context::new(Some(iri!("https://example.org/base/").to_owned()));
		context.set_vocabulary(Some(Term::Id("https://vocab.example/#".to_owned())));
		context.set(
			"ex",
			Some(TermDefinition {
				value: Some(Term::Id("https://example.org/ns#".to_owned())),
				prefix: true,
				..Default::default()
			}),
		);
		context.set(
			"id",
			Some(TermDefinition {
				value: Some(Term::Keyword(Keyword::Id)),
				..Default::default()
			}),
		);
		context
	}

	#[test]
	fn expand_iri() {
		let context = context();
		assert_eq!(context.expand_iri("id", false, true), Term::Keyword(Keyword::Id));
		assert_eq!(
			context.expand_iri("ex:Foo", false, true),
			Term::Id("https://example.org/ns#Foo".to_owned())
		);
		assert_eq!(
			context.expand_iri("name", false, true),
			Term::Id("https://vocab.example/#name".to_owned())
		);
		assert_eq!(
			context.expand_iri("child", true, false),
			Term::Id("https://example.org/base/child".to_owned())
		);
		assert_eq!(
			context.expand_iri("_:b0", false, true),
			Term::Id("_:b0".to_owned())
		);
		assert_eq!(context.expand_iri("@foo", false, true), Term::Null);
	}
}
