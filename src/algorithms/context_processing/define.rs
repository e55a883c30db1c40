use hashbrown::HashMap;
use iref::Iri;

use super::ContextProcessor;
use crate::{
	algorithms::{warn, Error, Warning},
	context::{is_absolute, split_compact_iri, Context, Term, TermDefinition, Type},
	syntax::{is_keyword, is_keyword_like, Container, Keyword, Object, Value},
};

static NULL: Value = Value::Null;

fn is_gen_delim(c: char) -> bool {
	matches!(c, ':' | '/' | '?' | '#' | '[' | ']' | '@')
}

// Checks if the input term is an IRI ending with a gen-delim character, or a blank node identifier.
fn is_gen_delim_or_blank(t: &Term) -> bool {
	match t {
		Term::Id(id) => id.starts_with("_:") || id.chars().last().is_some_and(is_gen_delim),
		_ => false,
	}
}

/// Terms of a local context that are defined, or being defined.
#[derive(Default)]
struct DefinedTerms(HashMap<String, bool>);

impl DefinedTerms {
	/// Starts the definition of the given term.
	///
	/// Returns `false` if the term is already defined.
	fn begin(&mut self, term: &str) -> Result<bool, Error> {
		match self.0.get(term) {
			Some(true) => Err(Error::CyclicIriMapping(term.to_owned())),
			Some(false) => Ok(false),
			None => {
				self.0.insert(term.to_owned(), true);
				Ok(true)
			}
		}
	}

	fn end(&mut self, term: &str) {
		if let Some(pending) = self.0.get_mut(term) {
			*pending = false
		}
	}
}

/// Defines the terms of a local context.
pub(crate) struct TermDefiner<'a, 'p> {
	processor: &'p ContextProcessor<'a>,
	local_context: &'p Object,
	defined: DefinedTerms,
	protected: bool,
}

impl<'a, 'p> TermDefiner<'a, 'p> {
	pub fn new(processor: &'p ContextProcessor<'a>, local_context: &'p Object, protected: bool) -> Self {
		Self {
			processor,
			local_context,
			defined: DefinedTerms::default(),
			protected,
		}
	}

	/// Follows the `https://www.w3.org/TR/json-ld11-api/#create-term-definition` algorithm.
	pub fn define(&mut self, result: &mut Context, term: &str) -> Result<(), Error> {
		let local_context = self.local_context;
		let Some(value) = local_context.get(term) else {
			return Ok(());
		};

		if !self.defined.begin(term)? {
			return Ok(());
		}

		self.define_term(result, term, value)?;
		self.defined.end(term);
		Ok(())
	}

	fn define_term(&mut self, result: &mut Context, term: &str, value: &Value) -> Result<(), Error> {
		if term.is_empty() {
			return Err(Error::InvalidTermDefinition(String::new()));
		}

		// Only `@container: @set` and `@protected` may be specified for `@type`,
		// which this processor does not need to record.
		if term == "@type" {
			return match value {
				Value::Object(entries)
					if entries
						.keys()
						.all(|k| k == "@container" || k == "@protected") =>
				{
					Ok(())
				}
				_ => Err(Error::KeywordRedefinition(Keyword::Type)),
			};
		}

		if let Ok(keyword) = Keyword::try_from(term) {
			return Err(Error::KeywordRedefinition(keyword));
		}

		if is_keyword_like(term) {
			warn(Warning::KeywordLikeTerm(term.to_owned()));
			return Ok(());
		}

		// Initialize `previous_definition` to any existing term definition for
		// `term` in `active_context`, removing that term definition from active
		// context.
		let previous_definition = result.set(term, None);

		let (id, entries, simple_term) = match value {
			// If value is null, convert it to a map consisting of a single entry
			// whose key is @id and whose value is null.
			Value::Null => (Some(&NULL), None, false),
			// Otherwise, if value is a string, convert it to a map consisting of a
			// single entry whose key is @id and whose value is value. Set simple
			// term to true.
			Value::String(_) => (Some(value), None, true),
			Value::Object(entries) => (entries.get("@id"), Some(entries), false),
			_ => return Err(Error::InvalidTermDefinition(term.to_owned())),
		};

		let entry = |key: &str| entries.and_then(|e| e.get(key));

		let mut definition = TermDefinition {
			protected: self.protected,
			..Default::default()
		};

		// If value has an @protected entry, set the protected flag of
		// definition to its value.
		if let Some(protected) = entry("@protected") {
			definition.protected = protected
				.as_bool()
				.ok_or_else(|| Error::InvalidTermDefinition(term.to_owned()))?;
		}

		// If value contains the entry @type:
		if let Some(typ) = entry("@type") {
			let typ = typ
				.as_str()
				.ok_or_else(|| Error::InvalidTypeMapping(term.to_owned()))?;

			definition.typ = Some(match self.expand_iri(result, typ, false, true)? {
				Term::Keyword(Keyword::Id) => Type::Id,
				Term::Keyword(Keyword::Json) => Type::Json,
				Term::Keyword(Keyword::None) => Type::None,
				Term::Keyword(Keyword::Vocab) => Type::Vocab,
				Term::Id(iri) if Iri::new(&iri).is_ok() => Type::Iri(iri),
				_ => return Err(Error::InvalidTypeMapping(term.to_owned())),
			});
		}

		if entry("@reverse").is_some() {
			return Err(Error::Unsupported(Keyword::Reverse));
		}

		match id.filter(|id| id.as_str() != Some(term)) {
			// If the @id entry is null, the term is not used for IRI expansion,
			// but is retained to be able to detect future redefinitions.
			Some(Value::Null) => definition.value = None,
			Some(Value::String(id)) => {
				// If the value associated with the @id entry is not a keyword, but
				// has the form of a keyword, return.
				if !is_keyword(id) && is_keyword_like(id) {
					warn(Warning::KeywordLikeValue(id.clone()));
					return Ok(());
				}

				// Otherwise, set the IRI mapping of definition to the result of IRI
				// expanding the value associated with the @id entry.
				let mapping = match self.expand_iri(result, id, false, true)? {
					Term::Keyword(Keyword::Context) => {
						return Err(Error::InvalidKeywordAlias(term.to_owned()))
					}
					Term::Id(iri) if !is_absolute(&iri) => {
						return Err(Error::InvalidIriMapping(term.to_owned()))
					}
					Term::Null => return Err(Error::InvalidIriMapping(term.to_owned())),
					mapping => mapping,
				};

				// If term contains neither a colon (:) nor a slash (/), simple term
				// is true, and if the IRI mapping of definition is an IRI ending
				// with a gen-delim character or a blank node identifier, set the
				// prefix flag in definition to true.
				if !term.contains(':')
					&& !term.contains('/')
					&& simple_term
					&& is_gen_delim_or_blank(&mapping)
				{
					definition.prefix = true
				}

				definition.value = Some(mapping)
			}
			Some(_) => return Err(Error::InvalidIriMapping(term.to_owned())),
			None => {
				definition.value = Some(if let Some((prefix, suffix)) = split_compact_iri(term) {
					// If term is a compact IRI with a prefix that is an entry in
					// local context, a dependency has been found.
					self.define(result, prefix)?;

					// If term's prefix has a term definition in active context,
					// set the IRI mapping of definition to the result of
					// concatenating the value associated with the prefix's IRI
					// mapping and the term's suffix.
					match result.get(prefix).and_then(TermDefinition::iri) {
						Some(mapping) => Term::Id(format!("{mapping}{suffix}")),
						// Otherwise, term is an IRI or blank node identifier.
						None => Term::Id(term.to_owned()),
					}
				} else if term.contains('/') {
					// Term is a relative IRI reference.
					match result.expand_iri(term, false, true) {
						Term::Id(iri) if is_absolute(&iri) => Term::Id(iri),
						_ => return Err(Error::InvalidIriMapping(term.to_owned())),
					}
				} else if let Some(Term::Id(vocab)) = result.vocabulary() {
					// Otherwise, if active context has a vocabulary mapping, the
					// IRI mapping of definition is set to the result of
					// concatenating the value associated with the vocabulary
					// mapping and term.
					Term::Id(format!("{vocab}{term}"))
				} else {
					return Err(Error::InvalidIriMapping(term.to_owned()));
				})
			}
		}

		// If value contains the entry @container:
		if let Some(container) = entry("@container") {
			definition.container = Container::from_json(container)
				.map_err(|_| Error::InvalidContainerMapping(term.to_owned()))?;
		}

		// If value contains the entry @context, record it as the term's
		// property-scoped context, along with the base URL it is resolved
		// against.
		if let Some(context) = entry("@context") {
			definition.context = Some(context.clone());
			definition.base_url = self.processor.base_url.map(ToOwned::to_owned);
		}

		// If value contains the entry @language and does not contain the entry
		// @type:
		if let Some(language) = entry("@language") {
			if definition.typ.is_none() {
				definition.language = Some(match language {
					Value::Null => None,
					Value::String(tag) => {
						if langtag::LangTag::new(tag.as_str()).is_err() {
							warn(Warning::MalformedLanguageTag(tag.clone()))
						}

						Some(tag.clone())
					}
					_ => return Err(Error::InvalidLanguageMapping(term.to_owned())),
				})
			}
		}

		for keyword in [Keyword::Direction, Keyword::Index, Keyword::Nest] {
			if entry(keyword.into_str()).is_some() {
				warn(Warning::IgnoredKeyword(keyword))
			}
		}

		// If value contains the entry @prefix:
		if let Some(prefix) = entry("@prefix") {
			// If the term contains a colon (:) or slash (/), an invalid term
			// definition has been detected.
			if term.contains(':') || term.contains('/') {
				return Err(Error::InvalidTermDefinition(term.to_owned()));
			}

			definition.prefix = prefix
				.as_bool()
				.ok_or_else(|| Error::InvalidPrefixValue(term.to_owned()))?;

			if definition.prefix && definition.keyword().is_some() {
				return Err(Error::InvalidTermDefinition(term.to_owned()));
			}
		}

		// If override protected is false and previous definition exists and is
		// protected;
		if !self.processor.options.override_protected {
			if let Some(previous) = previous_definition {
				if previous.protected {
					// If definition is not the same as previous definition (other
					// than the value of protected), a protected term redefinition
					// error has been detected.
					definition.protected = true;
					if definition != previous {
						return Err(Error::ProtectedTermRedefinition(term.to_owned()));
					}
				}
			}
		}

		result.set(term, Some(definition));
		Ok(())
	}

	/// IRI expansion within the local context, defining the terms the value
	/// depends on first.
	fn expand_iri(
		&mut self,
		result: &mut Context,
		value: &str,
		document_relative: bool,
		vocab: bool,
	) -> Result<Term, Error> {
		if !is_keyword(value) && !is_keyword_like(value) {
			self.define(result, value)?;

			if let Some((prefix, _)) = split_compact_iri(value) {
				self.define(result, prefix)?;
			}
		}

		Ok(result.expand_iri(value, document_relative, vocab))
	}
}
