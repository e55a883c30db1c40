//! Context processing algorithm.
//!
//! Follows `https://www.w3.org/TR/json-ld11-api/#context-processing-algorithm`,
//! except that remote contexts are read from a [`RemoteContexts`] cache
//! filled beforehand.
use iref::{Iri, IriBuf, IriRef};

use crate::{
	algorithms::{warn, Error, Warning},
	context::{is_absolute, Context, Term},
	syntax::{Keyword, Object, Value},
};

mod define;
mod remote;
mod stack;

use define::TermDefiner;
pub use remote::{resolve_context_url, RemoteContext, RemoteContexts};
pub use stack::ProcessingStack;

/// Options of the context processing algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct ContextProcessingOptions {
	/// Override protected definitions.
	pub override_protected: bool,
}

impl ContextProcessingOptions {
	/// Return the same set of options, but with `override_protected` set to `true`.
	pub fn with_override(&self) -> ContextProcessingOptions {
		let mut opt = *self;
		opt.override_protected = true;
		opt
	}

	/// Return the same set of options, but with `override_protected` set to `false`.
	pub fn with_no_override(&self) -> ContextProcessingOptions {
		let mut opt = *self;
		opt.override_protected = false;
		opt
	}
}

/// Processes the `local_context` on top of `active_context`.
pub fn process_context(
	active_context: &Context,
	local_context: &Value,
	remote_contexts: &RemoteContexts,
	base_url: Option<&Iri>,
	options: ContextProcessingOptions,
) -> Result<Context, Error> {
	let processor = ContextProcessor {
		remote_contexts,
		stack: ProcessingStack::new(),
		base_url,
		options,
	};

	processor.process(active_context, local_context)
}

pub(crate) struct ContextProcessor<'a> {
	remote_contexts: &'a RemoteContexts,
	stack: ProcessingStack,
	base_url: Option<&'a Iri>,
	options: ContextProcessingOptions,
}

impl<'a> ContextProcessor<'a> {
	fn process(&self, active_context: &Context, local_context: &Value) -> Result<Context, Error> {
		// Initialize result to the result of cloning active context.
		let mut result = active_context.clone();

		let contexts = match local_context {
			Value::Array(items) => items.as_slice(),
			other => std::slice::from_ref(other),
		};

		for context in contexts {
			match context {
				// If context is null:
				Value::Null => {
					// If `override_protected` is false and active context contains any
					// protected term definitions, an invalid context nullification has
					// been detected and processing is aborted.
					if !self.options.override_protected && result.has_protected_items() {
						return Err(Error::InvalidContextNullification);
					}

					// Otherwise, initialize result as a newly-initialized active context,
					// setting `previous_context` only if `propagate` is `false`.
					result = Context::new(active_context.original_base_url().map(ToOwned::to_owned))
				}
				// If context is a string,
				Value::String(url) => {
					let url = resolve_context_url(url, self.base_url)?;

					let mut stack = self.stack.clone();
					if !stack.push(url.clone()) {
						return Err(Error::RecursiveContextInclusion(url.to_string()));
					}

					let remote = self
						.remote_contexts
						.get(&url)
						.ok_or_else(|| Error::ContextNotLoaded(url.to_string()))?;

					let processor = ContextProcessor {
						remote_contexts: self.remote_contexts,
						stack,
						base_url: Some(remote.base_url.as_iri()),
						options: self.options,
					};

					result = processor.process(&result, &remote.context)?;
				}
				// If context is a map, process its entries.
				Value::Object(definition) => self.process_definition(&mut result, definition)?,
				// Otherwise, an invalid local context error has been detected.
				_ => return Err(Error::InvalidLocalContext),
			}
		}

		Ok(result)
	}

	fn process_definition(&self, result: &mut Context, definition: &Object) -> Result<(), Error> {
		// If context has an @version entry, its value must be the number 1.1.
		if let Some(version) = definition.get("@version") {
			if version.as_f64() != Some(1.1) {
				return Err(Error::InvalidVersionValue);
			}
		}

		if definition.contains_key("@import") {
			return Err(Error::Unsupported(Keyword::Import));
		}

		// If context has an @base entry and remote contexts is empty, i.e., the
		// currently being processed context is not a remote context:
		if let Some(value) = definition.get("@base") {
			if self.stack.is_empty() {
				let base_iri = match value {
					Value::Null => None,
					Value::String(value) => Some(resolve_base_iri(value, result.base_iri())?),
					_ => return Err(Error::InvalidBaseIri),
				};

				result.set_base_iri(base_iri)
			}
		}

		// If context has an @vocab entry:
		if let Some(value) = definition.get("@vocab") {
			match value {
				Value::Null => result.set_vocabulary(None),
				Value::String(value) => {
					// Otherwise, if value is an IRI or blank node identifier, the
					// vocabulary mapping of result is set to the result of IRI
					// expanding value using true for document relative.
					match result.expand_iri(value, true, true) {
						Term::Id(vocab) if vocab.starts_with("_:") || is_absolute(&vocab) => {
							result.set_vocabulary(Some(Term::Id(vocab)))
						}
						_ => return Err(Error::InvalidVocabMapping),
					}
				}
				_ => return Err(Error::InvalidVocabMapping),
			}
		}

		// If context has an @language entry:
		if let Some(value) = definition.get("@language") {
			match value {
				Value::Null => result.set_default_language(None),
				Value::String(tag) => {
					if langtag::LangTag::new(tag.as_str()).is_err() {
						warn(Warning::MalformedLanguageTag(tag.clone()))
					}

					result.set_default_language(Some(tag.clone()))
				}
				_ => return Err(Error::InvalidDefaultLanguage),
			}
		}

		for keyword in [Keyword::Direction, Keyword::Propagate] {
			if definition.contains_key(keyword.into_str()) {
				warn(Warning::IgnoredKeyword(keyword))
			}
		}

		let protected = match definition.get("@protected") {
			None => false,
			Some(value) => value.as_bool().ok_or(Error::InvalidLocalContext)?,
		};

		// Create a map defined to keep track of whether or not a term has already
		// been defined or is currently being defined during recursion.
		let mut definer = TermDefiner::new(self, definition, protected);

		// For each key-value pair in context where key is not a keyword used for
		// the context itself, invoke the Create Term Definition algorithm.
		for key in definition.keys() {
			match key.as_str() {
				"@base" | "@direction" | "@import" | "@language" | "@propagate" | "@protected"
				| "@version" | "@vocab" => (),
				term => definer.define(result, term)?,
			}
		}

		Ok(())
	}
}

fn resolve_base_iri(value: &str, current: Option<&Iri>) -> Result<IriBuf, Error> {
	if let Ok(iri) = Iri::new(value) {
		return Ok(iri.to_owned());
	}

	match (IriRef::new(value), current) {
		(Ok(iri_ref), Some(current)) => Ok(iri_ref.resolved(current)),
		_ => Err(Error::InvalidBaseIri),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		context::Type,
		syntax::{Container, ContainerKind},
	};
	use serde_json::json;

	fn process(local: Value) -> Result<Context, Error> {
		process_context(
			&Context::default(),
			&local,
			&RemoteContexts::new(),
			None,
			ContextProcessingOptions::default(),
		)
	}

	#[test]
	fn term_definitions() {
		let context = process(json!({
			"@vocab": "_:",
			"ex": "https://example.org/ns#",
			"id": "@id",
			"Foo": "ex:Foo",
			"bar": { "@id": "ex:bar", "@type": "@id" },
			"tags": { "@id": "ex:tags", "@container": "@list" },
			"nameMap": { "@id": "ex:name", "@container": "@language" },
			"size": { "@id": "ex:size", "@type": "ex:Size" },
			"label": { "@id": "ex:label", "@language": "fr" },
			"hidden": null
		}))
		.unwrap();

		assert_eq!(context.vocabulary(), Some(&Term::Id("_:".to_owned())));
		assert!(context.get("ex").unwrap().prefix);
		assert!(!context.get("Foo").unwrap().prefix);
		assert_eq!(context.get("id").unwrap().keyword(), Some(Keyword::Id));
		assert_eq!(context.get("Foo").unwrap().iri(), Some("https://example.org/ns#Foo"));

		let bar = context.get("bar").unwrap();
		assert_eq!(bar.iri(), Some("https://example.org/ns#bar"));
		assert_eq!(bar.typ, Some(Type::Id));

		assert_eq!(
			context.get("tags").unwrap().container,
			Container::from(ContainerKind::List)
		);
		assert!(context
			.get("nameMap")
			.unwrap()
			.container
			.contains(ContainerKind::Language));
		assert_eq!(
			context.get("size").unwrap().typ,
			Some(Type::Iri("https://example.org/ns#Size".to_owned()))
		);
		assert_eq!(
			context.get("label").unwrap().language,
			Some(Some("fr".to_owned()))
		);
		assert_eq!(context.get("hidden").unwrap().value, None);
		assert_eq!(
			context.expand_iri("unknown", false, true),
			Term::Id("_:unknown".to_owned())
		);
	}

	#[test]
	fn contexts_are_merged_in_order() {
		let context = process(json!([
			{ "name": "https://example.org/a#name" },
			{ "name": "https://example.org/b#name" }
		]))
		.unwrap();
		assert_eq!(context.get("name").unwrap().iri(), Some("https://example.org/b#name"));

		let context = process(json!([{ "name": "https://example.org/a#name" }, null])).unwrap();
		assert!(context.is_empty());
	}

	#[test]
	fn invalid_definitions() {
		assert!(matches!(
			process(json!({"@id": "https://example.org/"})),
			Err(Error::KeywordRedefinition(Keyword::Id))
		));
		assert!(matches!(
			process(json!({"a": "b", "b": "a"})),
			Err(Error::CyclicIriMapping(_))
		));
		assert!(matches!(
			process(json!({"name": "relative"})),
			Err(Error::InvalidIriMapping(_))
		));
		assert!(matches!(process(json!(42)), Err(Error::InvalidLocalContext)));
		assert!(matches!(
			process(json!("https://example.org/not-loaded")),
			Err(Error::ContextNotLoaded(_))
		));
	}

	#[test]
	fn protected_terms() {
		let protected = process(json!({
			"@protected": true,
			"name": "https://example.org/name"
		}))
		.unwrap();

		let redefine = json!({ "name": "https://example.org/other" });
		let result = process_context(
			&protected,
			&redefine,
			&RemoteContexts::new(),
			None,
			ContextProcessingOptions::default(),
		);
		assert!(matches!(result, Err(Error::ProtectedTermRedefinition(_))));

		let result = process_context(
			&protected,
			&redefine,
			&RemoteContexts::new(),
			None,
			ContextProcessingOptions::default().with_override(),
		)
		.unwrap();
		assert_eq!(result.get("name").unwrap().iri(), Some("https://example.org/other"));
	}
}
