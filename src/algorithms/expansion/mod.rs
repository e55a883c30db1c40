//! Expansion algorithm.
//!
//! Follows `https://www.w3.org/TR/json-ld11-api/#expansion-algorithm` for the
//! subset of JSON-LD 1.1 used by linked-data vocabularies: keyword aliases,
//! type coercion, language maps, list containers, nested node objects,
//! embedded and property-scoped contexts. Reverse properties, nesting and
//! index/id/type maps are rejected.
use crate::{
	algorithms::{context_processing::RemoteContexts, Error},
	context::Context,
	syntax::Value,
};

mod element;
mod value;

pub use value::expand_value;

/// Expanded document: an array of node objects.
pub type ExpandedDocument = Vec<Value>;

/// Key expansion policy.
///
/// The default behavior of the expansion algorithm is to drop keys that
/// cannot be expanded into an IRI or a blank node identifier, that is keys
/// that are not defined in the context, in the absence of a vocabulary
/// mapping (`@vocab`), when they do not contain a `:` character.
///
/// Sometimes, it is preferable to keep undefined keys in the expanded
/// document, or to forbid them completely by raising an error.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ExpansionPolicy {
	/// Relaxed policy.
	///
	/// Undefined keys are kept in the expanded document as they are.
	Relaxed,

	/// Standard policy.
	///
	/// Undefined keys are dropped, with a warning.
	#[default]
	Standard,

	/// Strict policy.
	///
	/// Undefined keys raise an error.
	Strict,
}

/// Expansion options.
#[derive(Clone, Copy, Default, Debug)]
pub struct ExpansionOptions {
	/// Term expansion policy.
	///
	/// Default is `ExpansionPolicy::Standard`.
	pub policy: ExpansionPolicy,

	/// If set to true, input document entries are processed lexicographically.
	/// If false, order is not considered in processing.
	pub ordered: bool,

	/// Keep top-level node objects that only contain an `@id` entry.
	///
	/// They are dropped by default.
	pub keep_free_floating_nodes: bool,
}

impl ExpansionOptions {
	pub fn unordered(self) -> Self {
		Self {
			ordered: false,
			..self
		}
	}
}

/// Expands the given document.
///
/// `active_context` is the context in which the document is interpreted
/// before its own `@context` entries are applied (the "expand context").
/// Every remote context referenced by the document must be present in
/// `remote_contexts`.
pub fn expand(
	document: &Value,
	active_context: &Context,
	remote_contexts: &RemoteContexts,
	options: ExpansionOptions,
) -> Result<ExpandedDocument, Error> {
	check_depth(document)?;

	let expander = element::Expander {
		remote_contexts,
		options,
	};

	let mut result = expander.expand_element(active_context, None, document)?;

	// If, after the above algorithm is run, the result is a map that contains
	// only an @graph entry, set the result to the value of @graph's value.
	if let [Value::Object(object)] = result.as_mut_slice() {
		if object.len() == 1 {
			if let Some(Value::Array(graph)) = object.get_mut("@graph") {
				result = std::mem::take(graph);
			}
		}
	}

	Ok(result)
}

/// Maximum nesting of arrays and objects in an expanded document.
///
/// Expansion and import recurse on the document structure.
pub const MAX_DEPTH: usize = 256;

/// Checks that the document does not nest deeper than [`MAX_DEPTH`].
pub fn check_depth(document: &Value) -> Result<(), Error> {
	let mut stack = vec![(document, 0)];
	while let Some((value, depth)) = stack.pop() {
		if depth > MAX_DEPTH {
			return Err(Error::DepthLimitExceeded(MAX_DEPTH));
		}

		match value {
			Value::Array(items) => stack.extend(items.iter().map(|item| (item, depth + 1))),
			Value::Object(object) => stack.extend(object.values().map(|item| (item, depth + 1))),
			_ => (),
		}
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::algorithms::context_processing::{process_context, ContextProcessingOptions};
	use serde_json::json;

	fn expand_with(context: Value, document: Value) -> Result<ExpandedDocument, Error> {
		let remote = RemoteContexts::new();
		let active_context = process_context(
			&Context::default(),
			&context,
			&remote,
			None,
			ContextProcessingOptions::default(),
		)?;

		expand(&document, &active_context, &remote, ExpansionOptions::default())
	}

	fn context() -> Value {
		json!({
			"ex": "https://example.org/ns#",
			"xsd": "http://www.w3.org/2001/XMLSchema#",
			"id": "@id",
			"type": "@type",
			"Note": "ex:Note",
			"name": "ex:name",
			"nameMap": { "@id": "ex:name", "@container": "@language" },
			"to": { "@id": "ex:to", "@type": "@id" },
			"items": { "@id": "ex:items", "@container": "@list" },
			"published": { "@id": "ex:published", "@type": "xsd:dateTime" }
		})
	}

	#[test]
	fn expand_node() {
		let expanded = expand_with(
			context(),
			json!({
				"type": "Note",
				"id": "https://example.org/1",
				"name": "hello",
				"to": ["https://example.org/a", "https://example.org/b"],
				"published": "2020-01-01T00:00:00Z",
				"unknown": "dropped"
			}),
		)
		.unwrap();

		assert_eq!(
			expanded,
			vec![json!({
				"@type": ["https://example.org/ns#Note"],
				"@id": "https://example.org/1",
				"https://example.org/ns#name": [{ "@value": "hello" }],
				"https://example.org/ns#to": [
					{ "@id": "https://example.org/a" },
					{ "@id": "https://example.org/b" }
				],
				"https://example.org/ns#published": [{
					"@value": "2020-01-01T00:00:00Z",
					"@type": "http://www.w3.org/2001/XMLSchema#dateTime"
				}]
			})]
		);
	}

	#[test]
	fn language_maps_and_lists() {
		let expanded = expand_with(
			context(),
			json!({
				"nameMap": { "en": "hello", "fr": ["salut", "bonjour"] },
				"items": ["a", { "name": "b" }]
			}),
		)
		.unwrap();

		assert_eq!(
			expanded,
			vec![json!({
				"https://example.org/ns#name": [
					{ "@value": "hello", "@language": "en" },
					{ "@value": "salut", "@language": "fr" },
					{ "@value": "bonjour", "@language": "fr" }
				],
				"https://example.org/ns#items": [{
					"@list": [
						{ "@value": "a" },
						{ "https://example.org/ns#name": [{ "@value": "b" }] }
					]
				}]
			})]
		);
	}

	#[test]
	fn embedded_context() {
		let expanded = expand_with(
			json!({}),
			json!({
				"@context": { "@vocab": "https://example.org/ns#", "@language": "en" },
				"name": "hello",
				"size": 3
			}),
		)
		.unwrap();

		assert_eq!(
			expanded,
			vec![json!({
				"https://example.org/ns#name": [{ "@value": "hello", "@language": "en" }],
				"https://example.org/ns#size": [{ "@value": 3 }]
			})]
		);
	}

	#[test]
	fn free_floating_values() {
		assert!(expand_with(context(), json!({})).unwrap().is_empty());
		assert!(expand_with(context(), json!(null)).unwrap().is_empty());
		assert!(expand_with(context(), json!({ "id": "https://example.org/1" }))
			.unwrap()
			.is_empty());
		assert!(expand_with(context(), json!("hello")).unwrap().is_empty());

		let remote = RemoteContexts::new();
		let active_context = process_context(
			&Context::default(),
			&context(),
			&remote,
			None,
			ContextProcessingOptions::default(),
		)
		.unwrap();
		let expanded = expand(
			&json!({ "id": "https://example.org/1" }),
			&active_context,
			&remote,
			ExpansionOptions {
				keep_free_floating_nodes: true,
				..Default::default()
			},
		)
		.unwrap();
		assert_eq!(expanded, vec![json!({ "@id": "https://example.org/1" })]);
	}

	#[test]
	fn invalid_values() {
		assert!(matches!(
			expand_with(context(), json!({ "id": 1 })),
			Err(Error::InvalidIdValue)
		));
		assert!(matches!(
			expand_with(context(), json!({ "name": { "@value": 1, "@language": "en" } })),
			Err(Error::InvalidLanguageTaggedValue)
		));
		assert!(matches!(
			expand_with(context(), json!({ "nameMap": { "en": 1 } })),
			Err(Error::InvalidLanguageMapValue)
		));
	}

	#[test]
	fn strict_policy() {
		let remote = RemoteContexts::new();
		let result = expand(
			&json!({ "undefined": 1 }),
			&Context::default(),
			&remote,
			ExpansionOptions {
				policy: ExpansionPolicy::Strict,
				..Default::default()
			},
		);
		assert!(matches!(result, Err(Error::KeyExpansionFailed(_))));
	}

	#[test]
	fn depth_limit() {
		let mut document = json!("leaf");
		for _ in 0..MAX_DEPTH + 1 {
			document = json!({ "name": document });
		}

		assert!(matches!(
			expand_with(context(), document),
			Err(Error::DepthLimitExceeded(MAX_DEPTH))
		));

		let mut document = json!("leaf");
		for _ in 0..16 {
			document = json!({ "ex:child": document });
		}
		assert!(expand_with(context(), document).is_ok());
	}
}
