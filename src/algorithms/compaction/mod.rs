//! Compaction algorithm.
//!
//! Compacts an expanded document against a processed context: IRIs are
//! shortened into terms, compact IRIs or vocabulary-relative strings, and
//! values matching the coercion rules of the selected term are simplified.
use indexmap::IndexMap;
use mown::Mown;

use crate::{
	algorithms::{
		context_processing::{process_context, ContextProcessingOptions, RemoteContexts},
		Error,
	},
	context::{Context, TermDefinition, Type},
	syntax::{ContainerKind, Object, Value},
};

mod iri;
mod term;

pub use iri::{compact_iri, compact_keyword};
pub use term::select_term;

/// Compaction options.
#[derive(Clone, Copy, Debug)]
pub struct CompactionOptions {
	/// If set to `true`, arrays with just one element are replaced with that
	/// element during compaction. If set to `false`, all arrays will remain
	/// arrays even if they have just one element.
	///
	/// Defaults to `true`.
	pub compact_arrays: bool,

	/// If set to `true`, properties are processed by lexical order.
	/// If `false`, order is not considered in processing.
	pub ordered: bool,
}

impl Default for CompactionOptions {
	fn default() -> Self {
		Self {
			compact_arrays: true,
			ordered: false,
		}
	}
}

/// Compacts the given expanded document.
///
/// A document with a single node compacts into that node. Multiple nodes are
/// gathered under a `@graph` entry.
pub fn compact(
	expanded: &[Value],
	active_context: &Context,
	remote_contexts: &RemoteContexts,
	options: CompactionOptions,
) -> Result<Object, Error> {
	let compactor = Compactor {
		remote_contexts,
		options,
	};

	match expanded {
		[] => Ok(Object::new()),
		[Value::Object(node)] => compactor.compact_node(active_context, node),
		nodes => {
			let mut graph = Vec::with_capacity(nodes.len());
			for node in nodes {
				graph.push(compactor.compact_value(active_context, node, None)?)
			}

			let mut result = Object::new();
			result.insert(compact_keyword(active_context, "@graph"), Value::Array(graph));
			Ok(result)
		}
	}
}

/// Values gathered under the same compacted key.
enum Entry<'c> {
	Values(Option<&'c TermDefinition>, Vec<Value>),
	LanguageMap(Object),
	List(Value),
}

struct Compactor<'a> {
	remote_contexts: &'a RemoteContexts,
	options: CompactionOptions,
}

impl<'a> Compactor<'a> {
	fn scoped_context<'c>(
		&self,
		active_context: &'c Context,
		definition: Option<&TermDefinition>,
	) -> Result<Mown<'c, Context>, Error> {
		match definition.and_then(|d| d.context.as_ref().map(|c| (c, d.base_url.as_deref()))) {
			Some((context, base_url)) => Ok(Mown::Owned(process_context(
				active_context,
				context,
				self.remote_contexts,
				base_url,
				ContextProcessingOptions::default().with_override(),
			)?)),
			None => Ok(Mown::Borrowed(active_context)),
		}
	}

	fn compact_node(&self, active_context: &Context, node: &Object) -> Result<Object, Error> {
		let mut entries: Vec<(&String, &Value)> = node.iter().collect();
		if self.options.ordered {
			entries.sort_by(|(a, _), (b, _)| a.cmp(b))
		}

		let mut result = Object::new();
		let mut properties: IndexMap<String, Entry> = IndexMap::new();

		for (key, value) in entries {
			match key.as_str() {
				"@id" => {
					if let Some(id) = value.as_str() {
						result.insert(
							compact_keyword(active_context, "@id"),
							Value::String(compact_iri(active_context, id, false, true)),
						);
					}
				}
				"@type" => {
					let types: Vec<Value> = as_slice(value)
						.iter()
						.filter_map(Value::as_str)
						.map(|t| Value::String(compact_iri(active_context, t, true, true)))
						.collect();

					result.insert(
						compact_keyword(active_context, "@type"),
						self.compact_array(types, false),
					);
				}
				"@graph" | "@included" => {
					let mut items = Vec::new();
					for item in as_slice(value) {
						items.push(self.compact_value(active_context, item, None)?)
					}

					result.insert(compact_keyword(active_context, key), Value::Array(items));
				}
				"@index" => {
					result.insert(compact_keyword(active_context, key), value.clone());
				}
				"@reverse" => (),
				property => {
					self.compact_property(active_context, &mut properties, property, as_slice(value))?
				}
			}
		}

		for (key, entry) in properties {
			let value = match entry {
				Entry::Values(definition, values) => {
					let as_set = definition.is_some_and(|d| d.container.contains(ContainerKind::Set));
					self.compact_array(values, as_set)
				}
				Entry::LanguageMap(map) => Value::Object(map),
				Entry::List(list) => list,
			};

			result.insert(key, value);
		}

		Ok(result)
	}

	fn compact_array(&self, mut values: Vec<Value>, as_set: bool) -> Value {
		if values.len() == 1 && self.options.compact_arrays && !as_set {
			values.remove(0)
		} else {
			Value::Array(values)
		}
	}

	fn compact_property<'c>(
		&self,
		active_context: &'c Context,
		properties: &mut IndexMap<String, Entry<'c>>,
		iri: &str,
		values: &[Value],
	) -> Result<(), Error> {
		// An empty array is kept, under the term of the property if any.
		if values.is_empty() {
			let key = compact_iri(active_context, iri, true, true);
			properties
				.entry(key)
				.or_insert_with(|| Entry::Values(None, Vec::new()));
			return Ok(());
		}

		for value in values {
			let mut term = select_term(active_context, iri, value);

			// A property can only hold a single list under a term with a list
			// container. Other lists use the generic form.
			if let Some(t) = term {
				if value.get("@list").is_some() && properties.contains_key(t) {
					term = None
				}
			}

			let (key, definition) = match term {
				Some(term) => (term.to_owned(), active_context.get(term)),
				None => (compact_iri(active_context, iri, true, false), None),
			};

			let compacted = self.compact_value(active_context, value, definition)?;
			let container = definition.map(|d| &d.container);

			if container.is_some_and(|c| c.contains(ContainerKind::Language)) {
				let language = value
					.get("@language")
					.and_then(Value::as_str)
					.unwrap_or("@none")
					.to_owned();

				let entry = properties
					.entry(key)
					.or_insert_with(|| Entry::LanguageMap(Object::new()));

				if let Entry::LanguageMap(map) = entry {
					match map.get_mut(&language) {
						Some(Value::Array(items)) => items.push(compacted),
						Some(other) => {
							let previous = std::mem::take(other);
							*other = Value::Array(vec![previous, compacted])
						}
						None => {
							map.insert(language, compacted);
						}
					}
				}
			} else if container.is_some_and(|c| c.contains(ContainerKind::List)) {
				properties.insert(key, Entry::List(compacted));
			} else {
				let entry = properties
					.entry(key)
					.or_insert_with(|| Entry::Values(definition, Vec::new()));

				if let Entry::Values(_, items) = entry {
					items.push(compacted)
				}
			}
		}

		Ok(())
	}

	fn compact_value(
		&self,
		active_context: &Context,
		value: &Value,
		definition: Option<&TermDefinition>,
	) -> Result<Value, Error> {
		let Value::Object(object) = value else {
			return Ok(value.clone());
		};

		// List objects.
		if let Some(list) = object.get("@list") {
			let mut items = Vec::new();
			for item in as_slice(list) {
				items.push(self.compact_value(active_context, item, definition)?)
			}

			if definition.is_some_and(|d| d.container.contains(ContainerKind::List)) {
				return Ok(Value::Array(items));
			}

			let mut result = Object::new();
			result.insert(compact_keyword(active_context, "@list"), Value::Array(items));
			return Ok(Value::Object(result));
		}

		// Value objects.
		if object.contains_key("@value") {
			return Ok(compact_value_object(active_context, object, definition));
		}

		// Node references.
		if let (1, Some(id)) = (object.len(), object.get("@id").and_then(Value::as_str)) {
			match definition.and_then(|d| d.typ.as_ref()) {
				Some(Type::Id) => {
					return Ok(Value::String(compact_iri(active_context, id, false, true)))
				}
				Some(Type::Vocab) => {
					return Ok(Value::String(compact_iri(active_context, id, true, true)))
				}
				_ => (),
			}
		}

		// Node objects, in the scope of the property.
		let active_context = self.scoped_context(active_context, definition)?;
		Ok(Value::Object(self.compact_node(&active_context, object)?))
	}
}

fn as_slice(value: &Value) -> &[Value] {
	match value {
		Value::Array(items) => items.as_slice(),
		other => std::slice::from_ref(other),
	}
}

/// Value compaction, following
/// `https://www.w3.org/TR/json-ld11-api/#value-compaction`.
fn compact_value_object(
	active_context: &Context,
	object: &Object,
	definition: Option<&TermDefinition>,
) -> Value {
	let value = &object["@value"];
	let typ = object.get("@type").and_then(Value::as_str);
	let language = object.get("@language").and_then(Value::as_str);
	let simple = object
		.keys()
		.all(|k| matches!(k.as_str(), "@value" | "@type" | "@language"));

	let term_type = definition.and_then(|d| d.typ.as_ref());
	let term_language = match definition.and_then(|d| d.language.as_ref()) {
		Some(language) => language.as_deref(),
		None => active_context.default_language(),
	};

	let compactable = simple
		&& match (typ, language) {
			(Some(typ), None) => term_type.and_then(Type::as_iri) == Some(typ),
			(None, Some(language)) => {
				definition.is_some_and(|d| d.container.contains(ContainerKind::Language))
					|| (term_type.is_none()
						&& term_language.is_some_and(|l| l.eq_ignore_ascii_case(language)))
			}
			(None, None) => {
				term_type.is_none() && (!value.is_string() || term_language.is_none())
			}
			(Some(_), Some(_)) => false,
		};

	if compactable {
		return value.clone();
	}

	let mut result = Object::new();
	for (key, entry) in object {
		let entry = match key.as_str() {
			"@type" => match entry.as_str() {
				Some(typ) => Value::String(compact_iri(active_context, typ, true, true)),
				None => entry.clone(),
			},
			_ => entry.clone(),
		};

		result.insert(compact_keyword(active_context, key), entry);
	}

	Value::Object(result)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::algorithms::{
		expansion::{expand, ExpansionOptions},
	};
	use serde_json::json;

	fn context() -> Context {
		process_context(
			&Context::default(),
			&json!({
				"@vocab": "_:",
				"ex": "https://example.org/ns#",
				"xsd": "http://www.w3.org/2001/XMLSchema#",
				"id": "@id",
				"type": "@type",
				"Note": "ex:Note",
				"name": "ex:name",
				"nameMap": { "@id": "ex:name", "@container": "@language" },
				"to": { "@id": "ex:to", "@type": "@id" },
				"items": { "@id": "ex:items", "@type": "@id" },
				"orderedItems": { "@id": "ex:items", "@type": "@id", "@container": "@list" },
				"published": { "@id": "ex:published", "@type": "xsd:dateTime" }
			}),
			&RemoteContexts::new(),
			None,
			ContextProcessingOptions::default(),
		)
		.unwrap()
	}

	fn compact_expanded(expanded: Value) -> Object {
		compact(
			&[expanded],
			&context(),
			&RemoteContexts::new(),
			CompactionOptions::default(),
		)
		.unwrap()
	}

	#[test]
	fn compact_node() {
		let compacted = compact_expanded(json!({
			"@id": "https://example.org/1",
			"@type": ["https://example.org/ns#Note"],
			"https://example.org/ns#name": [
				{ "@value": "plain" },
				{ "@value": "hello", "@language": "en" },
				{ "@value": "salut", "@language": "fr" }
			],
			"https://example.org/ns#to": [{ "@id": "https://example.org/a" }],
			"https://example.org/ns#published": [{
				"@value": "2020-01-01T00:00:00Z",
				"@type": "http://www.w3.org/2001/XMLSchema#dateTime"
			}],
			"https://example.org/ns#size": [{
				"@value": "10",
				"@type": "http://www.w3.org/2001/XMLSchema#integer"
			}],
			"_:extra": [{ "@value": 3 }]
		}));

		assert_eq!(
			Value::Object(compacted),
			json!({
				"id": "https://example.org/1",
				"type": "Note",
				"name": "plain",
				"nameMap": { "en": "hello", "fr": "salut" },
				"to": "https://example.org/a",
				"published": "2020-01-01T00:00:00Z",
				"ex:size": { "@value": "10", "type": "xsd:integer" },
				"extra": 3
			})
		);
	}

	#[test]
	fn compact_lists_and_references() {
		let compacted = compact_expanded(json!({
			"https://example.org/ns#items": [
				{ "@list": [{ "@id": "https://example.org/a" }, { "@id": "https://example.org/b" }] },
				{ "@id": "https://example.org/c" },
				{ "@id": "https://example.org/d", "https://example.org/ns#name": [{ "@value": "d" }] }
			]
		}));

		assert_eq!(
			Value::Object(compacted),
			json!({
				"orderedItems": ["https://example.org/a", "https://example.org/b"],
				"items": [
					"https://example.org/c",
					{ "id": "https://example.org/d", "name": "d" }
				]
			})
		);
	}

	#[test]
	fn round_trip() {
		let document = json!({
			"id": "https://example.org/1",
			"type": "Note",
			"nameMap": { "en": "hello", "fr": "salut" },
			"to": ["https://example.org/a", "https://example.org/b"],
			"orderedItems": ["https://example.org/c"],
			"published": "2020-01-01T00:00:00Z"
		});

		let context = context();
		let remote = RemoteContexts::new();
		let expanded = expand(&document, &context, &remote, ExpansionOptions::default()).unwrap();
		let compacted = compact(&expanded, &context, &remote, CompactionOptions::default()).unwrap();
		assert_eq!(Value::Object(compacted), document);
	}

	#[test]
	fn multiple_nodes() {
		let compacted = compact(
			&[
				json!({ "@id": "https://example.org/1" }),
				json!({ "@id": "https://example.org/2" }),
			],
			&context(),
			&RemoteContexts::new(),
			CompactionOptions::default(),
		)
		.unwrap();

		assert_eq!(
			Value::Object(compacted),
			json!({ "@graph": [{ "id": "https://example.org/1" }, { "id": "https://example.org/2" }] })
		);
	}
}
