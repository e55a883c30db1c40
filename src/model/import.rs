//! Expanded document to object graph.
use chrono::DateTime;
use indexmap::IndexMap;
use serde_json::Number;

use super::{Kind, Node, Value, Values};
use crate::{
	schema::{self, ValueKind},
	syntax::{self, Object},
	vocab::xsd,
	LanguageValueBuilder,
};

/// Builds a node from an expanded node object.
///
/// Nested node objects become nested nodes, node references become
/// [`Value::Id`], and the language-tagged strings of a property are
/// gathered into [`Value::Language`]s, a new one being started whenever a
/// tag repeats.
pub fn node_from_expanded(object: &Object) -> Node {
	let mut id = None;
	let mut types = Vec::new();
	let mut properties = IndexMap::new();

	for (key, value) in object {
		match key.as_str() {
			"@id" => id = value.as_str().map(ToOwned::to_owned),
			"@type" => types.extend(
				as_slice(value)
					.iter()
					.filter_map(syntax::Value::as_str)
					.map(ToOwned::to_owned),
			),
			keyword if keyword.starts_with('@') => {
				log::debug!("ignoring `{keyword}` entry on import")
			}
			property => {
				properties.insert(property.to_owned(), import_values(property, as_slice(value)));
			}
		}
	}

	let has_href = properties.contains_key(HREF);
	Node {
		kind: Kind::of(types.iter().map(String::as_str), has_href),
		id,
		types,
		properties,
		environment: None,
	}
}

const HREF: &str = concat!("https://www.w3.org/ns/activitystreams#", "href");

fn as_slice(value: &syntax::Value) -> &[syntax::Value] {
	match value {
		syntax::Value::Array(items) => items,
		other => std::slice::from_ref(other),
	}
}

/// Values of a property being imported.
#[derive(Default)]
struct Items {
	items: Vec<Item>,
	ordered: bool,

	/// Index of the language value gathering the next language-tagged
	/// strings.
	language: Option<usize>,
}

enum Item {
	Value(Value),
	Language(LanguageValueBuilder),
}

impl Items {
	fn push(&mut self, value: Value) {
		self.items.push(Item::Value(value))
	}

	/// Adds a string to the current language value, or starts a new one if
	/// the current value already has an entry for `tag`.
	fn add_string(&mut self, tag: &str, value: &str) {
		if let Some(Item::Language(builder)) = self.language.and_then(|i| self.items.get_mut(i)) {
			if !builder.has(tag) {
				builder.set(tag, value);
				return;
			}
		}

		let mut builder = LanguageValueBuilder::new();
		builder.set(tag, value);
		self.language = Some(self.items.len());
		self.items.push(Item::Language(builder))
	}

	fn into_values(self) -> Values {
		let mut values: Values = self
			.items
			.into_iter()
			.map(|item| match item {
				Item::Value(value) => value,
				Item::Language(builder) => Value::Language(builder.into()),
			})
			.collect();
		values.set_ordered(self.ordered);
		values
	}
}

fn import_values(property: &str, values: &[syntax::Value]) -> Values {
	let kind = schema::by_iri(property).map(|s| s.kind);
	let mut items = Items::default();
	import_items(kind, values, &mut items);
	items.into_values()
}

fn import_items(kind: Option<ValueKind>, values: &[syntax::Value], items: &mut Items) {
	for value in values {
		let Some(object) = value.as_object() else {
			continue;
		};

		if let Some(list) = object.get("@list") {
			items.ordered = true;
			import_items(kind, as_slice(list), items);
			continue;
		}

		match object.get("@value") {
			Some(literal) => {
				let tag = object.get("@language").and_then(syntax::Value::as_str);
				match (tag, literal.as_str()) {
					(Some(tag), Some(s)) => items.add_string(tag, s),
					(None, Some(s))
						if kind == Some(ValueKind::Language) && !object.contains_key("@type") =>
					{
						items.add_string("", s)
					}
					_ => items.push(import_literal(object, literal)),
				}
			}
			None => {
				let reference = match (object.len(), object.get("@id")) {
					(1, Some(syntax::Value::String(id))) => Some(id),
					_ => None,
				};

				items.push(match reference {
					Some(id) => Value::Id(id.clone()),
					None => Value::from(node_from_expanded(object)),
				})
			}
		}
	}
}

/// Imports the `literal` value of a value object.
fn import_literal(object: &Object, literal: &syntax::Value) -> Value {
	let datatype = object.get("@type").and_then(syntax::Value::as_str);

	match (datatype, literal) {
		(None | Some(xsd::STRING), syntax::Value::String(s)) => Value::String(s.clone()),
		(None | Some(xsd::BOOLEAN), syntax::Value::Bool(b)) => Value::Boolean(*b),
		(_, syntax::Value::Number(n)) if datatype.map_or(true, is_numeric) => Value::Number(n.clone()),
		(Some(xsd::DATE_TIME), syntax::Value::String(s)) => match DateTime::parse_from_rfc3339(s) {
			Ok(date) => Value::DateTime(date),
			Err(_) => typed(s.clone(), xsd::DATE_TIME),
		},
		(Some(datatype), syntax::Value::String(s)) if is_numeric(datatype) => {
			match s.parse::<Number>() {
				Ok(n) => Value::Number(n),
				Err(_) => typed(s.clone(), datatype),
			}
		}
		(Some(datatype), syntax::Value::String(s)) => typed(s.clone(), datatype),
		(Some(datatype), other) => typed(other.to_string(), datatype),
		(None, other) => Value::String(other.to_string()),
	}
}

fn typed(value: String, datatype: &str) -> Value {
	Value::Typed {
		value,
		datatype: datatype.to_owned(),
	}
}

fn is_numeric(datatype: &str) -> bool {
	matches!(
		datatype,
		xsd::INTEGER | xsd::NON_NEGATIVE_INTEGER | xsd::FLOAT | xsd::DOUBLE
	)
}

/// Imports the first node of an expanded document.
///
/// Returns `None` if the document has no node.
pub fn import_document(expanded: &[syntax::Value]) -> Option<Node> {
	expanded
		.iter()
		.find_map(syntax::Value::as_object)
		.map(node_from_expanded)
}
