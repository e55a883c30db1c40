//! Object graph to expanded document.
use serde_json::json;

use super::{Node, Value, Values};
use crate::{
	schema::{self, Container},
	syntax::{self, Object},
	vocab::xsd,
};

/// Converts a node into an expanded node object.
pub fn node_to_expanded(node: &Node) -> Object {
	let mut result = Object::new();

	if let Some(id) = node.id() {
		result.insert("@id".to_owned(), id.into());
	}

	if !node.types.is_empty() {
		result.insert(
			"@type".to_owned(),
			syntax::Value::Array(node.types.iter().map(|t| t.as_str().into()).collect()),
		);
	}

	for (property, values) in &node.properties {
		if values.is_empty() {
			continue;
		}

		result.insert(property.clone(), export_values(property, values));
	}

	result
}

fn export_values(property: &str, values: &Values) -> syntax::Value {
	let schema = schema::by_iri(property);
	let datatype = schema.and_then(|s| s.kind.datatype());

	let mut items = Vec::with_capacity(values.len());
	for value in values {
		export_value(value, datatype, &mut items)
	}

	let ordered = values.is_ordered() || schema.is_some_and(|s| s.container == Container::List);
	if ordered {
		syntax::Value::Array(vec![json!({ "@list": items })])
	} else {
		syntax::Value::Array(items)
	}
}

/// Exports a value, adding the `datatype` expected by the property to
/// untyped literals.
fn export_value(value: &Value, datatype: Option<&str>, items: &mut Vec<syntax::Value>) {
	let item = match value {
		Value::Id(id) => json!({ "@id": id }),
		Value::Node(node) => syntax::Value::Object(node_to_expanded(node)),
		Value::Language(language) => {
			for (tag, s) in language.iter() {
				items.push(if tag.is_empty() {
					json!({ "@value": s })
				} else {
					json!({ "@value": s, "@language": tag })
				})
			}

			return;
		}
		Value::String(s) => literal(s.as_str().into(), datatype),
		Value::Number(n) => literal(n.clone().into(), datatype),
		Value::Boolean(b) => json!({ "@value": b }),
		Value::DateTime(date) => json!({ "@value": date.to_rfc3339(), "@type": xsd::DATE_TIME }),
		Value::Typed { value, datatype } => json!({ "@value": value, "@type": datatype }),
	};

	items.push(item)
}

fn literal(value: syntax::Value, datatype: Option<&str>) -> syntax::Value {
	match datatype {
		Some(datatype) => json!({ "@value": value, "@type": datatype }),
		None => json!({ "@value": value }),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{model::node_from_expanded, vocab::as2::types, Builder, LanguageValue};

	#[test]
	fn export_node() {
		let node = Builder::note()
			.id("https://example.org/1")
			.name(LanguageValue::builder().set("en", "hello").set("fr", "salut").get())
			.to(["https://example.org/a", "https://example.org/b"])
			.width(10)
			.get();

		let expanded = node_to_expanded(&node);
		assert_eq!(
			syntax::Value::Object(expanded),
			json!({
				"@id": "https://example.org/1",
				"@type": [types::NOTE],
				"https://www.w3.org/ns/activitystreams#name": [
					{ "@value": "hello", "@language": "en" },
					{ "@value": "salut", "@language": "fr" }
				],
				"https://www.w3.org/ns/activitystreams#to": [
					{ "@id": "https://example.org/a" },
					{ "@id": "https://example.org/b" }
				],
				"https://www.w3.org/ns/activitystreams#width": [
					{ "@value": 10, "@type": xsd::NON_NEGATIVE_INTEGER }
				]
			})
		);
	}

	#[test]
	fn export_import() {
		let node = Builder::ordered_collection()
			.ordered_items([
				Value::id("https://example.org/a"),
				Value::id("https://example.org/b"),
			])
			.total_items(2)
			.get();

		let expanded = node_to_expanded(&node);
		assert_eq!(node_from_expanded(&expanded), node);
	}
}
