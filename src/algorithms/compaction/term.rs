use crate::{
	context::{Context, TermDefinition, Type},
	syntax::{ContainerKind, Value},
};

/// Kind of an expanded value, as far as term selection is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind<'v> {
	List,
	Node,
	Language(&'v str),
	Typed(&'v str),
	String,
	Other,
}

impl<'v> ValueKind<'v> {
	fn new(value: &'v Value) -> Self {
		let Some(object) = value.as_object() else {
			return Self::Other;
		};

		if object.contains_key("@list") {
			return Self::List;
		}

		match object.get("@value") {
			None => Self::Node,
			Some(v) => {
				if let Some(language) = object.get("@language").and_then(Value::as_str) {
					Self::Language(language)
				} else if let Some(typ) = object.get("@type").and_then(Value::as_str) {
					Self::Typed(typ)
				} else if v.is_string() {
					Self::String
				} else {
					Self::Other
				}
			}
		}
	}
}

/// Rank of a term definition for a value of the given kind, lower is
/// better. `None` if the term cannot be used for the value.
fn preference(kind: ValueKind, definition: &TermDefinition, default_language: Option<&str>) -> Option<u8> {
	let container = &definition.container;
	let untyped = definition.typ.is_none() && container.is_plain();
	let language = match &definition.language {
		Some(language) => language.as_deref(),
		None => default_language,
	};

	match kind {
		ValueKind::List => container.contains(ContainerKind::List).then_some(0),
		ValueKind::Node => {
			if matches!(definition.typ, Some(Type::Id | Type::Vocab)) && container.is_plain() {
				Some(0)
			} else if untyped {
				Some(1)
			} else {
				None
			}
		}
		ValueKind::Language(tag) => {
			if container.contains(ContainerKind::Language) && !container.contains(ContainerKind::List) {
				Some(0)
			} else if untyped && language.is_some_and(|l| l.eq_ignore_ascii_case(tag)) {
				Some(1)
			} else {
				None
			}
		}
		ValueKind::Typed(typ) => {
			(definition.typ.as_ref().and_then(Type::as_iri) == Some(typ) && container.is_plain())
				.then_some(0)
		}
		ValueKind::String => (untyped && language.is_none()).then_some(0),
		ValueKind::Other => untyped.then_some(0),
	}
}

/// Selects the term used to compact the given `value` of the property `iri`.
///
/// Candidate terms are tried shortest first. Returns `None` if no term
/// definition is compatible with the value: the property is then compacted
/// into a compact IRI (or left as is) and the value kept in its generic form.
pub fn select_term<'c>(active_context: &'c Context, iri: &str, value: &Value) -> Option<&'c str> {
	let kind = ValueKind::new(value);
	let default_language = active_context.default_language();

	active_context
		.inverse()
		.terms(iri)
		.iter()
		.filter_map(|term| active_context.get_key_value(term))
		.filter(|(_, d)| d.iri() == Some(iri))
		.filter_map(|(term, d)| preference(kind, d, default_language).map(|rank| (rank, term)))
		.min_by_key(|(rank, _)| *rank)
		.map(|(_, term)| term)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::algorithms::context_processing::{
		process_context, ContextProcessingOptions, RemoteContexts,
	};
	use serde_json::json;

	#[test]
	fn selection() {
		let context = process_context(
			&Context::default(),
			&json!({
				"ex": "https://example.org/ns#",
				"name": "ex:name",
				"nameMap": { "@id": "ex:name", "@container": "@language" },
				"frName": { "@id": "ex:name", "@language": "fr" },
				"link": { "@id": "ex:link", "@type": "@id" },
				"linkList": { "@id": "ex:link", "@type": "@id", "@container": "@list" },
				"size": { "@id": "ex:size", "@type": "ex:Size" }
			}),
			&RemoteContexts::new(),
			None,
			ContextProcessingOptions::default(),
		)
		.unwrap();

		let name = "https://example.org/ns#name";
		assert_eq!(select_term(&context, name, &json!({"@value": "a"})), Some("name"));
		assert_eq!(
			select_term(&context, name, &json!({"@value": "a", "@language": "en"})),
			Some("nameMap")
		);
		assert_eq!(select_term(&context, name, &json!({"@value": 1})), Some("name"));

		let link = "https://example.org/ns#link";
		assert_eq!(select_term(&context, link, &json!({"@id": "ex:a"})), Some("link"));
		assert_eq!(select_term(&context, link, &json!({"@list": []})), Some("linkList"));
		assert_eq!(select_term(&context, link, &json!({"@value": "a"})), None);

		let size = "https://example.org/ns#size";
		assert_eq!(
			select_term(&context, size, &json!({"@value": "1", "@type": "https://example.org/ns#Size"})),
			Some("size")
		);
		assert_eq!(
			select_term(&context, size, &json!({"@value": "1", "@type": "https://example.org/ns#Other"})),
			None
		);
	}
}
