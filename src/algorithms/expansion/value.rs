use crate::{
	context::{Context, TermDefinition, Type},
	syntax::{Object, Value},
};

/// Expands a scalar value, following
/// `https://www.w3.org/TR/json-ld11-api/#value-expansion`.
pub fn expand_value(
	active_context: &Context,
	definition: Option<&TermDefinition>,
	value: &Value,
) -> Value {
	let typ = definition.and_then(|d| d.typ.as_ref());

	// If the active property has a type mapping in active context that is
	// @id or @vocab, and the value is a string, return a new map containing a
	// single entry where the key is @id and the value is the result of IRI
	// expanding value.
	if let Value::String(s) = value {
		match typ {
			Some(Type::Id) => return node_reference(active_context.expand_iri(s, true, false).as_str()),
			Some(Type::Vocab) => return node_reference(active_context.expand_iri(s, true, true).as_str()),
			_ => (),
		}
	}

	// Otherwise, initialize result to a map with an @value entry whose value
	// is set to value.
	let mut result = Object::new();
	result.insert("@value".to_owned(), value.clone());

	match typ {
		// If active property has a type mapping in active context, other than
		// @id, @vocab, or @none, add @type to result and set its value to the
		// value associated with the type mapping.
		Some(Type::Iri(datatype)) => {
			result.insert("@type".to_owned(), Value::String(datatype.clone()));
		}
		Some(Type::Json) => {
			result.insert("@type".to_owned(), Value::String("@json".to_owned()));
		}
		// Otherwise, if value is a string, use the language mapping of the
		// term, or the default language of the active context.
		_ if value.is_string() => {
			let language = match definition.and_then(|d| d.language.as_ref()) {
				Some(language) => language.as_deref(),
				None => active_context.default_language(),
			};

			if let Some(language) = language {
				result.insert("@language".to_owned(), Value::String(language.to_owned()));
			}
		}
		_ => (),
	}

	Value::Object(result)
}

fn node_reference(id: &str) -> Value {
	let mut result = Object::new();
	result.insert("@id".to_owned(), Value::String(id.to_owned()));
	Value::Object(result)
}
