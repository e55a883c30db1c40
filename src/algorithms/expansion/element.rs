use mown::Mown;

use super::{expand_value, ExpansionOptions, ExpansionPolicy};
use crate::{
	algorithms::{
		context_processing::{process_context, ContextProcessingOptions, RemoteContexts},
		warn, Error, Warning,
	},
	context::{is_absolute, Context, TermDefinition, Term},
	syntax::{ContainerKind, Keyword, Object, Value},
};

pub(crate) struct Expander<'a> {
	pub remote_contexts: &'a RemoteContexts,
	pub options: ExpansionOptions,
}

fn is_top_level(active_property: Option<&str>) -> bool {
	matches!(active_property, None | Some("@graph"))
}

fn append(result: &mut Object, key: &str, values: Vec<Value>) {
	match result
		.entry(key.to_owned())
		.or_insert_with(|| Value::Array(Vec::new()))
	{
		Value::Array(items) => items.extend(values),
		other => {
			let previous = std::mem::take(other);
			let mut items = vec![previous];
			items.extend(values);
			*other = Value::Array(items)
		}
	}
}

impl<'a> Expander<'a> {
	/// Applies the property-scoped context of the given term definition, if
	/// any.
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

	pub fn expand_element(
		&self,
		active_context: &Context,
		active_property: Option<&str>,
		element: &Value,
	) -> Result<Vec<Value>, Error> {
		let definition = active_property.and_then(|p| active_context.get(p));

		match element {
			Value::Null => Ok(Vec::new()),
			Value::Array(items) => {
				let is_list = definition.is_some_and(|d| d.container.contains(ContainerKind::List));

				let mut result = Vec::new();
				for item in items {
					let expanded = self.expand_element(active_context, active_property, item)?;

					// If the container mapping of the active property includes
					// @list, and expanded item is an array, set expanded item to
					// a new map containing the entry @list where the value is the
					// original expanded item.
					if is_list && item.is_array() {
						let mut list = Object::new();
						list.insert("@list".to_owned(), Value::Array(expanded));
						result.push(Value::Object(list))
					} else {
						result.extend(expanded)
					}
				}

				Ok(result)
			}
			Value::Object(object) => self.expand_node(active_context, active_property, object),
			scalar => {
				// If active property is null or @graph, drop the free-floating
				// scalar by returning null.
				if is_top_level(active_property) {
					return Ok(Vec::new());
				}

				let active_context = self.scoped_context(active_context, definition)?;
				let definition = active_property.and_then(|p| active_context.get(p));
				Ok(vec![expand_value(&active_context, definition, scalar)])
			}
		}
	}

	fn expand_node(
		&self,
		active_context: &Context,
		active_property: Option<&str>,
		object: &Object,
	) -> Result<Vec<Value>, Error> {
		let definition = active_property.and_then(|p| active_context.get(p));
		let active_context = self.scoped_context(active_context, definition)?;

		// If element contains the entry @context, set active context to the
		// result of the Context Processing algorithm.
		let active_context = match object.get("@context") {
			Some(local_context) => Mown::Owned(process_context(
				&active_context,
				local_context,
				self.remote_contexts,
				None,
				ContextProcessingOptions::default(),
			)?),
			None => active_context,
		};

		let mut entries: Vec<(&String, &Value)> = object.iter().collect();
		if self.options.ordered {
			entries.sort_by(|(a, _), (b, _)| a.cmp(b))
		}

		// Identifiers and types first.
		entries.sort_by_key(|(key, _)| {
			!matches!(
				active_context.expand_iri(key, false, true),
				Term::Keyword(Keyword::Id | Keyword::Type)
			)
		});

		let mut result = Object::new();
		for (key, value) in entries {
			if key == "@context" {
				continue;
			}

			match active_context.expand_iri(key, false, true) {
				Term::Keyword(keyword) => {
					self.expand_keyword_entry(&active_context, active_property, &mut result, keyword, value)?
				}
				Term::Id(property) if is_absolute(&property) => {
					let expanded = self.expand_property(&active_context, key, value)?;
					append(&mut result, &property, expanded)
				}
				_ => match self.options.policy {
					ExpansionPolicy::Relaxed => {
						let expanded = self.expand_property(&active_context, key, value)?;
						append(&mut result, key, expanded)
					}
					ExpansionPolicy::Standard => warn(Warning::DroppedKey(key.clone())),
					ExpansionPolicy::Strict => return Err(Error::KeyExpansionFailed(key.clone())),
				},
			}
		}

		// If result contains the entry @value:
		if let Some(value) = result.get("@value") {
			// The result must not contain any entries other than @direction,
			// @index, @language, @type, and @value.
			if result.keys().any(|k| {
				!matches!(
					k.as_str(),
					"@value" | "@language" | "@type" | "@index" | "@direction"
				)
			}) || (result.contains_key("@type") && result.contains_key("@language"))
			{
				return Err(Error::InvalidValueObject);
			}

			// If the value of result's @value entry is null, then set result to
			// null.
			if value.is_null() {
				return Ok(Vec::new());
			}

			// Otherwise, if the value of result's @value entry is not a string
			// and result contains the entry @language, an invalid
			// language-tagged value error has been detected.
			if !value.is_string() && result.contains_key("@language") {
				return Err(Error::InvalidLanguageTaggedValue);
			}

			if let Some(typ) = result.get_mut("@type") {
				let datatype = match typ {
					Value::Array(types) if types.len() == 1 => types.pop(),
					_ => None,
				};

				*typ = datatype.ok_or(Error::InvalidTypedValue)?;
			}

			if is_top_level(active_property) {
				return Ok(Vec::new());
			}

			return Ok(vec![Value::Object(result)]);
		}

		// Otherwise, if result contains the entry @set or @list, it must
		// contain no other entries than @index.
		for keyword in ["@set", "@list"] {
			if result.contains_key(keyword) && result.keys().any(|k| k != keyword && k != "@index") {
				return Err(Error::InvalidSetOrListObject);
			}
		}

		// If result contains the entry @set, then set result to the entry's
		// value.
		if let Some(Value::Array(items)) = result.get_mut("@set") {
			return Ok(std::mem::take(items));
		}

		// If result is a map that contains only the entry @language, set result
		// to null.
		if result.len() == 1 && result.contains_key("@language") {
			return Ok(Vec::new());
		}

		// If active property is null or @graph, drop free-floating values.
		if is_top_level(active_property)
			&& (result.is_empty()
				|| result.contains_key("@list")
				|| (result.len() == 1
					&& result.contains_key("@id")
					&& !self.options.keep_free_floating_nodes))
		{
			return Ok(Vec::new());
		}

		Ok(vec![Value::Object(result)])
	}

	fn expand_keyword_entry(
		&self,
		active_context: &Context,
		active_property: Option<&str>,
		result: &mut Object,
		keyword: Keyword,
		value: &Value,
	) -> Result<(), Error> {
		match keyword {
			Keyword::Id => {
				let id = value.as_str().ok_or(Error::InvalidIdValue)?;
				match active_context.expand_iri(id, true, false) {
					Term::Null => warn(Warning::KeywordLikeValue(id.to_owned())),
					id => {
						result.insert("@id".to_owned(), Value::String(id.as_str().to_owned()));
					}
				}
			}
			Keyword::Type => {
				let types = match value {
					Value::String(_) => std::slice::from_ref(value),
					Value::Array(items) => items.as_slice(),
					_ => return Err(Error::InvalidTypeValue),
				};

				let mut expanded = Vec::with_capacity(types.len());
				for typ in types {
					let typ = typ.as_str().ok_or(Error::InvalidTypeValue)?;
					match active_context.expand_iri(typ, true, true) {
						Term::Null => warn(Warning::KeywordLikeValue(typ.to_owned())),
						iri => expanded.push(Value::String(iri.as_str().to_owned())),
					}
				}

				append(result, "@type", expanded)
			}
			Keyword::Value => match value {
				Value::Object(_) | Value::Array(_) => return Err(Error::InvalidValueObjectValue),
				scalar => {
					result.insert("@value".to_owned(), scalar.clone());
				}
			},
			Keyword::Language => {
				let tag = value.as_str().ok_or(Error::InvalidLanguageTaggedString)?;
				if langtag::LangTag::new(tag).is_err() {
					warn(Warning::MalformedLanguageTag(tag.to_owned()))
				}

				result.insert("@language".to_owned(), value.clone());
			}
			Keyword::Direction | Keyword::Index => {
				if !value.is_string() {
					return Err(Error::InvalidValueObject);
				}

				result.insert(keyword.into_str().to_owned(), value.clone());
			}
			Keyword::List => {
				// If active property is null or @graph, continue with the next
				// key from element to remove the free-floating list.
				if !is_top_level(active_property) {
					let items = self.expand_element(active_context, active_property, value)?;
					result.insert("@list".to_owned(), Value::Array(items));
				}
			}
			Keyword::Set => {
				let items = self.expand_element(active_context, active_property, value)?;
				result.insert("@set".to_owned(), Value::Array(items));
			}
			Keyword::Graph => {
				let items = self.expand_element(active_context, Some("@graph"), value)?;
				append(result, "@graph", items)
			}
			Keyword::Included => {
				let items = self.expand_element(active_context, None, value)?;
				append(result, "@included", items)
			}
			Keyword::Reverse | Keyword::Nest => return Err(Error::Unsupported(keyword)),
			Keyword::Context => (),
			other => warn(Warning::IgnoredKeyword(other)),
		}

		Ok(())
	}

	fn expand_property(
		&self,
		active_context: &Context,
		key: &str,
		value: &Value,
	) -> Result<Vec<Value>, Error> {
		let definition = active_context.get(key);
		let container = definition.map(|d| &d.container);

		// If container mapping includes @language and value is a map then value
		// is expanded from a language map.
		if let (Some(container), Value::Object(map)) = (container, value) {
			if container.contains(ContainerKind::Language) {
				return self.expand_language_map(active_context, map);
			}
		}

		let expanded = self.expand_element(active_context, Some(key), value)?;

		// If container mapping includes @list and expanded value is not already
		// a list object, convert expanded value to a list object.
		if container.is_some_and(|c| c.contains(ContainerKind::List)) {
			let is_list_object = value.is_object()
				&& matches!(expanded.as_slice(), [Value::Object(o)] if o.contains_key("@list"));

			if !is_list_object {
				let mut list = Object::new();
				list.insert("@list".to_owned(), Value::Array(expanded));
				return Ok(vec![Value::Object(list)]);
			}
		}

		Ok(expanded)
	}

	fn expand_language_map(
		&self,
		active_context: &Context,
		map: &Object,
	) -> Result<Vec<Value>, Error> {
		let mut entries: Vec<(&String, &Value)> = map.iter().collect();
		if self.options.ordered {
			entries.sort_by(|(a, _), (b, _)| a.cmp(b))
		}

		let mut result = Vec::new();
		for (language, values) in entries {
			let values = match values {
				Value::Array(items) => items.as_slice(),
				other => std::slice::from_ref(other),
			};

			let is_none = active_context.expand_iri(language, false, true) == Term::Keyword(Keyword::None);

			for value in values {
				match value {
					Value::Null => (),
					Value::String(_) => {
						let mut item = Object::new();
						item.insert("@value".to_owned(), value.clone());

						if !is_none {
							if langtag::LangTag::new(language.as_str()).is_err() {
								warn(Warning::MalformedLanguageTag(language.clone()))
							}

							item.insert("@language".to_owned(), Value::String(language.clone()));
						}

						result.push(Value::Object(item))
					}
					_ => return Err(Error::InvalidLanguageMapValue),
				}
			}
		}

		Ok(result)
	}
}
