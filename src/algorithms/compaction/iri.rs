use crate::{
	context::{Context, Term},
	syntax::is_keyword,
};

/// Compacts the given IRI (or keyword), following
/// `https://www.w3.org/TR/json-ld11-api/#iri-compaction`.
///
/// Terms are only used when `vocab` is `true` and `use_terms` is `true`.
/// Term selection for property values is done by
/// [`select_term`](super::select_term), which calls this function with
/// `use_terms` set to `false` when no term matches the value.
pub fn compact_iri(active_context: &Context, iri: &str, vocab: bool, use_terms: bool) -> String {
	if is_keyword(iri) {
		return compact_keyword(active_context, iri);
	}

	// If vocab is true and var is a key in inverse context, use the shortest
	// term mapped to it with no container other than @set.
	if vocab && use_terms {
		let term = active_context.inverse().terms(iri).iter().find(|term| {
			active_context
				.get(term)
				.is_some_and(|d| d.container.is_plain() && d.iri() == Some(iri))
		});

		if let Some(term) = term {
			return term.clone();
		}
	}

	// If vocab is true, and active context has a vocabulary mapping that is a
	// prefix of var, and the suffix is not a term of the active context, use
	// the suffix.
	if vocab {
		if let Some(Term::Id(mapping)) = active_context.vocabulary() {
			if let Some(suffix) = iri.strip_prefix(mapping.as_str()) {
				if !suffix.is_empty() && !active_context.contains_term(suffix) {
					return suffix.to_owned();
				}
			}
		}
	}

	// The compact IRI is built from the prefix term yielding the shortest,
	// then lexicographically least, result that is not already a term.
	let mut compact_iri: Option<String> = None;
	for (term, definition) in active_context.definitions() {
		if !definition.prefix || term.contains(':') {
			continue;
		}

		let Some(suffix) = definition.iri().and_then(|prefix| iri.strip_prefix(prefix)) else {
			continue;
		};

		if suffix.is_empty() {
			continue;
		}

		let candidate = format!("{term}:{suffix}");
		let is_shorter = match &compact_iri {
			Some(best) => candidate.len() < best.len() || (candidate.len() == best.len() && candidate < *best),
			None => true,
		};

		if is_shorter && !active_context.contains_term(&candidate) {
			compact_iri = Some(candidate)
		}
	}

	compact_iri.unwrap_or_else(|| iri.to_owned())
}

/// Returns the shortest alias of the given keyword, or the keyword itself.
pub fn compact_keyword(active_context: &Context, keyword: &str) -> String {
	active_context
		.inverse()
		.terms(keyword)
		.first()
		.cloned()
		.unwrap_or_else(|| keyword.to_owned())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::algorithms::context_processing::{
		process_context, ContextProcessingOptions, RemoteContexts,
	};
	use serde_json::json;

	#[test]
	fn compaction() {
		let context = process_context(
			&Context::default(),
			&json!({
				"@vocab": "_:",
				"as": "https://www.w3.org/ns/activitystreams#",
				"ex": "https://example.org/",
				"id": "@id",
				"Note": "as:Note",
				"items": "as:items",
				"orderedItems": { "@id": "as:items", "@container": "@list" }
			}),
			&RemoteContexts::new(),
			None,
			ContextProcessingOptions::default(),
		)
		.unwrap();

		assert_eq!(compact_keyword(&context, "@id"), "id");
		assert_eq!(compact_keyword(&context, "@type"), "@type");
		assert_eq!(
			compact_iri(&context, "https://www.w3.org/ns/activitystreams#Note", true, true),
			"Note"
		);
		assert_eq!(
			compact_iri(&context, "https://www.w3.org/ns/activitystreams#items", true, true),
			"items"
		);
		assert_eq!(
			compact_iri(&context, "https://www.w3.org/ns/activitystreams#Note", true, false),
			"as:Note"
		);
		assert_eq!(compact_iri(&context, "_:foo", true, true), "foo");
		assert_eq!(compact_iri(&context, "https://example.org/a", false, true), "ex:a");
		assert_eq!(
			compact_iri(&context, "https://other.example/a", false, true),
			"https://other.example/a"
		);
	}
}
