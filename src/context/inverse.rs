use hashbrown::HashMap;

use super::Context;

/// Inverse context.
///
/// Maps every IRI (or keyword) to the terms defined for it, shortest term
/// first and lexicographically among terms of the same length. Compaction
/// picks among those candidates.
#[derive(Debug, Clone, Default)]
pub struct InverseContext {
	map: HashMap<String, Vec<String>>,
}

impl InverseContext {
	pub fn new(context: &Context) -> Self {
		let mut map: HashMap<String, Vec<String>> = HashMap::new();

		for (term, definition) in context.definitions() {
			if let Some(value) = &definition.value {
				if !value.is_null() {
					map.entry(value.as_str().to_owned())
						.or_default()
						.push(term.to_owned());
				}
			}
		}

		for terms in map.values_mut() {
			terms.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
		}

		Self { map }
	}

	/// Returns the terms defined for the given IRI or keyword.
	pub fn terms(&self, iri: &str) -> &[String] {
		self.map.get(iri).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn contains(&self, iri: &str) -> bool {
		self.map.contains_key(iri)
	}
}
