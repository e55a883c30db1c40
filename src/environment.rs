use iref::Iri;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

use crate::{vocab::as2, ChainLoader, ContextRegistry, Document, LoadError, Loader};

/// Import environment.
///
/// Remembers the `@context` of an imported document so that the resulting
/// node can later be exported with the exact same context, and records which
/// context URLs were assumed rather than explicitly present.
///
/// An environment is also a [`Loader`], serving its own context documents
/// first and then the ones of its [`ContextRegistry`].
#[derive(Debug, Clone)]
pub struct Environment {
	registry: Arc<ContextRegistry>,
	contexts: HashMap<String, Value>,
	original_context: Option<Value>,
	assumed_contexts: Vec<String>,
}

impl Environment {
	pub fn new(registry: Arc<ContextRegistry>) -> Self {
		Self {
			registry,
			contexts: HashMap::new(),
			original_context: None,
			assumed_contexts: Vec::new(),
		}
	}

	pub fn registry(&self) -> &Arc<ContextRegistry> {
		&self.registry
	}

	/// Registers a context document for this environment only.
	pub fn register(&mut self, url: impl Into<String>, document: Value) -> &mut Self {
		self.contexts.insert(url.into(), document);
		self
	}

	/// Inspects the `@context` of the input document.
	///
	/// The context is remembered as is (or its absence). The Activity
	/// Streams context, always used to interpret documents, is recorded as
	/// assumed if the document does not list it, and so are the extension
	/// contexts of the registry the document does not list.
	pub fn apply_assumed_context(&mut self, input: &Value) {
		self.original_context = input.get("@context").cloned();

		let explicit: Vec<&str> = match &self.original_context {
			Some(Value::String(url)) => vec![url.as_str()],
			Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
			_ => Vec::new(),
		};

		let mut assumed = Vec::new();
		if !explicit.iter().any(|url| is_activitystreams_url(url)) {
			assumed.push(as2::CONTEXT_URL.to_owned())
		}

		for url in self.registry.extension_contexts() {
			if !explicit.contains(&url.as_str()) {
				assumed.push(url)
			}
		}

		log::debug!("assumed contexts: {assumed:?}");
		self.assumed_contexts = assumed;
	}

	/// `@context` of the imported document, if it had one.
	pub fn original_context(&self) -> Option<&Value> {
		self.original_context.as_ref()
	}

	/// Context URLs that were not explicitly present in the imported
	/// document.
	pub fn assumed_contexts(&self) -> &[String] {
		&self.assumed_contexts
	}

	/// Checks if the given context URL was assumed.
	pub fn is_assumed(&self, url: &str) -> bool {
		self.assumed_contexts.iter().any(|u| u == url)
	}

	/// Creates a loader serving the contexts known to this environment, and
	/// delegating every other URL to `fallback`.
	pub fn make_loader<F: Loader>(&self, fallback: F) -> ChainLoader<&Self, F> {
		ChainLoader::new(self, fallback)
	}
}

fn is_activitystreams_url(url: &str) -> bool {
	url == as2::CONTEXT_URL || url == as2::NS
}

impl Loader for Environment {
	async fn load(&self, url: &Iri) -> Result<Document, LoadError> {
		match self.contexts.get(url.as_str()) {
			Some(document) => Ok(Document::new(Some(url.to_owned()), None, document.clone())),
			None => self.registry.load(url).await,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Extension;
	use serde_json::json;
	use static_iref::iri;

	#[test]
	fn assumed_contexts() {
		let registry = Arc::new(ContextRegistry::new());
		let mut environment = Environment::new(registry.clone());

		environment.apply_assumed_context(&json!({ "type": "Note" }));
		assert_eq!(environment.original_context(), None);
		assert_eq!(environment.assumed_contexts(), [as2::CONTEXT_URL]);

		let context = json!([as2::CONTEXT_URL, "https://example.org/ctx"]);
		environment.apply_assumed_context(&json!({ "@context": context, "type": "Note" }));
		assert_eq!(environment.original_context(), Some(&context));
		assert!(environment.assumed_contexts().is_empty());

		registry.use_extension(Extension::remote("https://example.org/ext"));
		environment.apply_assumed_context(&json!({ "@context": as2::NS }));
		assert!(environment.is_assumed("https://example.org/ext"));
		assert!(!environment.is_assumed(as2::CONTEXT_URL));
	}

	#[tokio::test]
	async fn local_contexts_first() {
		let registry = Arc::new(ContextRegistry::empty());
		registry.register("https://example.org/a", json!({ "@context": { "a": "ex:registry" } }));

		let mut environment = Environment::new(registry);
		environment.register("https://example.org/a", json!({ "@context": { "a": "ex:local" } }));

		let document = environment.load(iri!("https://example.org/a")).await.unwrap();
		assert_eq!(document.context(), Some(&json!({ "a": "ex:local" })));

		environment.register("https://example.org/b", json!({ "@context": {} }));
		assert!(environment.load(iri!("https://example.org/b")).await.is_ok());
		assert!(environment.load(iri!("https://example.org/c")).await.is_err());
	}
}
