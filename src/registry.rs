use iref::Iri;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::{
	collections::HashMap,
	sync::{Arc, PoisonError, RwLock},
};

use crate::{vocab::contexts, ChainLoader, Document, Extension, LoadError, Loader};

/// Error returned by a [`ContextRegistry`] used as a [`Loader`] when the
/// requested context is not registered.
#[derive(Debug, thiserror::Error)]
#[error("context not registered")]
pub struct NotRegistered;

#[derive(Debug, Default)]
struct Entries {
	contexts: HashMap<String, Value>,
	extensions: Vec<String>,
}

/// Context registry.
///
/// Maps context URLs to context documents. Registered documents are served
/// ahead of any other loader by [`Self::make_loader`], so known contexts
/// never hit the network.
///
/// A registry is shared behind an [`Arc`] and may be updated at any time,
/// although registrations are expected to happen during initialization.
/// Use [`ContextRegistry::global`] for the process-wide instance, or create
/// a fresh one with [`ContextRegistry::new`] for isolation.
#[derive(Debug)]
pub struct ContextRegistry {
	entries: RwLock<Entries>,
}

static GLOBAL: Lazy<Arc<ContextRegistry>> = Lazy::new(|| Arc::new(ContextRegistry::new()));

impl ContextRegistry {
	/// Creates a registry seeded with the bundled Activity Streams and
	/// security contexts.
	pub fn new() -> Self {
		let registry = Self::empty();
		for (url, document) in contexts::bundled() {
			registry.register(url, document.clone());
		}

		registry
	}

	/// Creates a registry without any context.
	pub fn empty() -> Self {
		Self {
			entries: RwLock::new(Entries::default()),
		}
	}

	/// Process-wide registry.
	pub fn global() -> Arc<Self> {
		GLOBAL.clone()
	}

	/// Registers (or replaces) the context document served for `url`.
	pub fn register(&self, url: impl Into<String>, document: Value) -> &Self {
		let url = url.into();
		log::debug!("registering context `{url}`");
		self.entries
			.write()
			.unwrap_or_else(PoisonError::into_inner)
			.contexts
			.insert(url, document);
		self
	}

	/// Returns a copy of the document registered for `url`.
	pub fn get(&self, url: &str) -> Option<Value> {
		self.entries
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.contexts
			.get(url)
			.cloned()
	}

	pub fn contains(&self, url: &str) -> bool {
		self.entries
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.contexts
			.contains_key(url)
	}

	/// Registers an extension.
	///
	/// Its context (if any) is registered, and its URL is appended to the
	/// extension contexts, once.
	pub fn use_extension(&self, extension: Extension) -> &Self {
		let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
		if let Some(context) = extension.context {
			entries
				.contexts
				.insert(extension.context_url.clone(), context);
		}

		if !entries.extensions.contains(&extension.context_url) {
			entries.extensions.push(extension.context_url)
		}

		drop(entries);
		self
	}

	/// URLs of the extension contexts, in registration order.
	pub fn extension_contexts(&self) -> Vec<String> {
		self.entries
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.extensions
			.clone()
	}

	/// Creates a loader serving registered contexts, and delegating every
	/// other URL to `fallback`.
	pub fn make_loader<F: Loader>(&self, fallback: F) -> ChainLoader<&Self, F> {
		ChainLoader::new(self, fallback)
	}
}

impl Default for ContextRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl Loader for ContextRegistry {
	async fn load(&self, url: &Iri) -> Result<Document, LoadError> {
		match self.get(url.as_str()) {
			Some(document) => {
				log::trace!("serving registered context `{url}`");
				Ok(Document::new(Some(url.to_owned()), None, document))
			}
			None => Err(LoadError::new(url.to_owned(), NotRegistered)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{vocab::as2, NoLoader};
	use serde_json::json;
	use static_iref::iri;

	#[test]
	fn seeded() {
		let registry = ContextRegistry::new();
		assert!(registry.contains(as2::CONTEXT_URL));
		assert!(registry.contains(as2::NS));
		assert!(registry.contains("https://w3id.org/security/v1"));
		assert!(!ContextRegistry::empty().contains(as2::CONTEXT_URL));
	}

	#[tokio::test]
	async fn registered_first() {
		let registry = ContextRegistry::empty();
		registry.register("https://example.org/ctx", json!({"@context": {"Foo": "ex:Foo"}}));

		let loader = registry.make_loader(NoLoader);
		let document = loader.load(iri!("https://example.org/ctx")).await.unwrap();
		assert_eq!(document.context(), Some(&json!({"Foo": "ex:Foo"})));
		assert_eq!(document.context_url, None);

		assert!(loader.load(iri!("https://example.org/other")).await.is_err());
	}

	#[test]
	fn extensions_are_unique() {
		let registry = ContextRegistry::empty();
		registry.use_extension(Extension::new("https://example.org/ext", json!({"@context": {}})));
		registry.use_extension(Extension::remote("https://example.org/ext"));
		assert_eq!(registry.extension_contexts(), ["https://example.org/ext"]);
		assert!(registry.contains("https://example.org/ext"));
	}
}
