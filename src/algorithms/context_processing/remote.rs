use hashbrown::HashMap;
use iref::{Iri, IriBuf, IriRef};

use crate::{algorithms::Error, syntax::Value, Loader};

/// Loaded remote context.
#[derive(Debug, Clone)]
pub struct RemoteContext {
	/// URL of the context document, after redirections. Relative IRIs in the
	/// context are resolved against it.
	pub base_url: IriBuf,

	/// Value of the `@context` entry of the document.
	pub context: Value,
}

/// Remote contexts, loaded ahead of processing.
///
/// Context processing itself is synchronous: every remote context it
/// references, directly or through other remote contexts and term-scoped
/// contexts, must be loaded into this cache first with [`Self::load`] or
/// [`Self::load_document`].
#[derive(Debug, Clone, Default)]
pub struct RemoteContexts {
	contexts: HashMap<IriBuf, RemoteContext>,
}

impl RemoteContexts {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, url: &Iri) -> Option<&RemoteContext> {
		self.contexts.get(url)
	}

	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// Loads every remote context referenced by the given local context.
	pub async fn load(
		&mut self,
		loader: &impl Loader,
		context: &Value,
		base_url: Option<&Iri>,
	) -> Result<(), Error> {
		let mut pending = Vec::new();
		collect_context_urls(context, base_url, &mut pending)?;
		self.load_all(loader, pending).await
	}

	/// Loads every remote context referenced by the `@context` entries found
	/// in the given document.
	pub async fn load_document(
		&mut self,
		loader: &impl Loader,
		document: &Value,
		base_url: Option<&Iri>,
	) -> Result<(), Error> {
		let mut pending = Vec::new();
		collect_document_contexts(document, base_url, &mut pending)?;
		self.load_all(loader, pending).await
	}

	async fn load_all(
		&mut self,
		loader: &impl Loader,
		mut pending: Vec<IriBuf>,
	) -> Result<(), Error> {
		while let Some(url) = pending.pop() {
			if self.contexts.contains_key(&url) {
				continue;
			}

			log::debug!("loading remote context `{url}`");
			let document = loader.load(&url).await?;
			let context = document
				.context()
				.cloned()
				.ok_or_else(|| Error::InvalidRemoteContext(url.to_string()))?;

			let base_url = document.url.unwrap_or_else(|| url.clone());
			collect_context_urls(&context, Some(base_url.as_iri()), &mut pending)?;
			self.contexts.insert(url, RemoteContext { base_url, context });
		}

		Ok(())
	}
}

/// Resolves a context reference against the given base URL.
pub fn resolve_context_url(url: &str, base_url: Option<&Iri>) -> Result<IriBuf, Error> {
	let iri_ref = IriRef::new(url).map_err(|_| Error::InvalidContextUrl(url.to_owned()))?;
	match base_url {
		Some(base_url) => Ok(iri_ref.resolved(base_url)),
		None => iri_ref
			.as_iri()
			.map(ToOwned::to_owned)
			.ok_or_else(|| Error::InvalidContextUrl(url.to_owned())),
	}
}

fn collect_context_urls(
	context: &Value,
	base_url: Option<&Iri>,
	urls: &mut Vec<IriBuf>,
) -> Result<(), Error> {
	match context {
		Value::String(url) => urls.push(resolve_context_url(url, base_url)?),
		Value::Array(items) => {
			for item in items {
				collect_context_urls(item, base_url, urls)?
			}
		}
		Value::Object(definition) => {
			// Term-scoped contexts.
			for value in definition.values() {
				if let Some(scoped) = value.as_object().and_then(|d| d.get("@context")) {
					collect_context_urls(scoped, base_url, urls)?
				}
			}
		}
		_ => (),
	}

	Ok(())
}

fn collect_document_contexts(
	value: &Value,
	base_url: Option<&Iri>,
	urls: &mut Vec<IriBuf>,
) -> Result<(), Error> {
	match value {
		Value::Array(items) => {
			for item in items {
				collect_document_contexts(item, base_url, urls)?
			}
		}
		Value::Object(object) => {
			for (key, value) in object {
				if key == "@context" {
					collect_context_urls(value, base_url, urls)?
				} else {
					collect_document_contexts(value, base_url, urls)?
				}
			}
		}
		_ => (),
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::ContextRegistry;
	use serde_json::json;
	use static_iref::iri;

	#[tokio::test]
	async fn loads_nested_contexts() {
		let a = iri!("https://example.org/a").to_owned();
		let b = iri!("https://example.org/b").to_owned();
		let loader = ContextRegistry::empty();
		loader.register(a.as_str(), json!({"@context": ["b", {"x": "ex:x"}]}));
		loader.register(b.as_str(), json!({"@context": {"ex": "https://example.org/ns#"}}));

		let mut remote = RemoteContexts::new();
		remote
			.load_document(&loader, &json!({"@context": "https://example.org/a", "x": 1}), None)
			.await
			.unwrap();
		assert_eq!(remote.len(), 2);
		assert_eq!(remote.get(&b).unwrap().context, json!({"ex": "https://example.org/ns#"}));
	}

	#[tokio::test]
	async fn missing_context_fails() {
		let loader = ContextRegistry::empty();
		let mut remote = RemoteContexts::new();
		let result = remote
			.load(&loader, &json!("https://example.org/missing"), None)
			.await;
		assert!(matches!(result, Err(Error::LoadingRemoteContextFailed(_))));
		assert!(matches!(
			remote.load(&loader, &json!("relative"), None).await,
			Err(Error::InvalidContextUrl(_))
		));
	}
}
