use iref::Iri;

use crate::{Document, LoadError};

use super::Loader;

/// Loader trying a first loader, then a second one if the first one failed.
///
/// Used to put registered context documents ahead of a network-capable
/// fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChainLoader<A, B> {
	first: A,
	second: B,
}

impl<A, B> ChainLoader<A, B> {
	pub fn new(first: A, second: B) -> Self {
		Self { first, second }
	}

	pub fn first(&self) -> &A {
		&self.first
	}

	pub fn second(&self) -> &B {
		&self.second
	}
}

impl<A: Loader, B: Loader> Loader for ChainLoader<A, B> {
	async fn load(&self, url: &Iri) -> Result<Document, LoadError> {
		match self.first.load(url).await {
			Ok(document) => Ok(document),
			Err(e) => {
				log::trace!("{e}, falling back");
				self.second.load(url).await
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{ContextRegistry, NoLoader, NotRegistered};
	use serde_json::json;
	use static_iref::iri;

	#[tokio::test]
	async fn falls_back() {
		let url = iri!("https://example.org/context");
		let first = ContextRegistry::empty();
		let second = ContextRegistry::empty();
		second.register(url.as_str(), json!({"@context": {}}));

		let loader = ChainLoader::new(&first, &second);
		assert!(loader.load(url).await.is_ok());

		first.register(url.as_str(), json!({"@context": {"a": "b:c"}}));
		let loader = ChainLoader::new(&first, NoLoader);
		let document = loader.load(url).await.unwrap();
		assert_eq!(document.context(), Some(&json!({"a": "b:c"})));

		let loader = ChainLoader::new(NoLoader, ContextRegistry::empty());
		let error = loader.load(url).await.unwrap_err();
		assert!(error.cause.downcast_ref::<NotRegistered>().is_some());
	}
}
