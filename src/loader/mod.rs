use iref::{Iri, IriBuf};

pub mod chain;
pub mod none;

pub use chain::ChainLoader;
pub use none::NoLoader;

#[cfg(feature = "reqwest")]
pub mod reqwest;

#[cfg(feature = "reqwest")]
pub use self::reqwest::ReqwestLoader;

use crate::Document;

/// Loading error.
#[derive(Debug, thiserror::Error)]
#[error("loading document `{target}` failed: {cause}")]
pub struct LoadError {
	pub target: IriBuf,
	pub cause: anyhow::Error,
}

impl LoadError {
	pub fn new(target: IriBuf, cause: impl Into<anyhow::Error>) -> Self {
		Self {
			target,
			cause: cause.into(),
		}
	}
}

/// Document loader.
///
/// A document loader is required by the import and export pipelines to fetch
/// the context documents identified by an IRI in a `@context` entry.
///
/// This library provides a few default loader implementations:
///   - [`NoLoader`] dummy loader that always fail. Perfect if you are certain
///     that every context is registered beforehand.
///   - [`ContextRegistry`](crate::ContextRegistry) and
///     [`Environment`](crate::Environment), serving registered context
///     documents.
///   - [`ChainLoader`] trying a first loader then falling back to a second
///     one.
///   - `ReqwestLoader` actually downloading the remote documents using the
///     [`reqwest`](https://crates.io/crates/reqwest) library.
///     This requires the `reqwest` feature to be enabled.
pub trait Loader {
	/// Loads the document behind the given IRI.
	#[allow(async_fn_in_trait)]
	async fn load(&self, url: &Iri) -> Result<Document, LoadError>;
}

impl<'l, L: Loader> Loader for &'l L {
	async fn load(&self, url: &Iri) -> Result<Document, LoadError> {
		L::load(self, url).await
	}
}

impl<'l, L: Loader> Loader for &'l mut L {
	async fn load(&self, url: &Iri) -> Result<Document, LoadError> {
		L::load(self, url).await
	}
}
