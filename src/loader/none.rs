use iref::Iri;

use crate::{Document, LoadError};

use super::Loader;

/// Fallback loader of processors without network access.
///
/// Fails on every URL, so only contexts known to the registry or to the
/// import environment resolve.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLoader;

/// Error raised by [`NoLoader`].
#[derive(Debug, thiserror::Error)]
#[error("`{0}` is not registered and no fallback loader is configured")]
pub struct NoFallback(pub String);

impl Loader for NoLoader {
	async fn load(&self, url: &Iri) -> Result<Document, LoadError> {
		log::trace!("no fallback loader for `{url}`");
		Err(LoadError::new(url.to_owned(), NoFallback(url.to_string())))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use static_iref::iri;

	#[tokio::test]
	async fn always_fails() {
		let error = NoLoader.load(iri!("https://example.org/context")).await.unwrap_err();
		let cause = error.cause.downcast_ref::<NoFallback>().unwrap();
		assert_eq!(cause.0, "https://example.org/context");
	}
}
