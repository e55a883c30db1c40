//! Simple context loader based on [`reqwest`](https://crates.io/crates/reqwest)
use iref::{Iri, IriBuf};
use mime::Mime;
use reqwest::{
	header::{ACCEPT, CONTENT_TYPE},
	StatusCode,
};

use super::Loader;
use crate::{Document, LoadError};

const ACCEPT_HEADER: &str = "application/ld+json, application/json";

/// Loader options.
#[derive(Debug, Clone, Default)]
pub struct Options {
	/// HTTP client.
	pub client: reqwest::Client,
}

/// Loading error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("internal error: {0}")]
	Reqwest(#[from] reqwest::Error),

	#[error("query failed: status code {0}")]
	QueryFailed(StatusCode),

	#[error("invalid content type")]
	InvalidContentType,

	#[error("JSON parse error: {0}")]
	Parse(#[from] serde_json::Error),
}

/// `reqwest`-based loader.
///
/// Only works with the [`tokio`](https://tokio.rs/) runtime.
///
/// Loaded documents are not cached: a new network query is made each time
/// an URL is loaded even if it has already been queried before. Register
/// the contexts you use often in a [`ContextRegistry`](crate::ContextRegistry)
/// and use this loader as its fallback.
#[derive(Debug, Clone, Default)]
pub struct ReqwestLoader {
	options: Options,
}

impl ReqwestLoader {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a new loader with the given options.
	pub fn new_using(options: Options) -> Self {
		Self { options }
	}

	async fn fetch(&self, url: &Iri) -> Result<Document, Error> {
		log::debug!("downloading: {url}");
		let response = self
			.options
			.client
			.get(url.as_str())
			.header(ACCEPT, ACCEPT_HEADER)
			.send()
			.await?;

		if response.status() != StatusCode::OK {
			return Err(Error::QueryFailed(response.status()));
		}

		let content_type = response
			.headers()
			.get(CONTENT_TYPE)
			.and_then(|value| value.to_str().ok())
			.and_then(|value| value.parse::<Mime>().ok());

		let content_type = match content_type {
			Some(mime) if is_json(&mime) => mime,
			_ => return Err(Error::InvalidContentType),
		};

		let final_url = IriBuf::new(response.url().as_str().to_owned()).ok();
		let bytes = response.bytes().await?;
		let document = serde_json::from_slice(&bytes)?;

		let essence = content_type.essence_str().parse().ok();
		Ok(Document::new(
			final_url.or_else(|| Some(url.to_owned())),
			essence,
			document,
		))
	}
}

fn is_json(mime: &Mime) -> bool {
	mime.subtype() == mime::JSON || mime.suffix() == Some(mime::JSON)
}

impl Loader for ReqwestLoader {
	async fn load(&self, url: &Iri) -> Result<Document, LoadError> {
		self.fetch(url)
			.await
			.map_err(|e| LoadError::new(url.to_owned(), e))
	}
}
