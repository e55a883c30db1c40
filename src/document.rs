use iref::{Iri, IriBuf};
use mime::Mime;
use serde_json::Value;

/// Remote document.
///
/// Stores the content of a loaded remote document along with its original URL.
#[derive(Debug, Clone)]
pub struct Document<T = Value> {
	/// The final URL of the loaded document, after eventual redirection.
	pub url: Option<IriBuf>,

	/// The HTTP `Content-Type` header value of the loaded document, exclusive
	/// of any optional parameters.
	pub content_type: Option<Mime>,

	/// If available, the value of the HTTP `Link Header` [RFC 8288] using the
	/// `http://www.w3.org/ns/json-ld#context` link relation in the response.
	///
	/// Documents served from a [`ContextRegistry`](crate::ContextRegistry)
	/// never have one.
	///
	/// [RFC 8288]: https://www.rfc-editor.org/rfc/rfc8288
	pub context_url: Option<IriBuf>,

	/// The retrieved document.
	pub document: T,
}

impl<T> Document<T> {
	/// Creates a new remote document.
	///
	/// `url` is the final URL of the loaded document, after eventual
	/// redirection.
	/// `content_type` is the HTTP `Content-Type` header value of the loaded
	/// document, exclusive of any optional parameters.
	pub fn new(url: Option<IriBuf>, content_type: Option<Mime>, document: T) -> Self {
		Self {
			url,
			content_type,
			context_url: None,
			document,
		}
	}

	/// Maps the content of the remote document.
	pub fn map<U>(self, f: impl Fn(T) -> U) -> Document<U> {
		Document {
			url: self.url,
			content_type: self.content_type,
			context_url: self.context_url,
			document: f(self.document),
		}
	}

	/// Returns a reference to the final URL of the loaded document, after eventual redirection.
	pub fn url(&self) -> Option<&Iri> {
		self.url.as_deref()
	}

	/// Returns the HTTP `Content-Type` header value of the loaded document,
	/// exclusive of any optional parameters.
	pub fn content_type(&self) -> Option<&Mime> {
		self.content_type.as_ref()
	}

	/// Returns the value of the HTTP `Link Header` using the JSON-LD context
	/// link relation, if any.
	pub fn context_url(&self) -> Option<&Iri> {
		self.context_url.as_deref()
	}

	/// Returns a reference to the content of the document.
	pub fn document(&self) -> &T {
		&self.document
	}

	/// Drops the original URL and returns the content of the document.
	pub fn into_document(self) -> T {
		self.document
	}
}

impl Document {
	/// Returns the `@context` entry of the document, which is what a context
	/// document is loaded for.
	pub fn context(&self) -> Option<&Value> {
		self.document.as_object().and_then(|o| o.get("@context"))
	}
}
