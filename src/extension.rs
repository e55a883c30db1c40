use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Vocabulary extension.
///
/// An extension contributes a context document that is registered in a
/// [`ContextRegistry`](crate::ContextRegistry) and prepended to the
/// `@context` of every exported document.
///
/// Extensions can be deserialized from configuration files:
/// `{ "contextUrl": "https://example.org/ns", "context": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
	/// URL of the extension context.
	pub context_url: String,

	/// Context document served for `context_url`.
	///
	/// When `None`, the URL is only added to exported contexts and must be
	/// resolvable by the fallback loader.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub context: Option<Value>,
}

impl Extension {
	pub fn new(context_url: impl Into<String>, context: Value) -> Self {
		Self {
			context_url: context_url.into(),
			context: Some(context),
		}
	}

	/// Extension whose context document is loaded on demand.
	pub fn remote(context_url: impl Into<String>) -> Self {
		Self {
			context_url: context_url.into(),
			context: None,
		}
	}
}
