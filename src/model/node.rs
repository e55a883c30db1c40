use educe::Educe;
use indexmap::IndexMap;
use std::sync::Arc;

use super::Values;
use crate::{schema, vocab::as2, Builder, Environment, LanguageValue};

/// Kind of node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// Referenceable node: objects, activities, actors, collections...
	Object,

	/// Navigable reference to another resource (`Link`, `Mention`).
	Link,
}

impl Kind {
	/// Discriminates links from objects.
	///
	/// A node is a link if one of its types is a link type, or if it has no
	/// type at all but has an `href`.
	pub fn of<'a>(types: impl IntoIterator<Item = &'a str>, has_href: bool) -> Self {
		let mut typed = false;
		for ty in types {
			if as2::is_link_type(ty) {
				return Self::Link;
			}

			typed = true
		}

		if !typed && has_href {
			Self::Link
		} else {
			Self::Object
		}
	}
}

static EMPTY: Values = Values::new();

/// Node of an object graph.
///
/// A node has an optional identifier (nodes without one are blank), a list of
/// types and values for each of its properties, keyed by property IRI.
///
/// Nodes are immutable once built. Use [`Node::to_builder`] to derive a new
/// node from an existing one.
///
/// Imported nodes keep the [`Environment`] of their import, used to export
/// them with their original context. It is not considered by comparisons.
#[derive(Educe, Clone)]
#[educe(Debug, PartialEq)]
pub struct Node {
	pub(crate) kind: Kind,
	pub(crate) id: Option<String>,
	pub(crate) types: Vec<String>,
	pub(crate) properties: IndexMap<String, Values>,
	#[educe(Debug(ignore), PartialEq(ignore))]
	pub(crate) environment: Option<Arc<Environment>>,
}

macro_rules! language_getters {
	($($name:ident => $term:literal),*) => {
		$(
			#[doc = concat!("Value of the `", $term, "` property.")]
			pub fn $name(&self) -> Option<&LanguageValue> {
				self.get($term).as_language()
			}
		)*
	};
}

macro_rules! getters {
	($($name:ident => $term:literal),*) => {
		$(
			#[doc = concat!("Values of the `", $term, "` property.")]
			pub fn $name(&self) -> &Values {
				self.get($term)
			}
		)*
	};
}

impl Node {
	pub(crate) fn new(kind: Kind) -> Self {
		Self {
			kind,
			id: None,
			types: Vec::new(),
			properties: IndexMap::new(),
			environment: None,
		}
	}

	/// Environment of the import that produced this node.
	pub fn environment(&self) -> Option<&Arc<Environment>> {
		self.environment.as_ref()
	}

	pub(crate) fn with_environment(mut self, environment: Arc<Environment>) -> Self {
		self.environment = Some(environment);
		self
	}

	pub fn kind(&self) -> Kind {
		self.kind
	}

	pub fn is_link(&self) -> bool {
		self.kind == Kind::Link
	}

	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	/// Type IRIs.
	pub fn types(&self) -> &[String] {
		&self.types
	}

	/// Checks if the node has the given type.
	///
	/// The type can be given as an IRI, or as an Activity Streams term.
	pub fn has_type(&self, ty: &str) -> bool {
		self.types
			.iter()
			.any(|t| t == ty || t.strip_prefix(as2::NS) == Some(ty))
	}

	/// Values of the given property.
	///
	/// The key can be an Activity Streams term, a compact IRI with a
	/// well-known prefix or an IRI. An absent property has no values.
	pub fn get(&self, key: &str) -> &Values {
		self.properties
			.get(schema::resolve(key).as_ref())
			.unwrap_or(&EMPTY)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.properties.contains_key(schema::resolve(key).as_ref())
	}

	/// Properties, by IRI, in insertion order.
	pub fn properties(&self) -> impl Iterator<Item = (&str, &Values)> {
		self.properties.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Creates a builder seeded with the content of this node.
	pub fn to_builder(&self) -> Builder {
		Builder::from_node(self.clone())
	}

	language_getters! {
		name => "name",
		summary => "summary",
		content => "content"
	}

	getters! {
		actor => "actor",
		object => "object",
		target => "target",
		attributed_to => "attributedTo",
		to => "to",
		cc => "cc",
		url => "url",
		href => "href",
		tag => "tag",
		attachment => "attachment",
		items => "items",
		published => "published",
		updated => "updated"
	}
}
