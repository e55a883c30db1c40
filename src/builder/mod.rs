//! Fluent construction of nodes.
use std::sync::Arc;

use crate::{
	model::{Kind, Node, Value, Values},
	schema,
	vocab::{self, as2},
};

mod types;

macro_rules! setters {
	($($name:ident => $term:literal),* $(,)?) => {
		$(
			#[doc = concat!("Sets the `", $term, "` property. See [`Builder::set`].")]
			pub fn $name(self, values: impl Into<Values>) -> Self {
				self.set($term, values)
			}
		)*
	};
}

/// Node builder.
///
/// Accumulates the identifier, types and property values of a node.
/// [`get`](Self::get) materializes an independent snapshot: the builder can
/// keep being modified afterward without affecting the nodes it already
/// produced.
#[derive(Debug, Clone)]
pub struct Builder {
	node: Node,
}

impl Builder {
	/// Creates an untyped builder of the given kind.
	pub fn new(kind: Kind) -> Self {
		Self {
			node: Node::new(kind),
		}
	}

	/// Creates a builder producing a node of the given type.
	///
	/// The type can be an IRI, a compact IRI or an Activity Streams type
	/// name.
	pub fn with_type(ty: &str) -> Self {
		Self::new(Kind::Object).add_type(ty)
	}

	pub(crate) fn from_node(node: Node) -> Self {
		Self { node }
	}

	/// Sets the identifier of the node.
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.node.id = Some(id.into());
		self
	}

	/// Removes the identifier of the node.
	pub fn remove_id(mut self) -> Self {
		self.node.id = None;
		self
	}

	/// Adds a type to the node.
	///
	/// Adding a link type turns the node into a link.
	pub fn add_type(mut self, ty: &str) -> Self {
		let iri = resolve_type(ty);
		if as2::is_link_type(&iri) {
			self.node.kind = Kind::Link
		}

		if !self.node.types.contains(&iri) {
			self.node.types.push(iri)
		}

		self
	}

	/// Sets a property.
	///
	/// `key` can be an Activity Streams property name, a compact IRI with a
	/// well-known prefix (`vcard:given-name`) or an IRI.
	///
	/// The values of functional properties replace the previous ones, other
	/// properties accumulate values. Setting no value (an empty [`Values`],
	/// `None` or `()`) removes the property.
	///
	/// Values are coerced according to the property schema: for instance
	/// strings given to `to` are IRI references and strings given to `name`
	/// are natural language values.
	pub fn set(mut self, key: &str, values: impl Into<Values>) -> Self {
		let values: Values = values.into();
		let iri = schema::resolve(key).into_owned();
		let property = schema::by_term(key).or_else(|| schema::by_iri(&iri));
		let functional = property.is_some_and(|p| p.functional);

		if values.is_empty() {
			self.node.properties.shift_remove(&iri);
			return self;
		}

		let values = match property {
			Some(property) => {
				let mut values = values.map(|v| v.coerce(property.kind));
				if property.container == schema::Container::List {
					values.set_ordered(true)
				}

				values
			}
			None => values,
		};

		match self.node.properties.get_mut(&iri) {
			Some(current) if !functional => current.extend(values),
			_ => {
				let values = if functional {
					values.into_iter().take(1).collect()
				} else {
					values
				};

				self.node.properties.insert(iri, values);
			}
		}

		self
	}

	/// Removes a property.
	pub fn remove(self, key: &str) -> Self {
		self.set(key, ())
	}

	/// Materializes the node.
	pub fn get(&self) -> Node {
		self.node.clone()
	}

	/// Materializes a template.
	///
	/// Each call to the returned factory creates a new builder seeded with
	/// the current content of this one.
	pub fn template(&self) -> impl Fn() -> Builder + Clone + Send + Sync + 'static {
		let node = Arc::new(self.node.clone());
		move || Builder::from_node(Node::clone(&node))
	}

	setters! {
		// Object.
		attachment => "attachment",
		attributed_to => "attributedTo",
		audience => "audience",
		bcc => "bcc",
		bto => "bto",
		cc => "cc",
		content => "content",
		context => "context",
		duration => "duration",
		end_time => "endTime",
		generator => "generator",
		icon => "icon",
		image => "image",
		in_reply_to => "inReplyTo",
		location => "location",
		media_type => "mediaType",
		name => "name",
		preview => "preview",
		published => "published",
		replies => "replies",
		source => "source",
		start_time => "startTime",
		summary => "summary",
		tag => "tag",
		to => "to",
		updated => "updated",
		url => "url",
		likes => "likes",
		shares => "shares",
		// Activity.
		actor => "actor",
		instrument => "instrument",
		object => "object",
		origin => "origin",
		result => "result",
		target => "target",
		// Question.
		any_of => "anyOf",
		one_of => "oneOf",
		closed => "closed",
		// Link.
		height => "height",
		href => "href",
		hreflang => "hreflang",
		rel => "rel",
		width => "width",
		// Collection.
		current => "current",
		first => "first",
		items => "items",
		ordered_items => "orderedItems",
		last => "last",
		total_items => "totalItems",
		next => "next",
		part_of => "partOf",
		prev => "prev",
		start_index => "startIndex",
		// Place.
		accuracy => "accuracy",
		altitude => "altitude",
		latitude => "latitude",
		longitude => "longitude",
		radius => "radius",
		units => "units",
		// Relationship.
		relationship => "relationship",
		subject => "subject",
		// Profile.
		describes => "describes",
		// Tombstone.
		deleted => "deleted",
		former_type => "formerType",
		// Actors.
		endpoints => "endpoints",
		followers => "followers",
		following => "following",
		inbox => "inbox",
		liked => "liked",
		outbox => "outbox",
		preferred_username => "preferredUsername",
		streams => "streams",
	}
}

impl From<Builder> for Value {
	fn from(builder: Builder) -> Self {
		Value::from(builder.node)
	}
}

impl From<&Builder> for Value {
	fn from(builder: &Builder) -> Self {
		Value::from(builder.get())
	}
}

/// Resolves a type name into an IRI.
fn resolve_type(ty: &str) -> String {
	if ty.contains(':') {
		vocab::expand_prefix(ty).into_owned()
	} else {
		format!("{}{ty}", as2::NS)
	}
}
