//! Property schema.
//!
//! Static description of every Activity Streams property: the term used in
//! compacted documents, its IRI, the kind of values it holds and whether it
//! is functional. The table drives value coercion in the builder and
//! during import and export.
use once_cell::sync::Lazy;
use std::{borrow::Cow, collections::HashMap};

use crate::vocab::{self, xsd};

/// Kind of the values held by a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
	/// References to other nodes (or nested nodes).
	Id,

	/// Natural language strings.
	Language,

	/// Plain strings.
	String,

	/// `xsd:dateTime` values.
	DateTime,

	/// `xsd:duration` values.
	Duration,

	/// `xsd:float` values.
	Float,

	/// `xsd:nonNegativeInteger` values.
	NonNegativeInteger,

	/// Anything.
	Any,
}

impl ValueKind {
	/// Datatype of the literal values of this kind.
	pub fn datatype(&self) -> Option<&'static str> {
		match self {
			Self::DateTime => Some(xsd::DATE_TIME),
			Self::Duration => Some(xsd::DURATION),
			Self::Float => Some(xsd::FLOAT),
			Self::NonNegativeInteger => Some(xsd::NON_NEGATIVE_INTEGER),
			_ => None,
		}
	}
}

/// How the values of a property are laid out in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
	/// Unordered set of values.
	Set,

	/// Ordered list.
	List,
}

/// Schema of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySchema {
	/// Term of the property in the Activity Streams context.
	pub term: &'static str,

	/// IRI of the property.
	pub iri: &'static str,

	pub kind: ValueKind,

	/// A functional property holds at most one value: setting it replaces
	/// the previous value instead of adding to it.
	pub functional: bool,

	pub container: Container,
}

macro_rules! properties {
	($($term:literal $(as $name:literal)? : $kind:ident $($flag:ident)*),* $(,)?) => {
		&[$(
			PropertySchema {
				term: $term,
				iri: properties!(@iri $term $(, $name)?),
				kind: ValueKind::$kind,
				functional: properties!(@functional $($flag)*),
				container: properties!(@container $($flag)*),
			}
		),*]
	};
	(@iri $term:literal) => { concat!("https://www.w3.org/ns/activitystreams#", $term) };
	(@iri $term:literal, $name:literal) => { $name };
	(@functional functional) => { true };
	(@functional $($flag:ident)*) => { false };
	(@container list) => { Container::List };
	(@container $($flag:ident)*) => { Container::Set };
}

/// Every known property.
///
/// `items` and `orderedItems` share the same IRI: the first is the unordered
/// form and the second the ordered one.
pub static PROPERTIES: &[PropertySchema] = properties! {
	// Object.
	"attachment": Id,
	"attributedTo": Id,
	"audience": Id,
	"bcc": Id,
	"bto": Id,
	"cc": Id,
	"content": Language,
	"context": Id,
	"duration": Duration functional,
	"endTime": DateTime functional,
	"generator": Id,
	"icon": Id,
	"image": Id,
	"inReplyTo": Id,
	"location": Id,
	"mediaType": String functional,
	"name": Language,
	"preview": Id,
	"published": DateTime functional,
	"replies": Id functional,
	"source": Any functional,
	"startTime": DateTime functional,
	"summary": Language,
	"tag": Id,
	"to": Id,
	"updated": DateTime functional,
	"url": Id,
	"likes": Id functional,
	"shares": Id functional,
	// Activity.
	"actor": Id,
	"instrument": Id,
	"object": Id,
	"origin": Id,
	"result": Id,
	"target": Id,
	// Question.
	"anyOf": Id,
	"oneOf": Id,
	"closed": Any,
	// Link.
	"height": NonNegativeInteger functional,
	"href": Id functional,
	"hreflang": String functional,
	"rel": String,
	"width": NonNegativeInteger functional,
	// Collection.
	"current": Id functional,
	"first": Id functional,
	"items": Id,
	"orderedItems" as "https://www.w3.org/ns/activitystreams#items": Id list,
	"last": Id functional,
	"totalItems": NonNegativeInteger functional,
	// Collection page.
	"next": Id functional,
	"partOf": Id functional,
	"prev": Id functional,
	"startIndex": NonNegativeInteger functional,
	// Place.
	"accuracy": Float functional,
	"altitude": Float functional,
	"latitude": Float functional,
	"longitude": Float functional,
	"radius": Float functional,
	"units": String functional,
	// Relationship.
	"relationship": Id,
	"subject": Id functional,
	// Profile.
	"describes": Id functional,
	// Tombstone.
	"deleted": DateTime functional,
	"formerType": Id,
	// Actors.
	"endpoints": Id functional,
	"followers": Id functional,
	"following": Id functional,
	"inbox" as "http://www.w3.org/ns/ldp#inbox": Id functional,
	"liked": Id functional,
	"outbox": Id functional,
	"preferredUsername": String functional,
	"streams": Id,
};

static BY_TERM: Lazy<HashMap<&'static str, &'static PropertySchema>> =
	Lazy::new(|| PROPERTIES.iter().map(|p| (p.term, p)).collect());

static BY_IRI: Lazy<HashMap<&'static str, &'static PropertySchema>> = Lazy::new(|| {
	let mut map = HashMap::new();
	for p in PROPERTIES {
		map.entry(p.iri).or_insert(p);
	}

	map
});

/// Finds a property by its Activity Streams term.
pub fn by_term(term: &str) -> Option<&'static PropertySchema> {
	BY_TERM.get(term).copied()
}

/// Finds a property by its IRI.
///
/// For `as:items`, the unordered form is returned.
pub fn by_iri(iri: &str) -> Option<&'static PropertySchema> {
	BY_IRI.get(iri).copied()
}

/// Resolves a property key into an IRI.
///
/// The key can be an Activity Streams term (`attributedTo`), a compact IRI
/// using a well-known prefix (`vcard:given-name`) or an IRI.
pub fn resolve(key: &str) -> Cow<'_, str> {
	match by_term(key) {
		Some(schema) => Cow::Borrowed(schema.iri),
		None => vocab::expand_prefix(key),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lookup() {
		let name = by_term("name").unwrap();
		assert_eq!(name.iri, "https://www.w3.org/ns/activitystreams#name");
		assert_eq!(name.kind, ValueKind::Language);
		assert!(!name.functional);

		let ordered = by_term("orderedItems").unwrap();
		assert_eq!(ordered.container, Container::List);
		assert_eq!(by_iri(ordered.iri).unwrap().term, "items");

		assert_eq!(by_term("inbox").unwrap().iri, vocab::ldp::INBOX);
		assert!(by_term("published").unwrap().functional);
		assert_eq!(ValueKind::Float.datatype(), Some(xsd::FLOAT));
	}

	#[test]
	fn resolution() {
		assert_eq!(resolve("attributedTo"), "https://www.w3.org/ns/activitystreams#attributedTo");
		assert_eq!(resolve("vcard:given-name"), "http://www.w3.org/2006/vcard/ns#given-name");
		assert_eq!(resolve("https://example.org/p"), "https://example.org/p");
	}
}
