//! Vocabularies: namespace constants and the bundled context documents.
pub mod as2;
pub mod contexts;

/// RDF vocabulary.
pub mod rdf {
	pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
	pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
	pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
	pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
	pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
	pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
}

/// XML Schema datatypes.
pub mod xsd {
	pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
	pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
	pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
	pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
	pub const DURATION: &str = "http://www.w3.org/2001/XMLSchema#duration";
	pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
	pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
	pub const NON_NEGATIVE_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#nonNegativeInteger";
	pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
}

/// Linked Data Platform vocabulary.
pub mod ldp {
	pub const NS: &str = "http://www.w3.org/ns/ldp#";
	pub const INBOX: &str = "http://www.w3.org/ns/ldp#inbox";
}

/// vCard vocabulary.
pub mod vcard {
	pub const NS: &str = "http://www.w3.org/2006/vcard/ns#";
}

/// Security vocabulary, used by linked data proofs.
pub mod security {
	pub const NS: &str = "https://w3id.org/security#";
	pub const V1_CONTEXT: &str = "https://w3id.org/security/v1";
	pub const V2_CONTEXT: &str = "https://w3id.org/security/v2";
	pub const ED25519_2020_CONTEXT: &str = "https://w3id.org/security/suites/ed25519-2020/v1";
}

/// Prefixes understood in compact IRIs given to the builder, with the
/// namespace they stand for.
pub const PREFIXES: &[(&str, &str)] = &[
	("as", as2::NS),
	("ldp", ldp::NS),
	("rdf", rdf::NS),
	("sec", security::NS),
	("vcard", vcard::NS),
	("xsd", xsd::NS),
];

/// Expands a compact IRI using the well-known [`PREFIXES`].
///
/// Anything else is returned as is.
pub fn expand_prefix(value: &str) -> std::borrow::Cow<'_, str> {
	if let Some((prefix, suffix)) = value.split_once(':') {
		if !suffix.starts_with("//") {
			if let Some((_, ns)) = PREFIXES.iter().find(|(p, _)| *p == prefix) {
				return format!("{ns}{suffix}").into();
			}
		}
	}

	value.into()
}
