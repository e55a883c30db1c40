//! Context documents bundled with the crate.
use once_cell::sync::Lazy;
use serde_json::Value;

use super::{as2, security};

fn parse(name: &str, source: &str) -> Value {
	// Bundled documents are checked by the tests below.
	serde_json::from_str(source).unwrap_or_else(|e| panic!("invalid bundled context `{name}`: {e}"))
}

/// Activity Streams 2.0 context.
pub static ACTIVITYSTREAMS: Lazy<Value> =
	Lazy::new(|| parse("activitystreams", include_str!("contexts/activitystreams.jsonld")));

/// Security vocabulary context, version 1.
pub static SECURITY_V1: Lazy<Value> =
	Lazy::new(|| parse("security-v1", include_str!("contexts/security-v1.jsonld")));

/// Security vocabulary context, version 2.
pub static SECURITY_V2: Lazy<Value> =
	Lazy::new(|| parse("security-v2", include_str!("contexts/security-v2.jsonld")));

/// Ed25519Signature2020 suite context.
pub static ED25519_2020: Lazy<Value> =
	Lazy::new(|| parse("ed25519-2020", include_str!("contexts/ed25519-2020.jsonld")));

/// URL and document of every bundled context.
pub fn bundled() -> [(&'static str, &'static Value); 5] {
	[
		(as2::CONTEXT_URL, &ACTIVITYSTREAMS),
		(as2::NS, &ACTIVITYSTREAMS),
		(security::V1_CONTEXT, &SECURITY_V1),
		(security::V2_CONTEXT, &SECURITY_V2),
		(security::ED25519_2020_CONTEXT, &ED25519_2020),
	]
}
