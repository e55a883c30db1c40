use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Number;
use std::{fmt, sync::Arc};

use super::Node;
use crate::{schema::ValueKind, vocab::xsd, LanguageValue};

/// Value of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Reference to another node, by IRI.
	Id(String),

	/// Nested node.
	Node(Arc<Node>),

	/// Natural language string, possibly in multiple languages.
	Language(LanguageValue),

	String(String),

	Number(Number),

	Boolean(bool),

	DateTime(DateTime<FixedOffset>),

	/// Literal with a datatype not covered by the other variants.
	Typed { value: String, datatype: String },
}

impl Value {
	/// Creates an IRI reference.
	pub fn id(iri: impl Into<String>) -> Self {
		Self::Id(iri.into())
	}

	pub fn is_node(&self) -> bool {
		matches!(self, Self::Node(_))
	}

	/// Checks if this value is a literal (anything but a reference or a node).
	pub fn is_literal(&self) -> bool {
		!matches!(self, Self::Id(_) | Self::Node(_))
	}

	/// Returns the identifier of the referenced or nested node.
	pub fn as_id(&self) -> Option<&str> {
		match self {
			Self::Id(id) => Some(id),
			Self::Node(node) => node.id(),
			_ => None,
		}
	}

	pub fn as_node(&self) -> Option<&Node> {
		match self {
			Self::Node(node) => Some(node),
			_ => None,
		}
	}

	pub fn as_language(&self) -> Option<&LanguageValue> {
		match self {
			Self::Language(value) => Some(value),
			_ => None,
		}
	}

	/// Returns the string form of a string-like value.
	///
	/// For language values, this is the default entry.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Id(s) | Self::String(s) => Some(s),
			Self::Language(value) => value.value(),
			Self::Typed { value, .. } => Some(value),
			_ => None,
		}
	}

	pub fn as_number(&self) -> Option<&Number> {
		match self {
			Self::Number(n) => Some(n),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		self.as_number().and_then(Number::as_f64)
	}

	pub fn as_u64(&self) -> Option<u64> {
		self.as_number().and_then(Number::as_u64)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Boolean(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
		match self {
			Self::DateTime(d) => Some(d),
			_ => None,
		}
	}

	/// Coerces the value into the given property value kind.
	///
	/// Strings become IRI references for reference properties, default
	/// entries of language values for natural language properties, and
	/// are parsed for date/time properties. Anything that does not fit is
	/// kept as is.
	pub fn coerce(self, kind: ValueKind) -> Self {
		match (kind, self) {
			(ValueKind::Id, Self::String(s)) => Self::Id(s),
			(ValueKind::Language, Self::String(s)) => Self::Language(LanguageValue::plain(s)),
			(ValueKind::DateTime, Self::String(s)) => match DateTime::parse_from_rfc3339(&s) {
				Ok(date) => Self::DateTime(date),
				Err(_) => Self::String(s),
			},
			(ValueKind::Duration, Self::String(s)) => Self::Typed {
				value: s,
				datatype: xsd::DURATION.to_owned(),
			},
			(_, value) => value,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Id(id) => id.fmt(f),
			Self::Node(node) => match node.id() {
				Some(id) => id.fmt(f),
				None => f.write_str("[node]"),
			},
			Self::Language(value) => value.fmt(f),
			Self::String(s) => s.fmt(f),
			Self::Number(n) => n.fmt(f),
			Self::Boolean(b) => b.fmt(f),
			Self::DateTime(d) => d.to_rfc3339().fmt(f),
			Self::Typed { value, .. } => value.fmt(f),
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Node> for Value {
	fn from(value: Node) -> Self {
		Self::Node(Arc::new(value))
	}
}

impl From<Arc<Node>> for Value {
	fn from(value: Arc<Node>) -> Self {
		Self::Node(value)
	}
}

impl From<LanguageValue> for Value {
	fn from(value: LanguageValue) -> Self {
		Self::Language(value)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Boolean(value)
	}
}

impl From<DateTime<FixedOffset>> for Value {
	fn from(value: DateTime<FixedOffset>) -> Self {
		Self::DateTime(value)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(value: DateTime<Utc>) -> Self {
		Self::DateTime(value.fixed_offset())
	}
}

impl From<Number> for Value {
	fn from(value: Number) -> Self {
		Self::Number(value)
	}
}

macro_rules! integer_values {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::Number(value.into())
				}
			}
		)*
	};
}

integer_values!(i32, i64, u32, u64, usize);

impl From<f64> for Value {
	/// Non-finite numbers are kept as `xsd:double` literals.
	fn from(value: f64) -> Self {
		match Number::from_f64(value) {
			Some(n) => Self::Number(n),
			None => Self::Typed {
				value: value.to_string(),
				datatype: xsd::DOUBLE.to_owned(),
			},
		}
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		f64::from(value).into()
	}
}
