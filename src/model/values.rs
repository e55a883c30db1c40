use std::{slice, sync::Arc};

use super::{Node, Value};
use crate::{Builder, LanguageValue};

/// Values of a property.
///
/// Ordered sequence of 0 or more values. Insertion order is always kept;
/// when the values form an ordered list (such as the `orderedItems` of a
/// collection) the container is flagged as [`ordered`](Self::is_ordered)
/// and exported as a list.
///
/// Absent properties read as an empty container, never as an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Values {
	items: Vec<Value>,
	ordered: bool,
}

impl Values {
	pub const fn new() -> Self {
		Self {
			items: Vec::new(),
			ordered: false,
		}
	}

	/// Creates an ordered list of values.
	pub fn list(items: impl IntoIterator<Item = impl Into<Value>>) -> Self {
		Self {
			items: items.into_iter().map(Into::into).collect(),
			ordered: true,
		}
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn is_ordered(&self) -> bool {
		self.ordered
	}

	pub fn set_ordered(&mut self, ordered: bool) {
		self.ordered = ordered
	}

	pub fn first(&self) -> Option<&Value> {
		self.items.first()
	}

	pub fn get(&self, i: usize) -> Option<&Value> {
		self.items.get(i)
	}

	pub fn iter(&self) -> slice::Iter<'_, Value> {
		self.items.iter()
	}

	pub fn as_slice(&self) -> &[Value] {
		&self.items
	}

	/// Unwraps a single literal value.
	///
	/// Returns `None` if the container is empty, holds more than one value
	/// or holds a reference or node.
	pub fn value(&self) -> Option<&Value> {
		match self.items.as_slice() {
			[value] if value.is_literal() => Some(value),
			_ => None,
		}
	}

	/// String form of the first value, if it has one.
	///
	/// Equivalent to `values.first().and_then(Value::as_str)`.
	pub fn as_str(&self) -> Option<&str> {
		self.first().and_then(Value::as_str)
	}

	/// First language value.
	pub fn as_language(&self) -> Option<&LanguageValue> {
		self.first().and_then(Value::as_language)
	}

	/// First nested node.
	pub fn as_node(&self) -> Option<&Node> {
		self.first().and_then(Value::as_node)
	}

	/// Identifiers of the referenced or nested nodes, in order.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.items.iter().filter_map(Value::as_id)
	}

	pub fn push(&mut self, value: impl Into<Value>) {
		self.items.push(value.into())
	}

	/// Appends the given values, keeping the ordered flag if any of the two
	/// containers is ordered.
	pub fn extend(&mut self, other: Values) {
		self.ordered |= other.ordered;
		self.items.extend(other.items)
	}

	pub(crate) fn map(self, f: impl Fn(Value) -> Value) -> Self {
		Self {
			items: self.items.into_iter().map(f).collect(),
			ordered: self.ordered,
		}
	}
}

impl<'a> IntoIterator for &'a Values {
	type Item = &'a Value;
	type IntoIter = slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl IntoIterator for Values {
	type Item = Value;
	type IntoIter = std::vec::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}

impl FromIterator<Value> for Values {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Self {
			items: iter.into_iter().collect(),
			ordered: false,
		}
	}
}

impl<T: Into<Value>> From<Vec<T>> for Values {
	fn from(items: Vec<T>) -> Self {
		items.into_iter().map(Into::into).collect()
	}
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Values {
	fn from(items: [T; N]) -> Self {
		items.into_iter().map(Into::into).collect()
	}
}

impl<T: Into<Value>> From<Option<T>> for Values {
	fn from(value: Option<T>) -> Self {
		value.into_iter().map(Into::into).collect()
	}
}

impl From<()> for Values {
	fn from(_: ()) -> Self {
		Self::new()
	}
}

macro_rules! single_values {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Values {
				fn from(value: $ty) -> Self {
					Self {
						items: vec![value.into()],
						ordered: false,
					}
				}
			}
		)*
	};
}

single_values!(
	Value,
	&str,
	String,
	Node,
	Arc<Node>,
	Builder,
	LanguageValue,
	bool,
	i32,
	i64,
	u32,
	u64,
	usize,
	f32,
	f64,
	serde_json::Number,
	chrono::DateTime<chrono::Utc>,
	chrono::DateTime<chrono::FixedOffset>
);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn single_value() {
		let values = Values::from("a");
		assert_eq!(values.len(), 1);
		assert_eq!(values.value(), Some(&Value::from("a")));
		assert_eq!(values.as_str(), Some("a"));

		let values = Values::from(vec!["a", "b"]);
		assert_eq!(values.first(), Some(&Value::from("a")));
		assert_eq!(values.value(), None);

		let values = Values::from(Value::id("https://example.org/a"));
		assert_eq!(values.value(), None);
		assert_eq!(values.ids().collect::<Vec<_>>(), ["https://example.org/a"]);
	}

	#[test]
	fn iteration_is_restartable() {
		let values = Values::list([1, 2, 3]);
		assert!(values.is_ordered());
		let first: Vec<_> = values.iter().filter_map(Value::as_u64).collect();
		let second: Vec<_> = values.iter().filter_map(Value::as_u64).collect();
		assert_eq!(first, [1, 2, 3]);
		assert_eq!(first, second);
	}

	#[test]
	fn empty() {
		assert!(Values::from(None::<&str>).is_empty());
		assert!(Values::from(()).first().is_none());
		assert!(Values::new().value().is_none());
	}
}
