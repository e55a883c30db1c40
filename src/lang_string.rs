use std::fmt;

/// Language-tagged string.
///
/// Holds at most one string per language tag (tags compare
/// case-insensitively). The empty tag designates the default entry; when
/// there is none, the first inserted entry is the default.
///
/// Values are immutable, and built with a [`LanguageValueBuilder`].
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct LanguageValue {
	entries: Vec<(String, String)>,
}

impl LanguageValue {
	/// Creates a new language value builder.
	pub fn builder() -> LanguageValueBuilder {
		LanguageValueBuilder::new()
	}

	/// Creates a value with a single, untagged, default entry.
	pub fn plain(value: impl Into<String>) -> Self {
		Self {
			entries: vec![(String::new(), value.into())],
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the default entry.
	pub fn value(&self) -> Option<&str> {
		self.entries
			.iter()
			.find(|(tag, _)| tag.is_empty())
			.or_else(|| self.entries.first())
			.map(|(_, value)| value.as_str())
	}

	/// Looks up the string for the given language tag.
	///
	/// The lookup tries, in order:
	///   - an exact (case-insensitive) match, then the tag stripped of its
	///     trailing subtags one by one (`en-US-x-foo`, `en-US`, `en`);
	///   - any entry sharing the same primary language subtag
	///     (`fr` matches `fr-US`);
	///   - the default entry.
	///
	/// An empty `tag` returns the default entry.
	pub fn get(&self, tag: &str) -> Option<&str> {
		if tag.is_empty() {
			return self.value();
		}

		let mut candidate = tag;
		loop {
			if let Some(value) = self.exact(candidate) {
				return Some(value);
			}

			match candidate.rfind('-') {
				Some(i) => candidate = &candidate[..i],
				None => break,
			}
		}

		let primary = primary_subtag(tag);
		self.entries
			.iter()
			.find(|(t, _)| !t.is_empty() && primary_subtag(t).eq_ignore_ascii_case(primary))
			.map(|(_, value)| value.as_str())
			.or_else(|| self.value())
	}

	/// Returns the entry for exactly this tag (compared case-insensitively).
	pub fn exact(&self, tag: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(t, _)| t.eq_ignore_ascii_case(tag))
			.map(|(_, value)| value.as_str())
	}

	/// Checks if an entry is defined for exactly this tag.
	pub fn has(&self, tag: &str) -> bool {
		self.exact(tag).is_some()
	}

	/// Iterates over the `(tag, value)` entries in insertion order.
	///
	/// The default entry, if explicitly set, has the empty tag.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries.iter().map(|(t, v)| (t.as_str(), v.as_str()))
	}

	pub fn tags(&self) -> impl Iterator<Item = &str> {
		self.entries.iter().map(|(t, _)| t.as_str())
	}

	pub(crate) fn insert(&mut self, tag: &str, value: String) {
		match self
			.entries
			.iter_mut()
			.find(|(t, _)| t.eq_ignore_ascii_case(tag))
		{
			Some(entry) => *entry = (tag.to_owned(), value),
			None => {
				if !tag.is_empty() && langtag::LangTag::new(tag).is_err() {
					log::warn!("invalid language tag `{tag}`");
				}

				self.entries.push((tag.to_owned(), value))
			}
		}
	}
}

fn primary_subtag(tag: &str) -> &str {
	match tag.find('-') {
		Some(i) => &tag[..i],
		None => tag,
	}
}

impl fmt::Display for LanguageValue {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.value().unwrap_or_default().fmt(f)
	}
}

impl From<&str> for LanguageValue {
	fn from(value: &str) -> Self {
		Self::plain(value)
	}
}

impl From<String> for LanguageValue {
	fn from(value: String) -> Self {
		Self::plain(value)
	}
}

impl From<LanguageValueBuilder> for LanguageValue {
	fn from(builder: LanguageValueBuilder) -> Self {
		builder.value
	}
}

impl From<&LanguageValueBuilder> for LanguageValue {
	fn from(builder: &LanguageValueBuilder) -> Self {
		builder.get()
	}
}

impl From<&mut LanguageValueBuilder> for LanguageValue {
	fn from(builder: &mut LanguageValueBuilder) -> Self {
		builder.get()
	}
}

/// Accumulates the entries of a [`LanguageValue`].
///
/// [`get`](Self::get) is not terminal: every call returns an independent
/// snapshot and the builder can keep being modified afterward.
#[derive(Clone, Default, Debug)]
pub struct LanguageValueBuilder {
	value: LanguageValue,
}

impl LanguageValueBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the value for the given tag, replacing any previous one.
	///
	/// The empty tag sets the default entry.
	pub fn set(&mut self, tag: impl AsRef<str>, value: impl Into<String>) -> &mut Self {
		self.value.insert(tag.as_ref(), value.into());
		self
	}

	/// Sets the default (untagged) entry.
	pub fn set_default(&mut self, value: impl Into<String>) -> &mut Self {
		self.set("", value)
	}

	/// Checks if an entry is already set for exactly this tag.
	pub fn has(&self, tag: &str) -> bool {
		self.value.has(tag)
	}

	pub fn get(&self) -> LanguageValue {
		self.value.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> LanguageValue {
		let mut builder = LanguageValue::builder();
		builder.set("en-US", "bar");
		builder.set("fr-US", "baz");
		builder.set("fr", "boo");
		builder.get()
	}

	#[test]
	fn fallback() {
		let lv = sample();
		assert_eq!(lv.value(), Some("bar"));
		assert_eq!(lv.get("en"), Some("bar"));
		assert_eq!(lv.get("en-us"), Some("bar"));
		assert_eq!(lv.get("en-US"), Some("bar"));
		assert_eq!(lv.get("en-Us-Scrp"), Some("bar"));
		assert_eq!(lv.get("fr"), Some("boo"));
		assert_eq!(lv.get("FR-US"), Some("baz"));
		assert_eq!(lv.get("de"), Some("bar"));
	}

	#[test]
	fn explicit_default() {
		let lv = LanguageValue::builder()
			.set("de", "hallo")
			.set_default("hello")
			.get();
		assert_eq!(lv.value(), Some("hello"));
		assert_eq!(lv.get("de"), Some("hallo"));
		assert_eq!(lv.to_string(), "hello");
	}

	#[test]
	fn replace_is_case_insensitive() {
		let lv = LanguageValue::builder()
			.set("en", "a")
			.set("EN", "b")
			.get();
		assert_eq!(lv.len(), 1);
		assert_eq!(lv.get("en"), Some("b"));
	}

	#[test]
	fn snapshots_are_independent() {
		let mut builder = LanguageValue::builder();
		builder.set("en", "one");
		let first = builder.get();
		builder.set("en", "two");
		let second = builder.get();
		assert_eq!(first.get("en"), Some("one"));
		assert_eq!(second.get("en"), Some("two"));
	}

	#[test]
	fn empty() {
		let lv = LanguageValue::default();
		assert_eq!(lv.value(), None);
		assert_eq!(lv.get("en"), None);
	}
}
