use serde_json::Value;
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ContainerKind {
	Graph,
	Id,
	Index,
	Language,
	List,
	Set,
	Type,
}

impl ContainerKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Graph => "@graph",
			Self::Id => "@id",
			Self::Index => "@index",
			Self::Language => "@language",
			Self::List => "@list",
			Self::Set => "@set",
			Self::Type => "@type",
		}
	}
}

impl<'a> TryFrom<&'a str> for ContainerKind {
	type Error = &'a str;

	fn try_from(s: &'a str) -> Result<ContainerKind, &'a str> {
		use ContainerKind::*;
		match s {
			"@graph" => Ok(Graph),
			"@id" => Ok(Id),
			"@index" => Ok(Index),
			"@language" => Ok(Language),
			"@list" => Ok(List),
			"@set" => Ok(Set),
			"@type" => Ok(Type),
			_ => Err(s),
		}
	}
}

impl fmt::Display for ContainerKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

#[derive(Debug, thiserror::Error)]
#[error("invalid container mapping")]
pub struct InvalidContainer;

/// Container mapping of a term definition.
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Container(SmallVec<[ContainerKind; 2]>);

impl Container {
	pub fn new() -> Container {
		Container(SmallVec::new())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn contains(&self, c: ContainerKind) -> bool {
		self.0.contains(&c)
	}

	/// Only `@set` (or nothing) is set.
	pub fn is_plain(&self) -> bool {
		self.0.iter().all(|c| *c == ContainerKind::Set)
	}

	pub fn iter(&self) -> impl Iterator<Item = &ContainerKind> {
		self.0.iter()
	}

	/// Adds a container kind, checking the combination is allowed.
	pub fn add(&mut self, c: ContainerKind) -> bool {
		if self.contains(c) {
			return true;
		}

		use ContainerKind::*;
		let valid = match self.0.as_slice() {
			[] => true,
			[first] => matches!(
				(first, c),
				(Set, Index | Graph | Id | Type | Language)
					| (Index | Graph | Id | Type | Language, Set)
					| (Graph, Id | Index)
					| (Id | Index, Graph)
			),
			[_, _] => self.contains(Graph) && matches!(c, Set | Id | Index),
			_ => false,
		};

		if valid {
			self.0.push(c);
		}

		valid
	}

	/// Parses the `@container` entry of an expanded term definition.
	pub fn from_json(value: &Value) -> Result<Container, InvalidContainer> {
		let mut container = Container::new();
		match value {
			Value::Null => (),
			Value::String(s) => {
				let kind = ContainerKind::try_from(s.as_str()).map_err(|_| InvalidContainer)?;
				container.add(kind);
			}
			Value::Array(items) => {
				for item in items {
					let kind = item
						.as_str()
						.and_then(|s| ContainerKind::try_from(s).ok())
						.ok_or(InvalidContainer)?;
					if !container.add(kind) {
						return Err(InvalidContainer);
					}
				}
			}
			_ => return Err(InvalidContainer),
		}

		Ok(container)
	}
}

impl From<ContainerKind> for Container {
	fn from(c: ContainerKind) -> Self {
		let mut container = Container::new();
		container.add(c);
		container
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn parse_container() {
		let c = Container::from_json(&json!("@list")).unwrap();
		assert!(c.contains(ContainerKind::List));
		assert!(!c.is_plain());

		let c = Container::from_json(&json!(["@set", "@language"])).unwrap();
		assert!(c.contains(ContainerKind::Language));

		assert!(Container::from_json(&json!(["@list", "@set"])).is_err());
		assert!(Container::from_json(&json!("@foo")).is_err());
	}
}
