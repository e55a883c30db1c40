//! JSON-LD syntax elements: keywords and container mappings.
pub mod container;
mod keyword;

pub use container::{Container, ContainerKind};
pub use keyword::*;

/// Value of a JSON-LD document, expanded or compacted.
pub use serde_json::Value;

/// JSON object.
pub type Object = serde_json::Map<String, Value>;
