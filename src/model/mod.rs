//! Object graph: nodes, their property values, and the conversion from and
//! to expanded documents.
mod export;
mod import;
mod node;
mod value;
mod values;

pub use export::node_to_expanded;
pub use import::{import_document, node_from_expanded};
pub use node::{Kind, Node};
pub use value::Value;
pub use values::Values;
