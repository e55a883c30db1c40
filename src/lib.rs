//! Activity Streams 2.0 object model with JSON-LD import and export.
//!
//! Nodes are built with a fluent [`Builder`], or imported from linked data
//! documents with a [`Processor`]. Exported nodes are compacted against the
//! Activity Streams context (plus any registered extension) and can be
//! signed with a linked data proof.
//!
//! ```
//! # async fn run() -> Result<(), activitystreams_ld::Error> {
//! use activitystreams_ld::{Builder, ExportOptions, ImportOptions, Processor};
//!
//! let processor = Processor::new();
//! let note = Builder::note()
//! 	.id("https://example.org/notes/1")
//! 	.content("Hello")
//! 	.to("https://www.w3.org/ns/activitystreams#Public")
//! 	.get();
//!
//! let json = processor.write(&note, ExportOptions::default(), true).await?;
//! let imported = processor.import_str(&json, ImportOptions::default()).await?;
//! assert_eq!(imported, Some(note));
//! # Ok(())
//! # }
//! ```
//!
//! Context documents are resolved through a [`ContextRegistry`], seeded with
//! the Activity Streams and security contexts. Other contexts must be
//! registered, or loaded by a fallback [`Loader`] such as
//! `ReqwestLoader` (`reqwest` feature).
pub mod algorithms;
pub mod builder;
pub mod context;
mod document;
mod environment;
mod error;
mod extension;
mod lang_string;
pub mod loader;
pub mod model;
mod processor;
mod registry;
pub mod schema;
pub mod signatures;
pub mod stream;
pub mod syntax;
pub mod vocab;

pub use builder::Builder;
pub use document::Document;
pub use environment::Environment;
pub use error::Error;
pub use extension::Extension;
pub use lang_string::{LanguageValue, LanguageValueBuilder};
pub use loader::{ChainLoader, LoadError, Loader, NoLoader};
pub use model::{Kind, Node, Value, Values};
pub use processor::{ExportOptions, ImportOptions, Processor};
pub use registry::{ContextRegistry, NotRegistered};
