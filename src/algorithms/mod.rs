//! JSON-LD algorithms: context processing, expansion, compaction, RDF
//! conversion and canonical N-Quads serialization.
//!
//! Only context processing needs to load documents. The
//! [`RemoteContexts`] cache is filled asynchronously beforehand, then every
//! algorithm runs synchronously against it.
pub mod canonicalization;
pub mod compaction;
pub mod context_processing;
mod error;
pub mod expansion;
pub mod rdf;
mod warning;

pub use canonicalization::{to_nquads, to_nquads_with};
pub use compaction::{compact, CompactionOptions};
pub use context_processing::{ContextProcessingOptions, RemoteContexts};
pub use error::*;
pub use expansion::{check_depth, expand, ExpandedDocument, ExpansionOptions, ExpansionPolicy, MAX_DEPTH};
pub use warning::*;
