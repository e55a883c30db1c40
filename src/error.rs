use crate::{algorithms, signatures::SignatureError};

/// Error raised by a [`Processor`](crate::Processor) operation.
///
/// Each variant identifies the stage that failed. A failing operation never
/// returns a partial result.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The input is not valid JSON.
	#[error("parse error: {0}")]
	Parse(#[from] serde_json::Error),

	/// Document expansion failed.
	#[error("import failed: {0}")]
	Import(algorithms::Error),

	/// Document compaction failed.
	#[error("export failed: {0}")]
	Export(algorithms::Error),

	/// Canonicalization failed.
	#[error("normalization failed: {0}")]
	Normalize(algorithms::Error),

	#[error("signing failed: {0}")]
	Signing(SignatureError),

	#[error("verification failed: {0}")]
	Verification(SignatureError),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
