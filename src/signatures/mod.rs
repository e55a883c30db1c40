//! Linked data proofs.
//!
//! Documents are signed following the Data Integrity scheme: the proof
//! options and the document (without its proof) are both canonicalized into
//! N-Quads and hashed with SHA-256, and the concatenation of the two hashes
//! is signed by the [`Suite`]. The resulting proof is attached under the
//! `proof` entry of the document.
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::{fmt, sync::Arc};

use crate::{
	algorithms::{
		self, canonicalization::to_nquads_with, rdf::ToRdfOptions, ExpansionOptions, ExpansionPolicy,
		RemoteContexts,
	},
	context::Context,
	syntax::Object,
	Loader,
};

mod ed25519;

pub use ed25519::{Ed25519KeyPair, Ed25519Signature2020};

/// Signature error.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
	#[error("the key pair has no secret key")]
	MissingSecretKey,

	#[error("invalid key: {0}")]
	InvalidKey(String),

	#[error("the document has no proof")]
	MissingProof,

	#[error("invalid proof: {0}")]
	InvalidProof(String),

	#[error("the document has no `@context`")]
	MissingContext,

	#[error(transparent)]
	Processing(#[from] algorithms::Error),
}

/// Proof purpose.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProofPurpose {
	#[default]
	AssertionMethod,
	Authentication,
	CapabilityInvocation,
	CapabilityDelegation,
}

impl ProofPurpose {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::AssertionMethod => "assertionMethod",
			Self::Authentication => "authentication",
			Self::CapabilityInvocation => "capabilityInvocation",
			Self::CapabilityDelegation => "capabilityDelegation",
		}
	}
}

impl fmt::Display for ProofPurpose {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.as_str().fmt(f)
	}
}

/// Signature suite.
pub trait Suite: fmt::Debug + Send + Sync {
	/// Proof type (e.g. `Ed25519Signature2020`).
	fn proof_type(&self) -> &str;

	/// URL of the context defining the proof terms.
	fn context_url(&self) -> &str;

	/// Identifier of the verification method (key) used by the suite.
	fn verification_method(&self) -> &str;

	/// Signs the given data, returning the proof value.
	fn sign(&self, data: &[u8]) -> Result<String, SignatureError>;

	/// Verifies a proof value against the given data.
	fn verify(&self, data: &[u8], proof_value: &str) -> Result<bool, SignatureError>;
}

/// Signing options.
#[derive(Debug, Clone)]
pub struct SignOptions {
	pub suite: Arc<dyn Suite>,
	pub purpose: ProofPurpose,

	/// Creation date of the proof. Defaults to now.
	pub created: Option<DateTime<Utc>>,
}

impl SignOptions {
	pub fn new(suite: Arc<dyn Suite>) -> Self {
		Self {
			suite,
			purpose: ProofPurpose::default(),
			created: None,
		}
	}

	pub fn with_purpose(mut self, purpose: ProofPurpose) -> Self {
		self.purpose = purpose;
		self
	}

	pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
		self.created = Some(created);
		self
	}
}

/// Verification options.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
	pub suite: Arc<dyn Suite>,
	pub purpose: ProofPurpose,
}

impl VerifyOptions {
	pub fn new(suite: Arc<dyn Suite>) -> Self {
		Self {
			suite,
			purpose: ProofPurpose::default(),
		}
	}

	pub fn with_purpose(mut self, purpose: ProofPurpose) -> Self {
		self.purpose = purpose;
		self
	}
}

/// Signs a compacted document.
///
/// The document `@context` must define the proof terms of the suite.
pub async fn sign(
	mut document: Object,
	options: &SignOptions,
	loader: &impl Loader,
) -> Result<Object, SignatureError> {
	let context = document
		.get("@context")
		.cloned()
		.ok_or(SignatureError::MissingContext)?;

	let suite = &options.suite;
	let created = options.created.unwrap_or_else(Utc::now);

	let mut proof = Object::new();
	proof.insert("type".to_owned(), suite.proof_type().into());
	proof.insert(
		"created".to_owned(),
		created.to_rfc3339_opts(SecondsFormat::Secs, true).into(),
	);
	proof.insert("verificationMethod".to_owned(), suite.verification_method().into());
	proof.insert("proofPurpose".to_owned(), options.purpose.as_str().into());

	document.shift_remove("proof");
	let data = signing_input(&document, &proof, &context, loader).await?;
	let proof_value = suite.sign(&data)?;
	log::debug!("signed document with `{}`", suite.verification_method());

	proof.insert("proofValue".to_owned(), proof_value.into());
	document.insert("proof".to_owned(), Value::Object(proof));
	Ok(document)
}

/// Verifies the proof of a signed document.
///
/// Returns `Ok(false)` if the proof does not match the document, the suite
/// or the purpose.
pub async fn verify(
	document: &Object,
	options: &VerifyOptions,
	loader: &impl Loader,
) -> Result<bool, SignatureError> {
	let context = document
		.get("@context")
		.cloned()
		.ok_or(SignatureError::MissingContext)?;

	let mut proof = match document.get("proof") {
		Some(Value::Object(proof)) => proof.clone(),
		Some(_) => return Err(SignatureError::InvalidProof("not an object".to_owned())),
		None => return Err(SignatureError::MissingProof),
	};

	let proof_value = match proof.shift_remove("proofValue") {
		Some(Value::String(value)) => value,
		_ => return Err(SignatureError::InvalidProof("missing `proofValue`".to_owned())),
	};

	let suite = &options.suite;
	if proof.get("type").and_then(Value::as_str) != Some(suite.proof_type())
		|| proof.get("proofPurpose").and_then(Value::as_str) != Some(options.purpose.as_str())
		|| proof.get("verificationMethod").and_then(Value::as_str)
			!= Some(suite.verification_method())
	{
		log::debug!("proof does not match the verification options");
		return Ok(false);
	}

	let mut unsigned = document.clone();
	unsigned.shift_remove("proof");
	match signing_input(&unsigned, &proof, &context, loader).await {
		Ok(data) => suite.verify(&data, &proof_value),
		Err(SignatureError::Processing(
			algorithms::Error::KeyExpansionFailed(term) | algorithms::Error::UnsafeTerm(term),
		)) => {
			log::debug!("`{term}` is not covered by the proof");
			Ok(false)
		}
		Err(e) => Err(e),
	}
}

/// Hashes of the canonical proof options and document.
async fn signing_input(
	document: &Object,
	proof: &Object,
	context: &Value,
	loader: &impl Loader,
) -> Result<Vec<u8>, SignatureError> {
	let mut proof = proof.clone();
	proof.insert("@context".to_owned(), context.clone());

	let mut data = Vec::with_capacity(64);
	data.extend(Sha256::digest(canonicalize(&Value::Object(proof), loader).await?));
	data.extend(Sha256::digest(
		canonicalize(&Value::Object(document.clone()), loader).await?,
	));
	Ok(data)
}

/// Canonical N-Quads form of a compacted document.
///
/// Fails on terms that would otherwise be left out of the N-Quads, such as
/// terms undefined by the document context.
pub async fn canonicalize(document: &Value, loader: &impl Loader) -> Result<String, SignatureError> {
	algorithms::check_depth(document)?;

	let mut remote_contexts = RemoteContexts::new();
	remote_contexts.load_document(loader, document, None).await?;
	let expanded = algorithms::expand(
		document,
		&Context::default(),
		&remote_contexts,
		ExpansionOptions {
			policy: ExpansionPolicy::Strict,
			..Default::default()
		},
	)?;

	Ok(to_nquads_with(&expanded, ToRdfOptions::safe())?)
}
