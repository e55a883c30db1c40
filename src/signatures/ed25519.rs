use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use super::{SignatureError, Suite};
use crate::vocab::security;

/// Ed25519 multicodec prefix.
const MULTICODEC_PREFIX: [u8; 2] = [0xed, 0x01];

/// Ed25519 key pair.
///
/// The public key is identified by a `did:key` verification method:
/// `did:key:<multibase>#<multibase>`, where the multibase is the base58btc
/// encoding of the multicodec-prefixed public key.
#[derive(Debug, Clone)]
pub struct Ed25519KeyPair {
	id: String,
	controller: String,
	signing_key: Option<SigningKey>,
	verifying_key: VerifyingKey,
}

impl Ed25519KeyPair {
	/// Generates a new key pair using the OS random number generator.
	pub fn generate() -> Self {
		Self::from_signing_key(SigningKey::generate(&mut OsRng))
	}

	/// Creates a key pair from the given secret key bytes.
	pub fn from_secret_bytes(secret: &[u8; 32]) -> Self {
		Self::from_signing_key(SigningKey::from_bytes(secret))
	}

	/// Creates a verification-only key pair from a public key multibase
	/// (`z6Mk...`).
	pub fn from_public_multibase(multibase: &str) -> Result<Self, SignatureError> {
		let encoded = multibase
			.strip_prefix('z')
			.ok_or_else(|| SignatureError::InvalidKey(format!("unsupported multibase `{multibase}`")))?;

		let bytes = bs58::decode(encoded)
			.into_vec()
			.map_err(|e| SignatureError::InvalidKey(e.to_string()))?;

		let key: [u8; 32] = bytes
			.strip_prefix(&MULTICODEC_PREFIX)
			.and_then(|key| key.try_into().ok())
			.ok_or_else(|| SignatureError::InvalidKey("not an Ed25519 public key".to_owned()))?;

		let verifying_key =
			VerifyingKey::from_bytes(&key).map_err(|e| SignatureError::InvalidKey(e.to_string()))?;

		let mut pair = Self {
			id: String::new(),
			controller: String::new(),
			signing_key: None,
			verifying_key,
		};
		pair.set_did_key_ids();
		Ok(pair)
	}

	fn from_signing_key(signing_key: SigningKey) -> Self {
		let mut pair = Self {
			id: String::new(),
			controller: String::new(),
			verifying_key: signing_key.verifying_key(),
			signing_key: Some(signing_key),
		};
		pair.set_did_key_ids();
		pair
	}

	fn set_did_key_ids(&mut self) {
		let multibase = self.public_multibase();
		self.controller = format!("did:key:{multibase}");
		self.id = format!("did:key:{multibase}#{multibase}");
	}

	/// Sets the identifier of the key and of its controller.
	pub fn with_id(mut self, id: impl Into<String>, controller: impl Into<String>) -> Self {
		self.id = id.into();
		self.controller = controller.into();
		self
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	pub fn controller(&self) -> &str {
		&self.controller
	}

	/// Public key, as a multibase string.
	pub fn public_multibase(&self) -> String {
		let mut bytes = Vec::with_capacity(34);
		bytes.extend_from_slice(&MULTICODEC_PREFIX);
		bytes.extend_from_slice(self.verifying_key.as_bytes());
		format!("z{}", bs58::encode(bytes).into_string())
	}

	/// Returns a copy of this key pair without the secret key.
	pub fn public(&self) -> Self {
		Self {
			signing_key: None,
			..self.clone()
		}
	}

	pub fn has_secret(&self) -> bool {
		self.signing_key.is_some()
	}
}

/// `Ed25519Signature2020` suite.
#[derive(Debug, Clone)]
pub struct Ed25519Signature2020 {
	key: Ed25519KeyPair,
}

impl Ed25519Signature2020 {
	pub const PROOF_TYPE: &'static str = "Ed25519Signature2020";

	pub fn new(key: Ed25519KeyPair) -> Self {
		Self { key }
	}

	pub fn key(&self) -> &Ed25519KeyPair {
		&self.key
	}
}

impl Suite for Ed25519Signature2020 {
	fn proof_type(&self) -> &str {
		Self::PROOF_TYPE
	}

	fn context_url(&self) -> &str {
		security::ED25519_2020_CONTEXT
	}

	fn verification_method(&self) -> &str {
		self.key.id()
	}

	fn sign(&self, data: &[u8]) -> Result<String, SignatureError> {
		let signing_key = self
			.key
			.signing_key
			.as_ref()
			.ok_or(SignatureError::MissingSecretKey)?;
		let signature = signing_key.sign(data);
		Ok(format!("z{}", bs58::encode(signature.to_bytes()).into_string()))
	}

	fn verify(&self, data: &[u8], proof_value: &str) -> Result<bool, SignatureError> {
		let encoded = proof_value
			.strip_prefix('z')
			.ok_or_else(|| SignatureError::InvalidProof("unsupported proof value encoding".to_owned()))?;

		let bytes = bs58::decode(encoded)
			.into_vec()
			.map_err(|e| SignatureError::InvalidProof(e.to_string()))?;

		let signature =
			Signature::from_slice(&bytes).map_err(|e| SignatureError::InvalidProof(e.to_string()))?;

		Ok(self.key.verifying_key.verify(data, &signature).is_ok())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key() -> Ed25519KeyPair {
		Ed25519KeyPair::from_secret_bytes(&[7u8; 32])
	}

	#[test]
	fn did_key() {
		let key = key();
		let multibase = key.public_multibase();
		assert!(multibase.starts_with("z6Mk"));
		assert_eq!(key.controller(), format!("did:key:{multibase}"));
		assert_eq!(key.id(), format!("did:key:{multibase}#{multibase}"));

		let public = Ed25519KeyPair::from_public_multibase(&multibase).unwrap();
		assert_eq!(public.id(), key.id());
		assert!(!public.has_secret());
		assert!(Ed25519KeyPair::from_public_multibase("abc").is_err());
	}

	#[test]
	fn sign_bytes() {
		let suite = Ed25519Signature2020::new(key());
		let proof_value = suite.sign(b"data").unwrap();
		assert!(proof_value.starts_with('z'));
		assert!(suite.verify(b"data", &proof_value).unwrap());
		assert!(!suite.verify(b"other", &proof_value).unwrap());

		let public = Ed25519Signature2020::new(key().public());
		assert!(public.verify(b"data", &proof_value).unwrap());
		assert!(matches!(public.sign(b"data"), Err(SignatureError::MissingSecretKey)));
	}
}
