use crate::{syntax::Keyword, LoadError};

/// Processing error.
///
/// Variants are named after the JSON-LD error codes they correspond to.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// A remote context could not be loaded.
	#[error(transparent)]
	LoadingRemoteContextFailed(#[from] LoadError),

	/// A remote context is referenced but was not loaded beforehand.
	#[error("remote context `{0}` is not loaded")]
	ContextNotLoaded(String),

	/// A context URL cannot be resolved into an IRI.
	#[error("invalid context URL `{0}`")]
	InvalidContextUrl(String),

	/// No valid context document has been found for a referenced remote context.
	#[error("invalid remote context `{0}`")]
	InvalidRemoteContext(String),

	/// A cycle in remote context inclusions has been detected.
	#[error("recursive inclusion of context `{0}`")]
	RecursiveContextInclusion(String),

	/// An attempt was made to nullify a context containing protected term definitions.
	#[error("invalid context nullification")]
	InvalidContextNullification,

	/// An attempt was made to redefine a protected term.
	#[error("protected term `{0}` redefinition")]
	ProtectedTermRedefinition(String),

	/// An invalid local context was detected.
	#[error("invalid local context")]
	InvalidLocalContext,

	/// An invalid base IRI has been detected, i.e., it is neither an IRI nor null.
	#[error("invalid base IRI")]
	InvalidBaseIri,

	/// An invalid vocabulary mapping has been detected, i.e., it is neither an IRI nor null.
	#[error("invalid vocabulary mapping")]
	InvalidVocabMapping,

	/// The value of the default language is not a string or null and thus invalid.
	#[error("invalid default language")]
	InvalidDefaultLanguage,

	/// The `@version` entry was used in a context with an out of range value.
	#[error("invalid `@version` value")]
	InvalidVersionValue,

	/// A keyword redefinition has been detected.
	#[error("keyword `{0}` redefinition")]
	KeywordRedefinition(Keyword),

	/// An invalid term definition has been detected.
	#[error("invalid definition of term `{0}`")]
	InvalidTermDefinition(String),

	/// A cycle in IRI mappings has been detected.
	#[error("cyclic IRI mapping for term `{0}`")]
	CyclicIriMapping(String),

	/// A local context contains a term that has an invalid or missing IRI mapping.
	#[error("invalid IRI mapping for term `{0}`")]
	InvalidIriMapping(String),

	/// An invalid keyword alias definition has been encountered.
	#[error("invalid keyword alias `{0}`")]
	InvalidKeywordAlias(String),

	/// An `@type` entry in a term definition is not a valid type mapping.
	#[error("invalid type mapping for term `{0}`")]
	InvalidTypeMapping(String),

	/// An `@container` entry of a term definition is not a valid container mapping.
	#[error("invalid container mapping for term `{0}`")]
	InvalidContainerMapping(String),

	/// An `@language` entry in a term definition is neither a string nor null.
	#[error("invalid language mapping for term `{0}`")]
	InvalidLanguageMapping(String),

	/// An invalid value for `@prefix` has been found.
	#[error("invalid `@prefix` value for term `{0}`")]
	InvalidPrefixValue(String),

	/// The input uses a JSON-LD feature this processor does not implement.
	#[error("unsupported keyword `{0}`")]
	Unsupported(Keyword),

	/// An `@id` entry was encountered whose value was not a string.
	#[error("invalid `@id` value")]
	InvalidIdValue,

	/// An invalid value for an `@type` entry has been detected.
	#[error("invalid `@type` value")]
	InvalidTypeValue,

	/// A typed value with an invalid type was detected.
	#[error("invalid typed value")]
	InvalidTypedValue,

	/// A value object with disallowed entries has been detected.
	#[error("invalid value object")]
	InvalidValueObject,

	/// An invalid value for the `@value` entry of a value object has been detected.
	#[error("invalid value object value")]
	InvalidValueObjectValue,

	/// A language-tagged string with an invalid language value was detected.
	#[error("invalid language-tagged string")]
	InvalidLanguageTaggedString,

	/// A number, true, or false with an associated language tag was detected.
	#[error("invalid language-tagged value")]
	InvalidLanguageTaggedValue,

	/// An invalid value in a language map has been detected.
	#[error("invalid language map value")]
	InvalidLanguageMapValue,

	/// A set object or list object with disallowed entries has been detected.
	#[error("invalid set or list object")]
	InvalidSetOrListObject,

	/// A key does not expand into an IRI and the expansion policy forbids it.
	#[error("key `{0}` does not expand into an IRI")]
	KeyExpansionFailed(String),

	/// The document is nested deeper than the processor accepts.
	#[error("document nested deeper than {0} levels")]
	DepthLimitExceeded(usize),

	/// A term of the document would be dropped when converted to RDF, and the
	/// conversion is in safe mode.
	#[error("`{0}` cannot be represented in RDF")]
	UnsafeTerm(String),

	/// An N-Quads document is syntactically invalid.
	#[error("invalid N-Quads at line {line}: {message}")]
	InvalidNQuads { line: usize, message: String },
}
