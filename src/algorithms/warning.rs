use crate::syntax::Keyword;

/// Processing warning.
///
/// Warnings never stop the processing. They are emitted through the `log`
/// facade.
#[derive(Debug, thiserror::Error)]
pub enum Warning {
	#[error("keyword-like term `{0}`")]
	KeywordLikeTerm(String),

	#[error("keyword-like value `{0}`")]
	KeywordLikeValue(String),

	#[error("malformed IRI `{0}`")]
	MalformedIri(String),

	#[error("empty term")]
	EmptyTerm,

	#[error("blank node identifier `{0}` used as property")]
	BlankNodeIdProperty(String),

	#[error("invalid language tag `{0}`")]
	MalformedLanguageTag(String),

	#[error("key `{0}` dropped: it does not expand into an IRI")]
	DroppedKey(String),

	#[error("ignored `{0}` entry")]
	IgnoredKeyword(Keyword),
}

pub(crate) fn warn(w: Warning) {
	log::warn!("{w}")
}
