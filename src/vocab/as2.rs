//! Activity Streams 2.0 vocabulary.

/// Activity Streams namespace.
pub const NS: &str = "https://www.w3.org/ns/activitystreams#";

/// URL of the Activity Streams context document.
pub const CONTEXT_URL: &str = "https://www.w3.org/ns/activitystreams";

/// Special collection designating every actor.
pub const PUBLIC: &str = "https://www.w3.org/ns/activitystreams#Public";

macro_rules! types {
	($($name:ident => $term:literal),* $(,)?) => {
		/// Type IRIs.
		pub mod types {
			$(
				#[doc = concat!("`as:", $term, "`.")]
				pub const $name: &str = concat!("https://www.w3.org/ns/activitystreams#", $term);
			)*
		}
	};
}

types! {
	OBJECT => "Object",
	LINK => "Link",
	MENTION => "Mention",
	ACTIVITY => "Activity",
	INTRANSITIVE_ACTIVITY => "IntransitiveActivity",
	COLLECTION => "Collection",
	ORDERED_COLLECTION => "OrderedCollection",
	COLLECTION_PAGE => "CollectionPage",
	ORDERED_COLLECTION_PAGE => "OrderedCollectionPage",
	ACCEPT => "Accept",
	TENTATIVE_ACCEPT => "TentativeAccept",
	ADD => "Add",
	ARRIVE => "Arrive",
	CREATE => "Create",
	DELETE => "Delete",
	FOLLOW => "Follow",
	IGNORE => "Ignore",
	JOIN => "Join",
	LEAVE => "Leave",
	LIKE => "Like",
	OFFER => "Offer",
	INVITE => "Invite",
	REJECT => "Reject",
	TENTATIVE_REJECT => "TentativeReject",
	REMOVE => "Remove",
	UNDO => "Undo",
	UPDATE => "Update",
	VIEW => "View",
	LISTEN => "Listen",
	READ => "Read",
	MOVE => "Move",
	TRAVEL => "Travel",
	ANNOUNCE => "Announce",
	BLOCK => "Block",
	FLAG => "Flag",
	DISLIKE => "Dislike",
	QUESTION => "Question",
	APPLICATION => "Application",
	GROUP => "Group",
	ORGANIZATION => "Organization",
	PERSON => "Person",
	SERVICE => "Service",
	ARTICLE => "Article",
	DOCUMENT => "Document",
	AUDIO => "Audio",
	IMAGE => "Image",
	VIDEO => "Video",
	NOTE => "Note",
	PAGE => "Page",
	EVENT => "Event",
	PLACE => "Place",
	PROFILE => "Profile",
	RELATIONSHIP => "Relationship",
	TOMBSTONE => "Tombstone",
}

/// Checks if the given type IRI designates a link.
pub fn is_link_type(iri: &str) -> bool {
	iri == types::LINK || iri == types::MENTION
}
