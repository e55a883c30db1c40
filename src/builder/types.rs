use super::Builder;
use crate::model::Kind;

macro_rules! constructors {
	($($kind:ident { $($name:ident => $ty:literal),* $(,)? })*) => {
		impl Builder {
			$($(
				#[doc = concat!("Creates a builder for an `as:", $ty, "` node.")]
				pub fn $name() -> Self {
					Self::new(Kind::$kind).add_type(concat!("https://www.w3.org/ns/activitystreams#", $ty))
				}
			)*)*
		}
	};
}

constructors! {
	Object {
		generic_object => "Object",
		// Activities.
		activity => "Activity",
		intransitive_activity => "IntransitiveActivity",
		accept => "Accept",
		tentative_accept => "TentativeAccept",
		add => "Add",
		arrive => "Arrive",
		create => "Create",
		delete => "Delete",
		follow => "Follow",
		ignore => "Ignore",
		join => "Join",
		leave => "Leave",
		like => "Like",
		offer => "Offer",
		invite => "Invite",
		reject => "Reject",
		tentative_reject => "TentativeReject",
		remove_activity => "Remove",
		undo => "Undo",
		update => "Update",
		view => "View",
		listen => "Listen",
		read => "Read",
		r#move => "Move",
		travel => "Travel",
		announce => "Announce",
		block => "Block",
		flag => "Flag",
		dislike => "Dislike",
		question => "Question",
		// Actors.
		application => "Application",
		group => "Group",
		organization => "Organization",
		person => "Person",
		service => "Service",
		// Objects.
		article => "Article",
		document => "Document",
		audio => "Audio",
		image_object => "Image",
		video => "Video",
		note => "Note",
		page => "Page",
		event => "Event",
		place => "Place",
		profile => "Profile",
		relationship_object => "Relationship",
		tombstone => "Tombstone",
		// Collections.
		collection => "Collection",
		ordered_collection => "OrderedCollection",
		collection_page => "CollectionPage",
		ordered_collection_page => "OrderedCollectionPage",
	}
	Link {
		link => "Link",
		mention => "Mention",
	}
}

#[cfg(test)]
mod tests {
	use crate::{model::Kind, vocab::as2::types, Builder};

	#[test]
	fn typed_constructors() {
		assert_eq!(Builder::r#move().get().types(), [types::MOVE]);
		assert_eq!(Builder::mention().get().kind(), Kind::Link);
		assert_eq!(Builder::person().get().kind(), Kind::Object);
		assert_eq!(Builder::image_object().get().types(), [types::IMAGE]);
		assert!(Builder::generic_object().get().has_type("Object"));
	}
}
