use activitystreams_ld::{
	algorithms, vocab::as2, Builder, ContextRegistry, Environment, Error, ExportOptions, Extension,
	ImportOptions, LanguageValue, Processor, Value,
};
use serde_json::json;
use std::sync::Arc;

/// Processor with its own registry, isolated from the other tests.
fn processor() -> Processor {
	Processor::new().with_registry(Arc::new(ContextRegistry::new()))
}

#[tokio::test]
async fn default_context() {
	let processor = processor();
	let note = Builder::note().name("hello").get();
	let document = processor.export(&note, ExportOptions::default()).await.unwrap();

	assert_eq!(document["@context"], json!(as2::CONTEXT_URL));
	assert_eq!(document.keys().next().map(String::as_str), Some("@context"));
	assert_eq!(document["type"], "Note");
	assert_eq!(document["name"], "hello");
}

#[tokio::test]
async fn round_trip() {
	let processor = processor();
	let note = Builder::note()
		.id("https://example.org/notes/1")
		.name(LanguageValue::builder().set("en-US", "bar").set("fr-US", "baz").set("fr", "boo").get())
		.content("content")
		.attributed_to(Builder::person().id("https://example.org/joe").name("Joe"))
		.to([as2::PUBLIC, "https://example.org/followers"])
		.published("2020-05-01T12:00:00Z")
		.tag(Builder::mention().href("https://example.org/ann").name("@ann"))
		.get();

	let json = processor.write(&note, ExportOptions::default(), false).await.unwrap();
	let imported = processor
		.import_str(&json, ImportOptions::default())
		.await
		.unwrap()
		.unwrap();

	assert_eq!(imported, note);

	let name = imported.name().unwrap();
	assert_eq!(name.value(), Some("bar"));
	assert_eq!(name.get("en"), Some("bar"));
	assert_eq!(name.get("en-us"), Some("bar"));
	assert_eq!(name.get("fr"), Some("boo"));
	assert_eq!(name.get("FR-US"), Some("baz"));

	let mention = imported.tag().as_node().unwrap();
	assert!(mention.is_link());
	assert_eq!(mention.href().as_str(), Some("https://example.org/ann"));
}

#[tokio::test]
async fn multi_valued_name() {
	let processor = processor();
	let note = Builder::note().name("a").name("b").get();
	assert_eq!(note.get("name").len(), 2);

	let document = processor.export(&note, ExportOptions::default()).await.unwrap();
	assert_eq!(document["name"], json!(["a", "b"]));

	let imported = processor
		.import(&serde_json::Value::Object(document), ImportOptions::default())
		.await
		.unwrap()
		.unwrap();
	assert_eq!(imported, note);

	let names: Vec<&str> = imported.get("name").iter().filter_map(Value::as_str).collect();
	assert_eq!(names, ["a", "b"]);

	let imported = processor
		.import(
			&json!({ "@context": as2::CONTEXT_URL, "type": "Note", "name": ["a", "b"] }),
			ImportOptions::default(),
		)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(imported.get("name").len(), 2);
}

#[tokio::test]
async fn ordered_items() {
	let processor = processor();
	let collection = Builder::ordered_collection()
		.ordered_items([Value::id("https://example.org/a"), Value::id("https://example.org/b")])
		.get();

	let ids: Vec<_> = collection.items().ids().collect();
	assert_eq!(ids, ["https://example.org/a", "https://example.org/b"]);

	let document = processor.export(&collection, ExportOptions::default()).await.unwrap();
	assert_eq!(
		document["orderedItems"],
		json!(["https://example.org/a", "https://example.org/b"])
	);

	let imported = processor
		.import(
			&json!({
				"@context": as2::CONTEXT_URL,
				"type": "OrderedCollection",
				"orderedItems": ["https://example.org/b", "https://example.org/a"]
			}),
			ImportOptions::default(),
		)
		.await
		.unwrap()
		.unwrap();

	let items = imported.items();
	assert!(items.is_ordered());
	assert_eq!(
		items.ids().collect::<Vec<_>>(),
		["https://example.org/b", "https://example.org/a"]
	);
}

#[tokio::test]
async fn custom_context() {
	let processor = processor();
	let url = "https://example.com/context";
	processor.register_context(
		url,
		json!({
			"@context": {
				"ex": "https://example.com/context#",
				"Foo": { "@id": "ex:Foo", "@type": "@id" },
				"bar": "ex:bar"
			}
		}),
	);

	let foo = processor
		.import(
			&json!({
				"@context": [as2::CONTEXT_URL, url],
				"id": "https://social.example/foo/1",
				"type": "Foo",
				"bar": 3
			}),
			ImportOptions::default(),
		)
		.await
		.unwrap()
		.unwrap();

	assert_eq!(foo.types(), ["https://example.com/context#Foo"]);
	assert_eq!(
		foo.get("https://example.com/context#bar").first().and_then(Value::as_u64),
		Some(3)
	);

	let environment = foo.environment().unwrap();
	assert!(environment.assumed_contexts().is_empty());

	let exported = processor
		.export(&foo, ExportOptions::default().with_original_context())
		.await
		.unwrap();

	assert_eq!(exported["@context"], json!([as2::CONTEXT_URL, url]));
	assert_eq!(exported["type"], "Foo");
	assert_eq!(exported["bar"], 3);
	assert_eq!(exported["id"], "https://social.example/foo/1");
}

#[tokio::test]
async fn extensions_and_additional_context() {
	let registry = Arc::new(ContextRegistry::new());
	let processor = Processor::new().with_registry(registry.clone());
	processor.use_extension(Extension::new(
		"https://example.org/ext",
		json!({ "@context": { "ext": "https://example.org/ext#", "mood": "ext:mood" } }),
	));

	let note = Builder::note().set("https://example.org/ext#mood", "happy").get();
	let document = processor
		.export(
			&note,
			ExportOptions::default().with_additional_context(json!({ "ex2": "https://example.org/ns2#" })),
		)
		.await
		.unwrap();

	assert_eq!(
		document["@context"],
		json!(["https://example.org/ext", { "ex2": "https://example.org/ns2#" }, as2::CONTEXT_URL])
	);
	assert_eq!(document["mood"], "happy");

	let mut environment = Environment::new(registry);
	environment.apply_assumed_context(&json!({ "type": "Note" }));
	assert!(environment.is_assumed("https://example.org/ext"));
	assert!(environment.is_assumed(as2::CONTEXT_URL));
}

#[tokio::test]
async fn empty_document() {
	let processor = processor();
	let result = processor
		.import(&json!({ "@context": as2::CONTEXT_URL }), ImportOptions::default())
		.await
		.unwrap();
	assert!(result.is_none());

	let result = processor.import(&json!([]), ImportOptions::default()).await.unwrap();
	assert!(result.is_none());
}

#[tokio::test]
async fn import_errors() {
	let processor = processor();

	let result = processor.import_str("{ not json", ImportOptions::default()).await;
	assert!(matches!(result, Err(Error::Parse(_))));

	let result = processor
		.import(
			&json!({ "@context": "https://example.org/unknown", "type": "Note" }),
			ImportOptions::default(),
		)
		.await;
	assert!(matches!(result, Err(Error::Import(_))));

	let result = processor
		.import(&json!({ "@context": 3, "type": "Note" }), ImportOptions::default())
		.await;
	assert!(matches!(result, Err(Error::Import(_))));
}

#[tokio::test]
async fn deeply_nested_document() {
	let processor = processor();

	let mut document = json!({ "type": "Note" });
	for _ in 0..2000 {
		document = json!({ "type": "Note", "attachment": document });
	}
	document["@context"] = json!(as2::CONTEXT_URL);

	let result = processor.import(&document, ImportOptions::default()).await;
	assert!(matches!(
		result,
		Err(Error::Import(algorithms::Error::DepthLimitExceeded(_)))
	));
}

#[tokio::test]
async fn supplied_environment() {
	let processor = processor();
	let mut environment = Environment::new(processor.registry().clone());
	environment.register(
		"https://example.org/local",
		json!({ "@context": { "ex": "https://example.org/ns#", "size": "ex:size" } }),
	);

	let environment = Arc::new(environment);
	let options = ImportOptions {
		environment: Some(environment.clone()),
		..Default::default()
	};

	let node = processor
		.import(
			&json!({
				"@context": [as2::CONTEXT_URL, "https://example.org/local"],
				"type": "Note",
				"size": "big"
			}),
			options,
		)
		.await
		.unwrap()
		.unwrap();

	assert_eq!(node.get("https://example.org/ns#size").as_str(), Some("big"));
	assert!(!processor.registry().contains("https://example.org/local"));

	// The supplied environment is copied: only the copy attached to the node
	// records the context of the document.
	assert!(environment.original_context().is_none());
	let attached = node.environment().unwrap();
	assert_eq!(
		attached.original_context(),
		Some(&json!([as2::CONTEXT_URL, "https://example.org/local"]))
	);
	assert!(!attached.is_assumed(as2::CONTEXT_URL));

	// The context is only known to the environment of the node.
	let exported = processor
		.export(&node, ExportOptions::default().with_original_context())
		.await
		.unwrap();
	assert_eq!(exported["size"], "big");
}

#[tokio::test]
async fn normalize() {
	let processor = processor();
	let note = Builder::note().id("https://example.org/1").name("a").get();
	let nquads = processor.to_rdf(&note).unwrap();

	assert_eq!(
		nquads,
		"<https://example.org/1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <https://www.w3.org/ns/activitystreams#Note> .\n\
		<https://example.org/1> <https://www.w3.org/ns/activitystreams#name> \"a\" .\n"
	);
}

#[tokio::test]
async fn rdf_round_trip() {
	let processor = processor();
	let object = Builder::generic_object().name("test").get();
	let nquads = processor.to_rdf(&object).unwrap();
	let imported = processor.import_from_rdf(&nquads).unwrap().unwrap();
	assert_eq!(imported.name().and_then(|name| name.value()), Some("test"));

	let note = Builder::note()
		.id("https://example.org/notes/1")
		.name("name")
		.content("content")
		.attributed_to(Builder::person().id("https://example.org/joe").name("Joe"))
		.to(as2::PUBLIC)
		.published("2020-05-01T12:00:00Z")
		.tag(Builder::mention().href("https://example.org/ann").name("@ann"))
		.get();

	let nquads = processor.to_rdf(&note).unwrap();
	let imported = processor.import_from_rdf(&nquads).unwrap().unwrap();
	assert_eq!(imported, note);
	assert!(imported.tag().as_node().unwrap().is_link());
}

#[tokio::test]
async fn rdf_import_errors() {
	let processor = processor();
	assert!(processor.import_from_rdf("").unwrap().is_none());
	assert!(processor.import_from_rdf("# nothing\n").unwrap().is_none());

	let result = processor.import_from_rdf("<https://example.org/1> <https://example.org/p> \"a\"\n");
	assert!(matches!(
		result,
		Err(Error::Import(algorithms::Error::InvalidNQuads { line: 1, .. }))
	));
}
