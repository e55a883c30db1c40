use activitystreams_ld::{vocab::as2::types, Builder, Kind, LanguageValue, Value, Values};

#[test]
fn language_fallback() {
	let value = LanguageValue::builder()
		.set("en-US", "bar")
		.set("fr-US", "baz")
		.set("fr", "boo")
		.get();

	assert_eq!(value.value(), Some("bar"));
	assert_eq!(value.get("en"), Some("bar"));
	assert_eq!(value.get("en-us"), Some("bar"));
	assert_eq!(value.get("fr"), Some("boo"));
	assert_eq!(value.get("FR-US"), Some("baz"));
}

#[test]
fn template_isolation() {
	let template = Builder::note()
		.attributed_to("https://example.org/joe")
		.to("https://example.org/followers")
		.template();

	let first = template().to("https://example.org/ann").get();
	let second = template().content("second").get();
	let third = template().get();

	assert_eq!(first.to().len(), 2);
	assert_eq!(second.to().len(), 1);
	assert!(!third.contains("content"));
	assert_eq!(third.to().len(), 1);
}

#[test]
fn values_container() {
	let node = Builder::question()
		.one_of(vec![
			Builder::note().name("yes"),
			Builder::note().name("no"),
		])
		.closed(true)
		.get();

	let options = node.get("oneOf");
	assert_eq!(options.len(), 2);
	let names: Vec<_> = options
		.iter()
		.filter_map(Value::as_node)
		.filter_map(|n| n.name())
		.filter_map(LanguageValue::value)
		.collect();
	assert_eq!(names, ["yes", "no"]);

	assert_eq!(node.get("closed").value(), Some(&Value::Boolean(true)));
	assert!(node.get("unknown").first().is_none());
	assert_eq!(node.get("unknown"), &Values::new());
}

#[test]
fn links() {
	let link = Builder::link()
		.href("https://example.org/image.png")
		.media_type("image/png")
		.width(640)
		.height(480u32)
		.get();

	assert_eq!(link.kind(), Kind::Link);
	assert_eq!(link.get("mediaType").as_str(), Some("image/png"));
	assert_eq!(link.get("width").value().and_then(Value::as_u64), Some(640));

	let node = Builder::with_type("Image").url(link).get();
	assert_eq!(node.types(), [types::IMAGE]);
	assert!(node.url().as_node().unwrap().is_link());
}
