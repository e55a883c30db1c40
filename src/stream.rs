//! Byte stream adapters.
use futures::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use serde_json::Value;

use crate::{model::Node, vocab::as2, Error, ExportOptions, ImportOptions, Loader, Processor};

/// Reads a whole document from the given byte stream and imports it.
///
/// A document without `@context` is interpreted with the Activity Streams
/// context.
pub async fn read_object<R, F>(
	processor: &Processor<F>,
	mut reader: R,
	options: ImportOptions,
) -> Result<Option<Node>, Error>
where
	R: AsyncRead + Unpin,
	F: Loader,
{
	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer).await?;

	let mut document: Value = serde_json::from_slice(&buffer)?;
	if let Value::Object(object) = &mut document {
		if !object.contains_key("@context") {
			object.insert("@context".to_owned(), as2::CONTEXT_URL.into());
		}
	}

	processor.import(&document, options).await
}

/// Exports a node and writes the serialized document to the given byte
/// stream.
pub async fn write_object<W, F>(
	processor: &Processor<F>,
	mut writer: W,
	node: &Node,
	options: ExportOptions,
) -> Result<(), Error>
where
	W: AsyncWrite + Unpin,
	F: Loader,
{
	let document = processor.write(node, options, false).await?;
	writer.write_all(document.as_bytes()).await?;
	writer.flush().await?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Builder;
	use futures::io::Cursor;

	#[tokio::test]
	async fn stream_round_trip() {
		let processor = Processor::new();
		let note = Builder::note().id("https://example.org/1").name("hello").get();

		let mut buffer = Cursor::new(Vec::new());
		write_object(&processor, &mut buffer, &note, ExportOptions::default())
			.await
			.unwrap();

		let bytes = buffer.into_inner();
		let imported = read_object(&processor, bytes.as_slice(), ImportOptions::default())
			.await
			.unwrap()
			.unwrap();
		assert_eq!(imported, note);
	}

	#[tokio::test]
	async fn missing_context_is_assumed() {
		let processor = Processor::new();
		let input = br#"{ "type": "Note", "content": "hi" }"#;
		let node = read_object(&processor, &input[..], ImportOptions::default())
			.await
			.unwrap()
			.unwrap();

		assert!(node.has_type("Note"));
		assert_eq!(node.content().unwrap().value(), Some("hi"));
	}

	#[tokio::test]
	async fn invalid_json() {
		let processor = Processor::new();
		let result = read_object(&processor, &b"{"[..], ImportOptions::default()).await;
		assert!(matches!(result, Err(Error::Parse(_))));
	}
}
