use serde_json::Value;
use std::sync::Arc;

use crate::{
	algorithms::{
		self,
		context_processing::{process_context, ContextProcessingOptions},
		CompactionOptions, ExpansionOptions, RemoteContexts,
	},
	context::Context,
	model::{self, Node},
	signatures::{self, SignOptions, VerifyOptions},
	syntax::Object,
	vocab::as2,
	ContextRegistry, Environment, Error, Extension, Loader, NoLoader,
};

/// Import options.
#[derive(Debug, Clone)]
pub struct ImportOptions {
	/// Environment to import the document in.
	///
	/// A fresh environment is created if none is given.
	///
	/// A supplied environment is copied before the assumed contexts of the
	/// document are recorded, so the caller's handle is left untouched. The
	/// updated copy is attached to the imported node and can be read back
	/// with [`Node::environment`].
	pub environment: Option<Arc<Environment>>,

	/// Expansion options.
	///
	/// Free floating nodes are kept by default.
	pub expansion: ExpansionOptions,
}

impl Default for ImportOptions {
	fn default() -> Self {
		Self {
			environment: None,
			expansion: ExpansionOptions {
				keep_free_floating_nodes: true,
				..Default::default()
			},
		}
	}
}

/// Export options.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
	/// Exports imported nodes with the exact `@context` of their original
	/// document.
	pub use_original_context: bool,

	/// Context inserted before the Activity Streams context.
	pub additional_context: Option<Value>,

	/// Signs the exported document.
	pub sign: Option<SignOptions>,

	pub compaction: CompactionOptions,
}

impl ExportOptions {
	pub fn with_original_context(self) -> Self {
		Self {
			use_original_context: true,
			..self
		}
	}

	pub fn with_additional_context(self, context: Value) -> Self {
		Self {
			additional_context: Some(context),
			..self
		}
	}

	pub fn with_signature(self, sign: SignOptions) -> Self {
		Self {
			sign: Some(sign),
			..self
		}
	}
}

/// Activity Streams processor.
///
/// Imports linked data documents into [`Node`]s and exports nodes back.
/// Contexts are resolved through a [`ContextRegistry`] first, then through
/// the fallback loader `F`, which by default fails on every URL.
///
/// ```
/// # async fn run() -> Result<(), activitystreams_ld::Error> {
/// use activitystreams_ld::{Builder, ExportOptions, Processor};
///
/// let processor = Processor::new();
/// let note = Builder::note().name("hello").get();
/// let document = processor.export(&note, ExportOptions::default()).await?;
/// assert_eq!(document["@context"], "https://www.w3.org/ns/activitystreams");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Processor<F = NoLoader> {
	registry: Arc<ContextRegistry>,
	loader: F,
}

impl Processor {
	/// Creates a processor using the process-wide registry and no fallback
	/// loader.
	pub fn new() -> Self {
		Self::with_loader(NoLoader)
	}
}

impl Default for Processor {
	fn default() -> Self {
		Self::new()
	}
}

impl<F: Loader> Processor<F> {
	/// Creates a processor using the process-wide registry and the given
	/// fallback loader.
	pub fn with_loader(loader: F) -> Self {
		Self {
			registry: ContextRegistry::global(),
			loader,
		}
	}

	/// Replaces the context registry.
	pub fn with_registry(self, registry: Arc<ContextRegistry>) -> Self {
		Self { registry, ..self }
	}

	pub fn registry(&self) -> &Arc<ContextRegistry> {
		&self.registry
	}

	pub fn loader(&self) -> &F {
		&self.loader
	}

	/// Registers a context document.
	pub fn register_context(&self, url: impl Into<String>, document: Value) {
		self.registry.register(url, document);
	}

	/// Registers an extension.
	pub fn use_extension(&self, extension: Extension) {
		self.registry.use_extension(extension);
	}

	/// Imports a document.
	///
	/// The document is expanded with the Activity Streams context as initial
	/// context, then its first node is converted into a [`Node`]. Returns
	/// `None` if the document has no node.
	pub async fn import(&self, input: &Value, options: ImportOptions) -> Result<Option<Node>, Error> {
		log::debug!("importing document");
		algorithms::check_depth(input).map_err(Error::Import)?;
		let mut environment = match options.environment {
			Some(environment) => Environment::clone(&environment),
			None => Environment::new(self.registry.clone()),
		};
		environment.apply_assumed_context(input);

		let loader = environment.make_loader(&self.loader);
		let mut remote_contexts = RemoteContexts::new();
		let base_context = Value::String(as2::CONTEXT_URL.to_owned());
		remote_contexts
			.load(&loader, &base_context, None)
			.await
			.map_err(Error::Import)?;
		remote_contexts
			.load_document(&loader, input, None)
			.await
			.map_err(Error::Import)?;

		let active_context = process(&base_context, &remote_contexts).map_err(Error::Import)?;
		let expanded = algorithms::expand(input, &active_context, &remote_contexts, options.expansion)
			.map_err(Error::Import)?;

		let environment = Arc::new(environment);
		Ok(model::import_document(&expanded).map(|node| node.with_environment(environment)))
	}

	/// Imports the first node of an N-Quads document.
	///
	/// Only the default graph is read. The first node is the first subject
	/// no other statement refers to. Returns `None` if the document has no
	/// statement.
	pub fn import_from_rdf(&self, nquads: &str) -> Result<Option<Node>, Error> {
		log::debug!("importing N-Quads document");
		let quads = algorithms::rdf::parse_nquads(nquads).map_err(Error::Import)?;
		let expanded = algorithms::rdf::from_rdf(&quads);
		Ok(model::import_document(&expanded))
	}

	/// Parses then imports a document.
	pub async fn import_str(&self, input: &str, options: ImportOptions) -> Result<Option<Node>, Error> {
		let input: Value = serde_json::from_str(input)?;
		self.import(&input, options).await
	}

	/// Exports a node into a compacted (and optionally signed) document.
	///
	/// The `@context` entry always comes first.
	pub async fn export(&self, node: &Node, options: ExportOptions) -> Result<Object, Error> {
		let context = self.export_context(node, &options);
		log::debug!("exporting node with context {context}");

		let expanded = Value::Object(model::node_to_expanded(node));
		let result = match node.environment() {
			Some(environment) => {
				self.compact(&expanded, context, &environment.make_loader(&self.loader), &options)
					.await?
			}
			None => {
				self.compact(&expanded, context, &self.registry.make_loader(&self.loader), &options)
					.await?
			}
		};

		Ok(result)
	}

	async fn compact(
		&self,
		expanded: &Value,
		context: Value,
		loader: &impl Loader,
		options: &ExportOptions,
	) -> Result<Object, Error> {
		let mut remote_contexts = RemoteContexts::new();
		remote_contexts
			.load(loader, &context, None)
			.await
			.map_err(Error::Export)?;

		let active_context = process(&context, &remote_contexts).map_err(Error::Export)?;
		let compacted = algorithms::compact(
			std::slice::from_ref(expanded),
			&active_context,
			&remote_contexts,
			options.compaction,
		)
		.map_err(Error::Export)?;

		let mut document = Object::new();
		document.insert("@context".to_owned(), context);
		document.extend(compacted);

		match &options.sign {
			Some(sign) => signatures::sign(document, sign, loader)
				.await
				.map_err(Error::Signing),
			None => Ok(document),
		}
	}

	/// Computes the `@context` of an exported document.
	///
	/// Unless the original context is requested and known, the context is
	/// made of the extension contexts, the signature suite context when
	/// signing, the additional context and finally the Activity Streams
	/// context. A single context is given as is, not in an array.
	pub fn export_context(&self, node: &Node, options: &ExportOptions) -> Value {
		if options.use_original_context {
			if let Some(context) = node.environment().and_then(|e| e.original_context()) {
				return context.clone();
			}
		}

		let mut contexts: Vec<Value> = self
			.registry
			.extension_contexts()
			.into_iter()
			.map(Value::String)
			.collect();

		if let Some(sign) = &options.sign {
			contexts.push(sign.suite.context_url().into())
		}

		if let Some(additional) = &options.additional_context {
			contexts.push(additional.clone())
		}

		contexts.push(as2::CONTEXT_URL.into());

		if contexts.len() == 1 {
			contexts.remove(0)
		} else {
			Value::Array(contexts)
		}
	}

	/// Exports a node and serializes it.
	pub async fn write(&self, node: &Node, options: ExportOptions, pretty: bool) -> Result<String, Error> {
		let document = Value::Object(self.export(node, options).await?);
		let result = if pretty {
			serde_json::to_string_pretty(&document)
		} else {
			serde_json::to_string(&document)
		};

		Ok(result?)
	}

	/// Canonical N-Quads of an expanded document.
	pub fn normalize(&self, expanded: &[Value]) -> Result<String, Error> {
		algorithms::to_nquads(expanded).map_err(Error::Normalize)
	}

	/// Canonical N-Quads of a node.
	pub fn to_rdf(&self, node: &Node) -> Result<String, Error> {
		self.normalize(&[Value::Object(model::node_to_expanded(node))])
	}

	/// Signs a compacted document.
	pub async fn sign(&self, document: Object, options: &SignOptions) -> Result<Object, Error> {
		signatures::sign(document, options, &self.registry.make_loader(&self.loader))
			.await
			.map_err(Error::Signing)
	}

	/// Verifies the proof of a signed document.
	pub async fn verify(&self, document: &Value, options: &VerifyOptions) -> Result<bool, Error> {
		let Value::Object(document) = document else {
			return Ok(false);
		};

		signatures::verify(document, options, &self.registry.make_loader(&self.loader))
			.await
			.map_err(Error::Verification)
	}

	/// Parses then verifies a signed document.
	pub async fn verify_str(&self, document: &str, options: &VerifyOptions) -> Result<bool, Error> {
		let document: Value = serde_json::from_str(document)?;
		self.verify(&document, options).await
	}
}

/// Processes a context from scratch.
fn process(context: &Value, remote_contexts: &RemoteContexts) -> Result<Context, algorithms::Error> {
	process_context(
		&Context::default(),
		context,
		remote_contexts,
		None,
		ContextProcessingOptions::default(),
	)
}
