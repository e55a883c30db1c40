use hashbrown::HashMap;
use iref::Iri;

use super::{Literal, Quad, Term};
use crate::{
	algorithms::{check_depth, Error},
	syntax::{Object, Value},
	vocab::{rdf, xsd},
};

/// RDF conversion options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToRdfOptions {
	/// Fails with [`Error::UnsafeTerm`] instead of silently dropping what
	/// cannot be represented in RDF: blank node predicates, relative IRIs
	/// and invalid datatypes.
	pub safe: bool,
}

impl ToRdfOptions {
	pub fn safe() -> Self {
		Self { safe: true }
	}
}

/// Converts an expanded document into an RDF dataset.
///
/// Blank node identifiers of the document are relabeled, and nodes without
/// identifier are given fresh blank nodes.
pub fn to_rdf(expanded: &[Value], options: ToRdfOptions) -> Result<Vec<Quad>, Error> {
	for node in expanded {
		check_depth(node)?;
	}

	let mut converter = Converter {
		options,
		quads: Vec::new(),
		labels: HashMap::new(),
		count: 0,
	};

	for node in expanded {
		if let Value::Object(node) = node {
			converter.node(node, None)?;
		}
	}

	Ok(converter.quads)
}

struct Converter {
	options: ToRdfOptions,
	quads: Vec<Quad>,
	labels: HashMap<String, String>,
	count: usize,
}

impl Converter {
	fn fresh_label(&mut self) -> String {
		let label = format!("b{}", self.count);
		self.count += 1;
		label
	}

	fn fresh_blank(&mut self) -> Term {
		Term::Blank(self.fresh_label())
	}

	fn blank(&mut self, id: &str) -> Term {
		if let Some(label) = self.labels.get(id) {
			return Term::Blank(label.clone());
		}

		let label = self.fresh_label();
		self.labels.insert(id.to_owned(), label.clone());
		Term::Blank(label)
	}

	/// Drops `term`, or fails in safe mode.
	fn unsafe_term<T>(&self, term: &str) -> Result<Option<T>, Error> {
		if self.options.safe {
			Err(Error::UnsafeTerm(term.to_owned()))
		} else {
			log::debug!("dropping `{term}` from RDF output");
			Ok(None)
		}
	}

	/// Converts a node identifier into a blank node or IRI.
	fn id(&mut self, id: &str) -> Result<Option<Term>, Error> {
		if id.starts_with("_:") {
			Ok(Some(self.blank(id)))
		} else if Iri::new(id).is_ok() {
			Ok(Some(Term::Iri(id.to_owned())))
		} else {
			self.unsafe_term(id)
		}
	}

	fn predicate(&self, property: &str) -> Result<Option<String>, Error> {
		if !property.starts_with("_:") && Iri::new(property).is_ok() {
			Ok(Some(property.to_owned()))
		} else {
			self.unsafe_term(property)
		}
	}

	fn push(&mut self, subject: &Term, predicate: &str, object: Term, graph: Option<&Term>) {
		self.quads.push(Quad {
			subject: subject.clone(),
			predicate: predicate.to_owned(),
			object,
			graph: graph.cloned(),
		})
	}

	/// Converts a node object, returning its subject term.
	fn node(&mut self, node: &Object, graph: Option<&Term>) -> Result<Option<Term>, Error> {
		let subject = match node.get("@id").and_then(Value::as_str) {
			Some(id) => match self.id(id)? {
				Some(subject) => subject,
				None => return Ok(None),
			},
			None => self.fresh_blank(),
		};

		if let Some(types) = node.get("@type") {
			for typ in as_slice(types).iter().filter_map(Value::as_str) {
				if let Some(typ) = self.id(typ)? {
					self.push(&subject, rdf::TYPE, typ, graph)
				}
			}
		}

		if let Some(items) = node.get("@graph") {
			for item in as_slice(items) {
				if let Value::Object(item) = item {
					self.node(item, Some(&subject))?;
				}
			}
		}

		for (property, values) in node.iter().filter(|(key, _)| !key.starts_with('@')) {
			let Some(predicate) = self.predicate(property)? else {
				continue;
			};

			for value in as_slice(values) {
				if let Some(object) = self.object(value, graph)? {
					self.push(&subject, &predicate, object, graph)
				}
			}
		}

		Ok(Some(subject))
	}

	fn object(&mut self, value: &Value, graph: Option<&Term>) -> Result<Option<Term>, Error> {
		let Value::Object(object) = value else {
			return Ok(None);
		};

		if let Some(items) = object.get("@list") {
			return self.list(as_slice(items), graph).map(Some);
		}

		if object.contains_key("@value") {
			return self.literal(object);
		}

		self.node(object, graph)
	}

	fn list(&mut self, items: &[Value], graph: Option<&Term>) -> Result<Term, Error> {
		let nil = Term::Iri(rdf::NIL.to_owned());
		let heads: Vec<Term> = items.iter().map(|_| self.fresh_blank()).collect();
		for (i, item) in items.iter().enumerate() {
			if let Some(object) = self.object(item, graph)? {
				self.push(&heads[i], rdf::FIRST, object, graph)
			}

			let next = heads.get(i + 1).unwrap_or(&nil).clone();
			self.push(&heads[i], rdf::REST, next, graph)
		}

		Ok(heads.into_iter().next().unwrap_or(nil))
	}

	/// Converts a value object into a literal.
	fn literal(&self, object: &Object) -> Result<Option<Term>, Error> {
		let datatype = match object.get("@type").and_then(Value::as_str) {
			Some(datatype) if Iri::new(datatype).is_err() || datatype.starts_with("_:") => {
				return self.unsafe_term(datatype)
			}
			datatype => datatype,
		};

		let (lexical, datatype) = match &object["@value"] {
			Value::String(s) => (s.clone(), datatype.unwrap_or(xsd::STRING)),
			Value::Bool(b) => (b.to_string(), datatype.unwrap_or(xsd::BOOLEAN)),
			Value::Number(n) => {
				let f = n.as_f64().unwrap_or_default();
				if f.fract() != 0.0 || datatype == Some(xsd::DOUBLE) {
					(canonical_double(f), datatype.unwrap_or(xsd::DOUBLE))
				} else if n.is_f64() {
					(format!("{f:.0}"), datatype.unwrap_or(xsd::INTEGER))
				} else {
					(n.to_string(), datatype.unwrap_or(xsd::INTEGER))
				}
			}
			_ => return Ok(None),
		};

		let literal = match object.get("@language").and_then(Value::as_str) {
			Some(language) => Literal::lang_string(lexical, language),
			None => Literal::typed(lexical, datatype),
		};

		Ok(Some(Term::Literal(literal)))
	}
}

fn as_slice(value: &Value) -> &[Value] {
	match value {
		Value::Array(items) => items.as_slice(),
		other => std::slice::from_ref(other),
	}
}

/// Canonical lexical form of an `xsd:double`, e.g. `1.5E1`.
fn canonical_double(f: f64) -> String {
	let formatted = format!("{f:E}");
	match formatted.split_once('E') {
		Some((mantissa, exponent)) if !mantissa.contains('.') => {
			format!("{mantissa}.0E{exponent}")
		}
		_ => formatted,
	}
}
