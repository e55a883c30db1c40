use hashbrown::{HashMap, HashSet};
use indexmap::IndexMap;
use serde_json::{json, Number};

use super::{Literal, Quad, Term};
use crate::{
	syntax::{Object, Value},
	vocab::{rdf, xsd},
};

/// Converts an RDF dataset into an expanded document.
///
/// Only the default graph is converted. Nodes are embedded where they are
/// first referenced, so the first node of the result is the first subject no
/// other subject references. Blank nodes referenced at most once lose their
/// identifier. Well-formed `rdf:first`/`rdf:rest` chains become lists, and
/// `xsd:string`, `xsd:boolean`, `xsd:integer` and `xsd:double` literals become
/// native values.
pub fn from_rdf(quads: &[Quad]) -> Vec<Value> {
	let mut graph = Graph::default();
	for quad in quads {
		if let Some(name) = &quad.graph {
			log::debug!("skipping quad of named graph {name}");
			continue;
		}

		graph.subjects.entry(&quad.subject).or_default().push(quad);
		if !matches!(quad.object, Term::Literal(_)) {
			*graph.references.entry(&quad.object).or_default() += 1;
		}
	}

	let subjects: Vec<&Term> = graph.subjects.keys().copied().collect();
	let (roots, others): (Vec<&Term>, Vec<&Term>) = subjects
		.into_iter()
		.partition(|subject| !graph.references.contains_key(*subject));

	let mut result = Vec::new();
	for subject in roots {
		if !graph.visited.contains(subject) {
			result.push(Value::Object(graph.node(subject, false)))
		}
	}

	// Subjects only reachable through a cycle come last, and keep their
	// identifier so the cycle can be closed.
	for subject in others {
		if !graph.visited.contains(subject) {
			result.push(Value::Object(graph.node(subject, true)))
		}
	}

	result
}

#[derive(Default)]
struct Graph<'a> {
	subjects: IndexMap<&'a Term, Vec<&'a Quad>>,
	references: HashMap<&'a Term, usize>,
	visited: HashSet<&'a Term>,
}

impl<'a> Graph<'a> {
	fn reference_count(&self, term: &Term) -> usize {
		self.references.get(term).copied().unwrap_or_default()
	}

	fn node(&mut self, subject: &'a Term, keep_id: bool) -> Object {
		self.visited.insert(subject);

		let mut node = Object::new();
		if keep_id || !subject.is_blank() || self.reference_count(subject) > 1 {
			node.insert("@id".to_owned(), Value::String(id(subject)));
		}

		let quads = self.subjects.get(subject).cloned().unwrap_or_default();
		for quad in quads {
			let (key, value) = if quad.predicate == rdf::TYPE && !matches!(quad.object, Term::Literal(_)) {
				("@type", Value::String(id(&quad.object)))
			} else {
				(quad.predicate.as_str(), self.object(&quad.object))
			};

			if let Value::Array(values) = node
				.entry(key)
				.or_insert_with(|| Value::Array(Vec::new()))
			{
				values.push(value)
			}
		}

		node
	}

	fn object(&mut self, term: &'a Term) -> Value {
		match term {
			Term::Literal(literal) => literal_value(literal),
			Term::Iri(iri) if iri == rdf::NIL => json!({ "@list": [] }),
			_ => {
				if let Some((nodes, items)) = self.list(term) {
					self.visited.extend(nodes);
					let items: Vec<Value> = items.into_iter().map(|item| self.object(item)).collect();
					return json!({ "@list": items });
				}

				if self.subjects.contains_key(term) && !self.visited.contains(term) {
					return Value::Object(self.node(term, false));
				}

				json!({ "@id": id(term) })
			}
		}
	}

	/// Returns the nodes and items of the list starting at `head`, if it is
	/// made of blank nodes referenced once, each with exactly one `rdf:first`
	/// and one `rdf:rest`.
	fn list(&self, head: &'a Term) -> Option<(Vec<&'a Term>, Vec<&'a Term>)> {
		let mut nodes = Vec::new();
		let mut items = Vec::new();
		let mut current = head;
		loop {
			if current.as_iri() == Some(rdf::NIL) {
				return Some((nodes, items));
			}

			if !current.is_blank() || self.reference_count(current) != 1 || nodes.contains(&current) {
				return None;
			}

			let [a, b] = self.subjects.get(current)?.as_slice() else {
				return None;
			};

			let (first, rest): (&'a Quad, &'a Quad) = match (a.predicate.as_str(), b.predicate.as_str()) {
				(rdf::FIRST, rdf::REST) => (*a, *b),
				(rdf::REST, rdf::FIRST) => (*b, *a),
				_ => return None,
			};

			nodes.push(current);
			items.push(&first.object);
			current = &rest.object;
		}
	}
}

fn id(term: &Term) -> String {
	match term {
		Term::Iri(iri) => iri.clone(),
		Term::Blank(label) => format!("_:{label}"),
		Term::Literal(literal) => literal.value.clone(),
	}
}

fn literal_value(literal: &Literal) -> Value {
	if let Some(language) = &literal.language {
		return json!({ "@value": literal.value, "@language": language });
	}

	let native = match literal.datatype.as_str() {
		xsd::STRING => Some(Value::String(literal.value.clone())),
		xsd::BOOLEAN => match literal.value.as_str() {
			"true" => Some(Value::Bool(true)),
			"false" => Some(Value::Bool(false)),
			_ => None,
		},
		xsd::INTEGER => literal.value.parse::<i64>().ok().map(Value::from),
		xsd::DOUBLE => literal
			.value
			.parse::<f64>()
			.ok()
			.and_then(Number::from_f64)
			.map(Value::Number),
		_ => None,
	};

	match native {
		Some(value) => json!({ "@value": value }),
		None => json!({ "@value": literal.value, "@type": literal.datatype }),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::algorithms::rdf::parse_nquads;

	#[test]
	fn convert() {
		let quads = parse_nquads(
			"_:b1 <https://example.org/ns#name> \"Joe\" .\n\
			<https://example.org/1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <https://example.org/ns#Note> .\n\
			<https://example.org/1> <https://example.org/ns#author> _:b1 .\n\
			<https://example.org/1> <https://example.org/ns#size> \"3\"^^<http://www.w3.org/2001/XMLSchema#integer> .\n\
			<https://example.org/1> <https://example.org/ns#date> \"2020\"^^<http://www.w3.org/2001/XMLSchema#gYear> .\n\
			<https://example.org/1> <https://example.org/ns#items> _:l0 .\n\
			<https://example.org/1> <https://example.org/ns#empty> <http://www.w3.org/1999/02/22-rdf-syntax-ns#nil> .\n\
			_:l0 <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> \"a\"@en .\n\
			_:l0 <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> _:l1 .\n\
			_:l1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> <http://www.w3.org/1999/02/22-rdf-syntax-ns#nil> .\n\
			_:l1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> <https://example.org/a> .\n\
			<https://example.org/1> <https://example.org/ns#p> \"x\" <https://example.org/g> .\n",
		)
		.unwrap();

		let expanded = from_rdf(&quads);
		assert_eq!(
			expanded,
			[json!({
				"@id": "https://example.org/1",
				"@type": ["https://example.org/ns#Note"],
				"https://example.org/ns#author": [{ "https://example.org/ns#name": [{ "@value": "Joe" }] }],
				"https://example.org/ns#size": [{ "@value": 3 }],
				"https://example.org/ns#date": [{
					"@value": "2020",
					"@type": "http://www.w3.org/2001/XMLSchema#gYear"
				}],
				"https://example.org/ns#items": [{
					"@list": [{ "@value": "a", "@language": "en" }, { "@id": "https://example.org/a" }]
				}],
				"https://example.org/ns#empty": [{ "@list": [] }]
			})]
		);
	}

	#[test]
	fn shared_and_cyclic_nodes() {
		let quads = parse_nquads(
			"<https://example.org/1> <https://example.org/ns#p> _:b .\n\
			<https://example.org/1> <https://example.org/ns#q> _:b .\n\
			_:b <https://example.org/ns#name> \"b\" .\n\
			_:x <https://example.org/ns#p> _:y .\n\
			_:y <https://example.org/ns#p> _:x .\n",
		)
		.unwrap();

		let expanded = from_rdf(&quads);
		assert_eq!(expanded.len(), 2);
		assert_eq!(
			expanded[0],
			json!({
				"@id": "https://example.org/1",
				"https://example.org/ns#p": [{ "@id": "_:b", "https://example.org/ns#name": [{ "@value": "b" }] }],
				"https://example.org/ns#q": [{ "@id": "_:b" }]
			})
		);
		assert_eq!(
			expanded[1],
			json!({
				"@id": "_:x",
				"https://example.org/ns#p": [{ "https://example.org/ns#p": [{ "@id": "_:x" }] }]
			})
		);
	}
}
