//! RDF dataset canonicalization (URDNA2015).
//!
//! Blank nodes are labeled `_:c14n0`, `_:c14n1`, ... from hashes of their
//! surroundings, so isomorphic datasets serialize to the same N-Quads
//! regardless of blank node labels, key order or statement order.
use hashbrown::HashMap;
use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

use crate::{
	algorithms::{
		rdf::{to_rdf, Quad, ToRdfOptions},
		Error,
	},
	syntax::Value,
};

/// Serializes the given expanded document into canonical N-Quads.
///
/// Terms that cannot be represented in RDF are dropped.
pub fn to_nquads(expanded: &[Value]) -> Result<String, Error> {
	to_nquads_with(expanded, ToRdfOptions::default())
}

/// Serializes the given expanded document into canonical N-Quads, with the
/// given conversion options.
pub fn to_nquads_with(expanded: &[Value], options: ToRdfOptions) -> Result<String, Error> {
	let quads = to_rdf(expanded, options)?;
	Ok(serialize(&canonicalize(&quads)))
}

/// Relabels the blank nodes of a dataset with their canonical labels.
///
/// Duplicate quads are removed.
pub fn canonicalize(quads: &[Quad]) -> Vec<Quad> {
	let mut quads = quads.to_vec();
	quads.sort();
	quads.dedup();

	let mut state = Canonicalization::new(&quads);
	state.issue_canonical_labels();

	let canonical = state.canonical;
	quads
		.iter()
		.map(|quad| {
			quad.map_blank_nodes(|label| match canonical.get(label) {
				Some(id) => id.trim_start_matches("_:").to_owned(),
				None => label.to_owned(),
			})
		})
		.collect()
}

/// Serializes a dataset into sorted, deduplicated N-Quads lines.
pub fn serialize(quads: &[Quad]) -> String {
	let mut lines: Vec<String> = quads.iter().map(|quad| format!("{quad}\n")).collect();
	lines.sort();
	lines.dedup();
	lines.concat()
}

fn sha256_hex(input: &str) -> String {
	format!("{:x}", Sha256::digest(input.as_bytes()))
}

/// Issues identifiers with a fixed prefix, remembering the order in which
/// existing labels were given one.
#[derive(Debug, Clone)]
struct IdentifierIssuer {
	prefix: &'static str,
	issued: IndexMap<String, String>,
}

impl IdentifierIssuer {
	fn new(prefix: &'static str) -> Self {
		Self {
			prefix,
			issued: IndexMap::new(),
		}
	}

	fn get(&self, label: &str) -> Option<&str> {
		self.issued.get(label).map(String::as_str)
	}

	fn has(&self, label: &str) -> bool {
		self.issued.contains_key(label)
	}

	fn issue(&mut self, label: &str) -> String {
		if let Some(id) = self.issued.get(label) {
			return id.clone();
		}

		let id = format!("{}{}", self.prefix, self.issued.len());
		self.issued.insert(label.to_owned(), id.clone());
		id
	}
}

struct Canonicalization<'a> {
	/// Quads mentioning each blank node, in order of first appearance.
	blank_node_quads: IndexMap<&'a str, Vec<&'a Quad>>,
	first_degree_hashes: HashMap<&'a str, String>,
	canonical: IdentifierIssuer,
}

impl<'a> Canonicalization<'a> {
	fn new(quads: &'a [Quad]) -> Self {
		let mut blank_node_quads: IndexMap<&'a str, Vec<&'a Quad>> = IndexMap::new();
		for quad in quads {
			for (_, label) in quad.blank_nodes() {
				let entry = blank_node_quads.entry(label).or_default();
				if !entry.last().is_some_and(|last| std::ptr::eq(*last, quad)) {
					entry.push(quad)
				}
			}
		}

		Self {
			blank_node_quads,
			first_degree_hashes: HashMap::new(),
			canonical: IdentifierIssuer::new("_:c14n"),
		}
	}

	fn quads_of(&self, label: &str) -> Vec<&'a Quad> {
		self.blank_node_quads.get(label).cloned().unwrap_or_default()
	}

	fn issue_canonical_labels(&mut self) {
		let labels: Vec<&'a str> = self.blank_node_quads.keys().copied().collect();
		let mut hash_to_blank_nodes: BTreeMap<String, Vec<&'a str>> = BTreeMap::new();
		for label in labels {
			let hash = self.hash_first_degree(label);
			hash_to_blank_nodes.entry(hash).or_default().push(label);
		}

		// Blank nodes with a unique first degree hash are labeled right away,
		// in hash order.
		let mut shared = Vec::new();
		for (_, labels) in hash_to_blank_nodes {
			match labels.as_slice() {
				[label] => {
					self.canonical.issue(label);
				}
				_ => shared.push(labels),
			}
		}

		for labels in shared {
			let mut results = Vec::new();
			for label in labels {
				if self.canonical.has(label) {
					continue;
				}

				let mut issuer = IdentifierIssuer::new("_:b");
				issuer.issue(label);
				results.push(self.hash_n_degree(label, issuer));
			}

			results.sort_by(|(a, _), (b, _)| a.cmp(b));
			for (_, issuer) in results {
				for label in issuer.issued.keys() {
					self.canonical.issue(label);
				}
			}
		}
	}

	fn hash_first_degree(&mut self, reference: &'a str) -> String {
		if let Some(hash) = self.first_degree_hashes.get(reference) {
			return hash.clone();
		}

		let mut nquads: Vec<String> = self
			.quads_of(reference)
			.into_iter()
			.map(|quad| {
				let quad = quad.map_blank_nodes(|label| String::from(if label == reference { "a" } else { "z" }));
				format!("{quad}\n")
			})
			.collect();
		nquads.sort();

		let hash = sha256_hex(&nquads.concat());
		self.first_degree_hashes.insert(reference, hash.clone());
		hash
	}

	fn hash_related(&mut self, related: &'a str, quad: &Quad, issuer: &IdentifierIssuer, position: char) -> String {
		let id = match self.canonical.get(related).or_else(|| issuer.get(related)) {
			Some(id) => id.to_owned(),
			None => self.hash_first_degree(related),
		};

		let mut input = String::from(position);
		if position != 'g' {
			input.push('<');
			input.push_str(&quad.predicate);
			input.push('>');
		}
		input.push_str(&id);

		sha256_hex(&input)
	}

	fn hash_n_degree(&mut self, identifier: &'a str, mut issuer: IdentifierIssuer) -> (String, IdentifierIssuer) {
		let mut hash_to_related: BTreeMap<String, Vec<&'a str>> = BTreeMap::new();
		for quad in self.quads_of(identifier) {
			for (position, related) in quad.blank_nodes() {
				if related != identifier {
					let hash = self.hash_related(related, quad, &issuer, position);
					hash_to_related.entry(hash).or_default().push(related);
				}
			}
		}

		let mut data = String::new();
		for (related_hash, blank_nodes) in hash_to_related {
			data.push_str(&related_hash);

			let mut chosen_path = String::new();
			let mut chosen_issuer = None;

			let mut permutation: Vec<usize> = (0..blank_nodes.len()).collect();
			loop {
				if let Some((path, issuer_copy)) =
					self.permutation_path(&permutation, &blank_nodes, &issuer, &chosen_path)
				{
					if chosen_path.is_empty() || path < chosen_path {
						chosen_path = path;
						chosen_issuer = Some(issuer_copy);
					}
				}

				if !next_permutation(&mut permutation) {
					break;
				}
			}

			data.push_str(&chosen_path);
			if let Some(chosen) = chosen_issuer {
				issuer = chosen
			}
		}

		(sha256_hex(&data), issuer)
	}

	/// Computes the path of one ordering of related blank nodes, or `None` as
	/// soon as it is known to be greater than the chosen one.
	fn permutation_path(
		&mut self,
		permutation: &[usize],
		blank_nodes: &[&'a str],
		issuer: &IdentifierIssuer,
		chosen_path: &str,
	) -> Option<(String, IdentifierIssuer)> {
		let exceeds = |path: &str| !chosen_path.is_empty() && path.len() >= chosen_path.len() && path > chosen_path;

		let mut issuer_copy = issuer.clone();
		let mut path = String::new();
		let mut recursion = Vec::new();

		for &i in permutation {
			let related = blank_nodes[i];
			match self.canonical.get(related) {
				Some(id) => path.push_str(id),
				None => {
					if !issuer_copy.has(related) {
						recursion.push(related)
					}
					path.push_str(&issuer_copy.issue(related))
				}
			}

			if exceeds(&path) {
				return None;
			}
		}

		for related in recursion {
			let (hash, result_issuer) = self.hash_n_degree(related, issuer_copy.clone());
			path.push_str(&issuer_copy.issue(related));
			path.push('<');
			path.push_str(&hash);
			path.push('>');
			issuer_copy = result_issuer;

			if exceeds(&path) {
				return None;
			}
		}

		Some((path, issuer_copy))
	}
}

/// Rearranges `indices` into the next permutation in lexicographic order.
/// Returns `false` once every permutation has been visited.
fn next_permutation(indices: &mut [usize]) -> bool {
	let Some(i) = indices.windows(2).rposition(|w| w[0] < w[1]) else {
		return false;
	};

	let j = indices.iter().rposition(|&x| x > indices[i]).unwrap_or(i);
	indices.swap(i, j);
	indices[i + 1..].reverse();
	true
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::algorithms::rdf::parse_nquads;
	use serde_json::json;

	fn canonical(nquads: &str) -> String {
		serialize(&canonicalize(&parse_nquads(nquads).unwrap()))
	}

	#[test]
	fn serialize_document() {
		let nquads = to_nquads(&[json!({
			"@id": "https://example.org/1",
			"@type": ["https://example.org/ns#Note"],
			"https://example.org/ns#name": [
				{ "@value": "hello \"world\"", "@language": "en" },
				{ "@value": "plain" }
			],
			"https://example.org/ns#size": [{ "@value": 3 }, { "@value": 2.5 }, { "@value": true }],
			"https://example.org/ns#author": [{ "https://example.org/ns#name": [{ "@value": "a" }] }],
			"https://example.org/ns#items": [{ "@list": [{ "@id": "https://example.org/a" }] }],
			"_:ignored": [{ "@value": 1 }]
		})])
		.unwrap();

		let expected = [
			"<https://example.org/1> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <https://example.org/ns#Note> .",
			"<https://example.org/1> <https://example.org/ns#author> _:c14n0 .",
			"<https://example.org/1> <https://example.org/ns#items> _:c14n1 .",
			"<https://example.org/1> <https://example.org/ns#name> \"hello \\\"world\\\"\"@en .",
			"<https://example.org/1> <https://example.org/ns#name> \"plain\" .",
			"<https://example.org/1> <https://example.org/ns#size> \"2.5E0\"^^<http://www.w3.org/2001/XMLSchema#double> .",
			"<https://example.org/1> <https://example.org/ns#size> \"3\"^^<http://www.w3.org/2001/XMLSchema#integer> .",
			"<https://example.org/1> <https://example.org/ns#size> \"true\"^^<http://www.w3.org/2001/XMLSchema#boolean> .",
			"_:c14n0 <https://example.org/ns#name> \"a\" .",
			"_:c14n1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#first> <https://example.org/a> .",
			"_:c14n1 <http://www.w3.org/1999/02/22-rdf-syntax-ns#rest> <http://www.w3.org/1999/02/22-rdf-syntax-ns#nil> .",
		];

		let mut expected: Vec<&str> = expected.to_vec();
		expected.sort();
		assert_eq!(nquads, expected.join("\n") + "\n");
	}

	#[test]
	fn key_order_does_not_matter() {
		let a = to_nquads(&[json!({
			"https://example.org/ns#a": [{ "https://example.org/ns#v": [{ "@value": 1 }] }],
			"https://example.org/ns#b": [{ "https://example.org/ns#v": [{ "@value": 2 }] }]
		})])
		.unwrap();
		let b = to_nquads(&[json!({
			"https://example.org/ns#b": [{ "https://example.org/ns#v": [{ "@value": 2 }] }],
			"https://example.org/ns#a": [{ "https://example.org/ns#v": [{ "@value": 1 }] }]
		})])
		.unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn labels_and_statement_order_do_not_matter() {
		let a = canonical(
			"_:x <https://example.org/p> _:y .\n\
			_:y <https://example.org/q> \"1\" .\n\
			_:z <https://example.org/p> _:y .\n",
		);
		let b = canonical(
			"_:n2 <https://example.org/p> _:n0 .\n\
			_:n0 <https://example.org/q> \"1\" .\n\
			_:n1 <https://example.org/p> _:n0 .\n",
		);
		assert_eq!(a, b);
		assert_eq!(a.matches("_:c14n").count(), 5);
	}

	#[test]
	fn indistinguishable_blank_nodes() {
		let nquads = canonical(
			"_:x <https://example.org/p> _:y .\n\
			_:y <https://example.org/p> _:x .\n",
		);
		assert_eq!(
			nquads,
			"_:c14n0 <https://example.org/p> _:c14n1 .\n\
			_:c14n1 <https://example.org/p> _:c14n0 .\n"
		);

		// Two identical chains hanging from the same node.
		let a = canonical(
			"<https://example.org/s> <https://example.org/p> _:a .\n\
			<https://example.org/s> <https://example.org/p> _:b .\n\
			_:a <https://example.org/q> _:c .\n\
			_:b <https://example.org/q> _:d .\n",
		);
		let b = canonical(
			"_:d <https://example.org/q> _:a .\n\
			<https://example.org/s> <https://example.org/p> _:d .\n\
			_:c <https://example.org/q> _:b .\n\
			<https://example.org/s> <https://example.org/p> _:c .\n",
		);
		assert_eq!(a, b);
		assert_eq!(a.lines().count(), 4);
	}

	#[test]
	fn duplicates_are_removed() {
		let nquads = canonical(
			"<https://example.org/s> <https://example.org/p> \"a\" .\n\
			<https://example.org/s> <https://example.org/p> \"a\" .\n",
		);
		assert_eq!(nquads, "<https://example.org/s> <https://example.org/p> \"a\" .\n");
	}

	#[test]
	fn permutations() {
		let mut indices = [0, 1, 2];
		let mut count = 1;
		while next_permutation(&mut indices) {
			count += 1;
		}
		assert_eq!(count, 6);
		assert_eq!(indices, [2, 1, 0]);
	}
}
