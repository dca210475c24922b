//! Incremental word search with match highlighting.

use super::store::GraphStore;
use super::types::GraphNode;

/// A run of text, emphasized when it is part of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
	pub text: String,
	pub emphasized: bool,
}

/// A word split into matched and unmatched runs, original casing preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Highlight {
	pub segments: Vec<Segment>,
}

impl Highlight {
	pub fn has_match(&self) -> bool {
		self.segments.iter().any(|s| s.emphasized)
	}

	/// HTML rendering with every match wrapped in `<mark>`.
	pub fn to_markup(&self) -> String {
		self.segments
			.iter()
			.map(|s| {
				let text = escape(&s.text);
				if s.emphasized {
					format!("<mark>{text}</mark>")
				} else {
					text
				}
			})
			.collect()
	}

	fn push(&mut self, text: &str, emphasized: bool) {
		if !text.is_empty() {
			self.segments.push(Segment {
				text: text.to_string(),
				emphasized,
			});
		}
	}
}

fn escape(text: &str) -> String {
	text.replace('&', "&amp;")
		.replace('<', "&lt;")
		.replace('>', "&gt;")
}

/// Mark every non-overlapping, case-insensitive occurrence of `query` in `word`.
pub fn highlight(word: &str, query: &str) -> Highlight {
	let needle: Vec<char> = query.chars().flat_map(char::to_lowercase).collect();
	let mut out = Highlight::default();
	if needle.is_empty() {
		out.push(word, false);
		return out;
	}

	// Each lowercased char keeps the byte span of the char it came from, so a
	// match always covers whole chars of `word` even when lowercasing expands.
	let lowered: Vec<(char, usize, usize)> = word
		.char_indices()
		.flat_map(|(b, c)| c.to_lowercase().map(move |lc| (lc, b, b + c.len_utf8())))
		.collect();
	let (mut i, mut plain_from) = (0, 0);
	while i + needle.len() <= lowered.len() {
		let hit = lowered[i..i + needle.len()]
			.iter()
			.map(|&(c, ..)| c)
			.eq(needle.iter().copied());
		if !hit {
			i += 1;
			continue;
		}
		let (start, stop) = (lowered[i].1, lowered[i + needle.len() - 1].2);
		out.push(&word[plain_from..start], false);
		out.push(&word[start..stop], true);
		plain_from = stop;
		i += needle.len();
		while lowered.get(i).is_some_and(|&(_, b, _)| b < stop) {
			i += 1;
		}
	}
	out.push(&word[plain_from..], false);
	out
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
	pub node: GraphNode,
	pub highlighted: Highlight,
}

/// Matching nodes sorted by word, capped at `limit`.
pub fn search(nodes: &[GraphNode], query: &str, limit: usize) -> Vec<SearchResult> {
	let query = query.trim();
	if query.is_empty() {
		return Vec::new();
	}
	let mut results: Vec<SearchResult> = nodes
		.iter()
		.filter_map(|node| {
			let highlighted = highlight(&node.data.word, query);
			highlighted.has_match().then(|| SearchResult {
				node: node.clone(),
				highlighted,
			})
		})
		.collect();
	results.sort_by(|a, b| {
		let (wa, wb) = (&a.node.data.word, &b.node.data.word);
		wa.to_lowercase().cmp(&wb.to_lowercase()).then_with(|| wa.cmp(wb))
	});
	results.truncate(limit);
	results
}

/// Query text plus the results derived from it.
#[derive(Clone, Debug, Default)]
pub struct SearchIndex {
	query: String,
	results: Vec<SearchResult>,
	limit: usize,
}

impl SearchIndex {
	pub fn new(limit: usize) -> Self {
		Self {
			limit,
			..Self::default()
		}
	}

	pub fn query(&self) -> &str {
		&self.query
	}

	pub fn results(&self) -> &[SearchResult] {
		&self.results
	}

	/// Whether the suggestion list should be shown.
	pub fn is_open(&self) -> bool {
		!self.results.is_empty()
	}

	pub fn set_query(&mut self, query: &str, store: &GraphStore) {
		self.query = query.to_string();
		self.refresh(store);
	}

	/// Recompute results against the current graph.
	pub fn refresh(&mut self, store: &GraphStore) {
		self.results = search(store.nodes(), &self.query, self.limit);
	}

	pub fn clear(&mut self) {
		self.query.clear();
		self.results.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::word_graph::types::{GraphData, WordData};
	use crate::components::word_graph::viewport::Point;

	fn store(words: &[&str]) -> GraphStore {
		let nodes = words
			.iter()
			.enumerate()
			.map(|(i, w)| GraphNode {
				id: i.to_string(),
				position: Point::default(),
				data: WordData {
					word: w.to_string(),
					meaning: "m".into(),
					part_of_speech: "명사".into(),
					example: None,
				},
			})
			.collect();
		GraphStore::new(GraphData {
			nodes,
			edges: vec![],
		})
	}

	fn words(results: &[SearchResult]) -> Vec<&str> {
		results.iter().map(|r| r.node.data.word.as_str()).collect()
	}

	#[test]
	fn substring_match_is_case_insensitive_and_sorted() {
		let store = store(&["map", "grape", "Apple"]);
		let results = search(store.nodes(), "app", 5);
		assert_eq!(words(&results), vec!["Apple"]);

		let store2 = store_for_app();
		assert_eq!(words(&search(store2.nodes(), "app", 5)), vec!["apple"]);
		assert_eq!(words(&search(store2.nodes(), "ap", 5)), vec!["apple", "grape", "map"]);
	}

	fn store_for_app() -> GraphStore {
		store(&["map", "grape", "apple"])
	}

	#[test]
	fn results_are_capped() {
		let store = store(&["a1", "a2", "a3", "a4", "a5", "a6", "a7"]);
		let results = search(store.nodes(), "A", 5);
		assert_eq!(words(&results), vec!["a1", "a2", "a3", "a4", "a5"]);
	}

	#[test]
	fn blank_query_clears_results() {
		let store = store(&["apple"]);
		let mut index = SearchIndex::new(5);
		index.set_query("app", &store);
		assert!(index.is_open());
		index.set_query("   ", &store);
		assert!(index.results().is_empty());
		assert!(!index.is_open());
	}

	#[test]
	fn highlight_preserves_original_casing() {
		let h = highlight("PineApple", "apple");
		assert_eq!(h.to_markup(), "Pine<mark>Apple</mark>");
		let h = highlight("banana", "AN");
		assert_eq!(h.to_markup(), "b<mark>an</mark><mark>an</mark>a");
		assert!(!highlight("kiwi", "x").has_match());
	}

	#[test]
	fn highlight_treats_query_literally() {
		let h = highlight("a.b(c)", ".b(");
		assert_eq!(h.to_markup(), "a<mark>.b(</mark>c)");
		assert_eq!(highlight("<b>", "b").to_markup(), "&lt;<mark>b</mark>&gt;");
	}

	#[test]
	fn highlight_covers_chars_that_expand_when_lowercased() {
		let h = highlight("İstanbul", "i");
		assert_eq!(h.segments[0], Segment {
			text: "İ".into(),
			emphasized: true,
		});
		assert_eq!(h.to_markup(), "<mark>İ</mark>stanbul");

		let store = store(&["İstanbul", "Seoul"]);
		assert_eq!(words(&search(store.nodes(), "i", 5)), vec!["İstanbul"]);
	}

	#[test]
	fn refresh_tracks_graph_changes() {
		let mut store = store(&["apple"]);
		let mut index = SearchIndex::new(5);
		index.set_query("app", &store);
		store.delete_node("0");
		index.refresh(&store);
		assert!(index.results().is_empty());
		assert_eq!(index.query(), "app");
	}
}
