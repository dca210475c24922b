//! Authoritative node and edge collections.
//!
//! Every mutation is total: unknown ids and invalid requests are no-ops
//! reported through the return value, never panics. UI callbacks routinely
//! arrive with ids that were deleted a moment earlier.

use std::collections::HashSet;

use log::debug;
use uuid::Uuid;

use super::types::{EdgeStyle, GraphData, GraphEdge, GraphNode, WordData};
use super::viewport::{Point, Rect, Size};

/// Ids removed by a node deletion, cascaded edges included.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Removed {
	pub nodes: Vec<String>,
	pub edges: Vec<String>,
}

impl Removed {
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.edges.is_empty()
	}
}

/// Records dropped while loading external data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
	pub nodes: usize,
	pub edges: usize,
	pub skipped_nodes: usize,
	pub skipped_edges: usize,
}

#[derive(Clone, Debug, Default)]
pub struct GraphStore {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	counter: u64,
}

impl GraphStore {
	#[cfg(test)]
	pub fn new(data: GraphData) -> Self {
		let mut store = Self::default();
		store.load(data);
		store
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	pub fn node(&self, id: &str) -> Option<&GraphNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
		self.edges.iter().find(|e| e.id == id)
	}

	pub fn contains_node(&self, id: &str) -> bool {
		self.node(id).is_some()
	}

	/// Replace the whole graph with externally loaded records, dropping
	/// anything that would break the id or endpoint invariants.
	pub fn load(&mut self, data: GraphData) -> LoadReport {
		let mut report = LoadReport::default();
		self.nodes.clear();
		self.edges.clear();

		let mut seen = HashSet::new();
		for node in data.nodes {
			if seen.insert(node.id.clone()) {
				self.nodes.push(node);
			} else {
				report.skipped_nodes += 1;
			}
		}

		let mut edge_ids = HashSet::new();
		for edge in data.edges {
			let valid = edge.source != edge.target
				&& seen.contains(&edge.source)
				&& seen.contains(&edge.target)
				&& !edge_ids.contains(&edge.id)
				&& !self.has_link(&edge.source, &edge.target);
			if valid {
				edge_ids.insert(edge.id.clone());
				self.edges.push(edge);
			} else {
				report.skipped_edges += 1;
			}
		}

		report.nodes = self.nodes.len();
		report.edges = self.edges.len();
		report
	}

	pub fn add_node(&mut self, data: WordData, position: Point) -> Option<GraphNode> {
		if !data.is_valid() {
			debug!("rejected node with missing word or meaning");
			return None;
		}
		let node = GraphNode {
			id: self.fresh_id("n"),
			position,
			data: data.normalized(),
		};
		self.nodes.push(node.clone());
		Some(node)
	}

	/// Replace a node's data, keeping its id and position.
	pub fn update_node(&mut self, id: &str, data: WordData) -> Option<&GraphNode> {
		if !data.is_valid() {
			debug!("rejected update of {id} with missing word or meaning");
			return None;
		}
		let node = self.nodes.iter_mut().find(|n| n.id == id)?;
		node.data = data.normalized();
		Some(&*node)
	}

	pub fn delete_node(&mut self, id: &str) -> Removed {
		self.delete_nodes(&HashSet::from([id.to_string()]))
	}

	/// Remove the given nodes and every edge touching any of them.
	pub fn delete_nodes(&mut self, ids: &HashSet<String>) -> Removed {
		let mut removed = Removed::default();
		self.nodes.retain(|n| {
			let keep = !ids.contains(&n.id);
			if !keep {
				removed.nodes.push(n.id.clone());
			}
			keep
		});
		self.edges.retain(|e| {
			let keep = !ids.contains(&e.source) && !ids.contains(&e.target);
			if !keep {
				removed.edges.push(e.id.clone());
			}
			keep
		});
		removed
	}

	/// Connect `source` → `target`. Self loops, dangling endpoints and
	/// duplicates of an existing `source` → `target` edge are rejected.
	pub fn add_edge(&mut self, source: &str, target: &str, style: EdgeStyle) -> Option<GraphEdge> {
		if source == target {
			debug!("rejected self loop on {source}");
			return None;
		}
		if !self.contains_node(source) || !self.contains_node(target) {
			debug!("rejected edge {source} -> {target}: missing endpoint");
			return None;
		}
		if self.has_link(source, target) {
			debug!("rejected duplicate edge {source} -> {target}");
			return None;
		}
		let edge = GraphEdge {
			id: self.fresh_id("e"),
			source: source.to_string(),
			target: target.to_string(),
			style,
		};
		self.edges.push(edge.clone());
		Some(edge)
	}

	pub fn delete_edge(&mut self, id: &str) -> Option<GraphEdge> {
		let idx = self.edges.iter().position(|e| e.id == id)?;
		Some(self.edges.remove(idx))
	}

	pub fn has_link(&self, source: &str, target: &str) -> bool {
		self.edges
			.iter()
			.any(|e| e.source == source && e.target == target)
	}

	/// Bounding box of all node footprints.
	pub fn bounds(&self, node_size: Size) -> Option<Rect> {
		self.nodes
			.iter()
			.map(|n| Rect::new(n.position, node_size))
			.reduce(|acc, r| acc.union(&r))
	}

	fn fresh_id(&mut self, prefix: &str) -> String {
		loop {
			self.counter += 1;
			let salt = Uuid::new_v4().simple().to_string();
			let id = format!("{prefix}{}-{}", self.counter, &salt[..8]);
			if !self.contains_node(&id) && self.edge(&id).is_none() {
				return id;
			}
		}
	}
}
