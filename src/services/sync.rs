//! Mirrors committed canvas mutations into a [`NetworkRepository`].
//!
//! Local state stays the source of truth for the session: a failed write is
//! logged and otherwise ignored, never rolled back.

use log::{info, warn};

use super::repository::{
	EdgeRecord, NetworkRepository, NodeRecord, RepositoryError, WordRecord,
};
use crate::components::word_graph::{GraphData, GraphEdge, GraphNode};

pub struct NetworkSync {
	repository: Box<dyn NetworkRepository>,
	network_id: String,
	owner: Option<String>,
}

impl NetworkSync {
	pub fn new(
		repository: Box<dyn NetworkRepository>,
		network_id: impl Into<String>,
		owner: Option<String>,
	) -> Self {
		Self {
			repository,
			network_id: network_id.into(),
			owner,
		}
	}

	pub fn network_id(&self) -> &str {
		&self.network_id
	}

	/// The stored network, possibly empty. `None` when it was never created
	/// or cannot be read.
	pub fn load(&self) -> Option<GraphData> {
		match self.repository.fetch_network(&self.network_id) {
			Ok(Some(records)) => {
				info!(
					"loaded network {} ({} nodes, {} edges)",
					self.network_id,
					records.nodes.len(),
					records.edges.len()
				);
				Some(records.into_graph_data())
			}
			Ok(None) => None,
			Err(e) => {
				warn!("fetching network {} failed: {e}", self.network_id);
				None
			}
		}
	}

	/// Create the network and write a whole graph into it, e.g. the starter
	/// network for a new user.
	pub fn seed(&mut self, data: &GraphData) {
		let result = self.repository.create_network(&self.network_id);
		self.report("create network", result);
		for node in &data.nodes {
			self.node_created(node);
		}
		for edge in &data.edges {
			self.edge_created(edge);
		}
	}

	pub fn node_created(&mut self, node: &GraphNode) {
		let word = WordRecord::from_data(&node.id, &node.data, self.owner.as_deref());
		let result = self.repository.create_word(word).and_then(|w| {
			self.repository.create_node(NodeRecord {
				id: node.id.clone(),
				network_id: self.network_id.clone(),
				word_id: w.id,
				position_x: node.position.x,
				position_y: node.position.y,
			})
		});
		self.report("create node", result);
	}

	pub fn node_updated(&mut self, node: &GraphNode) {
		let word = WordRecord::from_data(&node.id, &node.data, self.owner.as_deref());
		let result = self.repository.update_word(word);
		self.report("update word", result);
	}

	pub fn nodes_deleted(&mut self, ids: &[String]) {
		if ids.is_empty() {
			return;
		}
		let result = self.repository.delete_nodes(ids);
		self.report("delete nodes", result);
		for id in ids {
			let result = self.repository.delete_word(id);
			self.report("delete word", result);
		}
	}

	pub fn edge_created(&mut self, edge: &GraphEdge) {
		let result = self.repository.create_edge(EdgeRecord {
			id: edge.id.clone(),
			network_id: self.network_id.clone(),
			source_node_id: edge.source.clone(),
			target_node_id: edge.target.clone(),
			edge_type: Some(edge.style.stroke.clone()),
		});
		self.report("create edge", result);
	}

	pub fn edge_deleted(&mut self, edge_id: &str) {
		let result = self.repository.delete_edge(edge_id);
		self.report("delete edge", result);
	}

	fn report<T>(&self, op: &str, result: Result<T, RepositoryError>) {
		if let Err(e) = result {
			warn!("{op} failed in network {}: {e}", self.network_id);
		}
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::word_graph::{EdgeStyle, Point, WordData};
	use crate::services::repository::{MemoryRepository, NetworkRecords, Result};

	/// Repository whose every call fails.
	pub(crate) struct Offline;

	impl NetworkRepository for Offline {
		fn create_word(&mut self, _: WordRecord) -> Result<WordRecord> {
			Err(RepositoryError::Unavailable("offline".into()))
		}
		fn update_word(&mut self, _: WordRecord) -> Result<WordRecord> {
			Err(RepositoryError::Unavailable("offline".into()))
		}
		fn delete_word(&mut self, _: &str) -> Result<()> {
			Err(RepositoryError::Unavailable("offline".into()))
		}
		fn create_network(&mut self, _: &str) -> Result<()> {
			Err(RepositoryError::Unavailable("offline".into()))
		}
		fn fetch_network(&self, _: &str) -> Result<Option<NetworkRecords>> {
			Err(RepositoryError::Unavailable("offline".into()))
		}
		fn create_node(&mut self, _: NodeRecord) -> Result<NodeRecord> {
			Err(RepositoryError::Unavailable("offline".into()))
		}
		fn update_node_position(&mut self, _: &str, _: f64, _: f64) -> Result<NodeRecord> {
			Err(RepositoryError::Unavailable("offline".into()))
		}
		fn delete_nodes(&mut self, _: &[String]) -> Result<()> {
			Err(RepositoryError::Unavailable("offline".into()))
		}
		fn create_edge(&mut self, _: EdgeRecord) -> Result<EdgeRecord> {
			Err(RepositoryError::Unavailable("offline".into()))
		}
		fn delete_edge(&mut self, _: &str) -> Result<()> {
			Err(RepositoryError::Unavailable("offline".into()))
		}
	}

	fn node(id: &str) -> GraphNode {
		GraphNode {
			id: id.into(),
			position: Point::new(10.0, 20.0),
			data: WordData {
				word: id.into(),
				meaning: "m".into(),
				part_of_speech: "명사".into(),
				example: None,
			},
		}
	}

	#[test]
	fn mirrored_graph_loads_back() {
		let mut sync = NetworkSync::new(Box::new(MemoryRepository::default()), "net", None);
		assert!(sync.load().is_none());
		sync.node_created(&node("a"));
		sync.node_created(&node("b"));
		sync.edge_created(&GraphEdge {
			id: "ab".into(),
			source: "a".into(),
			target: "b".into(),
			style: EdgeStyle::default(),
		});
		let data = sync.load().unwrap();
		assert_eq!(data.nodes, vec![node("a"), node("b")]);
		assert_eq!(data.edges.len(), 1);

		sync.nodes_deleted(&["a".to_string()]);
		let data = sync.load().unwrap();
		assert_eq!(data.nodes.len(), 1);
		assert!(data.edges.is_empty());
	}

	#[test]
	fn failures_are_absorbed() {
		let mut sync = NetworkSync::new(Box::new(Offline), "net", Some("u1".into()));
		sync.node_created(&node("a"));
		sync.node_updated(&node("a"));
		sync.nodes_deleted(&["a".to_string()]);
		sync.edge_deleted("ab");
		assert!(sync.load().is_none());
	}

	#[test]
	fn seeded_network_stays_empty_once_cleared() {
		let mut sync = NetworkSync::new(Box::new(MemoryRepository::default()), "net", None);
		sync.seed(&GraphData {
			nodes: vec![node("a")],
			edges: vec![],
		});
		sync.nodes_deleted(&["a".to_string()]);
		assert_eq!(sync.load(), Some(GraphData::default()));

		let mut empty = NetworkSync::new(Box::new(MemoryRepository::default()), "net", None);
		empty.seed(&GraphData::default());
		assert_eq!(empty.load(), Some(GraphData::default()));
	}
}
