//! Storage contract for words, networks, node positions and edges.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::word_graph::{EdgeStyle, GraphData, GraphEdge, GraphNode, Point, WordData};

#[derive(Debug, Error)]
pub enum RepositoryError {
	#[error("record not found: {0}")]
	NotFound(String),
	#[error("storage unavailable: {0}")]
	Unavailable(String),
	#[error("storage write failed: {0}")]
	Storage(String),
	#[error("malformed stored network: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = RepositoryError> = std::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
	pub id: String,
	pub word: String,
	pub meaning: String,
	pub pos: String,
	#[serde(default)]
	pub example: Option<String>,
	/// Creating user; `None` for built-in words.
	#[serde(default)]
	pub created_by: Option<String>,
}

impl WordRecord {
	pub fn from_data(id: &str, data: &WordData, owner: Option<&str>) -> Self {
		Self {
			id: id.to_string(),
			word: data.word.clone(),
			meaning: data.meaning.clone(),
			pos: data.part_of_speech.clone(),
			example: data.example.clone(),
			created_by: owner.map(str::to_string),
		}
	}

	pub fn to_data(&self) -> WordData {
		WordData {
			word: self.word.clone(),
			meaning: self.meaning.clone(),
			part_of_speech: self.pos.clone(),
			example: self.example.clone(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
	pub id: String,
	pub network_id: String,
	pub word_id: String,
	pub position_x: f64,
	pub position_y: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
	pub id: String,
	pub network_id: String,
	pub source_node_id: String,
	pub target_node_id: String,
	#[serde(default)]
	pub edge_type: Option<String>,
}

/// Everything stored for one network.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkRecords {
	pub words: Vec<WordRecord>,
	pub nodes: Vec<NodeRecord>,
	pub edges: Vec<EdgeRecord>,
}

impl NetworkRecords {
	/// Convert stored records into canvas nodes and edges. Nodes whose word
	/// record is missing are dropped; the store validates the rest.
	pub fn into_graph_data(self) -> GraphData {
		let nodes = self
			.nodes
			.iter()
			.filter_map(|n| {
				let word = self.words.iter().find(|w| w.id == n.word_id)?;
				Some(GraphNode {
					id: n.id.clone(),
					position: Point::new(n.position_x, n.position_y),
					data: word.to_data(),
				})
			})
			.collect();
		let edges = self
			.edges
			.into_iter()
			.map(|e| GraphEdge {
				id: e.id,
				source: e.source_node_id,
				target: e.target_node_id,
				style: EdgeStyle {
					stroke: e.edge_type.unwrap_or_else(|| EdgeStyle::default().stroke),
					..EdgeStyle::default()
				},
			})
			.collect();
		GraphData { nodes, edges }
	}
}

/// CRUD operations the canvas expects from its storage backend.
pub trait NetworkRepository {
	fn create_word(&mut self, word: WordRecord) -> Result<WordRecord>;
	fn update_word(&mut self, word: WordRecord) -> Result<WordRecord>;
	fn delete_word(&mut self, word_id: &str) -> Result<()>;
	/// Register an empty network. Idempotent.
	fn create_network(&mut self, network_id: &str) -> Result<()>;
	/// `None` when the network was never created; an existing network may
	/// hold no nodes at all.
	fn fetch_network(&self, network_id: &str) -> Result<Option<NetworkRecords>>;
	fn create_node(&mut self, node: NodeRecord) -> Result<NodeRecord>;
	fn update_node_position(&mut self, node_id: &str, x: f64, y: f64) -> Result<NodeRecord>;
	/// Also removes edge records that reference any of the nodes.
	fn delete_nodes(&mut self, node_ids: &[String]) -> Result<()>;
	fn create_edge(&mut self, edge: EdgeRecord) -> Result<EdgeRecord>;
	fn delete_edge(&mut self, edge_id: &str) -> Result<()>;
}

/// In-process repository; also the document format of [`LocalStorageRepository`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryRepository {
	#[serde(default)]
	networks: Vec<String>,
	words: Vec<WordRecord>,
	nodes: Vec<NodeRecord>,
	edges: Vec<EdgeRecord>,
}

impl NetworkRepository for MemoryRepository {
	fn create_word(&mut self, word: WordRecord) -> Result<WordRecord> {
		self.words.retain(|w| w.id != word.id);
		self.words.push(word.clone());
		Ok(word)
	}

	fn update_word(&mut self, word: WordRecord) -> Result<WordRecord> {
		let slot = self
			.words
			.iter_mut()
			.find(|w| w.id == word.id)
			.ok_or_else(|| RepositoryError::NotFound(word.id.clone()))?;
		*slot = word.clone();
		Ok(word)
	}

	fn delete_word(&mut self, word_id: &str) -> Result<()> {
		self.words.retain(|w| w.id != word_id);
		Ok(())
	}

	fn create_network(&mut self, network_id: &str) -> Result<()> {
		if !self.networks.iter().any(|n| n == network_id) {
			self.networks.push(network_id.to_string());
		}
		Ok(())
	}

	fn fetch_network(&self, network_id: &str) -> Result<Option<NetworkRecords>> {
		let known = self.networks.iter().any(|n| n == network_id)
			|| self.nodes.iter().any(|n| n.network_id == network_id);
		if !known {
			return Ok(None);
		}
		let nodes: Vec<NodeRecord> = self
			.nodes
			.iter()
			.filter(|n| n.network_id == network_id)
			.cloned()
			.collect();
		let words = self
			.words
			.iter()
			.filter(|w| nodes.iter().any(|n| n.word_id == w.id))
			.cloned()
			.collect();
		let edges = self
			.edges
			.iter()
			.filter(|e| e.network_id == network_id)
			.cloned()
			.collect();
		Ok(Some(NetworkRecords {
			words,
			nodes,
			edges,
		}))
	}

	fn create_node(&mut self, node: NodeRecord) -> Result<NodeRecord> {
		self.nodes.retain(|n| n.id != node.id);
		self.nodes.push(node.clone());
		Ok(node)
	}

	fn update_node_position(&mut self, node_id: &str, x: f64, y: f64) -> Result<NodeRecord> {
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == node_id)
			.ok_or_else(|| RepositoryError::NotFound(node_id.to_string()))?;
		node.position_x = x;
		node.position_y = y;
		Ok(node.clone())
	}

	fn delete_nodes(&mut self, node_ids: &[String]) -> Result<()> {
		self.nodes.retain(|n| !node_ids.contains(&n.id));
		self.edges.retain(|e| {
			!node_ids.contains(&e.source_node_id) && !node_ids.contains(&e.target_node_id)
		});
		Ok(())
	}

	fn create_edge(&mut self, edge: EdgeRecord) -> Result<EdgeRecord> {
		self.edges.retain(|e| e.id != edge.id);
		self.edges.push(edge.clone());
		Ok(edge)
	}

	fn delete_edge(&mut self, edge_id: &str) -> Result<()> {
		self.edges.retain(|e| e.id != edge_id);
		Ok(())
	}
}

/// Repository persisted as one JSON document in the browser's `localStorage`.
pub struct LocalStorageRepository {
	key: String,
}

impl LocalStorageRepository {
	pub fn new(namespace: &str) -> Self {
		Self {
			key: format!("word-graph:{namespace}"),
		}
	}

	fn storage() -> Result<web_sys::Storage> {
		web_sys::window()
			.ok_or_else(|| RepositoryError::Unavailable("no window".into()))?
			.local_storage()
			.map_err(|e| RepositoryError::Unavailable(format!("{e:?}")))?
			.ok_or_else(|| RepositoryError::Unavailable("localStorage disabled".into()))
	}

	fn read(&self) -> Result<MemoryRepository> {
		let raw = Self::storage()?
			.get_item(&self.key)
			.map_err(|e| RepositoryError::Unavailable(format!("{e:?}")))?;
		match raw {
			Some(raw) => Ok(serde_json::from_str(&raw)?),
			None => Ok(MemoryRepository::default()),
		}
	}

	fn write(&self, doc: &MemoryRepository) -> Result<()> {
		let raw = serde_json::to_string(doc)?;
		Self::storage()?
			.set_item(&self.key, &raw)
			.map_err(|e| RepositoryError::Storage(format!("{e:?}")))
	}

	fn modify<T>(&mut self, f: impl FnOnce(&mut MemoryRepository) -> Result<T>) -> Result<T> {
		let mut doc = self.read()?;
		let out = f(&mut doc)?;
		self.write(&doc)?;
		Ok(out)
	}
}

impl NetworkRepository for LocalStorageRepository {
	fn create_word(&mut self, word: WordRecord) -> Result<WordRecord> {
		self.modify(|doc| doc.create_word(word))
	}

	fn update_word(&mut self, word: WordRecord) -> Result<WordRecord> {
		self.modify(|doc| doc.update_word(word))
	}

	fn delete_word(&mut self, word_id: &str) -> Result<()> {
		self.modify(|doc| doc.delete_word(word_id))
	}

	fn create_network(&mut self, network_id: &str) -> Result<()> {
		self.modify(|doc| doc.create_network(network_id))
	}

	fn fetch_network(&self, network_id: &str) -> Result<Option<NetworkRecords>> {
		self.read()?.fetch_network(network_id)
	}

	fn create_node(&mut self, node: NodeRecord) -> Result<NodeRecord> {
		self.modify(|doc| doc.create_node(node))
	}

	fn update_node_position(&mut self, node_id: &str, x: f64, y: f64) -> Result<NodeRecord> {
		self.modify(|doc| doc.update_node_position(node_id, x, y))
	}

	fn delete_nodes(&mut self, node_ids: &[String]) -> Result<()> {
		self.modify(|doc| doc.delete_nodes(node_ids))
	}

	fn create_edge(&mut self, edge: EdgeRecord) -> Result<EdgeRecord> {
		self.modify(|doc| doc.create_edge(edge))
	}

	fn delete_edge(&mut self, edge_id: &str) -> Result<()> {
		self.modify(|doc| doc.delete_edge(edge_id))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn word(id: &str) -> WordRecord {
		WordRecord {
			id: id.into(),
			word: id.into(),
			meaning: "m".into(),
			pos: "명사".into(),
			example: None,
			created_by: Some("u1".into()),
		}
	}

	fn node(id: &str, network: &str) -> NodeRecord {
		NodeRecord {
			id: id.into(),
			network_id: network.into(),
			word_id: id.into(),
			position_x: 1.0,
			position_y: 2.0,
		}
	}

	fn edge(id: &str, s: &str, t: &str) -> EdgeRecord {
		EdgeRecord {
			id: id.into(),
			network_id: "net".into(),
			source_node_id: s.into(),
			target_node_id: t.into(),
			edge_type: None,
		}
	}

	#[test]
	fn fetch_is_scoped_to_network() {
		let mut repo = MemoryRepository::default();
		for id in ["a", "b", "c"] {
			repo.create_word(word(id)).unwrap();
		}
		repo.create_node(node("a", "net")).unwrap();
		repo.create_node(node("b", "net")).unwrap();
		repo.create_node(node("c", "other")).unwrap();
		repo.create_edge(edge("ab", "a", "b")).unwrap();

		let records = repo.fetch_network("net").unwrap().expect("network exists");
		assert_eq!(records.nodes.len(), 2);
		assert_eq!(records.words.len(), 2);
		assert_eq!(records.edges.len(), 1);
	}

	#[test]
	fn deleting_nodes_drops_their_edges() {
		let mut repo = MemoryRepository::default();
		repo.create_node(node("a", "net")).unwrap();
		repo.create_node(node("b", "net")).unwrap();
		repo.create_edge(edge("ab", "a", "b")).unwrap();
		repo.delete_nodes(&["a".to_string()]).unwrap();
		let records = repo.fetch_network("net").unwrap().expect("network exists");
		assert!(records.edges.is_empty());
	}

	#[test]
	fn created_network_survives_losing_every_node() {
		let mut repo = MemoryRepository::default();
		assert_eq!(repo.fetch_network("net").unwrap(), None);
		repo.create_network("net").unwrap();
		repo.create_network("net").unwrap();
		assert_eq!(repo.fetch_network("net").unwrap(), Some(NetworkRecords::default()));

		repo.create_node(node("a", "net")).unwrap();
		repo.delete_nodes(&["a".to_string()]).unwrap();
		let records = repo.fetch_network("net").unwrap().expect("network exists");
		assert!(records.nodes.is_empty());
		assert_eq!(repo.fetch_network("other").unwrap(), None);
	}

	#[test]
	fn missing_records_report_not_found() {
		let mut repo = MemoryRepository::default();
		assert!(matches!(
			repo.update_word(word("x")),
			Err(RepositoryError::NotFound(id)) if id == "x"
		));
		assert!(repo.update_node_position("x", 0.0, 0.0).is_err());
	}

	#[test]
	fn records_convert_to_graph_data() {
		let records = NetworkRecords {
			words: vec![word("a"), word("b")],
			nodes: vec![node("a", "net"), node("b", "net"), node("orphan", "net")],
			edges: vec![EdgeRecord {
				edge_type: Some("#10b981".into()),
				..edge("ab", "a", "b")
			}],
		};
		let data = records.into_graph_data();
		assert_eq!(data.nodes.len(), 2);
		assert_eq!(data.nodes[0].position, Point::new(1.0, 2.0));
		assert_eq!(data.edges[0].style.stroke, "#10b981");
		assert_eq!(data.edges[0].style.dash, vec![8.0, 4.0]);
	}
}
