use serde::{Deserialize, Serialize};

use super::viewport::Point;

/// Parts of speech offered by the word dialog; the first is the default.
pub const PARTS_OF_SPEECH: &[&str] = &[
	"명사", "동사", "형용사", "부사", "대명사", "전치사", "접속사", "감탄사",
];

/// User-editable text carried by a word node.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordData {
	pub word: String,
	pub meaning: String,
	#[serde(rename = "pos")]
	pub part_of_speech: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub example: Option<String>,
}

impl WordData {
	/// `word` and `meaning` must both be non-blank.
	pub fn is_valid(&self) -> bool {
		!self.word.trim().is_empty() && !self.meaning.trim().is_empty()
	}

	/// Trimmed copy; a blank example becomes `None`.
	pub fn normalized(&self) -> Self {
		Self {
			word: self.word.trim().to_string(),
			meaning: self.meaning.trim().to_string(),
			part_of_speech: self.part_of_speech.trim().to_string(),
			example: self
				.example
				.as_deref()
				.map(str::trim)
				.filter(|e| !e.is_empty())
				.map(str::to_string),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
	pub id: String,
	/// Top-left corner in canvas space.
	pub position: Point,
	pub data: WordData,
}

/// Cosmetic line attributes; never affect behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
	pub stroke: String,
	pub width: f64,
	pub dash: Vec<f64>,
}

impl Default for EdgeStyle {
	fn default() -> Self {
		Self {
			stroke: "#6366f1".into(),
			width: 2.0,
			dash: vec![8.0, 4.0],
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	#[serde(default)]
	pub style: EdgeStyle,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

impl GraphData {
	/// The bundled starter vocabulary network.
	pub fn sample() -> Self {
		serde_json::from_str(include_str!("../../../assets/sample_graph.json")).unwrap_or_else(|e| {
			log::error!("bundled sample graph is malformed: {e}");
			Self::default()
		})
	}
}

/// Chip colors for a part-of-speech badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChipStyle {
	pub background: &'static str,
	pub text: &'static str,
	pub border: &'static str,
}

pub fn pos_chip_style(pos: &str) -> ChipStyle {
	let (background, text, border) = match pos {
		"명사" => ("#dbeafe", "#1e40af", "#3b82f6"),
		"동사" => ("#dcfce7", "#15803d", "#22c55e"),
		"형용사" => ("#fef3c7", "#92400e", "#f59e0b"),
		"부사" => ("#fce7f3", "#be185d", "#ec4899"),
		"전치사" => ("#f3e8ff", "#7c3aed", "#8b5cf6"),
		"접속사" => ("#fed7d7", "#c53030", "#f56565"),
		"감탄사" => ("#e0f2fe", "#0891b2", "#06b6d4"),
		_ => ("#f1f5f9", "#475569", "#94a3b8"),
	};
	ChipStyle {
		background,
		text,
		border,
	}
}
