//! Read-only projection of editor state into drawable, hit-testable shapes.
//!
//! Everything here is in canvas space; callers convert pointer positions
//! with the live [`ViewTransform`](super::viewport::ViewTransform) first.

use super::config::EditorConfig;
use super::interaction::InteractionController;
use super::selection::SelectionController;
use super::store::GraphStore;
use super::types::EdgeStyle;
use super::viewport::{Point, Rect};

/// What lies under a canvas point, highest priority first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hit {
	/// Delete affordance of the selected edge.
	EdgeDelete(String),
	/// Outgoing connector of a node.
	SourceConnector(String),
	Node(String),
	Edge(String),
	Canvas,
}

pub trait HitTest {
	fn hit(&self, p: Point) -> Hit;
	/// Node whose incoming connector contains `p`.
	fn incoming_connector_at(&self, p: Point) -> Option<String>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeSprite {
	pub id: String,
	pub rect: Rect,
	pub word: String,
	pub meaning: String,
	pub selected: bool,
	pub hovered: bool,
}

impl NodeSprite {
	/// Bottom-center attachment point where edge drags start.
	pub fn source_connector(&self) -> Point {
		Point::new(self.rect.center().x, self.rect.y + self.rect.height)
	}

	pub fn target_connector(&self, half: f64) -> Rect {
		let c = self.rect.center();
		Rect {
			x: c.x - half,
			y: c.y - half,
			width: half * 2.0,
			height: half * 2.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeSprite {
	pub id: String,
	pub from: Point,
	pub to: Point,
	pub style: EdgeStyle,
	pub selected: bool,
}

impl EdgeSprite {
	pub fn midpoint(&self) -> Point {
		self.from.midpoint(self.to)
	}
}

#[derive(Clone, Debug)]
pub struct Scene {
	pub nodes: Vec<NodeSprite>,
	pub edges: Vec<EdgeSprite>,
	/// Pending placement marker.
	pub marker: Option<Point>,
	/// In-progress connection drag, connector to pointer.
	pub preview: Option<(Point, Point)>,
	source_radius: f64,
	target_half: f64,
	edge_hit_width: f64,
	delete_radius: f64,
}

impl Scene {
	pub fn build(
		store: &GraphStore,
		selection: &SelectionController,
		interaction: &InteractionController,
		config: &EditorConfig,
	) -> Self {
		let nodes: Vec<NodeSprite> = store
			.nodes()
			.iter()
			.map(|n| NodeSprite {
				id: n.id.clone(),
				rect: Rect::new(n.position, config.node_size),
				word: n.data.word.clone(),
				meaning: n.data.meaning.clone(),
				selected: selection.selected_node() == Some(n.id.as_str()),
				hovered: interaction.hovered() == Some(n.id.as_str()),
			})
			.collect();

		let center_of = |id: &str| nodes.iter().find(|n| n.id == id).map(|n| n.rect.center());
		let edges = store
			.edges()
			.iter()
			.filter_map(|e| {
				Some(EdgeSprite {
					id: e.id.clone(),
					from: center_of(&e.source)?,
					to: center_of(&e.target)?,
					style: e.style.clone(),
					selected: selection.selected_edge() == Some(e.id.as_str()),
				})
			})
			.collect();

		let preview = interaction.connecting().and_then(|(source, cursor)| {
			let node = nodes.iter().find(|n| n.id == source)?;
			Some((node.source_connector(), cursor))
		});

		Self {
			edges,
			marker: interaction.marker(),
			preview,
			nodes,
			source_radius: config.source_connector_radius,
			target_half: config.target_connector_half,
			edge_hit_width: config.edge_hit_width,
			delete_radius: config.edge_delete_radius,
		}
	}

	pub fn target_half(&self) -> f64 {
		self.target_half
	}

	pub fn source_radius(&self) -> f64 {
		self.source_radius
	}

	pub fn delete_radius(&self) -> f64 {
		self.delete_radius
	}
}

impl HitTest for Scene {
	fn hit(&self, p: Point) -> Hit {
		if let Some(edge) = self.edges.iter().find(|e| e.selected) {
			if edge.midpoint().distance(p) <= self.delete_radius {
				return Hit::EdgeDelete(edge.id.clone());
			}
		}
		// Later nodes are drawn on top, so search back to front.
		if let Some(node) = self
			.nodes
			.iter()
			.rev()
			.find(|n| n.source_connector().distance(p) <= self.source_radius)
		{
			return Hit::SourceConnector(node.id.clone());
		}
		if let Some(node) = self.nodes.iter().rev().find(|n| n.rect.contains(p)) {
			return Hit::Node(node.id.clone());
		}
		if let Some(edge) = self
			.edges
			.iter()
			.rev()
			.find(|e| segment_distance(p, e.from, e.to) <= self.edge_hit_width)
		{
			return Hit::Edge(edge.id.clone());
		}
		Hit::Canvas
	}

	fn incoming_connector_at(&self, p: Point) -> Option<String> {
		self.nodes
			.iter()
			.rev()
			.find(|n| n.target_connector(self.target_half).contains(p))
			.map(|n| n.id.clone())
	}
}

/// Shortest distance from `p` to the segment `a`–`b`.
pub fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
	let (dx, dy) = (b.x - a.x, b.y - a.y);
	let len2 = dx * dx + dy * dy;
	if len2 < f64::EPSILON {
		return p.distance(a);
	}
	let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
	p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}
