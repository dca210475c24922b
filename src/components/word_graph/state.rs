use std::collections::HashSet;

use log::{debug, info};

use super::config::EditorConfig;
use super::events::{CanvasEvent, EventChannel};
use super::interaction::{Commit, DraftField, Intent, InteractionController};
use super::scene::Scene;
use super::search::SearchIndex;
use super::selection::SelectionController;
use super::store::{GraphStore, Removed};
use super::types::{GraphData, GraphNode};
use super::viewport::{Point, Rect, Size, ViewTransform};
use crate::services::NetworkSync;

/// Everything the word graph canvas owns, plus the input entry points.
pub struct WordGraphState {
	pub config: EditorConfig,
	pub store: GraphStore,
	pub selection: SelectionController,
	pub interaction: InteractionController,
	pub search: SearchIndex,
	pub transform: ViewTransform,
	pub width: f64,
	pub height: f64,
	events: EventChannel,
	sync: Option<NetworkSync>,
	revision: u64,
}

impl WordGraphState {
	pub fn new(data: GraphData, width: f64, height: f64, config: EditorConfig) -> Self {
		let mut state = Self {
			store: GraphStore::default(),
			selection: SelectionController::default(),
			interaction: InteractionController::new(config.click_tolerance),
			search: SearchIndex::new(config.search_limit),
			transform: ViewTransform::default(),
			width,
			height,
			events: EventChannel::default(),
			sync: None,
			revision: 0,
			config,
		};
		state.load(data);
		state
	}

	/// Bumped on every change the side panels care about.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	pub fn viewport(&self) -> Size {
		Size {
			width: self.width,
			height: self.height,
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn scene(&self) -> Scene {
		Scene::build(&self.store, &self.selection, &self.interaction, &self.config)
	}

	/// Replace the graph and fit it into view.
	pub fn load(&mut self, data: GraphData) {
		let report = self.store.load(data);
		info!(
			"graph loaded: {} nodes, {} edges ({} nodes, {} edges skipped)",
			report.nodes, report.edges, report.skipped_nodes, report.skipped_edges
		);
		self.selection.cancel_animation();
		self.selection.clear();
		self.interaction.reset();
		self.search.clear();
		self.snap_to_fit();
		self.touched();
	}

	/// Show every node without animating, e.g. once the canvas knows its size.
	pub fn snap_to_fit(&mut self) {
		if let Some(bounds) = self.bounds() {
			self.transform = self.fit_transform(bounds);
		}
	}

	/// Mirror future mutations into `sync`. A stored network replaces the
	/// current graph, even when it holds no words; a network that was never
	/// created is seeded with the current graph.
	pub fn attach_sync(&mut self, mut sync: NetworkSync) {
		match sync.load() {
			Some(data) => self.load(data),
			None => {
				info!("seeding network {}", sync.network_id());
				sync.seed(&GraphData {
					nodes: self.store.nodes().to_vec(),
					edges: self.store.edges().to_vec(),
				});
			}
		}
		self.sync = Some(sync);
	}

	/// Input is ignored while a dialog is open or the camera is moving.
	pub fn accepts_pointer(&self) -> bool {
		!self.interaction.dialog_open() && !self.selection.is_animating()
	}

	pub fn pointer_down(&mut self, screen: Point) {
		if !self.accepts_pointer() {
			return;
		}
		let scene = self.scene();
		let intent = self.interaction.pointer_down(screen, &self.transform, &scene);
		self.apply(intent);
	}

	pub fn pointer_move(&mut self, screen: Point) {
		if self.interaction.dialog_open() {
			return;
		}
		let scene = self.scene();
		let intent = self.interaction.pointer_move(screen, &self.transform, &scene);
		self.apply(intent);
	}

	/// A release while the camera is moving only abandons the gesture.
	pub fn pointer_up(&mut self, screen: Point) {
		if self.selection.is_animating() {
			self.interaction.pointer_leave();
			return;
		}
		let scene = self.scene();
		let intent = self.interaction.pointer_up(screen, &self.transform, &scene);
		self.apply(intent);
	}

	pub fn pointer_leave(&mut self) {
		self.interaction.pointer_leave();
	}

	/// Wheel zoom anchored at the pointer; `delta_y > 0` zooms out.
	pub fn wheel(&mut self, screen: Point, delta_y: f64) {
		if !self.accepts_pointer() {
			return;
		}
		let factor = if delta_y > 0.0 {
			1.0 / self.config.wheel_factor
		} else {
			self.config.wheel_factor
		};
		self.transform = self
			.transform
			.zoomed_at(screen, factor, self.config.zoom_range);
	}

	/// `Escape` discards an open dialog or connection drag.
	pub fn key_down(&mut self, key: &str) {
		if key == "Escape" {
			self.cancel_dialog();
		}
	}

	pub fn zoom_in(&mut self) {
		self.step_zoom(self.config.zoom_step);
	}

	pub fn zoom_out(&mut self) {
		self.step_zoom(-self.config.zoom_step);
	}

	fn step_zoom(&mut self, step: f64) {
		if self.selection.is_animating() {
			return;
		}
		let k = self.transform.k + step;
		self.transform = self
			.transform
			.zoomed_to(k, self.viewport(), self.config.zoom_range);
	}

	/// Clear the node selection and animate to show every node.
	pub fn fit_view(&mut self) {
		if self.selection.is_animating() {
			return;
		}
		if self.selection.selected_node().is_some() {
			self.selection.clear();
			self.touched();
		}
		self.animate_fit(self.config.reset_fit_duration_ms);
	}

	pub fn dispatch(&mut self, event: CanvasEvent) {
		self.events.publish(event);
		while let Some(event) = self.events.next() {
			self.handle(event);
		}
	}

	fn apply(&mut self, intent: Intent) {
		match intent {
			Intent::None => {}
			Intent::Pan(view) => self.transform = view,
			Intent::CanvasClick(p) => self.canvas_click(p),
			Intent::NodeClick(node_id) => {
				if let Some(node) = self.store.node(&node_id) {
					let data = node.data.clone();
					self.dispatch(CanvasEvent::NodeSelect { node_id, data });
				}
			}
			Intent::EdgeClick(edge_id) => self.dispatch(CanvasEvent::EdgeSelect { edge_id }),
			Intent::DeleteEdge(edge_id) => self.dispatch(CanvasEvent::EdgeDelete { edge_id }),
			Intent::Connect { source, target } => self.connect(&source, &target),
		}
	}

	fn handle(&mut self, event: CanvasEvent) {
		match event {
			CanvasEvent::NodeSelect { node_id, .. } => self.toggle_node(&node_id),
			CanvasEvent::NodeEdit { node_id, .. } => {
				let Some(node) = self.store.node(&node_id) else {
					debug!("edit for stale node {node_id}");
					return;
				};
				let data = node.data.clone();
				if self.interaction.open_edit(&node_id, &data) {
					self.touched();
				}
			}
			CanvasEvent::NodeDelete { node_id } => {
				let removed = self.store.delete_node(&node_id);
				self.removed(removed);
			}
			CanvasEvent::EdgeSelect { edge_id } => {
				if self.store.edge(&edge_id).is_some() {
					self.selection.select_edge(&edge_id);
					self.touched();
				}
			}
			CanvasEvent::EdgeDelete { edge_id } => {
				if let Some(edge) = self.store.delete_edge(&edge_id) {
					info!("edge {} deleted", edge.id);
					self.selection.forget([&edge.id]);
					if let Some(sync) = &mut self.sync {
						sync.edge_deleted(&edge.id);
					}
					self.touched();
				}
			}
		}
	}

	/// Node click: select and center, or deselect and fit when already selected.
	fn toggle_node(&mut self, node_id: &str) {
		if self.selection.is_animating() {
			debug!("click on {node_id} dropped during animation");
			return;
		}
		if self.selection.selected_node() == Some(node_id) {
			self.selection.clear();
			self.animate_fit(self.config.deselect_fit_duration_ms);
			self.touched();
			return;
		}
		if self.focus_node(node_id, self.config.select_zoom) {
			self.touched();
		}
	}

	fn focus_node(&mut self, node_id: &str, zoom: f64) -> bool {
		let Some(center) = self.node_center(node_id) else {
			debug!("focus on stale node {node_id}");
			return false;
		};
		self.selection.select_node(node_id);
		let to = ViewTransform::centered_on(center, zoom, self.viewport(), self.config.zoom_range);
		self.selection
			.animate(self.transform, to, self.config.center_duration_ms);
		true
	}

	fn animate_fit(&mut self, duration_ms: f64) {
		if let Some(bounds) = self.bounds() {
			let to = self.fit_transform(bounds);
			self.selection.animate(self.transform, to, duration_ms);
		}
	}

	fn canvas_click(&mut self, p: Point) {
		if self.selection.has_selection() {
			self.selection.clear();
		} else {
			self.interaction.open_placement(p);
		}
		self.touched();
	}

	fn connect(&mut self, source: &str, target: &str) {
		if let Some(edge) = self
			.store
			.add_edge(source, target, self.config.edge_style.clone())
		{
			info!("edge {} created: {source} -> {target}", edge.id);
			if let Some(sync) = &mut self.sync {
				sync.edge_created(&edge);
			}
			self.touched();
		}
	}

	pub fn edit_draft(&mut self, field: DraftField, value: &str) {
		self.interaction.edit_draft(field, value);
	}

	pub fn confirm_dialog(&mut self) {
		let Some(commit) = self.interaction.confirm() else {
			return;
		};
		match commit {
			Commit::Create { position, data } => {
				if let Some(node) = self.store.add_node(data, position) {
					info!("node {} created at ({}, {})", node.id, position.x, position.y);
					if let Some(sync) = &mut self.sync {
						sync.node_created(&node);
					}
				}
			}
			Commit::Update { node_id, data } => {
				if let Some(node) = self.store.update_node(&node_id, data) {
					let node = node.clone();
					if let Some(sync) = &mut self.sync {
						sync.node_updated(&node);
					}
				}
			}
		}
		self.touched();
	}

	pub fn cancel_dialog(&mut self) {
		if self.interaction.cancel() {
			self.touched();
		}
	}

	pub fn set_search_query(&mut self, query: &str) {
		self.search.set_query(query, &self.store);
		self.touched();
	}

	/// Select and center a node picked from search or the node list, then
	/// clear the query. Dropped while the camera is moving.
	pub fn pick_node(&mut self, node_id: &str) {
		if self.selection.is_animating() {
			return;
		}
		if self.focus_node(node_id, self.config.search_zoom) {
			self.search.clear();
			self.touched();
		}
	}

	/// `Enter` in the search box.
	pub fn pick_first_result(&mut self) {
		if let Some(first) = self.search.results().first() {
			let id = first.node.id.clone();
			self.pick_node(&id);
		}
	}

	pub fn toggle_checked(&mut self, node_id: &str) {
		self.interaction.toggle_checked(node_id);
		self.touched();
	}

	pub fn delete_checked(&mut self) {
		let checked = self.interaction.take_checked();
		if checked.is_empty() {
			return;
		}
		let removed = self.store.delete_nodes(&checked);
		self.removed(removed);
	}

	fn removed(&mut self, removed: Removed) {
		if removed.is_empty() {
			return;
		}
		info!(
			"deleted {} nodes and {} edges",
			removed.nodes.len(),
			removed.edges.len()
		);
		self.selection
			.forget(removed.nodes.iter().chain(removed.edges.iter()));
		self.interaction.forget_nodes(&removed.nodes);
		if let Some(sync) = &mut self.sync {
			sync.nodes_deleted(&removed.nodes);
		}
		self.touched();
	}

	/// Advance animations by one frame.
	pub fn tick(&mut self, dt_ms: f64) {
		if let Some(view) = self.selection.tick(dt_ms) {
			self.transform = view;
		}
	}

	pub fn node_center(&self, node_id: &str) -> Option<Point> {
		self.store
			.node(node_id)
			.map(|n| Rect::new(n.position, self.config.node_size).center())
	}

	pub fn selected_node(&self) -> Option<&GraphNode> {
		self.selection
			.selected_node()
			.and_then(|id| self.store.node(id))
	}

	pub fn checked(&self) -> &HashSet<String> {
		self.interaction.checked()
	}

	fn bounds(&self) -> Option<Rect> {
		self.store.bounds(self.config.node_size)
	}

	fn fit_transform(&self, bounds: Rect) -> ViewTransform {
		ViewTransform::fitting(
			bounds,
			self.viewport(),
			self.config.fit_padding,
			self.config.zoom_range,
		)
	}

	fn touched(&mut self) {
		self.revision += 1;
		self.search.refresh(&self.store);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::word_graph::types::{EdgeStyle, GraphEdge, WordData};
	use crate::services::repository::MemoryRepository;
	use crate::services::sync::tests::Offline;

	fn word(w: &str) -> WordData {
		WordData {
			word: w.into(),
			meaning: format!("{w}!"),
			part_of_speech: "명사".into(),
			example: None,
		}
	}

	fn node(id: &str, x: f64, y: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			position: Point::new(x, y),
			data: word(id),
		}
	}

	/// Nodes 1 and 2 joined by edge E, identity view.
	fn pair() -> WordGraphState {
		let mut state = WordGraphState::new(
			GraphData {
				nodes: vec![node("1", 0.0, 0.0), node("2", 400.0, 0.0)],
				edges: vec![GraphEdge {
					id: "E".into(),
					source: "1".into(),
					target: "2".into(),
					style: EdgeStyle::default(),
				}],
			},
			800.0,
			600.0,
			EditorConfig::default(),
		);
		state.transform = ViewTransform::default();
		state
	}

	fn click(state: &mut WordGraphState, x: f64, y: f64) {
		state.pointer_down(Point::new(x, y));
		state.pointer_up(Point::new(x, y));
	}

	fn settle(state: &mut WordGraphState) {
		for _ in 0..100 {
			state.tick(16.0);
		}
		assert!(!state.selection.is_animating());
	}

	#[test]
	fn placing_a_word_at_the_clicked_point() {
		let mut state = WordGraphState::new(GraphData::default(), 800.0, 600.0, EditorConfig::default());
		state.transform = ViewTransform::default();
		click(&mut state, 300.0, 200.0);
		assert_eq!(state.interaction.marker(), Some(Point::new(300.0, 200.0)));

		state.edit_draft(DraftField::Word, "run");
		state.edit_draft(DraftField::Meaning, "달리다");
		state.confirm_dialog();

		assert!(state.interaction.is_idle());
		assert_eq!(state.store.nodes().len(), 1);
		let created = &state.store.nodes()[0];
		assert_eq!(created.position, Point::new(300.0, 200.0));
		assert_eq!(created.data.word, "run");
		assert_eq!(created.data.meaning, "달리다");
		assert!(state.store.edges().is_empty());
	}

	#[test]
	fn placement_respects_pan_and_zoom() {
		let mut state = WordGraphState::new(GraphData::default(), 800.0, 600.0, EditorConfig::default());
		state.transform = ViewTransform {
			x: -100.0,
			y: 50.0,
			k: 0.5,
		};
		click(&mut state, 50.0, 150.0);
		assert_eq!(state.interaction.marker(), Some(Point::new(300.0, 200.0)));
	}

	#[test]
	fn cancelling_the_dialog_mutates_nothing() {
		let mut state = pair();
		click(&mut state, 300.0, 300.0);
		state.edit_draft(DraftField::Word, "x");
		state.edit_draft(DraftField::Meaning, "y");
		state.key_down("Escape");
		assert!(state.interaction.is_idle());
		assert_eq!(state.store.nodes().len(), 2);
	}

	#[test]
	fn node_click_selects_and_centers_then_toggles_off() {
		let mut state = pair();
		click(&mut state, 20.0, 20.0);
		assert_eq!(state.selection.selected_node(), Some("1"));
		assert!(state.selection.is_animating());

		// Dropped: camera still moving.
		click(&mut state, 420.0, 20.0);
		assert_eq!(state.selection.selected_node(), Some("1"));

		settle(&mut state);
		let center = state.transform.canvas_to_screen(Point::new(80.0, 40.0));
		assert!((center.x - 400.0).abs() < 1e-6 && (center.y - 300.0).abs() < 1e-6);
		assert!((state.transform.k - 1.2).abs() < 1e-9);

		let screen = state.transform.canvas_to_screen(Point::new(20.0, 20.0));
		click(&mut state, screen.x, screen.y);
		assert_eq!(state.selection.selected_node(), None);
		assert!(state.selection.is_animating());
	}

	#[test]
	fn canvas_click_with_selection_only_deselects() {
		let mut state = pair();
		click(&mut state, 280.0, 40.0);
		assert_eq!(state.selection.selected_edge(), Some("E"));
		click(&mut state, 300.0, 400.0);
		assert_eq!(state.selection.selected_edge(), None);
		assert!(!state.interaction.dialog_open());
		click(&mut state, 300.0, 400.0);
		assert!(state.interaction.dialog_open());
	}

	#[test]
	fn edge_selection_replaces_node_selection() {
		let mut state = pair();
		click(&mut state, 20.0, 20.0);
		settle(&mut state);
		state.dispatch(CanvasEvent::EdgeSelect {
			edge_id: "E".into(),
		});
		assert_eq!(state.selection.selected_node(), None);
		assert_eq!(state.selection.selected_edge(), Some("E"));
	}

	#[test]
	fn selected_edge_delete_affordance() {
		let mut state = pair();
		click(&mut state, 280.0, 40.0);
		click(&mut state, 280.0, 40.0);
		assert!(state.store.edges().is_empty());
		assert_eq!(state.selection.selected_edge(), None);
	}

	#[test]
	fn dragging_between_connectors_creates_one_edge() {
		let mut state = pair();
		state.dispatch(CanvasEvent::EdgeDelete {
			edge_id: "E".into(),
		});
		for _ in 0..2 {
			state.pointer_down(Point::new(480.0, 80.0));
			state.pointer_move(Point::new(90.0, 45.0));
			state.pointer_up(Point::new(90.0, 45.0));
		}
		assert!(state.interaction.is_idle());
		assert_eq!(state.store.edges().len(), 1);
		assert_eq!(state.store.edges()[0].source, "2");
		assert_eq!(state.store.edges()[0].target, "1");
	}

	#[test]
	fn deleting_a_node_cascades_and_clears_selection() {
		let mut state = pair();
		click(&mut state, 20.0, 20.0);
		settle(&mut state);
		state.dispatch(CanvasEvent::NodeDelete {
			node_id: "1".into(),
		});
		assert!(state.store.node("1").is_none());
		assert!(state.store.edges().is_empty());
		assert!(state.store.node("2").is_some());
		assert!(!state.selection.has_selection());

		// Stale events are ignored.
		state.dispatch(CanvasEvent::NodeDelete {
			node_id: "1".into(),
		});
		state.dispatch(CanvasEvent::NodeSelect {
			node_id: "1".into(),
			data: word("1"),
		});
		state.dispatch(CanvasEvent::EdgeSelect {
			edge_id: "E".into(),
		});
		assert!(!state.selection.has_selection());
	}

	#[test]
	fn edit_event_opens_prefilled_dialog() {
		let mut state = pair();
		state.dispatch(CanvasEvent::NodeEdit {
			node_id: "2".into(),
			data: word("2"),
		});
		assert_eq!(state.interaction.editing(), Some("2"));
		state.edit_draft(DraftField::Meaning, "둘");
		state.confirm_dialog();
		let node = state.store.node("2").unwrap();
		assert_eq!(node.data.meaning, "둘");
		assert_eq!(node.position, Point::new(400.0, 0.0));
	}

	#[test]
	fn checked_batch_delete() {
		let mut state = pair();
		state.dispatch(CanvasEvent::EdgeSelect {
			edge_id: "E".into(),
		});
		state.toggle_checked("1");
		state.toggle_checked("2");
		assert_eq!(state.selection.selected_edge(), Some("E"));
		state.delete_checked();
		assert!(state.store.nodes().is_empty());
		assert!(state.store.edges().is_empty());
		assert!(!state.selection.has_selection());
		assert!(state.checked().is_empty());
	}

	#[test]
	fn search_pick_centers_and_clears_query() {
		let mut state = pair();
		state.set_search_query("2");
		assert_eq!(state.search.results().len(), 1);
		state.pick_first_result();
		assert_eq!(state.selection.selected_node(), Some("2"));
		assert_eq!(state.search.query(), "");
		settle(&mut state);
		assert!((state.transform.k - 1.5).abs() < 1e-9);
	}

	#[test]
	fn search_results_follow_graph_changes() {
		let mut state = pair();
		state.set_search_query("1");
		state.dispatch(CanvasEvent::NodeDelete {
			node_id: "1".into(),
		});
		assert!(state.search.results().is_empty());
	}

	#[test]
	fn wheel_zoom_is_clamped() {
		let mut state = pair();
		for _ in 0..100 {
			state.wheel(Point::new(100.0, 100.0), -1.0);
		}
		assert_eq!(state.transform.k, 3.0);
		for _ in 0..100 {
			state.wheel(Point::new(100.0, 100.0), 1.0);
		}
		assert!((state.transform.k - 0.1).abs() < 1e-9);
	}

	#[test]
	fn fit_view_deselects_and_is_guarded() {
		let mut state = pair();
		click(&mut state, 20.0, 20.0);
		settle(&mut state);
		state.fit_view();
		assert!(!state.selection.has_selection());
		assert!(state.selection.is_animating());
		settle(&mut state);
		let bounds = state.store.bounds(state.config.node_size).unwrap();
		let tl = state.transform.canvas_to_screen(Point::new(bounds.x, bounds.y));
		assert!(tl.x >= 0.0 && tl.y >= 0.0);
	}

	#[test]
	fn sync_mirrors_mutations_and_reloads() {
		let mut state = pair();
		state.attach_sync(NetworkSync::new(Box::new(MemoryRepository::default()), "net", None));
		state.dispatch(CanvasEvent::NodeDelete {
			node_id: "2".into(),
		});
		let mut sync = state.sync.take().unwrap();
		let stored = sync.load().unwrap();
		assert_eq!(stored.nodes.len(), 1);
		assert!(stored.edges.is_empty());

		sync.node_created(&node("3", 10.0, 10.0));
		let mut fresh = pair();
		fresh.attach_sync(sync);
		assert_eq!(fresh.store.nodes().len(), 2);
		assert!(fresh.store.node("2").is_none());
	}

	#[test]
	fn cleared_network_is_not_reseeded() {
		let mut state = pair();
		state.attach_sync(NetworkSync::new(Box::new(MemoryRepository::default()), "net", None));
		assert_eq!(state.store.nodes().len(), 2);
		state.toggle_checked("1");
		state.toggle_checked("2");
		state.delete_checked();

		let sync = state.sync.take().unwrap();
		let mut next_session = pair();
		next_session.attach_sync(sync);
		assert_eq!(next_session.store.nodes().len(), 0);
		assert!(next_session.store.edges().is_empty());
	}

	#[test]
	fn load_cancels_camera_move_and_clears_state() {
		let mut state = pair();
		state.set_search_query("1");
		click(&mut state, 20.0, 20.0);
		assert!(state.selection.is_animating());

		state.load(GraphData {
			nodes: vec![node("1", 0.0, 0.0)],
			edges: vec![],
		});
		assert!(!state.selection.is_animating());
		assert!(!state.selection.has_selection());
		assert_eq!(state.search.query(), "");
		assert!(state.search.results().is_empty());

		let settled = state.transform;
		state.tick(400.0);
		assert_eq!(state.transform, settled);
	}

	#[test]
	fn zoom_buttons_step_around_viewport_center() {
		let mut state = pair();
		let center = Point::new(400.0, 300.0);
		let under_center = state.transform.screen_to_canvas(center);

		state.zoom_in();
		assert!((state.transform.k - 1.1).abs() < 1e-9);
		let p = state.transform.canvas_to_screen(under_center);
		assert!((p.x - center.x).abs() < 1e-9 && (p.y - center.y).abs() < 1e-9);

		state.zoom_out();
		assert!((state.transform.k - 1.0).abs() < 1e-9);

		for _ in 0..50 {
			state.zoom_in();
		}
		assert_eq!(state.transform.k, 3.0);
		for _ in 0..50 {
			state.zoom_out();
		}
		assert!((state.transform.k - 0.1).abs() < 1e-9);
	}

	#[test]
	fn zoom_buttons_wait_for_camera() {
		let mut state = pair();
		click(&mut state, 20.0, 20.0);
		let before = state.transform;
		state.zoom_in();
		state.zoom_out();
		assert_eq!(state.transform, before);
	}

	#[test]
	fn release_during_camera_move_keeps_picked_selection() {
		let mut state = pair();
		state.pointer_down(Point::new(300.0, 400.0));
		state.set_search_query("2");
		state.pick_first_result();
		assert!(state.selection.is_animating());

		state.pointer_up(Point::new(300.0, 400.0));
		assert_eq!(state.selection.selected_node(), Some("2"));
		assert!(!state.interaction.dialog_open());

		settle(&mut state);
		click(&mut state, 5.0, 500.0);
		assert_eq!(state.selection.selected_node(), None);
	}

	#[test]
	fn offline_storage_never_blocks_editing() {
		let mut state = pair();
		state.attach_sync(NetworkSync::new(Box::new(Offline), "net", None));
		state.dispatch(CanvasEvent::NodeDelete {
			node_id: "1".into(),
		});
		assert_eq!(state.store.nodes().len(), 1);
	}
}
