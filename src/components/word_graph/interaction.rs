//! Pointer and dialog state machine for the canvas surface.
//!
//! The controller turns raw screen-space input into [`Intent`]s. It never
//! mutates the graph itself; the owning state applies intents to the store
//! and the selection controller.

use std::collections::HashSet;

use log::debug;

use super::scene::{Hit, HitTest};
use super::types::{PARTS_OF_SPEECH, WordData};
use super::viewport::{Point, ViewTransform};

/// Editable copy of a word's fields while the dialog is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordDraft {
	pub word: String,
	pub meaning: String,
	pub part_of_speech: String,
	pub example: String,
}

impl Default for WordDraft {
	fn default() -> Self {
		Self {
			word: String::new(),
			meaning: String::new(),
			part_of_speech: PARTS_OF_SPEECH[0].to_string(),
			example: String::new(),
		}
	}
}

impl WordDraft {
	pub fn from_data(data: &WordData) -> Self {
		Self {
			word: data.word.clone(),
			meaning: data.meaning.clone(),
			part_of_speech: data.part_of_speech.clone(),
			example: data.example.clone().unwrap_or_default(),
		}
	}

	pub fn to_data(&self) -> WordData {
		WordData {
			word: self.word.clone(),
			meaning: self.meaning.clone(),
			part_of_speech: self.part_of_speech.clone(),
			example: Some(self.example.clone()),
		}
		.normalized()
	}

	pub fn is_valid(&self) -> bool {
		self.to_data().is_valid()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
	Word,
	Meaning,
	PartOfSpeech,
	Example,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Mode {
	#[default]
	Idle,
	/// Creation dialog open for a marker at `position` (canvas space).
	Placing { position: Point, draft: WordDraft },
	/// Edit dialog open for an existing node.
	Editing { node_id: String, draft: WordDraft },
	/// Dragging from `source`'s outgoing connector; `cursor` is canvas space.
	Connecting { source: String, cursor: Point },
}

/// A confirmed dialog.
#[derive(Clone, Debug, PartialEq)]
pub enum Commit {
	Create { position: Point, data: WordData },
	Update { node_id: String, data: WordData },
}

/// What the owner should do in response to an input event.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Intent {
	#[default]
	None,
	Pan(ViewTransform),
	CanvasClick(Point),
	NodeClick(String),
	EdgeClick(String),
	DeleteEdge(String),
	Connect { source: String, target: String },
}

#[derive(Clone, Debug, PartialEq)]
enum Press {
	Node(String),
	Edge(String),
	Canvas,
}

#[derive(Clone, Debug)]
struct Gesture {
	press: Press,
	origin: Point,
	view_start: ViewTransform,
}

/// A press/release pair is a click when the pointer moved at most `tolerance` pixels.
pub fn is_click(press: Point, release: Point, tolerance: f64) -> bool {
	press.distance(release) <= tolerance
}

#[derive(Clone, Debug)]
pub struct InteractionController {
	mode: Mode,
	gesture: Option<Gesture>,
	hovered: Option<String>,
	checked: HashSet<String>,
	click_tolerance: f64,
}

impl Default for InteractionController {
	fn default() -> Self {
		Self::new(5.0)
	}
}

impl InteractionController {
	pub fn new(click_tolerance: f64) -> Self {
		Self {
			mode: Mode::Idle,
			gesture: None,
			hovered: None,
			checked: HashSet::new(),
			click_tolerance,
		}
	}

	pub fn is_idle(&self) -> bool {
		self.mode == Mode::Idle
	}

	pub fn dialog_open(&self) -> bool {
		matches!(self.mode, Mode::Placing { .. } | Mode::Editing { .. })
	}

	pub fn draft(&self) -> Option<&WordDraft> {
		match &self.mode {
			Mode::Placing { draft, .. } | Mode::Editing { draft, .. } => Some(draft),
			_ => None,
		}
	}

	pub fn editing(&self) -> Option<&str> {
		match &self.mode {
			Mode::Editing { node_id, .. } => Some(node_id),
			_ => None,
		}
	}

	pub fn marker(&self) -> Option<Point> {
		match self.mode {
			Mode::Placing { position, .. } => Some(position),
			_ => None,
		}
	}

	pub fn connecting(&self) -> Option<(&str, Point)> {
		match &self.mode {
			Mode::Connecting { source, cursor } => Some((source, *cursor)),
			_ => None,
		}
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	pub fn pointer_down(&mut self, screen: Point, view: &ViewTransform, scene: &impl HitTest) -> Intent {
		if !self.is_idle() {
			return Intent::None;
		}
		let p = view.screen_to_canvas(screen);
		let press = match scene.hit(p) {
			Hit::EdgeDelete(id) => return Intent::DeleteEdge(id),
			Hit::SourceConnector(source) => {
				debug!("connecting from {source}");
				self.mode = Mode::Connecting { source, cursor: p };
				return Intent::None;
			}
			Hit::Node(id) => Press::Node(id),
			Hit::Edge(id) => Press::Edge(id),
			Hit::Canvas => Press::Canvas,
		};
		self.gesture = Some(Gesture {
			press,
			origin: screen,
			view_start: *view,
		});
		Intent::None
	}

	pub fn pointer_move(&mut self, screen: Point, view: &ViewTransform, scene: &impl HitTest) -> Intent {
		let p = view.screen_to_canvas(screen);
		if let Mode::Connecting { cursor, .. } = &mut self.mode {
			*cursor = p;
			return Intent::None;
		}
		if !self.is_idle() {
			return Intent::None;
		}
		self.hovered = match scene.hit(p) {
			Hit::Node(id) | Hit::SourceConnector(id) => Some(id),
			_ => None,
		};
		match &self.gesture {
			Some(Gesture {
				press: Press::Canvas,
				origin,
				view_start,
			}) => Intent::Pan(view_start.panned(screen.x - origin.x, screen.y - origin.y)),
			_ => Intent::None,
		}
	}

	pub fn pointer_up(&mut self, screen: Point, view: &ViewTransform, scene: &impl HitTest) -> Intent {
		let p = view.screen_to_canvas(screen);
		if let Mode::Connecting { source, .. } = &self.mode {
			let source = source.clone();
			self.mode = Mode::Idle;
			return match scene.incoming_connector_at(p) {
				Some(target) if target != source => Intent::Connect { source, target },
				_ => {
					debug!("connection from {source} released on nothing");
					Intent::None
				}
			};
		}
		let Some(gesture) = self.gesture.take() else {
			return Intent::None;
		};
		if !is_click(gesture.origin, screen, self.click_tolerance) {
			return Intent::None;
		}
		match gesture.press {
			Press::Node(id) => Intent::NodeClick(id),
			Press::Edge(id) => Intent::EdgeClick(id),
			Press::Canvas => Intent::CanvasClick(p),
		}
	}

	/// Pointer left the surface: abandon any gesture in progress.
	pub fn pointer_leave(&mut self) {
		self.gesture = None;
		self.hovered = None;
		if matches!(self.mode, Mode::Connecting { .. }) {
			self.mode = Mode::Idle;
		}
	}

	pub fn open_placement(&mut self, position: Point) -> bool {
		if !self.is_idle() {
			return false;
		}
		self.gesture = None;
		self.mode = Mode::Placing {
			position,
			draft: WordDraft::default(),
		};
		true
	}

	pub fn open_edit(&mut self, node_id: &str, data: &WordData) -> bool {
		if !self.is_idle() {
			return false;
		}
		self.gesture = None;
		self.mode = Mode::Editing {
			node_id: node_id.to_string(),
			draft: WordDraft::from_data(data),
		};
		true
	}

	pub fn edit_draft(&mut self, field: DraftField, value: &str) {
		let draft = match &mut self.mode {
			Mode::Placing { draft, .. } | Mode::Editing { draft, .. } => draft,
			_ => return,
		};
		let slot = match field {
			DraftField::Word => &mut draft.word,
			DraftField::Meaning => &mut draft.meaning,
			DraftField::PartOfSpeech => &mut draft.part_of_speech,
			DraftField::Example => &mut draft.example,
		};
		*slot = value.to_string();
	}

	/// Close a valid dialog and hand back what to apply. An invalid draft
	/// keeps the dialog open.
	pub fn confirm(&mut self) -> Option<Commit> {
		if !self.draft().is_some_and(WordDraft::is_valid) {
			return None;
		}
		match std::mem::take(&mut self.mode) {
			Mode::Placing { position, draft } => Some(Commit::Create {
				position,
				data: draft.to_data(),
			}),
			Mode::Editing { node_id, draft } => Some(Commit::Update {
				node_id,
				data: draft.to_data(),
			}),
			other => {
				self.mode = other;
				None
			}
		}
	}

	/// Discard an open dialog or connection drag.
	pub fn cancel(&mut self) -> bool {
		if self.is_idle() {
			return false;
		}
		self.mode = Mode::Idle;
		true
	}

	pub fn checked(&self) -> &HashSet<String> {
		&self.checked
	}

	pub fn is_checked(&self, id: &str) -> bool {
		self.checked.contains(id)
	}

	/// Returns whether `id` is checked afterwards.
	pub fn toggle_checked(&mut self, id: &str) -> bool {
		if self.checked.remove(id) {
			false
		} else {
			self.checked.insert(id.to_string());
			true
		}
	}

	pub fn take_checked(&mut self) -> HashSet<String> {
		std::mem::take(&mut self.checked)
	}

	/// Drop references to nodes that no longer exist.
	pub fn forget_nodes(&mut self, removed: &[String]) {
		for id in removed {
			self.checked.remove(id);
			if self.hovered.as_ref() == Some(id) {
				self.hovered = None;
			}
		}
		let stale = match &self.mode {
			Mode::Editing { node_id, .. } => removed.contains(node_id),
			Mode::Connecting { source, .. } => removed.contains(source),
			_ => false,
		};
		if stale {
			self.mode = Mode::Idle;
		}
	}

	/// Return to idle with nothing checked, hovered or pressed.
	pub fn reset(&mut self) {
		self.mode = Mode::Idle;
		self.gesture = None;
		self.hovered = None;
		self.checked.clear();
	}
}
