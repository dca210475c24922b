//! Single-item selection and guarded camera animations.
//!
//! Selection is an enum so a node and an edge can never be selected at
//! the same time. Camera moves run on the frame clock; the "animating"
//! guard is a task in a [`Scheduler`] whose handle is kept here, so a
//! cancelled or superseded timer can never clear a newer guard.

use log::debug;

use super::viewport::ViewTransform;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
	#[default]
	None,
	Node(String),
	Edge(String),
}

/// Handle to a task in a [`Scheduler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Clone, Debug)]
struct ScheduledTask {
	handle: TaskHandle,
	remaining_ms: f64,
}

/// Delayed one-shot tasks driven by [`Scheduler::advance`].
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
	next: u64,
	tasks: Vec<ScheduledTask>,
}

impl Scheduler {
	pub fn schedule(&mut self, delay_ms: f64) -> TaskHandle {
		self.next += 1;
		let handle = TaskHandle(self.next);
		self.tasks.push(ScheduledTask {
			handle,
			remaining_ms: delay_ms.max(0.0),
		});
		handle
	}

	/// Returns false when the task already fired or was cancelled.
	pub fn cancel(&mut self, handle: TaskHandle) -> bool {
		let before = self.tasks.len();
		self.tasks.retain(|t| t.handle != handle);
		self.tasks.len() != before
	}

	/// Advance the clock and return the tasks that came due, in schedule order.
	pub fn advance(&mut self, dt_ms: f64) -> Vec<TaskHandle> {
		let mut fired = Vec::new();
		self.tasks.retain_mut(|t| {
			t.remaining_ms -= dt_ms;
			if t.remaining_ms <= 0.0 {
				fired.push(t.handle);
				false
			} else {
				true
			}
		});
		fired
	}
}

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

#[derive(Clone, Debug, PartialEq)]
struct CameraMove {
	from: ViewTransform,
	to: ViewTransform,
	elapsed_ms: f64,
	duration_ms: f64,
}

impl CameraMove {
	fn sample(&self) -> ViewTransform {
		if self.duration_ms <= 0.0 {
			return self.to;
		}
		let t = (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
		self.from.lerp(&self.to, ease_out_cubic(t))
	}
}

#[derive(Clone, Debug, Default)]
pub struct SelectionController {
	selection: Selection,
	scheduler: Scheduler,
	guard: Option<TaskHandle>,
	camera: Option<CameraMove>,
}

impl SelectionController {
	pub fn selected_node(&self) -> Option<&str> {
		match &self.selection {
			Selection::Node(id) => Some(id),
			_ => None,
		}
	}

	pub fn selected_edge(&self) -> Option<&str> {
		match &self.selection {
			Selection::Edge(id) => Some(id),
			_ => None,
		}
	}

	pub fn has_selection(&self) -> bool {
		self.selection != Selection::None
	}

	pub fn select_node(&mut self, id: &str) {
		self.selection = Selection::Node(id.to_string());
	}

	pub fn select_edge(&mut self, id: &str) {
		self.selection = Selection::Edge(id.to_string());
	}

	pub fn clear(&mut self) {
		self.selection = Selection::None;
	}

	/// Drop the selection if it points at one of the removed ids.
	pub fn forget<'a>(&mut self, removed: impl IntoIterator<Item = &'a String>) -> bool {
		let hit = match &self.selection {
			Selection::None => return false,
			Selection::Node(id) | Selection::Edge(id) => removed.into_iter().any(|r| r == id),
		};
		if hit {
			self.selection = Selection::None;
		}
		hit
	}

	pub fn is_animating(&self) -> bool {
		self.guard.is_some()
	}

	/// Start a camera move unless one is already running. Requests made
	/// while the guard is set are dropped, not queued.
	pub fn animate(&mut self, from: ViewTransform, to: ViewTransform, duration_ms: f64) -> bool {
		if self.is_animating() {
			debug!("camera busy, dropped animation request");
			return false;
		}
		self.guard = Some(self.scheduler.schedule(duration_ms));
		self.camera = Some(CameraMove {
			from,
			to,
			elapsed_ms: 0.0,
			duration_ms,
		});
		true
	}

	/// Abort the running camera move and release the guard.
	pub fn cancel_animation(&mut self) {
		if let Some(handle) = self.guard.take() {
			self.scheduler.cancel(handle);
		}
		self.camera = None;
	}

	/// Advance animations by `dt_ms`; returns the transform to show, if any.
	pub fn tick(&mut self, dt_ms: f64) -> Option<ViewTransform> {
		let frame = self.camera.as_mut().map(|m| {
			m.elapsed_ms += dt_ms;
			m.sample()
		});
		for handle in self.scheduler.advance(dt_ms) {
			if self.guard == Some(handle) {
				self.guard = None;
				if let Some(m) = self.camera.take() {
					return Some(m.to);
				}
			}
		}
		frame
	}
}
