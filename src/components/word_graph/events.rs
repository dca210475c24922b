use std::collections::VecDeque;

use super::types::WordData;

/// Notifications raised by node and edge visuals for the editor to handle.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
	NodeSelect { node_id: String, data: WordData },
	NodeEdit { node_id: String, data: WordData },
	NodeDelete { node_id: String },
	EdgeSelect { edge_id: String },
	EdgeDelete { edge_id: String },
}

/// FIFO of pending [`CanvasEvent`]s owned by one editor instance.
///
/// Handlers that publish while another event is being handled only enqueue;
/// nothing runs re-entrantly.
#[derive(Clone, Debug, Default)]
pub struct EventChannel {
	queue: VecDeque<CanvasEvent>,
}

impl EventChannel {
	pub fn publish(&mut self, event: CanvasEvent) {
		self.queue.push_back(event);
	}

	pub fn next(&mut self) -> Option<CanvasEvent> {
		self.queue.pop_front()
	}
}
