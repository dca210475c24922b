use super::types::EdgeStyle;
use super::viewport::{Size, ZoomRange};

/// Tunables for the word graph editor.
#[derive(Clone, Debug, PartialEq)]
pub struct EditorConfig {
	/// Footprint of every word node in canvas units.
	pub node_size: Size,
	pub zoom_range: ZoomRange,
	/// Step used by the zoom-in / zoom-out controls.
	pub zoom_step: f64,
	/// Per-notch multiplier for wheel zoom.
	pub wheel_factor: f64,
	/// Max pointer travel, in screen pixels, for a press/release to count as a click.
	pub click_tolerance: f64,
	pub select_zoom: f64,
	pub search_zoom: f64,
	pub center_duration_ms: f64,
	pub deselect_fit_duration_ms: f64,
	pub reset_fit_duration_ms: f64,
	pub fit_padding: f64,
	pub search_limit: usize,
	pub source_connector_radius: f64,
	/// Half-width of the square incoming connector at the node center.
	pub target_connector_half: f64,
	pub edge_hit_width: f64,
	pub edge_delete_radius: f64,
	pub edge_style: EdgeStyle,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			node_size: Size {
				width: 160.0,
				height: 80.0,
			},
			zoom_range: ZoomRange { min: 0.1, max: 3.0 },
			zoom_step: 0.1,
			wheel_factor: 1.1,
			click_tolerance: 5.0,
			select_zoom: 1.2,
			search_zoom: 1.5,
			center_duration_ms: 400.0,
			deselect_fit_duration_ms: 300.0,
			reset_fit_duration_ms: 600.0,
			fit_padding: 0.2,
			search_limit: 5,
			source_connector_radius: 8.0,
			target_connector_half: 24.0,
			edge_hit_width: 8.0,
			edge_delete_radius: 16.0,
			edge_style: EdgeStyle::default(),
		}
	}
}
