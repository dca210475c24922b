//! Screen ↔ canvas coordinate conversion for a panned and zoomed view.
//!
//! Screen space is pixels relative to the canvas element's top-left corner;
//! canvas space is where node positions live. The two are related by
//! `canvas = (screen - pan) / zoom`.

/// A point in either screen or canvas space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Point) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}

	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

/// Width and height of the visible viewport, in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn new(origin: Point, size: Size) -> Self {
		Self {
			x: origin.x,
			y: origin.y,
			width: size.width,
			height: size.height,
		}
	}

	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
	}

	pub fn union(&self, other: &Rect) -> Rect {
		let (x, y) = (self.x.min(other.x), self.y.min(other.y));
		let right = (self.x + self.width).max(other.x + other.width);
		let bottom = (self.y + self.height).max(other.y + other.height);
		Rect {
			x,
			y,
			width: right - x,
			height: bottom - y,
		}
	}
}

/// Inclusive zoom bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomRange {
	pub min: f64,
	pub max: f64,
}

impl ZoomRange {
	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min, self.max)
	}
}

/// Pan offset (`x`, `y`, screen pixels) and zoom factor `k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_canvas(&self, p: Point) -> Point {
		Point::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
	}

	#[cfg(test)]
	pub fn canvas_to_screen(&self, p: Point) -> Point {
		Point::new(p.x * self.k + self.x, p.y * self.k + self.y)
	}

	/// Translate by a screen-space delta.
	pub fn panned(&self, dx: f64, dy: f64) -> Self {
		Self {
			x: self.x + dx,
			y: self.y + dy,
			k: self.k,
		}
	}

	/// Scale by `factor` keeping the canvas point under `anchor` fixed on screen.
	pub fn zoomed_at(&self, anchor: Point, factor: f64, range: ZoomRange) -> Self {
		let k = range.clamp(self.k * factor);
		let ratio = k / self.k;
		Self {
			x: anchor.x - (anchor.x - self.x) * ratio,
			y: anchor.y - (anchor.y - self.y) * ratio,
			k,
		}
	}

	/// Set an absolute zoom level around the viewport center.
	pub fn zoomed_to(&self, k: f64, viewport: Size, range: ZoomRange) -> Self {
		let anchor = Point::new(viewport.width / 2.0, viewport.height / 2.0);
		self.zoomed_at(anchor, k / self.k, range)
	}

	/// The transform that shows canvas point `center` in the middle of the viewport.
	pub fn centered_on(center: Point, k: f64, viewport: Size, range: ZoomRange) -> Self {
		let k = range.clamp(k);
		Self {
			x: viewport.width / 2.0 - center.x * k,
			y: viewport.height / 2.0 - center.y * k,
			k,
		}
	}

	/// The transform that fits `bounds` in the viewport, leaving `padding`
	/// (a fraction of the bounds) around it.
	pub fn fitting(bounds: Rect, viewport: Size, padding: f64, range: ZoomRange) -> Self {
		let (w, h) = (
			(bounds.width * (1.0 + padding)).max(1.0),
			(bounds.height * (1.0 + padding)).max(1.0),
		);
		let k = (viewport.width / w).min(viewport.height / h);
		Self::centered_on(bounds.center(), k, viewport, range)
	}

	/// Linear blend towards `to`, `t` in `[0, 1]`.
	pub fn lerp(&self, to: &ViewTransform, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const RANGE: ZoomRange = ZoomRange { min: 0.1, max: 3.0 };

	fn close(a: Point, b: Point) -> bool {
		(a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
	}

	#[test]
	fn screen_to_canvas_applies_pan_then_zoom() {
		let view = ViewTransform {
			x: 100.0,
			y: 50.0,
			k: 2.0,
		};
		assert_eq!(
			view.screen_to_canvas(Point::new(300.0, 250.0)),
			Point::new(100.0, 100.0)
		);
	}

	#[test]
	fn round_trip_is_identity() {
		let views = [
			ViewTransform::default(),
			ViewTransform {
				x: -340.5,
				y: 12.25,
				k: 0.37,
			},
			ViewTransform {
				x: 999.0,
				y: -1e4,
				k: 2.9,
			},
		];
		let points = [
			Point::new(0.0, 0.0),
			Point::new(300.0, 200.0),
			Point::new(-17.3, 1234.5),
		];
		for view in views {
			for p in points {
				assert!(close(view.screen_to_canvas(view.canvas_to_screen(p)), p));
				assert!(close(view.canvas_to_screen(view.screen_to_canvas(p)), p));
			}
		}
	}

	#[test]
	fn zoom_keeps_anchor_fixed_and_clamps() {
		let view = ViewTransform {
			x: 40.0,
			y: 30.0,
			k: 1.0,
		};
		let anchor = Point::new(200.0, 120.0);
		let before = view.screen_to_canvas(anchor);
		let zoomed = view.zoomed_at(anchor, 1.1, RANGE);
		assert!(close(zoomed.screen_to_canvas(anchor), before));

		let huge = view.zoomed_at(anchor, 100.0, RANGE);
		assert_eq!(huge.k, 3.0);
		let tiny = view.zoomed_at(anchor, 0.0001, RANGE);
		assert_eq!(tiny.k, 0.1);
	}

	#[test]
	fn centered_on_puts_point_in_viewport_middle() {
		let viewport = Size {
			width: 800.0,
			height: 600.0,
		};
		let view = ViewTransform::centered_on(Point::new(280.0, 240.0), 1.2, viewport, RANGE);
		assert!(close(
			view.canvas_to_screen(Point::new(280.0, 240.0)),
			Point::new(400.0, 300.0)
		));
		assert_eq!(view.k, 1.2);
	}

	#[test]
	fn fitting_contains_bounds() {
		let viewport = Size {
			width: 800.0,
			height: 600.0,
		};
		let bounds = Rect {
			x: 100.0,
			y: 100.0,
			width: 1060.0,
			height: 630.0,
		};
		let view = ViewTransform::fitting(bounds, viewport, 0.2, RANGE);
		let top_left = view.canvas_to_screen(Point::new(bounds.x, bounds.y));
		let bottom_right =
			view.canvas_to_screen(Point::new(bounds.x + bounds.width, bounds.y + bounds.height));
		assert!(top_left.x >= 0.0 && top_left.y >= 0.0);
		assert!(bottom_right.x <= 800.0 && bottom_right.y <= 600.0);
	}
}
