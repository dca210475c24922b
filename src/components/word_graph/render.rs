use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scene::{EdgeSprite, NodeSprite, Scene};
use super::state::WordGraphState;
use super::viewport::{Point, Rect};

const BACKGROUND: &str = "#f8fafc";
const GRID_DOT: &str = "#cbd5e1";
const GRID_GAP: f64 = 20.0;
const NODE_RADIUS: f64 = 10.0;
const ACCENT: &str = "#6366f1";
const HOVERED: &str = "#818cf8";
const SELECTED: &str = "#f59e0b";
const DANGER: &str = "#ef4444";
const ARROW_SIZE: f64 = 10.0;
const MEANING_CHARS: usize = 16;

pub fn render(state: &WordGraphState, ctx: &CanvasRenderingContext2d) {
	let scene = state.scene();
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_grid(state, ctx);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	for edge in &scene.edges {
		draw_edge(edge, &scene, ctx);
	}
	for node in &scene.nodes {
		draw_node(node, &scene, ctx);
	}
	if let Some(edge) = scene.edges.iter().find(|e| e.selected) {
		draw_delete_button(edge.midpoint(), scene.delete_radius(), ctx);
	}
	if let Some((from, to)) = scene.preview {
		draw_preview(from, to, &scene, ctx);
	}
	if let Some(marker) = scene.marker {
		draw_marker(marker, ctx);
	}
	ctx.restore();
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: &[f64]) {
	let pattern = js_sys::Array::new();
	for d in dash {
		pattern.push(&JsValue::from_f64(*d));
	}
	let _ = ctx.set_line_dash(&pattern);
}

/// Dots on a fixed screen-space grid that follows the pan and zoom.
fn draw_grid(state: &WordGraphState, ctx: &CanvasRenderingContext2d) {
	let gap = GRID_GAP * state.transform.k;
	if gap < 6.0 {
		return;
	}
	ctx.set_fill_style_str(GRID_DOT);
	let mut x = state.transform.x.rem_euclid(gap);
	while x < state.width {
		let mut y = state.transform.y.rem_euclid(gap);
		while y < state.height {
			ctx.fill_rect(x, y, 1.0, 1.0);
			y += gap;
		}
		x += gap;
	}
}

/// Where the ray from the center of `rect` along `(ux, uy)` leaves it.
fn rect_exit(rect: &Rect, ux: f64, uy: f64) -> Point {
	let c = rect.center();
	let tx = if ux.abs() > f64::EPSILON {
		rect.width / 2.0 / ux.abs()
	} else {
		f64::INFINITY
	};
	let ty = if uy.abs() > f64::EPSILON {
		rect.height / 2.0 / uy.abs()
	} else {
		f64::INFINITY
	};
	let t = tx.min(ty);
	Point::new(c.x + ux * t, c.y + uy * t)
}

fn draw_edge(edge: &EdgeSprite, scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let (dx, dy) = (edge.to.x - edge.from.x, edge.to.y - edge.from.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);
	let tip = scene
		.nodes
		.iter()
		.find(|n| n.rect.center() == edge.to)
		.map(|n| rect_exit(&n.rect, -ux, -uy))
		.unwrap_or(edge.to);

	let width = if edge.selected {
		edge.style.width * 1.5
	} else {
		edge.style.width
	};
	ctx.set_stroke_style_str(&edge.style.stroke);
	ctx.set_line_width(width);
	set_dash(ctx, &edge.style.dash);
	ctx.begin_path();
	ctx.move_to(edge.from.x, edge.from.y);
	ctx.line_to(tip.x - ux * ARROW_SIZE, tip.y - uy * ARROW_SIZE);
	ctx.stroke();
	set_dash(ctx, &[]);

	ctx.set_fill_style_str(&edge.style.stroke);
	let (back_x, back_y) = (tip.x - ux * ARROW_SIZE, tip.y - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	ctx.begin_path();
	ctx.move_to(tip.x, tip.y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, r: &Rect, radius: f64) {
	let (x, y, w, h) = (r.x, r.y, r.width, r.height);
	ctx.begin_path();
	ctx.move_to(x + radius, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, radius);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, radius);
	let _ = ctx.arc_to(x, y + h, x, y, radius);
	let _ = ctx.arc_to(x, y, x + w, y, radius);
	ctx.close_path();
}

fn truncated(text: &str, max: usize) -> String {
	if text.chars().count() <= max {
		return text.to_string();
	}
	let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
	out.push('…');
	out
}

fn draw_node(node: &NodeSprite, scene: &Scene, ctx: &CanvasRenderingContext2d) {
	let r = &node.rect;
	let c = r.center();

	let fill = match (node.selected, node.hovered) {
		(true, _) => SELECTED,
		(false, true) => HOVERED,
		_ => ACCENT,
	};
	rounded_rect(ctx, r, NODE_RADIUS);
	ctx.set_fill_style_str(fill);
	ctx.fill();
	ctx.set_stroke_style_str("#ffffff");
	ctx.set_line_width(if node.selected { 3.0 } else { 1.0 });
	ctx.stroke();

	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str("#ffffff");
	ctx.set_font("bold 18px sans-serif");
	let _ = ctx.fill_text(&node.word, c.x, c.y - 12.0);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
	ctx.set_font("13px sans-serif");
	let _ = ctx.fill_text(&truncated(&node.meaning, MEANING_CHARS), c.x, c.y + 14.0);

	// Incoming target, only while a connection is being dragged.
	if scene.preview.is_some() {
		let target = node.target_connector(scene.target_half());
		ctx.set_stroke_style_str("#ffffff");
		ctx.set_line_width(1.0);
		set_dash(ctx, &[4.0, 3.0]);
		ctx.stroke_rect(target.x, target.y, target.width, target.height);
		set_dash(ctx, &[]);
	}

	let source = node.source_connector();
	ctx.begin_path();
	let _ = ctx.arc(source.x, source.y, scene.source_radius() * 0.75, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(if node.hovered { SELECTED } else { "#c7d2fe" });
	ctx.fill();
	ctx.set_stroke_style_str("#ffffff");
	ctx.set_line_width(2.0);
	ctx.stroke();
}

fn draw_delete_button(at: Point, radius: f64, ctx: &CanvasRenderingContext2d) {
	ctx.begin_path();
	let _ = ctx.arc(at.x, at.y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(DANGER);
	ctx.fill();
	ctx.set_stroke_style_str("#ffffff");
	ctx.set_line_width(2.0);
	ctx.stroke();

	let arm = radius * 0.4;
	ctx.begin_path();
	ctx.move_to(at.x - arm, at.y - arm);
	ctx.line_to(at.x + arm, at.y + arm);
	ctx.move_to(at.x + arm, at.y - arm);
	ctx.line_to(at.x - arm, at.y + arm);
	ctx.stroke();
}

fn draw_preview(from: Point, to: Point, scene: &Scene, ctx: &CanvasRenderingContext2d) {
	ctx.set_stroke_style_str(ACCENT);
	ctx.set_line_width(2.0);
	set_dash(ctx, &[8.0, 4.0]);
	ctx.begin_path();
	ctx.move_to(from.x, from.y);
	ctx.line_to(to.x, to.y);
	ctx.stroke();
	set_dash(ctx, &[]);

	ctx.begin_path();
	let _ = ctx.arc(to.x, to.y, scene.source_radius() * 0.5, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(ACCENT);
	ctx.fill();
}

/// Pin marking where a new word will be placed.
fn draw_marker(at: Point, ctx: &CanvasRenderingContext2d) {
	ctx.begin_path();
	let _ = ctx.arc(at.x, at.y, 10.0, 0.0, 2.0 * PI);
	ctx.set_fill_style_str("rgba(239, 68, 68, 0.25)");
	ctx.fill();
	ctx.begin_path();
	let _ = ctx.arc(at.x, at.y, 5.0, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(DANGER);
	ctx.fill();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn arrow_tips_sit_on_the_node_border() {
		let rect = Rect {
			x: 0.0,
			y: 0.0,
			width: 160.0,
			height: 80.0,
		};
		assert_eq!(rect_exit(&rect, 1.0, 0.0), Point::new(160.0, 40.0));
		assert_eq!(rect_exit(&rect, 0.0, -1.0), Point::new(80.0, 0.0));
	}

	#[test]
	fn long_meanings_are_shortened() {
		assert_eq!(truncated("달리다", 16), "달리다");
		assert_eq!(truncated("abcdef", 4), "abc…");
	}
}
