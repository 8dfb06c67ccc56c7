use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{
	Bounds, GRID_GAP, MINIMAP_HEIGHT, MINIMAP_WIDTH, NODE_RADIUS, NodeInfo, SkillCanvasState,
};
use crate::skill_tree::NodeStatus;

const BACKGROUND: &str = "#111";
const GRID_DOT: &str = "#222";
const COMPLETED_RING: &str = "gold";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &SkillCanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_grid(state, ctx);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
	draw_minimap(state, ctx);
}

fn draw_grid(state: &SkillCanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	// Too dense to read when zoomed far out
	if GRID_GAP * k < 10.0 {
		return;
	}
	let (x0, y0) = state.screen_to_graph(0.0, 0.0);
	let (x1, y1) = state.screen_to_graph(state.width, state.height);
	let dot = 1.0 / k;

	ctx.set_fill_style_str(GRID_DOT);
	let mut gx = (x0 / GRID_GAP).floor() * GRID_GAP;
	while gx <= x1 {
		let mut gy = (y0 / GRID_GAP).floor() * GRID_GAP;
		while gy <= y1 {
			ctx.fill_rect(gx - dot, gy - dot, 2.0 * dot, 2.0 * dot);
			gy += GRID_GAP;
		}
		gx += GRID_GAP;
	}
}

fn draw_edges(state: &SkillCanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 2.0 * NODE_RADIUS {
			return;
		}

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// t=0: every edge at base alpha; t=1: highlighted edges brighten, the rest dim
		let (edge_alpha, arrow_alpha, width) = if is_highlighted {
			(0.6 + 0.3 * t, 0.8 + 0.1 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, 0.8 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba(100, 180, 255, {})", edge_alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + arrow_size),
			y2 - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba(100, 180, 255, {})", arrow_alpha));
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

/// Disc, progress arc, completion ring and label for one node.
fn draw_node_body(
	ctx: &CanvasRenderingContext2d,
	info: &NodeInfo,
	(x, y): (f64, f64),
	radius: f64,
	alpha: f64,
	k: f64,
) {
	let alpha = if info.status == NodeStatus::Locked {
		alpha * 0.45
	} else {
		alpha
	};

	ctx.set_global_alpha(alpha);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&info.color);
	ctx.fill();

	match info.status {
		NodeStatus::Completed => {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(COMPLETED_RING);
			ctx.set_line_width(2.5 / k);
			ctx.stroke();
		}
		NodeStatus::InProgress => {
			let start = -PI / 2.0;
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, start, start + 2.0 * PI * info.progress);
			ctx.set_stroke_style_str(COMPLETED_RING);
			ctx.set_line_width(2.0 / k);
			ctx.stroke();
		}
		NodeStatus::Available | NodeStatus::Locked => {}
	}
	ctx.set_global_alpha(1.0);

	ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.9));
	ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
	let _ = ctx.fill_text(&info.label, x + radius + 5.0, y + 4.0);
}

fn draw_nodes(state: &SkillCanvasState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let (alpha, radius) = (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t));
		draw_node_body(
			ctx,
			&node.data.user_data,
			(node.x() as f64, node.y() as f64),
			radius,
			alpha,
			k,
		);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(
				NODE_RADIUS * (1.0 + 0.2 * t),
				NODE_RADIUS * (1.5 + 0.8 * t),
			)
		} else if is_neighbor {
			(NODE_RADIUS * (1.0 + 0.1 * t), NODE_RADIUS * (1.2 + 0.4 * t))
		} else {
			(NODE_RADIUS, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ = gradient
					.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		draw_node_body(ctx, &node.data.user_data, (x, y), radius, 1.0, k);

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 5.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}
	});
}

/// Overview of every node plus the current viewport, in screen space.
fn draw_minimap(state: &SkillCanvasState, ctx: &CanvasRenderingContext2d) {
	let Some(nodes) = state.bounds() else {
		return;
	};
	let (vx0, vy0) = state.screen_to_graph(0.0, 0.0);
	let (vx1, vy1) = state.screen_to_graph(state.width, state.height);
	let world = Bounds {
		min_x: nodes.min_x.min(vx0) - NODE_RADIUS,
		min_y: nodes.min_y.min(vy0) - NODE_RADIUS,
		max_x: nodes.max_x.max(vx1) + NODE_RADIUS,
		max_y: nodes.max_y.max(vy1) + NODE_RADIUS,
	};
	let (ww, wh) = (world.max_x - world.min_x, world.max_y - world.min_y);
	if ww <= 0.0 || wh <= 0.0 {
		return;
	}

	let (ox, oy) = (
		state.width - MINIMAP_WIDTH - 10.0,
		state.height - MINIMAP_HEIGHT - 10.0,
	);
	let scale = (MINIMAP_WIDTH / ww).min(MINIMAP_HEIGHT / wh);
	let to_map = |x: f64, y: f64| {
		(
			ox + (x - world.min_x) * scale,
			oy + (y - world.min_y) * scale,
		)
	};

	ctx.set_fill_style_str("rgba(34, 34, 34, 0.85)");
	ctx.fill_rect(ox, oy, MINIMAP_WIDTH, MINIMAP_HEIGHT);

	state.graph.visit_nodes(|node| {
		let (mx, my) = to_map(node.x() as f64, node.y() as f64);
		ctx.begin_path();
		let _ = ctx.arc(mx, my, (NODE_RADIUS * scale).max(2.0), 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&node.data.user_data.color);
		ctx.fill();
	});

	let (rx, ry) = to_map(vx0, vy0);
	let (rx1, ry1) = to_map(vx1, vy1);
	ctx.set_stroke_style_str("rgba(255, 255, 255, 0.6)");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(rx, ry, rx1 - rx, ry1 - ry);
}
