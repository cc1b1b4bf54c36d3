//! Canvas rendering for the knowledge graph.
//!
//! Drawing happens in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Edges, highlighted ones last (world space)
//! 3. Nodes, then glow, ring, and label for the hovered and selected nodes
//!
//! Anything with non-finite coordinates is skipped so a bad frame never
//! makes the canvas throw.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::model::Node;
use super::state::KnowledgeGraphState;
use super::theme::Theme;

/// Renders the complete graph to the canvas.
pub fn render(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let bounds = state.bounds();
	let ratio = state.pixel_ratio;
	let vp = &state.viewport;

	let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, bounds.width, bounds.height);

	if state.graph.is_empty() {
		return;
	}

	ctx.save();
	let _ = ctx.translate(vp.x, vp.y);
	let _ = ctx.scale(vp.scale(), vp.scale());

	draw_edges(state, ctx, theme);
	draw_nodes(state, ctx, theme);

	ctx.restore();
}

fn draw_edges(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let k = state.viewport.scale();
	let style = state.style();
	let nodes = &state.graph.nodes;

	for highlighted in [false, true] {
		let (color, width) = if highlighted {
			(theme.edge_highlight, style.edge_highlight_width)
		} else {
			(theme.edge, style.edge_width)
		};
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(width / k);
		ctx.begin_path();
		for edge in &state.graph.edges {
			if state.is_edge_highlighted(edge) != highlighted {
				continue;
			}
			let (a, b) = (&nodes[edge.source], &nodes[edge.target]);
			if !(drawable(a) && drawable(b)) {
				continue;
			}
			ctx.move_to(a.x, a.y);
			ctx.line_to(b.x, b.y);
		}
		ctx.stroke();
	}
}

fn draw_nodes(state: &KnowledgeGraphState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	for node in &state.graph.nodes {
		if !drawable(node) {
			continue;
		}
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius(), 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&theme.node_color(&node.kind).to_css());
		ctx.fill();
	}

	// Emphasized nodes on top so their ring and label are not covered.
	for (idx, node) in state.graph.nodes.iter().enumerate() {
		if state.is_emphasized(idx) && drawable(node) {
			draw_emphasis(state, ctx, theme, node);
		}
	}
}

fn draw_emphasis(
	state: &KnowledgeGraphState,
	ctx: &CanvasRenderingContext2d,
	theme: &Theme,
	node: &Node,
) {
	let k = state.viewport.scale();
	let style = state.style();
	let color = theme.node_color(&node.kind);

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, node.radius() + 6.0 / k, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&color.with_alpha(0.25).to_css());
	ctx.fill();

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, node.radius(), 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&color.lighten(0.25).to_css());
	ctx.fill();

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, node.radius() + 3.0 / k, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&theme.ring.to_css());
	ctx.set_line_width(1.5 / k);
	ctx.stroke();

	if node.label.is_empty() {
		return;
	}
	let font_size = style.label_size / k.max(style.label_min_k);
	ctx.set_fill_style_str(&theme.label.to_css());
	ctx.set_font(&format!("{font_size}px Inter, sans-serif"));
	ctx.set_text_align("center");
	ctx.set_text_baseline("bottom");
	let _ = ctx.fill_text(&node.label, node.x, node.y - node.radius() - 5.0 / k);
}

fn drawable(node: &Node) -> bool {
	node.x.is_finite() && node.y.is_finite()
}
