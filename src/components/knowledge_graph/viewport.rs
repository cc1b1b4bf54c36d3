//! Pan and zoom transform between screen pixels and world units.

use super::config::ViewportConfig;
use super::model::{Graph, NodeIdx};

/// Screen = world × `k` + `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	/// Horizontal translation in screen pixels.
	pub x: f64,
	/// Vertical translation in screen pixels.
	pub y: f64,
	/// Zoom factor, always within the configured scale range.
	k: f64,
	config: ViewportConfig,
}

impl Viewport {
	/// Identity transform.
	pub fn new(config: ViewportConfig) -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: config.clamp_scale(1.0),
			config,
		}
	}

	/// Zoom factor.
	pub fn scale(&self) -> f64 {
		self.k
	}

	/// Scale range, zoom step, and hit slop.
	pub fn config(&self) -> &ViewportConfig {
		&self.config
	}

	/// Inverse of [`Viewport::world_to_screen`].
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Where a world point is drawn, in CSS pixels.
	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(wx * self.k + self.x, wy * self.k + self.y)
	}

	/// Shift by a screen-space delta.
	pub fn pan(&mut self, dx: f64, dy: f64) {
		if dx.is_finite() && dy.is_finite() {
			self.x += dx;
			self.y += dy;
		}
	}

	/// Multiply the scale by `factor`, keeping the world point under
	/// `(sx, sy)` fixed on screen. The result is clamped to the scale range.
	pub fn zoom(&mut self, sx: f64, sy: f64, factor: f64) {
		if !(factor.is_finite() && factor > 0.0) {
			return;
		}
		let (wx, wy) = self.screen_to_world(sx, sy);
		self.k = self.config.clamp_scale(self.k * factor);
		self.x = sx - wx * self.k;
		self.y = sy - wy * self.k;
	}

	/// Zoom by one wheel notch: in for negative `delta_y`, out for positive.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let step = self.config.zoom_step;
		let factor = if delta_y > 0.0 {
			1.0 / step
		} else if delta_y < 0.0 {
			step
		} else {
			return;
		};
		self.zoom(sx, sy, factor);
	}

	/// Back to identity.
	pub fn reset(&mut self) {
		self.x = 0.0;
		self.y = 0.0;
		self.k = self.config.clamp_scale(1.0);
	}

	/// First node in array order whose center lies strictly within
	/// `radius + hit_slop` of the world point.
	///
	/// Entity nodes precede tag nodes in the arena, so an entity wins when its
	/// circle overlaps a tag's.
	pub fn hit_test(&self, graph: &Graph, wx: f64, wy: f64) -> Option<NodeIdx> {
		let slop = self.config.hit_slop;
		graph.nodes.iter().position(|node| {
			let (dx, dy) = (node.x - wx, node.y - wy);
			let reach = node.radius() + slop;
			dx * dx + dy * dy < reach * reach
		})
	}

	/// Hit-test a screen point.
	pub fn node_at_screen(&self, graph: &Graph, sx: f64, sy: f64) -> Option<NodeIdx> {
		let (wx, wy) = self.screen_to_world(sx, sy);
		self.hit_test(graph, wx, wy)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::knowledge_graph::config::StyleConfig;
	use crate::components::knowledge_graph::model::Node;
	use crate::components::knowledge_graph::types::Category;

	fn close(a: (f64, f64), b: (f64, f64)) -> bool {
		(a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
	}

	fn transformed() -> Viewport {
		let mut vp = Viewport::new(ViewportConfig::default());
		vp.pan(37.0, -12.5);
		vp.zoom(100.0, 50.0, 1.7);
		vp
	}

	#[test]
	fn starts_at_identity() {
		let vp = Viewport::new(ViewportConfig::default());
		assert_eq!(vp.screen_to_world(123.0, 45.0), (123.0, 45.0));
		assert_eq!(vp.scale(), 1.0);
	}

	#[test]
	fn screen_world_round_trip() {
		let vp = transformed();
		for p in [(0.0, 0.0), (312.5, -40.0), (-1e4, 7.25)] {
			let (sx, sy) = vp.world_to_screen(p.0, p.1);
			assert!(close(vp.screen_to_world(sx, sy), p));
		}
	}

	#[test]
	fn zoom_keeps_point_under_cursor() {
		let mut vp = transformed();
		for (sx, sy, factor) in [(200.0, 150.0, 1.1), (5.0, 400.0, 0.5), (640.0, 0.0, 2.0)] {
			let before = vp.screen_to_world(sx, sy);
			vp.zoom(sx, sy, factor);
			assert!(close(vp.screen_to_world(sx, sy), before));
		}
	}

	#[test]
	fn zoom_keeps_point_under_cursor_when_clamped() {
		let mut vp = Viewport::new(ViewportConfig::default());
		let before = vp.screen_to_world(300.0, 200.0);
		vp.zoom(300.0, 200.0, 100.0);
		assert_eq!(vp.scale(), 3.0);
		assert!(close(vp.screen_to_world(300.0, 200.0), before));
	}

	#[test]
	fn repeated_wheel_respects_scale_range() {
		let mut vp = Viewport::new(ViewportConfig::default());
		for _ in 0..200 {
			vp.wheel(10.0, 10.0, 120.0);
			assert!(vp.scale() >= 0.25);
		}
		assert_eq!(vp.scale(), 0.25);
		for _ in 0..200 {
			vp.wheel(10.0, 10.0, -120.0);
			assert!(vp.scale() <= 3.0);
		}
		assert_eq!(vp.scale(), 3.0);
	}

	#[test]
	fn invalid_zoom_factors_are_ignored() {
		let mut vp = transformed();
		let snapshot = vp.clone();
		vp.zoom(1.0, 1.0, 0.0);
		vp.zoom(1.0, 1.0, -2.0);
		vp.zoom(1.0, 1.0, f64::NAN);
		vp.wheel(1.0, 1.0, 0.0);
		assert_eq!(vp, snapshot);
	}

	#[test]
	fn pan_moves_by_screen_delta() {
		let mut vp = Viewport::new(ViewportConfig::default());
		vp.zoom(0.0, 0.0, 2.0);
		vp.pan(10.0, 20.0);
		assert_eq!((vp.x, vp.y), (10.0, 20.0));
		assert_eq!(vp.screen_to_world(10.0, 20.0), (0.0, 0.0));

		vp.reset();
		assert_eq!((vp.x, vp.y, vp.scale()), (0.0, 0.0, 1.0));
	}

	fn overlapping_graph() -> Graph {
		let style = StyleConfig::default();
		Graph {
			nodes: vec![
				Node::entity(1, "doc".into(), Category::Book, style.entity).at(100.0, 100.0),
				Node::tag("t", style.tag).at(110.0, 100.0),
				Node::tag("far", style.tag).at(400.0, 400.0),
			],
			edges: Vec::new(),
		}
	}

	#[test]
	fn hit_test_uses_radius_plus_slop() {
		let graph = overlapping_graph();
		let vp = Viewport::new(ViewportConfig::default());

		// Tag radius 6 + slop 5.
		assert_eq!(vp.hit_test(&graph, 410.9, 400.0), Some(2));
		assert_eq!(vp.hit_test(&graph, 411.0, 400.0), None);
		assert_eq!(vp.hit_test(&graph, 250.0, 250.0), None);
	}

	#[test]
	fn overlapping_hit_resolves_to_first_node() {
		let graph = overlapping_graph();
		let vp = Viewport::new(ViewportConfig::default());

		assert_eq!(vp.hit_test(&graph, 105.0, 100.0), Some(0));
		// Only the tag reaches this far right.
		assert_eq!(vp.hit_test(&graph, 120.0, 100.0), Some(1));
	}

	#[test]
	fn screen_hit_test_goes_through_transform() {
		let graph = overlapping_graph();
		let mut vp = Viewport::new(ViewportConfig::default());
		vp.pan(50.0, 50.0);
		vp.zoom(0.0, 0.0, 2.0);

		let (sx, sy) = vp.world_to_screen(400.0, 400.0);
		assert_eq!(vp.node_at_screen(&graph, sx, sy), Some(2));
		assert_eq!(vp.node_at_screen(&graph, 400.0, 400.0), None);
	}
}
