//! Graph, simulation, and viewport state plus pointer interaction tracking.
//!
//! The host (the canvas component) forwards pointer, wheel, and resize
//! notifications here and calls [`KnowledgeGraphState::frame`] once per
//! animation frame. Everything runs on one thread, so the simulation mutates
//! the node arena in place and the renderer reads it right after.

use log::debug;

use super::builder::{self, Bounds};
use super::config::{BuilderConfig, GraphConfig, StyleConfig};
use super::model::{Edge, Graph, NodeIdx};
use super::simulation::Simulation;
use super::types::TaggedEntity;
use super::viewport::Viewport;

/// Side effects the host should dispatch after an input event.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	/// An entity node was pressed; carries the library id.
	Activated(u64),
	/// The hovered node changed; carries the new node id, if any.
	HoverChanged(Option<String>),
}

/// `MouseEvent.button` of the main (usually left) button.
const PRIMARY_BUTTON: i16 = 0;

/// Cursor affordance for the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
	/// Idle over empty canvas.
	Grab,
	/// Over a node.
	Pointer,
	/// Dragging a node or panning.
	Grabbing,
}

impl Cursor {
	/// CSS `cursor` value.
	pub fn as_css(self) -> &'static str {
		match self {
			Cursor::Grab => "grab",
			Cursor::Pointer => "pointer",
			Cursor::Grabbing => "grabbing",
		}
	}
}

/// Tracks an in-progress node drag.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Node held by the pointer.
	pub node: Option<NodeIdx>,
}

/// Tracks an in-progress canvas pan.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// A pan gesture is in progress.
	pub active: bool,
	/// Screen position of the previous pointer event of this gesture.
	pub last_x: f64,
	/// See `last_x`.
	pub last_y: f64,
}

/// Core view state, created when the component mounts and mutated by the
/// animation loop and input handlers.
pub struct KnowledgeGraphState {
	/// Node arena laid out by the simulation.
	pub graph: Graph,
	/// Force layout driving `graph`.
	pub simulation: Simulation,
	/// Screen/world transform.
	pub viewport: Viewport,
	/// Current node drag, if any.
	pub drag: DragState,
	/// Current canvas pan, if any.
	pub pan: PanState,
	hovered: Option<NodeIdx>,
	selected: Option<NodeIdx>,
	bounds: Bounds,
	/// Device pixel ratio of the canvas backing store.
	pub pixel_ratio: f64,
	builder: BuilderConfig,
	style: StyleConfig,
}

impl KnowledgeGraphState {
	/// Build the graph for `entities` inside `bounds`, with an identity
	/// viewport and a freshly heated simulation.
	pub fn new(
		entities: &[TaggedEntity],
		bounds: Bounds,
		config: &GraphConfig,
		jitter: &mut impl FnMut() -> f64,
	) -> Self {
		let graph = builder::build(entities, bounds, &config.builder, &config.style, jitter);
		Self {
			graph,
			simulation: Simulation::new(config.simulation.clone()),
			viewport: Viewport::new(config.viewport.clone()),
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			selected: None,
			bounds,
			pixel_ratio: 1.0,
			builder: config.builder.clone(),
			style: config.style.clone(),
		}
	}

	/// Replace the node/edge set from a new entity list.
	///
	/// Positions are re-randomized and the simulation restarts. The viewport
	/// is kept, and the selection survives when its node id still exists.
	pub fn rebuild(&mut self, entities: &[TaggedEntity], jitter: &mut impl FnMut() -> f64) {
		let selected_id = self.selected_node_id().map(str::to_owned);
		self.graph = builder::build(entities, self.bounds, &self.builder, &self.style, jitter);
		self.selected = selected_id.and_then(|id| self.graph.find(&id));
		self.hovered = None;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.simulation.reheat();
	}

	/// New canvas size in CSS pixels. Future spawns and the centering force
	/// use the new center; existing nodes stay where they are.
	pub fn resize(&mut self, width: f64, height: f64, pixel_ratio: f64) {
		debug!("atlas-graph: resize to {width}x{height} @{pixel_ratio}");
		self.bounds = Bounds::new(width, height);
		self.pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
			pixel_ratio
		} else {
			1.0
		};
	}

	/// Canvas size in CSS pixels.
	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Sizing and label settings used to draw the graph.
	pub fn style(&self) -> &StyleConfig {
		&self.style
	}

	/// Advance the layout by one tick. Returns total movement, `0.0` once
	/// the layout has settled.
	pub fn frame(&mut self) -> f64 {
		let center = self.bounds.center();
		self.simulation.step(&mut self.graph, center, self.drag.node)
	}

	/// A mouse button went down. Only the primary button (`0`) interacts;
	/// any other button is ignored.
	pub fn press(&mut self, button: i16, sx: f64, sy: f64) -> Option<GraphEvent> {
		if button != PRIMARY_BUTTON {
			return None;
		}
		self.pointer_down(sx, sy)
	}

	/// Resolve a press: a node under the pointer is held still, selected, and
	/// starts a drag, otherwise a pan begins.
	pub fn pointer_down(&mut self, sx: f64, sy: f64) -> Option<GraphEvent> {
		match self.viewport.node_at_screen(&self.graph, sx, sy) {
			Some(idx) => {
				let (x, y) = (self.graph.nodes[idx].x, self.graph.nodes[idx].y);
				self.graph.pin(idx, x, y);
				self.drag.node = Some(idx);
				self.pan.active = false;
				self.selected = Some(idx);
				self.simulation.reheat();
				self.graph.nodes[idx].entity_id().map(GraphEvent::Activated)
			}
			None => {
				self.pan = PanState {
					active: true,
					last_x: sx,
					last_y: sy,
				};
				None
			}
		}
	}

	/// Drag the held node, pan the canvas, or update the hover.
	pub fn pointer_move(&mut self, sx: f64, sy: f64) -> Option<GraphEvent> {
		if let Some(idx) = self.drag.node {
			let (wx, wy) = self.viewport.screen_to_world(sx, sy);
			self.graph.pin(idx, wx, wy);
			self.simulation.reheat();
			return None;
		}
		if self.pan.active {
			self.viewport
				.pan(sx - self.pan.last_x, sy - self.pan.last_y);
			self.pan.last_x = sx;
			self.pan.last_y = sy;
			return None;
		}
		let hovered = self.viewport.node_at_screen(&self.graph, sx, sy);
		self.set_hover(hovered)
	}

	/// End any drag or pan gesture.
	pub fn pointer_up(&mut self) {
		self.drag = DragState::default();
		self.pan = PanState::default();
	}

	/// The pointer left the canvas: end any gesture and drop the hover.
	pub fn pointer_leave(&mut self) -> Option<GraphEvent> {
		self.pointer_up();
		self.set_hover(None)
	}

	/// Zoom around the pointer by one wheel step.
	pub fn wheel(&mut self, sx: f64, sy: f64, delta_y: f64) {
		self.viewport.wheel(sx, sy, delta_y);
	}

	fn set_hover(&mut self, node: Option<NodeIdx>) -> Option<GraphEvent> {
		if self.hovered == node {
			return None;
		}
		self.hovered = node;
		let id = node.and_then(|idx| self.graph.node(idx)).map(|n| n.id.clone());
		Some(GraphEvent::HoverChanged(id))
	}

	/// Node under the pointer.
	pub fn hovered(&self) -> Option<NodeIdx> {
		self.hovered
	}

	/// Node pressed most recently.
	pub fn selected(&self) -> Option<NodeIdx> {
		self.selected
	}

	/// Stable id (`entity-<id>` or `tag-<text>`) of the selected node.
	pub fn selected_node_id(&self) -> Option<&str> {
		self.selected
			.and_then(|idx| self.graph.node(idx))
			.map(|n| n.id.as_str())
	}

	/// A node is held by the pointer.
	pub fn is_dragging(&self) -> bool {
		self.drag.node.is_some()
	}

	/// Whether the node's label and ring should be drawn.
	pub fn is_emphasized(&self, idx: NodeIdx) -> bool {
		self.hovered == Some(idx) || self.selected == Some(idx)
	}

	/// Edges touching the hovered node are drawn highlighted.
	pub fn is_edge_highlighted(&self, edge: &Edge) -> bool {
		self.hovered.is_some_and(|idx| edge.touches(idx))
	}

	/// Cursor affordance for the current gesture and hover.
	pub fn cursor(&self) -> Cursor {
		if self.is_dragging() || self.pan.active {
			Cursor::Grabbing
		} else if self.hovered.is_some() {
			Cursor::Pointer
		} else {
			Cursor::Grab
		}
	}
}
