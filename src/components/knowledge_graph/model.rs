//! Node and edge arena shared by the simulation and the renderer.
//!
//! Nodes live in a single vector and are addressed by [`NodeIdx`]. Edges store
//! indices rather than references, so the simulation can mutate positions in
//! place while the renderer reads the same arena in the same frame.

use super::config::NodeBody;
use super::types::Category;

/// Handle into [`Graph::nodes`]. Valid until the graph is rebuilt.
pub type NodeIdx = usize;

/// What a node stands for.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
	/// A document from the library.
	Entity {
		/// Library id of the document.
		entity_id: u64,
		/// Picks the fill color.
		category: Category,
	},
	/// A tag shared by several documents.
	Tag,
}

/// A simulated, drawable node.
#[derive(Clone, Debug)]
pub struct Node {
	/// `entity-<id>` or `tag-<text>`; unique within one graph.
	pub id: String,
	/// Title or tag text drawn next to the node.
	pub label: String,
	/// Entity or tag.
	pub kind: NodeKind,
	/// World position.
	pub x: f64,
	/// World position.
	pub y: f64,
	/// Velocity in world units per tick.
	pub vx: f64,
	/// Velocity in world units per tick.
	pub vy: f64,
	radius: f64,
	mass: f64,
}

impl Node {
	/// Node for a library document.
	pub fn entity(entity_id: u64, label: String, category: Category, body: NodeBody) -> Self {
		Self::new(
			format!("entity-{entity_id}"),
			label,
			NodeKind::Entity {
				entity_id,
				category,
			},
			body,
		)
	}

	/// Node for a shared tag.
	pub fn tag(tag: &str, body: NodeBody) -> Self {
		Self::new(format!("tag-{tag}"), tag.to_string(), NodeKind::Tag, body)
	}

	fn new(id: String, label: String, kind: NodeKind, body: NodeBody) -> Self {
		Self {
			id,
			label,
			kind,
			x: 0.0,
			y: 0.0,
			vx: 0.0,
			vy: 0.0,
			radius: body.radius,
			mass: body.mass,
		}
	}

	/// Place the node at `(x, y)`.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.x = x;
		self.y = y;
		self
	}

	/// Drawn and hit-tested radius in world units.
	pub fn radius(&self) -> f64 {
		self.radius
	}

	/// Divisor applied to every force on the node.
	pub fn mass(&self) -> f64 {
		self.mass
	}

	/// The library id for entity nodes, `None` for tags.
	pub fn entity_id(&self) -> Option<u64> {
		match self.kind {
			NodeKind::Entity { entity_id, .. } => Some(entity_id),
			NodeKind::Tag => None,
		}
	}

	/// Whether this is a tag node.
	pub fn is_tag(&self) -> bool {
		matches!(self.kind, NodeKind::Tag)
	}

	/// Position and velocity are all finite.
	pub fn is_finite(&self) -> bool {
		self.x.is_finite() && self.y.is_finite() && self.vx.is_finite() && self.vy.is_finite()
	}
}

/// A spring between an entity node and a tag node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
	/// Always an entity node.
	pub source: NodeIdx,
	/// Always a tag node.
	pub target: NodeIdx,
	/// Spring stiffness.
	pub strength: f64,
}

impl Edge {
	/// Whether `idx` is either endpoint.
	pub fn touches(&self, idx: NodeIdx) -> bool {
		self.source == idx || self.target == idx
	}
}

/// The complete node/edge set for one input snapshot.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	/// Entity nodes first, then tag nodes.
	pub nodes: Vec<Node>,
	/// One edge per (entity, shared tag) pair.
	pub edges: Vec<Edge>,
}

impl Graph {
	/// No nodes at all.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Node at `idx`, if it exists.
	pub fn node(&self, idx: NodeIdx) -> Option<&Node> {
		self.nodes.get(idx)
	}

	/// Index of the node with the given id.
	pub fn find(&self, id: &str) -> Option<NodeIdx> {
		self.nodes.iter().position(|n| n.id == id)
	}

	/// Move a node to `(x, y)` and drop its velocity.
	pub fn pin(&mut self, idx: NodeIdx, x: f64, y: f64) {
		if let Some(node) = self.nodes.get_mut(idx) {
			node.x = x;
			node.y = y;
			node.vx = 0.0;
			node.vy = 0.0;
		}
	}
}
