//! Bounded-cost force layout.
//!
//! Each tick accumulates a centering pull, short-range inverse-square
//! repulsion, and edge springs into every node's velocity, damps it, and moves
//! the node. Forces are scaled by a cooling factor (`alpha`) that starts at 1
//! and decays every tick, so motion dies out even while the layout is still
//! untangling. The simulation settles when total movement drops below a
//! threshold or after a fixed number of ticks, and is reheated when the graph
//! is rebuilt or a node is dragged.
//!
//! This is a heuristic: it aims for a visually untangled layout within a few
//! hundred ticks, not a global energy minimum.

use std::f64::consts::PI;

use log::{debug, warn};

use super::config::SimulationConfig;
use super::model::{Graph, NodeIdx};

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_75;

/// Whether the layout is still being computed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
	/// Stepping every frame.
	Running,
	/// At rest until the next reheat.
	Settled,
}

/// Force simulation state. Node positions live in the [`Graph`] it steps.
pub struct Simulation {
	config: SimulationConfig,
	phase: Phase,
	ticks: u32,
	/// Force scale, 1 after a reheat and decaying every tick.
	alpha: f64,
	last_movement: f64,
	/// Scratch buffer for per-tick velocity deltas, reused across ticks.
	deltas: Vec<(f64, f64)>,
}

impl Simulation {
	/// A running simulation at full heat.
	pub fn new(config: SimulationConfig) -> Self {
		Self {
			config,
			phase: Phase::Running,
			ticks: 0,
			alpha: 1.0,
			last_movement: 0.0,
			deltas: Vec::new(),
		}
	}

	/// Constants in use.
	pub fn config(&self) -> &SimulationConfig {
		&self.config
	}

	/// Current phase.
	pub fn phase(&self) -> Phase {
		self.phase
	}

	/// Whether the layout is at rest.
	pub fn is_settled(&self) -> bool {
		self.phase == Phase::Settled
	}

	/// Ticks run since the last reheat.
	pub fn ticks(&self) -> u32 {
		self.ticks
	}

	/// Current force scale.
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	/// Movement reported by the most recent non-idle tick.
	pub fn last_movement(&self) -> f64 {
		self.last_movement
	}

	/// Resume ticking with a fresh tick budget.
	pub fn reheat(&mut self) {
		if self.phase == Phase::Settled {
			debug!("atlas-graph: simulation reheated");
		}
		self.phase = Phase::Running;
		self.ticks = 0;
		self.alpha = 1.0;
	}

	/// Advance the layout by one tick and return the total movement
	/// (sum of `|vx| + |vy|` over all nodes).
	///
	/// The `dragged` node is positioned by the pointer: it is held still with
	/// zero velocity, although it still repels and pulls its neighbors.
	/// A settled simulation does nothing and returns `0.0`.
	pub fn step(&mut self, graph: &mut Graph, center: (f64, f64), dragged: Option<NodeIdx>) -> f64 {
		if self.phase == Phase::Settled {
			return 0.0;
		}

		self.accumulate(graph, center, dragged);

		let c = &self.config;
		let mut movement = 0.0;
		for (idx, node) in graph.nodes.iter_mut().enumerate() {
			if Some(idx) == dragged {
				node.vx = 0.0;
				node.vy = 0.0;
				continue;
			}
			let (ax, ay) = self.deltas[idx];
			node.vx = snap((node.vx + ax * self.alpha) * c.damping, c.velocity_epsilon);
			node.vy = snap((node.vy + ay * self.alpha) * c.damping, c.velocity_epsilon);
			node.x += node.vx;
			node.y += node.vy;

			if !node.is_finite() {
				warn!(
					"atlas-graph: node {} left finite space, resetting to center",
					node.id
				);
				node.x = center.0;
				node.y = center.1;
				node.vx = 0.0;
				node.vy = 0.0;
			}
			movement += node.vx.abs() + node.vy.abs();
		}

		self.ticks += 1;
		self.alpha *= 1.0 - c.alpha_decay;
		self.last_movement = movement;

		if movement < c.settle_threshold {
			debug!(
				"atlas-graph: layout settled after {} ticks (movement {:.3})",
				self.ticks, movement
			);
			self.phase = Phase::Settled;
		} else if self.ticks >= c.max_ticks {
			debug!(
				"atlas-graph: tick cap {} reached (movement {:.3})",
				c.max_ticks, movement
			);
			self.phase = Phase::Settled;
		}

		movement
	}

	/// Compute every node's velocity change from positions at the start of
	/// the tick.
	fn accumulate(&mut self, graph: &Graph, center: (f64, f64), dragged: Option<NodeIdx>) {
		let c = &self.config;
		let nodes = &graph.nodes;
		self.deltas.clear();
		self.deltas.resize(nodes.len(), (0.0, 0.0));

		let cutoff_sq = c.repulsion_cutoff * c.repulsion_cutoff;
		for (i, node) in nodes.iter().enumerate() {
			if Some(i) == dragged {
				continue;
			}
			let (mut fx, mut fy) = (
				(center.0 - node.x) * c.centering_gain,
				(center.1 - node.y) * c.centering_gain,
			);

			for (j, other) in nodes.iter().enumerate() {
				if i == j {
					continue;
				}
				let (mut dx, mut dy) = (node.x - other.x, node.y - other.y);
				let dist_sq = dx * dx + dy * dy;
				if dist_sq.is_nan() || dist_sq >= cutoff_sq {
					continue;
				}
				let mut dist = dist_sq.sqrt();
				if dist < 1e-9 {
					// Coincident: opposite unit directions for the two nodes of a pair.
					let angle = (i + j) as f64 * PI * GOLDEN_RATIO_CONJUGATE;
					let sign = if i < j { 1.0 } else { -1.0 };
					(dx, dy, dist) = (sign * angle.cos(), sign * angle.sin(), 1.0);
				}
				let push = c.repulsion / dist.max(c.min_distance).powi(2);
				fx += dx / dist * push;
				fy += dy / dist * push;
			}

			self.deltas[i] = (fx / node.mass(), fy / node.mass());
		}

		for edge in &graph.edges {
			let (a, b) = (&nodes[edge.source], &nodes[edge.target]);
			let (dx, dy) = (b.x - a.x, b.y - a.y);
			let dist = (dx * dx + dy * dy).sqrt();
			if !dist.is_finite() || dist < 1e-9 {
				continue;
			}
			let pull = (dist - c.rest_length) * c.spring_constant * edge.strength;
			let (fx, fy) = (dx / dist * pull, dy / dist * pull);

			if Some(edge.source) != dragged {
				let d = &mut self.deltas[edge.source];
				d.0 += fx / a.mass();
				d.1 += fy / a.mass();
			}
			if Some(edge.target) != dragged {
				let d = &mut self.deltas[edge.target];
				d.0 -= fx / b.mass();
				d.1 -= fy / b.mass();
			}
		}
	}
}

fn snap(v: f64, epsilon: f64) -> f64 {
	if v.abs() < epsilon { 0.0 } else { v }
}
