//! Tunable constants for graph construction, physics, and interaction.
//!
//! All values are policy rather than protocol. [`GraphConfig::default`] holds
//! the reference behavior; a host page may override any subset of fields with
//! a JSON document, since every section deserializes with `#[serde(default)]`.
//!
//! # Units
//!
//! - **World units**: distances in simulation space (radii, rest length, cutoff).
//! - **Screen pixels**: CSS pixels on the canvas (label size, line widths).

use serde::Deserialize;

/// Controls how tagged entities are turned into nodes and edges.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
	/// Half-width of the square around the canvas center in which nodes spawn.
	pub jitter_radius: f64,
	/// A tag becomes a node only when at least this many entities carry it.
	pub min_tag_entities: usize,
	/// Spring coefficient assigned to every entity-tag edge, in `(0, 1]`.
	pub edge_strength: f64,
}

impl Default for BuilderConfig {
	fn default() -> Self {
		Self {
			jitter_radius: 100.0,
			min_tag_entities: 2,
			edge_strength: 0.3,
		}
	}
}

/// Force simulation constants.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
	/// Pull toward the canvas center, per world unit of offset.
	pub centering_gain: f64,
	/// Numerator of the inverse-square push between nearby nodes.
	pub repulsion: f64,
	/// Nodes farther apart than this exert no repulsion on each other.
	pub repulsion_cutoff: f64,
	/// Floor applied to pair distance before computing repulsion.
	pub min_distance: f64,
	/// Target length of every edge.
	pub rest_length: f64,
	/// Scales how hard edges correct deviations from `rest_length`.
	pub spring_constant: f64,
	/// Velocity multiplier applied every tick.
	pub damping: f64,
	/// Fraction of the force scale ("alpha") lost per tick. Alpha restarts at
	/// 1 on every reheat, so forces fade out and the layout comes to rest.
	pub alpha_decay: f64,
	/// Velocity components smaller than this snap to zero.
	pub velocity_epsilon: f64,
	/// Total per-tick movement below which the layout counts as settled.
	pub settle_threshold: f64,
	/// Hard cap on ticks between reheats.
	pub max_ticks: u32,
}

impl Default for SimulationConfig {
	fn default() -> Self {
		Self {
			centering_gain: 1e-4,
			repulsion: 200.0,
			repulsion_cutoff: 120.0,
			min_distance: 10.0,
			rest_length: 80.0,
			spring_constant: 0.1,
			damping: 0.7,
			// Alpha falls to 0.001 after 300 ticks.
			alpha_decay: 1.0 - 0.001_f64.powf(1.0 / 300.0),
			velocity_epsilon: 0.01,
			settle_threshold: 0.5,
			max_ticks: 300,
		}
	}
}

/// Pan, zoom, and pointer tolerance.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportConfig {
	/// Smallest zoom factor.
	pub min_scale: f64,
	/// Largest zoom factor.
	pub max_scale: f64,
	/// Multiplicative zoom per wheel notch. Zooming out uses the reciprocal.
	pub zoom_step: f64,
	/// Tolerance added to a node's radius when hit-testing, in world units.
	pub hit_slop: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.25,
			max_scale: 3.0,
			zoom_step: 1.1,
			hit_slop: 5.0,
		}
	}
}

impl ViewportConfig {
	/// Clamp `scale` into the configured range. Unlike `f64::clamp` this
	/// tolerates an inverted range from a hand-written config.
	pub fn clamp_scale(&self, scale: f64) -> f64 {
		scale.max(self.min_scale).min(self.max_scale)
	}
}

/// Fixed physical properties of one node kind.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct NodeBody {
	/// Radius in world units, used for drawing and hit-testing.
	pub radius: f64,
	/// Divides every force applied to the node.
	pub mass: f64,
}

/// Per-kind node bodies and screen-space text sizing.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
	/// Body of document nodes.
	pub entity: NodeBody,
	/// Body of tag nodes.
	pub tag: NodeBody,
	/// Label font size in screen pixels; kept constant across zoom levels.
	pub label_size: f64,
	/// Below this zoom level labels stop shrinking with the graph.
	pub label_min_k: f64,
	/// Edge width in screen pixels.
	pub edge_width: f64,
	/// Width of highlighted edges in screen pixels.
	pub edge_highlight_width: f64,
}

impl Default for StyleConfig {
	fn default() -> Self {
		Self {
			entity: NodeBody {
				radius: 8.0,
				mass: 2.0,
			},
			tag: NodeBody {
				radius: 6.0,
				mass: 1.0,
			},
			label_size: 12.0,
			label_min_k: 0.5,
			edge_width: 1.0,
			edge_highlight_width: 2.0,
		}
	}
}

/// Complete configuration for one graph view.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
	/// Which tags become nodes and how nodes spawn.
	pub builder: BuilderConfig,
	/// Force layout constants.
	pub simulation: SimulationConfig,
	/// Pan, zoom, and hit-test settings.
	pub viewport: ViewportConfig,
	/// Node bodies, labels, and edge widths.
	pub style: StyleConfig,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_overrides_only_named_fields() {
		let config: GraphConfig = serde_json::from_str(
			r#"{"simulation": {"damping": 0.8}, "viewport": {"max_scale": 5.0}}"#,
		)
		.unwrap();

		assert_eq!(config.simulation.damping, 0.8);
		assert_eq!(config.simulation.max_ticks, 300);
		assert_eq!(config.viewport.max_scale, 5.0);
		assert_eq!(config.viewport.min_scale, 0.25);
		assert_eq!(config.builder.min_tag_entities, 2);
	}

	#[test]
	fn default_bodies_are_positive_and_entities_are_larger() {
		let style = StyleConfig::default();
		for body in [style.entity, style.tag] {
			assert!(body.radius > 0.0);
			assert!(body.mass > 0.0);
		}
		assert!(style.entity.radius > style.tag.radius);
	}

	#[test]
	fn clamp_scale_respects_bounds() {
		let viewport = ViewportConfig::default();
		assert_eq!(viewport.clamp_scale(0.01), 0.25);
		assert_eq!(viewport.clamp_scale(10.0), 3.0);
		assert_eq!(viewport.clamp_scale(1.5), 1.5);
	}
}
