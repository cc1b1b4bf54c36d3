//! Turns a flat list of tagged entities into a bipartite entity/tag graph.

use std::collections::HashMap;

use log::debug;

use super::config::{BuilderConfig, StyleConfig};
use super::model::{Edge, Graph, Node, NodeIdx};
use super::types::TaggedEntity;

/// Canvas size in CSS pixels; nodes spawn around its center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Bounds {
	/// Bounds of a `width` x `height` canvas.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Spawn and centering point.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}

/// Build the node and edge arena for `entities`.
///
/// Entity nodes come first in input order, followed by tag nodes in the order
/// their tag is first encountered. Only tags carried by at least
/// `min_tag_entities` distinct entities produce a node and edges. `jitter` must
/// yield values in `[0, 1)` and decides spawn offsets around the center.
pub fn build(
	entities: &[TaggedEntity],
	bounds: Bounds,
	builder: &BuilderConfig,
	style: &StyleConfig,
	jitter: &mut impl FnMut() -> f64,
) -> Graph {
	let (cx, cy) = bounds.center();
	let mut spawn = || {
		let dx = (jitter() * 2.0 - 1.0) * builder.jitter_radius;
		let dy = (jitter() * 2.0 - 1.0) * builder.jitter_radius;
		(cx + dx, cy + dy)
	};

	let tag_lists: Vec<Vec<&str>> = entities.iter().map(|e| unique_tags(&e.tags)).collect();

	let mut counts: HashMap<&str, usize> = HashMap::new();
	for tags in &tag_lists {
		for &tag in tags {
			*counts.entry(tag).or_insert(0) += 1;
		}
	}

	let mut nodes: Vec<Node> = entities
		.iter()
		.map(|e| {
			let (x, y) = spawn();
			Node::entity(e.id, e.title.clone(), e.category, style.entity).at(x, y)
		})
		.collect();

	let mut tag_idx: HashMap<&str, NodeIdx> = HashMap::new();
	let mut edges = Vec::new();
	for (source, tags) in tag_lists.iter().enumerate() {
		for &tag in tags {
			if counts.get(tag).copied().unwrap_or(0) < builder.min_tag_entities {
				continue;
			}
			let target = *tag_idx.entry(tag).or_insert_with(|| {
				let (x, y) = spawn();
				nodes.push(Node::tag(tag, style.tag).at(x, y));
				nodes.len() - 1
			});
			edges.push(Edge {
				source,
				target,
				strength: builder.edge_strength,
			});
		}
	}

	debug!(
		"atlas-graph: built {} entity nodes, {} tag nodes, {} edges ({} tags dropped)",
		entities.len(),
		tag_idx.len(),
		edges.len(),
		counts.len() - tag_idx.len()
	);

	Graph { nodes, edges }
}

/// Tags of one entity with duplicates removed, first occurrence order.
fn unique_tags(tags: &[String]) -> Vec<&str> {
	let mut seen = Vec::with_capacity(tags.len());
	for tag in tags {
		if !seen.contains(&tag.as_str()) {
			seen.push(tag.as_str());
		}
	}
	seen
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::knowledge_graph::model::NodeKind;
	use crate::components::knowledge_graph::types::Category;

	/// Deterministic stand-in for `Math.random`.
	pub(crate) fn seeded(seed: u64) -> impl FnMut() -> f64 {
		let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
		move || {
			state = state
				.wrapping_mul(6364136223846793005)
				.wrapping_add(1442695040888963407);
			(state >> 11) as f64 / (1u64 << 53) as f64
		}
	}

	pub(crate) fn scenario() -> Vec<TaggedEntity> {
		vec![
			TaggedEntity::new(1, "Intro", Category::Video, &["AI", "ML"]),
			TaggedEntity::new(2, "Primer", Category::Book, &["AI", "Basics"]),
			TaggedEntity::new(3, "Notes", Category::Website, &["Basics"]),
		]
	}

	fn build_default(entities: &[TaggedEntity]) -> Graph {
		build(
			entities,
			Bounds::new(800.0, 600.0),
			&BuilderConfig::default(),
			&StyleConfig::default(),
			&mut seeded(7),
		)
	}

	fn edge_ids(graph: &Graph) -> Vec<(&str, &str)> {
		graph
			.edges
			.iter()
			.map(|e| {
				(
					graph.nodes[e.source].id.as_str(),
					graph.nodes[e.target].id.as_str(),
				)
			})
			.collect()
	}

	#[test]
	fn shared_tags_become_nodes_and_singletons_are_dropped() {
		let graph = build_default(&scenario());

		let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(
			ids,
			vec!["entity-1", "entity-2", "entity-3", "tag-AI", "tag-Basics"]
		);
		assert_eq!(
			edge_ids(&graph),
			vec![
				("entity-1", "tag-AI"),
				("entity-2", "tag-AI"),
				("entity-2", "tag-Basics"),
				("entity-3", "tag-Basics"),
			]
		);
		assert!(graph.find("tag-ML").is_none());
	}

	#[test]
	fn empty_input_builds_empty_graph() {
		let graph = build_default(&[]);
		assert!(graph.is_empty());
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn tag_used_by_n_entities_yields_n_edges() {
		let entities: Vec<TaggedEntity> = (0..5)
			.map(|i| TaggedEntity::new(i, format!("doc {i}"), Category::Document, &["shared"]))
			.collect();
		let graph = build_default(&entities);

		assert_eq!(graph.nodes.iter().filter(|n| n.is_tag()).count(), 1);
		assert_eq!(graph.edges.len(), 5);
		let tag = graph.find("tag-shared").unwrap();
		assert!(graph.edges.iter().all(|e| e.target == tag));
	}

	#[test]
	fn duplicate_tags_on_one_entity_count_once() {
		let entities = vec![
			TaggedEntity::new(1, "a", Category::Book, &["rust", "rust"]),
			TaggedEntity::new(2, "b", Category::Book, &["go"]),
		];
		let graph = build_default(&entities);

		assert_eq!(graph.nodes.len(), 2);
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn edges_are_bipartite() {
		let entities = vec![
			TaggedEntity::new(1, "a", Category::Book, &["x", "y", "z"]),
			TaggedEntity::new(2, "b", Category::Video, &["x", "y"]),
			TaggedEntity::new(3, "c", Category::Website, &["y", "z"]),
		];
		let graph = build_default(&entities);

		for edge in &graph.edges {
			assert!(matches!(
				graph.nodes[edge.source].kind,
				NodeKind::Entity { .. }
			));
			assert_eq!(graph.nodes[edge.target].kind, NodeKind::Tag);
			assert!(edge.strength > 0.0 && edge.strength <= 1.0);
		}
		for (idx, node) in graph.nodes.iter().enumerate() {
			if node.is_tag() {
				assert!(graph.edges.iter().any(|e| e.target == idx));
			}
		}
	}

	#[test]
	fn nodes_spawn_within_jitter_of_center() {
		let graph = build_default(&scenario());
		for node in &graph.nodes {
			assert!((node.x - 400.0).abs() <= 100.0);
			assert!((node.y - 300.0).abs() <= 100.0);
			assert_eq!((node.vx, node.vy), (0.0, 0.0));
		}
	}

	#[test]
	fn bodies_are_fixed_per_kind() {
		let style = StyleConfig::default();
		let graph = build_default(&scenario());
		for node in &graph.nodes {
			let body = if node.is_tag() { style.tag } else { style.entity };
			assert_eq!(node.radius(), body.radius);
			assert_eq!(node.mass(), body.mass);
			assert!(node.radius() > 0.0 && node.mass() > 0.0);
		}
	}

	#[test]
	fn raising_threshold_filters_more_tags() {
		let builder = BuilderConfig {
			min_tag_entities: 3,
			..BuilderConfig::default()
		};
		let graph = build(
			&scenario(),
			Bounds::new(800.0, 600.0),
			&builder,
			&StyleConfig::default(),
			&mut seeded(1),
		);
		assert_eq!(graph.nodes.len(), 3);
		assert!(graph.edges.is_empty());
	}

	#[test]
	fn empty_title_still_produces_a_node() {
		let graph = build_default(&[TaggedEntity::new(9, "", Category::Other, &[])]);
		assert_eq!(graph.nodes[0].label, "");
		assert_eq!(graph.nodes[0].entity_id(), Some(9));
	}
}
