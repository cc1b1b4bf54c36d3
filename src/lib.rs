//! atlas-graph: Interactive knowledge graph of a tagged document library.
//!
//! This crate provides a WASM-based canvas component that lays out documents
//! and their shared tags with a damped force simulation, supporting node
//! dragging, pan/zoom, hover highlighting, and document selection.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::knowledge_graph::{
	Category, GraphConfig, GraphLegend, KnowledgeGraphCanvas, LibraryData, TaggedEntity, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("atlas-graph: logging initialized");
}

/// Text content of the `<script>` element with the given id.
fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load the library from a script element with id="graph-data".
/// Expected format: `{ "entities": [...] }` or a bare array of entities.
fn load_entities() -> Vec<TaggedEntity> {
	let Some(json_text) = script_text("graph-data") else {
		warn!("atlas-graph: no graph-data element, starting empty");
		return Vec::new();
	};

	match serde_json::from_str::<LibraryData>(&json_text) {
		Ok(data) => {
			let entities = data.into_entities();
			info!("atlas-graph: loaded {} entities", entities.len());
			entities
		}
		Err(e) => {
			warn!("atlas-graph: failed to parse graph data: {}", e);
			Vec::new()
		}
	}
}

/// Optional overrides from a script element with id="graph-config".
fn load_config() -> GraphConfig {
	let Some(json_text) = script_text("graph-config") else {
		return GraphConfig::default();
	};

	serde_json::from_str(&json_text).unwrap_or_else(|e| {
		warn!("atlas-graph: failed to parse graph config, using defaults: {}", e);
		GraphConfig::default()
	})
}

/// What the selection panel shows for a node.
#[derive(Clone, Debug, PartialEq)]
struct SelectionInfo {
	title: String,
	kind: &'static str,
	detail: String,
}

/// Describe the node with the given id (`entity-<id>` or `tag-<text>`).
/// Entities list their tags, tags count the entities that carry them.
fn describe_selection(node_id: &str, entities: &[TaggedEntity]) -> Option<SelectionInfo> {
	if let Some(tag) = node_id.strip_prefix("tag-") {
		let count = entities
			.iter()
			.filter(|e| e.tags.iter().any(|t| t == tag))
			.count();
		return Some(SelectionInfo {
			title: tag.to_string(),
			kind: "Tag",
			detail: match count {
				1 => "1 document".to_string(),
				n => format!("{n} documents"),
			},
		});
	}
	let id: u64 = node_id.strip_prefix("entity-")?.parse().ok()?;
	let entity = entities.iter().find(|e| e.id == id)?;
	let title = if entity.title.is_empty() {
		"Untitled".to_string()
	} else {
		entity.title.clone()
	};
	Some(SelectionInfo {
		title,
		kind: entity.category.as_str(),
		detail: entity.tags.join(", "),
	})
}

/// Main application component.
/// Loads the library from the DOM and renders the knowledge graph with a
/// legend and a panel for the selected document or tag.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let entities = load_entities();
	let config = load_config();
	let lookup = entities.clone();
	let data = Signal::derive(move || entities.clone());
	let selected = RwSignal::new(None::<String>);

	let panel = move || {
		let info = selected
			.get()
			.and_then(|id| describe_selection(&id, &lookup))?;
		Some(view! {
			<div class="graph-selection">
				<h3>{info.title}</h3>
				<p>"Type: " {info.kind}</p>
				<p class="tags">{info.detail}</p>
				<button on:click=move |_| selected.set(None)>"Close"</button>
			</div>
		})
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Knowledge Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<KnowledgeGraphCanvas
				data=data
				config=config
				on_select=move |id: String| selected.set(Some(id))
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Knowledge Graph"</h1>
				<GraphLegend />
			</div>
			{panel}
			<p class="graph-hint">"Drag nodes to reorganize. Click a node to select it. Scroll to zoom."</p>
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn library() -> Vec<TaggedEntity> {
		vec![
			TaggedEntity::new(1, "Intro to ML", Category::Video, &["AI", "ML"]),
			TaggedEntity::new(2, "", Category::Book, &["AI"]),
		]
	}

	#[test]
	fn selected_tag_reports_type_tag() {
		let info = describe_selection("tag-AI", &library()).unwrap();
		assert_eq!(info.title, "AI");
		assert_eq!(info.kind, "Tag");
		assert_eq!(info.detail, "2 documents");
	}

	#[test]
	fn selected_entity_reports_category_and_tags() {
		let info = describe_selection("entity-1", &library()).unwrap();
		assert_eq!(info.title, "Intro to ML");
		assert_eq!(info.kind, Category::Video.as_str());
		assert_eq!(info.detail, "AI, ML");
		assert_eq!(describe_selection("entity-2", &library()).unwrap().title, "Untitled");
	}

	#[test]
	fn unknown_selection_shows_nothing() {
		assert_eq!(describe_selection("entity-9", &library()), None);
		assert_eq!(describe_selection("entity-x", &library()), None);
		assert_eq!(describe_selection("other", &library()), None);
	}
}
