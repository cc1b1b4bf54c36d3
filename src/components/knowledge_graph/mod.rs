//! Knowledge graph visualization component.
//!
//! Turns a library of tagged documents into a bipartite graph (one node per
//! document, one per tag shared by at least two documents) and renders it on
//! an HTML canvas with:
//! - A damped force layout that pauses once it settles
//! - Node dragging, canvas panning, and zoom-to-cursor
//! - Hover highlighting and a selection callback for document nodes
//! - Configurable physics, sizing, and theming
//!
//! # Example
//!
//! ```ignore
//! use atlas_graph::{Category, KnowledgeGraphCanvas, TaggedEntity};
//!
//! let entities = vec![
//!     TaggedEntity::new(1, "Intro to ML", Category::Video, &["AI", "ML"]),
//!     TaggedEntity::new(2, "Deep Learning", Category::Book, &["AI", "Basics"]),
//! ];
//!
//! view! {
//!     <KnowledgeGraphCanvas
//!         data=Signal::derive(move || entities.clone())
//!         on_activate=move |id: u64| log::info!("open {id}")
//!         fullscreen=true
//!     />
//! }
//! ```

mod builder;
mod component;
pub mod config;
mod legend;
pub mod model;
mod render;
pub mod simulation;
pub mod state;
pub mod theme;
mod types;
pub mod viewport;

pub use builder::{Bounds, build};
pub use component::KnowledgeGraphCanvas;
pub use config::GraphConfig;
pub use legend::GraphLegend;
pub use state::{GraphEvent, KnowledgeGraphState};
pub use theme::Theme;
pub use types::{Category, LibraryData, TaggedEntity};
