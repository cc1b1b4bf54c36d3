//! UI components.

pub mod knowledge_graph;
