//! Color key overlay for the knowledge graph.

use leptos::prelude::*;

use super::theme::{Color, Theme};
use super::types::Category;

#[component]
fn LegendRow(color: Color, label: &'static str) -> impl IntoView {
	view! {
		<div class="graph-legend-row">
			<span class="graph-legend-swatch" style:background-color=color.to_css()></span>
			<span>{label}</span>
		</div>
	}
}

/// One swatch per entity category plus one for tags, colored from `theme`.
#[component]
pub fn GraphLegend(#[prop(optional)] theme: Option<Theme>) -> impl IntoView {
	let theme = theme.unwrap_or_default();
	let rows = Category::ALL
		.into_iter()
		.map(|category| {
			let color = theme.categories.get(category);
			view! { <LegendRow color=color label=category.legend_label() /> }
		})
		.collect_view();

	view! {
		<div class="graph-legend">
			{rows}
			<LegendRow color=theme.tag label="Tags" />
		</div>
	}
}
