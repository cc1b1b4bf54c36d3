//! Colors for the knowledge graph canvas and legend.

use super::model::NodeKind;
use super::types::Category;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `0.0..=1.0`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Per-category fill colors for entity nodes.
#[derive(Clone, Debug)]
pub struct CategoryPalette {
	/// [`Category::Video`].
	pub video: Color,
	/// [`Category::Book`].
	pub book: Color,
	/// [`Category::Website`].
	pub website: Color,
	/// [`Category::Document`].
	pub document: Color,
	/// [`Category::Other`].
	pub other: Color,
}

impl CategoryPalette {
	/// Fill color for `category`.
	pub fn get(&self, category: Category) -> Color {
		match category {
			Category::Video => self.video,
			Category::Book => self.book,
			Category::Website => self.website,
			Category::Document => self.document,
			Category::Other => self.other,
		}
	}
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill.
	pub background: Color,
	/// Edge stroke.
	pub edge: Color,
	/// Edges touching the hovered node.
	pub edge_highlight: Color,
	/// Tag node fill.
	pub tag: Color,
	/// Document node fills.
	pub categories: CategoryPalette,
	/// Label text.
	pub label: Color,
	/// Ring drawn around hovered and selected nodes.
	pub ring: Color,
}

impl Theme {
	/// Near-black dashboard theme.
	pub fn dashboard() -> Self {
		Self {
			background: Color::rgb(10, 10, 10),
			edge: Color::rgba(75, 85, 99, 0.3),
			edge_highlight: Color::rgba(147, 197, 253, 0.6),
			tag: Color::rgb(251, 191, 36),
			categories: CategoryPalette {
				video: Color::rgb(192, 132, 252),
				book: Color::rgb(96, 165, 250),
				website: Color::rgb(74, 222, 128),
				document: Color::rgb(251, 146, 60),
				other: Color::rgb(156, 163, 175),
			},
			label: Color::rgb(255, 255, 255),
			ring: Color::rgba(255, 255, 255, 0.8),
		}
	}

	/// Fill color for a node of the given kind.
	pub fn node_color(&self, kind: &NodeKind) -> Color {
		match kind {
			NodeKind::Entity { category, .. } => self.categories.get(*category),
			NodeKind::Tag => self.tag,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::dashboard()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_switches_on_alpha() {
		assert_eq!(Color::rgb(251, 191, 36).to_css(), "#fbbf24");
		assert_eq!(
			Color::rgb(10, 20, 30).with_alpha(0.5).to_css(),
			"rgba(10, 20, 30, 0.5)"
		);
	}

	#[test]
	fn lighten_moves_toward_white() {
		assert_eq!(Color::rgb(0, 100, 255).lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(Color::rgb(0, 100, 255).lighten(0.0), Color::rgb(0, 100, 255));
	}

	#[test]
	fn tags_and_categories_are_distinguishable() {
		let theme = Theme::default();
		let tag = theme.node_color(&NodeKind::Tag);
		for category in Category::ALL {
			let entity = theme.node_color(&NodeKind::Entity {
				entity_id: 1,
				category,
			});
			assert_ne!(entity, tag);
		}
	}
}
