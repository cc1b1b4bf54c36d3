//! Library records consumed by the knowledge graph.

use serde::Deserialize;

/// Kind of material an entity represents. Only affects render color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
	/// Recorded talks, lectures, and clips.
	Video,
	/// Books and chapters.
	Book,
	/// Web pages and articles.
	Website,
	/// Papers, notes, and anything uncategorized.
	#[default]
	Document,
	/// Any category string the dashboard does not know about.
	#[serde(other)]
	Other,
}

impl Category {
	/// Every category, in legend order.
	pub const ALL: [Category; 5] = [
		Category::Video,
		Category::Book,
		Category::Website,
		Category::Document,
		Category::Other,
	];

	/// Lowercase name as it appears in library records.
	pub fn as_str(self) -> &'static str {
		match self {
			Category::Video => "video",
			Category::Book => "book",
			Category::Website => "website",
			Category::Document => "document",
			Category::Other => "other",
		}
	}

	/// Human readable plural used in the legend.
	pub fn legend_label(self) -> &'static str {
		match self {
			Category::Video => "Videos",
			Category::Book => "Books",
			Category::Website => "Websites",
			Category::Document => "Documents",
			Category::Other => "Other",
		}
	}
}

/// A document in the library together with its free-text tags.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TaggedEntity {
	/// Stable identifier assigned by the backend.
	pub id: u64,
	/// Display title. May be empty; the node is still drawn and hit-testable.
	#[serde(default)]
	pub title: String,
	/// Material category. Library records call this field `type`.
	#[serde(default, alias = "type")]
	pub category: Category,
	/// Free-form tags; order and duplicates are tolerated.
	#[serde(default)]
	pub tags: Vec<String>,
}

impl TaggedEntity {
	/// Convenience constructor for hosts and tests.
	pub fn new(id: u64, title: impl Into<String>, category: Category, tags: &[&str]) -> Self {
		Self {
			id,
			title: title.into(),
			category,
			tags: tags.iter().map(|t| t.to_string()).collect(),
		}
	}
}

/// Payload embedded in the page for the standalone app.
///
/// Accepts either `{"entities": [...]}` or a bare array of entities.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum LibraryData {
	/// `{"entities": [...]}`.
	Wrapped {
		/// The library records.
		#[serde(default)]
		entities: Vec<TaggedEntity>,
	},
	/// `[...]`.
	Bare(Vec<TaggedEntity>),
}

impl Default for LibraryData {
	fn default() -> Self {
		LibraryData::Bare(Vec::new())
	}
}

impl LibraryData {
	/// The records, whichever shape they arrived in.
	pub fn into_entities(self) -> Vec<TaggedEntity> {
		match self {
			LibraryData::Wrapped { entities } | LibraryData::Bare(entities) => entities,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_material_records_with_type_alias() {
		let json = r#"[
			{"id": 1, "title": "Intro to ML", "type": "video", "tags": ["AI", "ML"], "date": "2024-01-01"},
			{"id": 2, "title": "Deep Learning", "category": "book", "tags": ["AI"]}
		]"#;
		let entities = serde_json::from_str::<LibraryData>(json)
			.unwrap()
			.into_entities();

		assert_eq!(entities.len(), 2);
		assert_eq!(entities[0].category, Category::Video);
		assert_eq!(entities[0].tags, vec!["AI", "ML"]);
		assert_eq!(entities[1].category, Category::Book);
	}

	#[test]
	fn malformed_records_fall_back_to_defaults() {
		let json = r#"{"entities": [{"id": 7}, {"id": 8, "type": "podcast", "title": ""}]}"#;
		let entities = serde_json::from_str::<LibraryData>(json)
			.unwrap()
			.into_entities();

		assert_eq!(entities[0].title, "");
		assert!(entities[0].tags.is_empty());
		assert_eq!(entities[0].category, Category::Document);
		assert_eq!(entities[1].category, Category::Other);
	}

	#[test]
	fn record_names_parse_back() {
		for category in Category::ALL {
			let json = format!("\"{}\"", category.as_str());
			assert_eq!(serde_json::from_str::<Category>(&json).unwrap(), category);
		}
	}

	#[test]
	fn wrapped_payload_without_entities_is_empty() {
		let data: LibraryData = serde_json::from_str("{}").unwrap();
		assert!(data.into_entities().is_empty());
	}
}
