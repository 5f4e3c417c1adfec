//! Persisted gallery records.
//!
//! Field names on the wire follow the stored JSON layout, so blobs written by
//! earlier releases keep loading.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Scene category of a generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    Temples,
    Countryside,
    Cities,
    Coastal,
    Other,
}

impl Category {
    /// All categories in display order.
    pub fn all() -> impl Iterator<Item = Category> {
        Category::iter()
    }
}

/// Stored records may carry whatever category string the agent returned.
/// Anything unrecognised loads as `Other` instead of failing the whole list.
impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Category::from_str(raw.trim()).unwrap_or(Category::Other))
    }
}

/// Category selection on the gallery screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, image: &Image) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => image.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Category::from_str(s).map(CategoryFilter::Only)
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => write!(f, "{}", category),
        }
    }
}

/// A generated image saved to the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub title: String,
    pub enhanced_prompt: String,
    pub category: Category,
    #[serde(rename = "generatedAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "isFavorite", default)]
    pub is_favorite: bool,
}

impl Image {
    /// Creates a new, non-favorite image with a fresh id stamped now.
    pub fn new(
        image_url: impl Into<String>,
        title: impl Into<String>,
        enhanced_prompt: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: new_id(),
            image_url: image_url.into(),
            title: title.into(),
            enhanced_prompt: enhanced_prompt.into(),
            category,
            created_at: Utc::now(),
            is_favorite: false,
        }
    }
}

/// A named, ordered group of image ids.
///
/// Membership is a weak reference: ids are not checked against the gallery
/// and may repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "imageIds", default)]
    pub image_ids: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Collection {
    pub fn contains(&self, image_id: &str) -> bool {
        self.image_ids.iter().any(|id| id == image_id)
    }
}

/// Snapshot of an image taken when it was downloaded.
///
/// Title and URL are owned copies; later edits to the image do not reach them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub id: String,
    #[serde(rename = "imageId")]
    pub image_id: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub title: String,
    #[serde(rename = "downloadedAt")]
    pub downloaded_at: DateTime<Utc>,
}

impl DownloadRecord {
    pub fn snapshot(image: &Image) -> Self {
        Self {
            id: new_id(),
            image_id: image.id.clone(),
            image_url: image.image_url.clone(),
            title: image.title.clone(),
            downloaded_at: Utc::now(),
        }
    }
}

/// Generates a unique record identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("temples".parse::<Category>().unwrap(), Category::Temples);
        assert_eq!(Category::Coastal.to_string(), "Coastal");
        assert!("Forest".parse::<Category>().is_err());
        assert_eq!(Category::all().count(), 5);
    }

    #[test]
    fn stored_categories_load_leniently() {
        let parsed: Vec<Category> =
            serde_json::from_str(r#"["Temples", "coastal", "temple", "Forest"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![Category::Temples, Category::Coastal, Category::Other, Category::Other]
        );
    }

    #[test]
    fn filter_parses_all_and_categories() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "cities".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Cities)
        );
    }

    #[test]
    fn image_reads_legacy_layout() {
        let raw = r#"{
            "id": "1700000000000-abc123xyz",
            "imageUrl": "https://x/img.png",
            "title": "Shrine",
            "enhanced_prompt": "a shrine",
            "category": "Temples",
            "generatedAt": "2024-02-14T10:00:00.000Z",
            "collectionIds": ["c1"]
        }"#;
        let image: Image = serde_json::from_str(raw).unwrap();
        assert_eq!(image.id, "1700000000000-abc123xyz");
        assert_eq!(image.category, Category::Temples);
        assert!(!image.is_favorite);
    }

    #[test]
    fn collection_omits_missing_description() {
        let collection = Collection {
            id: "c1".into(),
            name: "Trip".into(),
            description: None,
            image_ids: vec![],
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&collection).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("imageIds").unwrap().as_array().unwrap().is_empty());
    }

    #[test]
    fn download_snapshot_copies_fields() {
        let mut image = Image::new("https://x/a.png", "Old title", "p", Category::Other);
        let record = DownloadRecord::snapshot(&image);
        image.title = "New title".into();

        assert_eq!(record.title, "Old title");
        assert_eq!(record.image_id, image.id);
        assert_ne!(record.id, image.id);
    }
}
