//! Text rendering of the four screens.
//!
//! Every renderer returns a `String` so the views can be checked without a
//! terminal.

use crate::models::{Category, CategoryFilter, Collection, DownloadRecord, Image};
use crate::state::Gallery;
use chrono::{DateTime, Utc};
use std::fmt::Write;

const FAVORITE: &str = "♥";
const NOT_FAVORITE: &str = "♡";

fn heart(image: &Image) -> &'static str {
    if image.is_favorite { FAVORITE } else { NOT_FAVORITE }
}

fn short_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y").to_string()
}

/// Category tabs with the active one bracketed.
fn category_tabs(active: CategoryFilter) -> String {
    std::iter::once(CategoryFilter::All)
        .chain(Category::all().map(CategoryFilter::Only))
        .map(|tab| {
            if tab == active {
                format!("[{}]", tab)
            } else {
                tab.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_gallery(images: &[Image], filter: CategoryFilter) -> String {
    let mut out = String::from("Gallery\n");
    let _ = writeln!(out, "{}\n", category_tabs(filter));

    if images.is_empty() {
        out.push_str("No images yet\nGenerate your first Ghibli-style artwork to get started\n");
        return out;
    }

    for image in images {
        let _ = writeln!(
            out,
            "{} {}  [{}]  {}  ({})",
            heart(image),
            image.title,
            image.category,
            short_date(&image.created_at),
            image.id
        );
    }
    out
}

pub fn render_image(image: &Image, collections: &[&Collection]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", heart(image), image.title);
    let _ = writeln!(out, "Category:  {}", image.category);
    let _ = writeln!(out, "Created:   {}", short_date(&image.created_at));
    let _ = writeln!(out, "URL:       {}", image.image_url);
    let _ = writeln!(out, "ID:        {}", image.id);
    if !collections.is_empty() {
        let names: Vec<&str> = collections.iter().map(|c| c.name.as_str()).collect();
        let _ = writeln!(out, "In:        {}", names.join(", "));
    }
    let _ = writeln!(out, "\n{}", image.enhanced_prompt);
    out
}

/// The generate screen after a successful generation.
pub fn render_draft(draft: &Image, saved: bool) -> String {
    let mut out = String::from("Generated artwork\n\n");
    out.push_str(&render_image(draft, &[]));
    if saved {
        out.push_str("\nSaved to gallery\n");
    }
    out
}

pub fn render_collections(gallery: &Gallery) -> String {
    let mut out = String::from("Collections\n\n");

    if gallery.collections().is_empty() {
        out.push_str("No collections yet\nCreate collections to organize your favorite artwork\n");
        return out;
    }

    for collection in gallery.collections() {
        let count = gallery.collection_images(&collection.id).len();
        let _ = writeln!(
            out,
            "{}  ({} image{})  {}",
            collection.name,
            count,
            if count == 1 { "" } else { "s" },
            collection.id
        );
        if let Some(description) = &collection.description {
            let _ = writeln!(out, "    {}", description);
        }
    }
    out
}

pub fn render_collection(gallery: &Gallery, collection: &Collection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", collection.name);
    if let Some(description) = &collection.description {
        let _ = writeln!(out, "{}", description);
    }
    let _ = writeln!(out, "Created {}\n", short_date(&collection.created_at));

    let images = gallery.collection_images(&collection.id);
    if images.is_empty() {
        out.push_str("No images in this collection\n");
    }
    for image in images {
        let _ = writeln!(out, "{} {}  ({})", heart(image), image.title, image.id);
    }
    out
}

pub fn render_downloads(downloads: &[DownloadRecord]) -> String {
    let mut out = String::from("Downloads\n\n");

    if downloads.is_empty() {
        out.push_str("No downloads yet\nImages you download will appear here\n");
        return out;
    }

    for record in downloads {
        let _ = writeln!(
            out,
            "{}  Downloaded {}  ({})",
            record.title,
            short_date(&record.downloaded_at),
            record.id
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_image() -> Image {
        Image {
            id: "img-1".into(),
            image_url: "https://x/img.png".into(),
            title: "Shrine".into(),
            enhanced_prompt: "a shrine".into(),
            category: Category::Temples,
            created_at: Utc.with_ymd_and_hms(2025, 2, 3, 12, 0, 0).unwrap(),
            is_favorite: true,
        }
    }

    #[test]
    fn gallery_lists_images_with_active_tab() {
        let out = render_gallery(&[fixed_image()], CategoryFilter::Only(Category::Temples));
        assert!(out.contains("All  [Temples]  Countryside"));
        assert!(out.contains("♥ Shrine  [Temples]  Feb 3, 2025  (img-1)"));
    }

    #[test]
    fn empty_screens_explain_themselves() {
        assert!(render_gallery(&[], CategoryFilter::All).contains("No images yet"));
        assert!(render_downloads(&[]).contains("No downloads yet"));
        assert!(render_collections(&Gallery::in_memory()).contains("No collections yet"));
    }

    #[test]
    fn downloads_show_date() {
        let mut record = DownloadRecord::snapshot(&fixed_image());
        record.downloaded_at = Utc.with_ymd_and_hms(2025, 11, 20, 8, 0, 0).unwrap();
        assert!(render_downloads(&[record]).contains("Shrine  Downloaded Nov 20, 2025"));
    }

    #[test]
    fn collections_count_resolved_images() {
        let mut gallery = Gallery::in_memory();
        gallery.add_image(fixed_image());
        let id = gallery.create_collection("Trip", Some("Spring")).unwrap().id.clone();
        gallery.add_to_collection(&id, "img-1");
        gallery.add_to_collection(&id, "unknown");

        let out = render_collections(&gallery);
        assert!(out.contains("Trip  (1 image)"));
        assert!(out.contains("    Spring"));
    }
}
