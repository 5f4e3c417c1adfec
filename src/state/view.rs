//! Transient selection state of the views. Never persisted.

use crate::models::{CategoryFilter, Image};
use crate::sample::sample_images;
use crate::state::Gallery;
use strum::{Display, EnumString};

/// The four navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Screen {
    #[default]
    Gallery,
    Generate,
    Collections,
    Downloads,
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub screen: Screen,
    pub category_filter: CategoryFilter,
    pub favorites_only: bool,
    pub use_sample_data: bool,
    pub error_message: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error_message = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error_message = None;
    }

    /// Takes the pending error message, leaving none behind.
    pub fn take_error(&mut self) -> Option<String> {
        self.error_message.take()
    }
}

/// Images the gallery screen shows: newest first, filtered by category and
/// optionally by the favorite flag.
///
/// With sample data on, the built-in samples replace the stored images.
pub fn visible_images(gallery: &Gallery, view: &ViewState) -> Vec<Image> {
    let keep = |image: &Image| !view.favorites_only || image.is_favorite;

    if view.use_sample_data {
        let mut images = sample_images();
        images.retain(|image| view.category_filter.matches(image) && keep(image));
        images.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        return images;
    }

    gallery
        .filtered_images(view.category_filter)
        .into_iter()
        .filter(|&image| keep(image))
        .cloned()
        .collect()
}
