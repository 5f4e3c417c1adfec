//! Service layer for business logic.
//!
//! Separates the asynchronous collaborators (generation agent, image fetches)
//! from the UI handlers for better testability.

pub mod download_service;
pub mod generation_service;

pub use download_service::{DownloadService, HttpFetcher, ImageFetcher};
pub use generation_service::GenerationService;
