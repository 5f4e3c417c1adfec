//! Service for saving gallery images to the local filesystem.
//!
//! A history record is added only after the file has been written.

use crate::config::{HTTP_TIMEOUT, USER_AGENT};
use crate::error::{AppError, DownloadError, Result};
use crate::file_utils::download_path;
use crate::models::{DownloadRecord, Image};
use crate::sample::sample_images;
use crate::state::{Gallery, lock};
use async_trait::async_trait;
use log::{error, info};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Source of image bytes.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, DownloadError>;
}

/// Fetches images over HTTP.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> std::result::Result<Self, DownloadError> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> std::result::Result<Vec<u8>, DownloadError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DownloadError::Status(response.status().as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Service for downloading images and keeping the download history.
#[derive(Clone)]
pub struct DownloadService {
    fetcher: Arc<dyn ImageFetcher>,
    gallery: Arc<Mutex<Gallery>>,
    target_dir: PathBuf,
}

impl DownloadService {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        gallery: Arc<Mutex<Gallery>>,
        target_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            fetcher,
            gallery,
            target_dir: target_dir.into(),
        }
    }

    /// Downloads a gallery image and records it in the history.
    ///
    /// Built-in sample images can be downloaded too and are recorded the same
    /// way.
    pub async fn download_image(&self, image_id: &str) -> Result<(PathBuf, DownloadRecord)> {
        let stored = lock(&self.gallery).image(image_id).cloned();
        let image = stored
            .or_else(|| sample_images().into_iter().find(|image| image.id == image_id))
            .ok_or_else(|| AppError::not_found("image", image_id))?;

        let path = self.save(&image.image_url, &image.title).await?;
        let record = lock(&self.gallery).record_download(&image).clone();
        Ok((path, record))
    }

    /// Downloads again from a history record without adding a new one.
    pub async fn redownload(&self, record_id: &str) -> Result<PathBuf> {
        let record = lock(&self.gallery)
            .download(record_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("download", record_id))?;

        Ok(self.save(&record.image_url, &record.title).await?)
    }

    /// Saves a generated image that is not in the gallery yet. Not recorded.
    pub async fn download_draft(&self, draft: &Image) -> Result<PathBuf> {
        Ok(self.save(&draft.image_url, &draft.title).await?)
    }

    async fn save(&self, url: &str, title: &str) -> std::result::Result<PathBuf, DownloadError> {
        info!("Downloading \"{}\" from {}", title, url);

        let result = self.fetch_and_write(url, title).await;
        match &result {
            Ok(path) => info!("Saved \"{}\" to {}", title, path.display()),
            Err(e) => error!("Download failed: {}", e),
        }
        result
    }

    async fn fetch_and_write(
        &self,
        url: &str,
        title: &str,
    ) -> std::result::Result<PathBuf, DownloadError> {
        let bytes = self.fetcher.fetch(url).await?;

        let dir = async_std::path::PathBuf::from(self.target_dir.clone());
        async_std::fs::create_dir_all(&dir).await?;

        let mut copy = 0;
        let path = loop {
            let candidate =
                async_std::path::PathBuf::from(download_path(&self.target_dir, title, copy));
            if !candidate.exists().await {
                break candidate;
            }
            copy += 1;
        };
        async_std::fs::write(&path, bytes).await?;

        Ok(path.into())
    }
}
