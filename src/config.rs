//! Application configuration constants and runtime settings.

use std::path::PathBuf;
use std::time::Duration;

/// Durable storage key for the image records.
pub const IMAGES_KEY: &str = "ghibli_images";
/// Durable storage key for the collection records.
pub const COLLECTIONS_KEY: &str = "ghibli_collections";
/// Durable storage key for the download history.
pub const DOWNLOADS_KEY: &str = "ghibli_downloads";

/// Identifier of the generation agent every request is addressed to.
pub const AGENT_ID: &str = "698e1604b7f596d9c48de34d";

/// Prefix of the per-request session correlation token.
pub const SESSION_PREFIX: &str = "ghibli-session-";

/// Agent endpoint used when nothing else is configured.
pub const DEFAULT_AGENT_ENDPOINT: &str = "http://localhost:3000/api/agent";

/// Title given to generated images whose metadata carries none.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Extension appended to every downloaded file.
pub const DOWNLOAD_EXTENSION: &str = "png";

/// Directory name used under the platform data directory.
pub const APP_DIR_NAME: &str = "ghibli-gallery";

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(120);
pub const USER_AGENT: &str = concat!("ghibli-gallery/", env!("CARGO_PKG_VERSION"));

/// Runtime settings resolved from command line flags and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub download_dir: PathBuf,
    pub agent_endpoint: String,
    pub agent_api_key: Option<String>,
    pub persist: bool,
}

impl Settings {
    /// Builds settings, filling unset directories with platform defaults.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        download_dir: Option<PathBuf>,
        agent_endpoint: Option<String>,
        agent_api_key: Option<String>,
        persist: bool,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let download_dir = download_dir
            .or_else(|| dirs::download_dir().map(|dir| dir.join(APP_DIR_NAME)))
            .unwrap_or_else(|| data_dir.join("downloads"));

        Self {
            data_dir,
            download_dir,
            agent_endpoint: agent_endpoint.unwrap_or_else(|| DEFAULT_AGENT_ENDPOINT.to_string()),
            agent_api_key: agent_api_key.filter(|key| !key.trim().is_empty()),
            persist,
        }
    }
}

/// Platform data directory for the gallery, falling back to the working directory.
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
