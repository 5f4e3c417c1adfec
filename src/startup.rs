//! Command line surface and application wiring.

use crate::agent::HttpAgent;
use crate::config::Settings;
use crate::error::Result;
use crate::models::{Category, CategoryFilter};
use crate::services::{DownloadService, GenerationService, HttpFetcher};
use crate::state::{AppState, Gallery, Persistence};
use crate::storage::FileStore;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "ghibli-gallery", version)]
#[command(about = "Generate, browse and organize Ghibli-style artwork")]
pub struct Cli {
    /// Directory holding the stored gallery
    #[arg(long, env = "GHIBLI_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory downloads are saved to
    #[arg(long, env = "GHIBLI_DOWNLOAD_DIR", value_name = "DIR")]
    pub download_dir: Option<PathBuf>,

    /// Generation agent endpoint
    #[arg(long, env = "GHIBLI_AGENT_URL", value_name = "URL")]
    pub agent_url: Option<String>,

    /// Bearer token for the generation agent
    #[arg(long, env = "GHIBLI_AGENT_API_KEY", hide_env_values = true)]
    pub agent_api_key: Option<String>,

    /// Keep state for this run only
    #[arg(long)]
    pub no_persist: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse images, newest first
    Gallery {
        #[arg(short, long, default_value = "All")]
        category: CategoryFilter,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
        /// Show the built-in sample images instead
        #[arg(long)]
        sample: bool,
    },
    /// Show one image
    Show { id: String },
    /// Toggle an image's favorite flag
    Favorite { id: String },
    /// Generate a new image from a description
    Generate {
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
        #[arg(short, long, default_value = "Temples")]
        category: Category,
        /// Show the result without adding it to the gallery
        #[arg(long)]
        no_save: bool,
        /// Also save the image file locally
        #[arg(long)]
        download: bool,
    },
    /// Save an image file locally and record it in the history
    Download { id: String },
    /// Manage collections
    Collections {
        #[command(subcommand)]
        action: Option<CollectionCommand>,
    },
    /// Download history
    Downloads {
        #[command(subcommand)]
        action: Option<DownloadCommand>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CollectionCommand {
    List,
    Create {
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    Delete {
        id: String,
    },
    Show {
        id: String,
    },
    /// Add an image to a collection
    Add {
        collection: String,
        image: String,
    },
    /// Remove an image from a collection
    Remove {
        collection: String,
        image: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum DownloadCommand {
    List,
    Clear,
    /// Save a previously downloaded image again
    Redownload {
        id: String,
    },
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings::resolve(
            self.data_dir.clone(),
            self.download_dir.clone(),
            self.agent_url.clone(),
            self.agent_api_key.clone(),
            !self.no_persist,
        )
    }
}

/// Everything the handlers need.
pub struct App {
    pub state: AppState,
    pub generation: GenerationService,
    pub downloads: DownloadService,
}

/// Opens the gallery, falling back to session-only state when the store
/// cannot be opened.
pub fn open_gallery(settings: &Settings) -> Gallery {
    if !settings.persist {
        info!("Persistence disabled, state lives for this run only");
        return Gallery::in_memory();
    }

    match FileStore::open(&settings.data_dir) {
        Ok(store) => Gallery::open(Persistence::new(Box::new(store))),
        Err(e) => {
            warn!(
                "Durable storage unavailable at {}: {}",
                settings.data_dir.display(),
                e
            );
            Gallery::in_memory()
        }
    }
}

pub fn build_app(settings: &Settings) -> Result<App> {
    let state = AppState::new(open_gallery(settings));

    let agent = HttpAgent::new(settings.agent_endpoint.clone(), settings.agent_api_key.clone())?;
    let fetcher = HttpFetcher::new()?;

    Ok(App {
        generation: GenerationService::new(Arc::new(agent), state.gallery.clone()),
        downloads: DownloadService::new(
            Arc::new(fetcher),
            state.gallery.clone(),
            settings.download_dir.clone(),
        ),
        state,
    })
}

/// Runs a parsed command line against a freshly opened gallery.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings();
    let app = build_app(&settings).inspect_err(|e| eprintln!("Error: {}", e))?;

    let command = cli.command.unwrap_or(Command::Gallery {
        category: CategoryFilter::All,
        favorites: false,
        sample: false,
    });

    crate::ui::handle_command(&app, command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_with_category() {
        let cli = Cli::parse_from([
            "ghibli-gallery",
            "generate",
            "bamboo",
            "forest",
            "shrine",
            "--category",
            "coastal",
        ]);
        match cli.command {
            Some(Command::Generate {
                prompt, category, ..
            }) => {
                assert_eq!(prompt.join(" "), "bamboo forest shrine");
                assert_eq!(category, Category::Coastal);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn disabled_persistence_opens_session_gallery() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::resolve(Some(dir.path().to_path_buf()), None, None, None, false);
        assert!(!open_gallery(&settings).is_persistent());

        let settings = Settings::resolve(Some(dir.path().to_path_buf()), None, None, None, true);
        assert!(open_gallery(&settings).is_persistent());
    }
}
