//! Handlers for user commands.
//!
//! Each command navigates the view state to its screen, performs the
//! mutation or service call, and prints the resulting screen. Failures are
//! recorded as the view's error message, which is shown after the screen.

use crate::error::{AppError, Result};
use crate::models::{Category, CategoryFilter};
use crate::startup::{App, CollectionCommand, Command, DownloadCommand};
use crate::state::view::visible_images;
use crate::state::Screen;
use crate::ui::render;
use log::{info, warn};

/// Runs one command and prints its screen followed by any error message.
pub async fn handle_command(app: &App, command: Command) -> Result<()> {
    app.state.view().dismiss_error();

    let outcome = dispatch(app, command).await;
    match &outcome {
        Ok(output) => print!("{}", output),
        Err(e) => app.state.view().set_error(e.to_string()),
    }

    if let Some(message) = app.state.view().take_error() {
        eprintln!("Error: {}", message);
    }
    outcome.map(|_| ())
}

/// Runs one command and returns the rendered screen.
pub async fn dispatch(app: &App, command: Command) -> Result<String> {
    match command {
        Command::Gallery {
            category,
            favorites,
            sample,
        } => Ok(show_gallery(app, category, favorites, sample)),
        Command::Show { id } => show_image(app, &id),
        Command::Favorite { id } => toggle_favorite(app, &id),
        Command::Generate {
            prompt,
            category,
            no_save,
            download,
        } => generate(app, &prompt.join(" "), category, !no_save, download).await,
        Command::Download { id } => {
            let (path, _) = app.downloads.download_image(&id).await?;
            Ok(format!("Saved to {}\n", path.display()))
        }
        Command::Collections { action } => {
            app.state.view().navigate(Screen::Collections);
            collections(app, action.unwrap_or(CollectionCommand::List))
        }
        Command::Downloads { action } => {
            app.state.view().navigate(Screen::Downloads);
            downloads(app, action.unwrap_or(DownloadCommand::List)).await
        }
    }
}

fn show_gallery(app: &App, category: CategoryFilter, favorites: bool, sample: bool) -> String {
    let mut view = app.state.view();
    view.navigate(Screen::Gallery);
    view.category_filter = category;
    view.favorites_only = favorites;
    view.use_sample_data = sample;

    let images = visible_images(&app.state.gallery(), &view);
    render::render_gallery(&images, category)
}

fn show_image(app: &App, id: &str) -> Result<String> {
    let gallery = app.state.gallery();
    let image = gallery
        .image(id)
        .ok_or_else(|| AppError::not_found("image", id))?;
    let containing: Vec<_> = gallery
        .collections()
        .iter()
        .filter(|c| c.contains(id))
        .collect();
    Ok(render::render_image(image, &containing))
}

fn toggle_favorite(app: &App, id: &str) -> Result<String> {
    let favorite = app
        .state
        .gallery()
        .toggle_favorite(id)
        .ok_or_else(|| AppError::not_found("image", id))?;

    Ok(if favorite {
        "Added to favorites\n".to_string()
    } else {
        "Removed from favorites\n".to_string()
    })
}

async fn generate(
    app: &App,
    prompt: &str,
    category: Category,
    save: bool,
    download: bool,
) -> Result<String> {
    app.state.view().navigate(Screen::Generate);

    let draft = app.generation.generate(prompt, category).await?;

    let mut output = render::render_draft(&draft, save);
    if save {
        let id = app.generation.save(draft.clone());
        info!("Saved generated image {}", id);
        app.state.view().navigate(Screen::Gallery);
    }

    // A failed download keeps the generated image and only reports the error.
    if download {
        match app.downloads.download_draft(&draft).await {
            Ok(path) => output.push_str(&format!("Saved to {}\n", path.display())),
            Err(e) => {
                warn!("Generated image kept, download failed: {}", e);
                app.state.view().set_error(e.to_string());
            }
        }
    }
    Ok(output)
}

fn collections(app: &App, action: CollectionCommand) -> Result<String> {
    let mut gallery = app.state.gallery();
    match action {
        CollectionCommand::List => Ok(render::render_collections(&gallery)),
        CollectionCommand::Create { name, description } => {
            let collection = gallery.create_collection(&name, description.as_deref())?;
            Ok(format!(
                "Created collection \"{}\" ({})\n",
                collection.name, collection.id
            ))
        }
        CollectionCommand::Delete { id } => {
            if !gallery.delete_collection(&id) {
                return Err(AppError::not_found("collection", id));
            }
            Ok("Collection deleted\n".to_string())
        }
        CollectionCommand::Show { id } => {
            let collection = gallery
                .collection(&id)
                .ok_or_else(|| AppError::not_found("collection", id.as_str()))?;
            Ok(render::render_collection(&gallery, collection))
        }
        CollectionCommand::Add { collection, image } => {
            if !gallery.add_to_collection(&collection, &image) {
                return Err(AppError::not_found("collection", collection));
            }
            Ok("Added to collection\n".to_string())
        }
        CollectionCommand::Remove { collection, image } => {
            if !gallery.remove_from_collection(&collection, &image) {
                return Err(AppError::not_found("collection", collection));
            }
            Ok("Removed from collection\n".to_string())
        }
    }
}

async fn downloads(app: &App, action: DownloadCommand) -> Result<String> {
    match action {
        DownloadCommand::List => Ok(render::render_downloads(app.state.gallery().downloads())),
        DownloadCommand::Clear => {
            let cleared = app.state.gallery().clear_downloads();
            Ok(format!("Cleared {} downloads\n", cleared))
        }
        DownloadCommand::Redownload { id } => {
            let path = app.downloads.redownload(&id).await?;
            Ok(format!("Saved to {}\n", path.display()))
        }
    }
}
