//! State management for the gallery application.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub mod gallery;
pub mod persistence;
pub mod view;

pub use gallery::Gallery;
pub use persistence::{Persistence, Slot, Snapshot};
pub use view::{Screen, ViewState};

/// Application-wide state container handed to the views and services.
#[derive(Clone)]
pub struct AppState {
    pub gallery: Arc<Mutex<Gallery>>,
    pub view: Arc<Mutex<ViewState>>,
}

impl AppState {
    pub fn new(gallery: Gallery) -> Self {
        Self {
            gallery: Arc::new(Mutex::new(gallery)),
            view: Arc::new(Mutex::new(ViewState::new())),
        }
    }

    pub fn gallery(&self) -> MutexGuard<'_, Gallery> {
        lock(&self.gallery)
    }

    pub fn view(&self) -> MutexGuard<'_, ViewState> {
        lock(&self.view)
    }
}

/// Locks shared state, recovering the data if a previous holder panicked.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
