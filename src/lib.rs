//! Gallery of AI-generated Ghibli-style artwork.
//!
//! Images, collections and download history are held by a single
//! [`state::Gallery`] and mirrored into a durable key-value store under three
//! independent keys.

pub mod agent;
pub mod config;
pub mod error;
pub mod file_utils;
pub mod models;
pub mod sample;
pub mod services;
pub mod startup;
pub mod state;
pub mod storage;
pub mod ui;

pub use error::{AppError, Result};
