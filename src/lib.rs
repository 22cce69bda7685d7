//! Anonymous YouTube search proxy for the game bar overlay.
//!
//! A term comes in over HTTP, goes out to the provider, and comes back as a
//! short list of videos and playlists in the shape the overlay renders.

pub mod api;
pub mod config;
pub mod data_models;
pub mod error;
pub mod logging;
pub mod normalizer;
pub mod orchestrator;
pub mod provider;
