//! Marquee Core - Playback controller for the Marquee video player
//!
//! This crate holds the player logic that sits between the user and an
//! adaptive streaming engine:
//! - Loading playlist videos, one manifest at a time
//! - Transport controls (play/pause, volume, mute, seek, speed, fullscreen)
//! - Keyboard shortcuts
//! - Autoload of a video's declared successor
//! - A playback error channel for fatal engine failures
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Marquee Core                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │                                                              │
//! │   ┌────────────┐      ┌──────────────────┐     ┌──────────┐  │
//! │   │  Playlist  │─────▶│    Playback      │────▶│ Controls │  │
//! │   └────────────┘      │   Controller     │     │   View   │  │
//! │                       └───┬─────┬────┬───┘     └──────────┘  │
//! │                           │     │    │                       │
//! │            ┌──────────────┘     │    └──────────┐            │
//! │            ▼                    ▼               ▼            │
//! │   ┌────────────────┐   ┌──────────────┐  ┌──────────────┐    │
//! │   │   Streaming    │   │    Media     │  │  Fullscreen  │    │
//! │   │    Engine      │   │   Element    │  │  Controller  │    │
//! │   └────────────────┘   └──────────────┘  └──────────────┘    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every collaborator is a trait, so the controller runs unchanged against
//! the browser bindings in `marquee-wasm` and against test doubles.

pub mod config;
pub mod controller;
pub mod controls;
pub mod engine;
pub mod error;
pub mod format;
pub mod fullscreen;
pub mod media;
pub mod playlist;
pub mod types;
pub mod view;

pub use config::PlayerConfig;
pub use controller::PlaybackController;
pub use controls::ControlAction;
pub use engine::{EngineErrorKind, EngineEvent, StreamingEngine};
pub use error::{Error, Result};
pub use format::{neat_time, time_label};
pub use fullscreen::{FullscreenApi, FullscreenController};
pub use media::{ElementError, MediaElement, MediaErrorCode, MediaEvent};
pub use playlist::{Playlist, PlaylistEntry};
pub use types::*;
pub use view::ControlsView;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log the library version
pub fn init() {
    tracing::info!(version = VERSION, "Marquee Core initialized");
}
