//! Streaming engine seam
//!
//! The engine (hls.js in the browser) owns manifest parsing, ABR and segment
//! fetching. The controller only drives its public lifecycle and reacts to
//! the events it reports.

use crate::{Error, LoadId};
use serde::{Deserialize, Serialize};
use url::Url;

/// Adaptive streaming engine bound to a single media element
pub trait StreamingEngine {
    /// Whether the engine can run in this environment
    fn is_supported(&self) -> bool;

    /// Start loading a manifest.
    ///
    /// Events reported from now on carry `load`. An engine that cannot tell
    /// which load a late event belongs to tags it with the latest id, so the
    /// controller also checks that a manifest is still pending.
    fn load_source(&mut self, load: LoadId, url: &Url);

    /// Bind the engine to the media element
    fn attach_media(&mut self);

    /// Unbind the engine from the media element
    fn detach_media(&mut self);

    /// Abort any in-flight manifest or segment requests
    fn stop_load(&mut self);
}

/// Category of an engine error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EngineErrorKind {
    /// Manifest or segment request failed
    Network,
    /// Media pipeline (MSE, decoding) failed
    Media,
    /// Transmuxing failed
    Mux,
    /// Anything else the engine reports
    Other,
}

impl EngineErrorKind {
    /// Map hls.js `ErrorTypes` strings
    pub fn from_hls(kind: &str) -> Self {
        match kind {
            "networkError" => EngineErrorKind::Network,
            "mediaError" => EngineErrorKind::Media,
            "muxError" => EngineErrorKind::Mux,
            _ => EngineErrorKind::Other,
        }
    }
}

/// Events reported by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The manifest of `load` has been parsed and playback may start
    ManifestParsed { load: LoadId },
    /// The engine reported an error while serving `load`
    Error {
        load: LoadId,
        kind: EngineErrorKind,
        fatal: bool,
        details: String,
    },
}

impl EngineEvent {
    /// The load this event belongs to
    pub fn load(&self) -> LoadId {
        match self {
            EngineEvent::ManifestParsed { load } | EngineEvent::Error { load, .. } => *load,
        }
    }
}

/// Turn a fatal engine error into a playback error
pub fn playback_error(url: &Url, kind: EngineErrorKind, details: &str) -> Error {
    let details = details.to_string();
    match kind {
        EngineErrorKind::Network if details.starts_with("manifest") => Error::ManifestLoad {
            url: url.to_string(),
            details,
        },
        EngineErrorKind::Network => Error::Network {
            url: url.to_string(),
            details,
        },
        EngineErrorKind::Media | EngineErrorKind::Mux => Error::Decode(details),
        EngineErrorKind::Other => Error::Engine(details),
    }
}
