//! Error types for Marquee Core

use thiserror::Error;

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Player error types
#[derive(Error, Debug)]
pub enum Error {
    // Backend errors
    #[error("No playback backend available: streaming engine unsupported and no native HLS")]
    EngineUnsupported,

    // Playback errors reported by the streaming engine
    #[error("Failed to load manifest {url}: {details}")]
    ManifestLoad { url: String, details: String },

    #[error("Network error while streaming {url}: {details}")]
    Network { url: String, details: String },

    #[error("Fatal decode error: {0}")]
    Decode(String),

    #[error("Streaming engine error: {0}")]
    Engine(String),

    // Playlist errors
    #[error("Playlist is empty")]
    PlaylistEmpty,

    #[error("Playlist index {index} out of range (len {len})")]
    PlaylistIndex { index: usize, len: usize },

    #[error("Invalid video URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    // Control errors
    #[error("Invalid playback speed: {0}")]
    InvalidSpeed(f64),

    #[error("Fullscreen request failed: {0}")]
    Fullscreen(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an `InvalidUrl` error for the given input
    pub fn invalid_url(url: impl Into<String>, source: url::ParseError) -> Self {
        Error::InvalidUrl {
            url: url.into(),
            source,
        }
    }

    /// Returns true if a fresh load can be expected to succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Network { .. } | Error::ManifestLoad { .. } | Error::Fullscreen(_)
        )
    }

    /// Returns true for errors that belong on the player's error banner
    pub fn is_playback_error(&self) -> bool {
        matches!(
            self,
            Error::EngineUnsupported
                | Error::ManifestLoad { .. }
                | Error::Network { .. }
                | Error::Decode(_)
                | Error::Engine(_)
        )
    }

    /// Returns the stable error code used in logs and the DOM
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::EngineUnsupported => "ENGINE_UNSUPPORTED",
            Error::ManifestLoad { .. } => "MANIFEST_LOAD",
            Error::Network { .. } => "NETWORK",
            Error::Decode(_) => "DECODE",
            Error::Engine(_) => "ENGINE",
            Error::PlaylistEmpty => "PLAYLIST_EMPTY",
            Error::PlaylistIndex { .. } => "PLAYLIST_INDEX",
            Error::InvalidUrl { .. } => "INVALID_URL",
            Error::InvalidSpeed(_) => "INVALID_SPEED",
            Error::Fullscreen(_) => "FULLSCREEN",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Json(_) => "JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_errors_are_flagged() {
        assert!(Error::Decode("bufferAppendError".into()).is_playback_error());
        assert!(Error::EngineUnsupported.is_playback_error());
        assert!(!Error::InvalidSpeed(0.0).is_playback_error());
    }

    #[test]
    fn test_error_codes() {
        let err = Error::Network {
            url: "https://example.com/a.m3u8".into(),
            details: "fragLoadError".into(),
        };
        assert_eq!(err.error_code(), "NETWORK");
        assert!(err.is_recoverable());
        assert_eq!(Error::PlaylistEmpty.error_code(), "PLAYLIST_EMPTY");
    }
}
