//! Core types for Marquee

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// A selectable video in the playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVideoItem")]
pub struct VideoItem {
    video: Url,
    next: Option<Url>,
    poster: String,
}

/// Wire shape of a playlist entry, before URL validation
#[derive(Deserialize)]
struct RawVideoItem {
    video: String,
    #[serde(default)]
    next: Option<String>,
    #[serde(default)]
    poster: String,
}

impl TryFrom<RawVideoItem> for VideoItem {
    type Error = Error;

    fn try_from(raw: RawVideoItem) -> Result<Self> {
        let item = VideoItem::new(&raw.video, raw.poster)?;
        match raw.next.as_deref().map(str::trim) {
            Some(next) if !next.is_empty() => item.with_next(next),
            _ => Ok(item),
        }
    }
}

impl VideoItem {
    /// Create an item from a manifest URL and a poster reference
    pub fn new(video: &str, poster: impl Into<String>) -> Result<Self> {
        let video = Url::parse(video.trim()).map_err(|e| Error::invalid_url(video, e))?;
        Ok(Self {
            video,
            next: None,
            poster: poster.into(),
        })
    }

    /// Declare the successor played when autoload is on
    pub fn with_next(mut self, next: &str) -> Result<Self> {
        let url = Url::parse(next.trim()).map_err(|e| Error::invalid_url(next, e))?;
        self.next = Some(url);
        Ok(self)
    }

    pub(crate) fn with_next_url(mut self, next: Url) -> Self {
        self.next = Some(next);
        self
    }

    /// Manifest URL
    pub fn video(&self) -> &Url {
        &self.video
    }

    /// Successor manifest URL, if any
    pub fn next(&self) -> Option<&Url> {
        self.next.as_ref()
    }

    /// Poster image reference
    pub fn poster(&self) -> &str {
        &self.poster
    }
}

/// Identity of one load request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoadId(pub u64);

impl LoadId {
    /// The id that follows this one
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for LoadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "load#{}", self.0)
    }
}

/// Player state machine states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerState {
    /// Nothing loaded yet
    Idle,
    /// Manifest requested, waiting for it to be parsed
    Loading,
    /// Media element is playing
    Playing,
    /// Media element is paused
    Paused,
    /// Playback reached the end of the current video
    Ended,
    /// A fatal playback error occurred
    Error,
}

impl PlayerState {
    /// Check if transition to target state is valid
    pub fn can_transition_to(&self, target: PlayerState) -> bool {
        use PlayerState::*;
        matches!(
            (self, target),
            // From Idle
            (Idle, Loading) |
            // From Loading
            (Loading, Playing) | (Loading, Paused) | (Loading, Loading) | (Loading, Error) |
            // From Playing
            (Playing, Paused) | (Playing, Ended) | (Playing, Loading) | (Playing, Error) |
            // From Paused (browsers fire `pause` right before `ended`)
            (Paused, Playing) | (Paused, Ended) | (Paused, Loading) | (Paused, Error) |
            // From Ended
            (Ended, Loading) | (Ended, Playing) | (Ended, Error) |
            // From Error
            (Error, Loading)
        )
    }
}

impl std::fmt::Display for PlayerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "idle"),
            PlayerState::Loading => write!(f, "loading"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Paused => write!(f, "paused"),
            PlayerState::Ended => write!(f, "ended"),
            PlayerState::Error => write!(f, "error"),
        }
    }
}

/// Visual state of the play button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayButton {
    Playing,
    Paused,
}

impl PlayButton {
    /// CSS class carried by the button in this state
    pub fn css_class(&self) -> &'static str {
        match self {
            PlayButton::Playing => "playing",
            PlayButton::Paused => "paused",
        }
    }
}

/// Volume icon variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeIcon {
    Muted,
    Normal,
    Loud,
}

impl VolumeIcon {
    /// Pick the icon for a volume level
    pub fn for_volume(volume: f64, loud_threshold: f64) -> Self {
        if volume <= 0.0 {
            VolumeIcon::Muted
        } else if volume > loud_threshold {
            VolumeIcon::Loud
        } else {
            VolumeIcon::Normal
        }
    }

    /// CSS class carried by the volume button, if any
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            VolumeIcon::Muted => Some("muted"),
            VolumeIcon::Normal => None,
            VolumeIcon::Loud => Some("loud"),
        }
    }
}

/// How manifests reach the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Backend {
    /// The streaming engine loads manifests and feeds the element
    Engine,
    /// The media element plays HLS by itself
    Native,
    /// No way to play HLS in this environment
    Unavailable,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Engine => write!(f, "engine"),
            Backend::Native => write!(f, "native"),
            Backend::Unavailable => write!(f, "unavailable"),
        }
    }
}
