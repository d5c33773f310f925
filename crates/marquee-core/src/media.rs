//! Media element seam

use crate::Error;
use url::Url;

/// MIME type probed to detect built-in HLS playback
pub const HLS_MIME_TYPE: &str = "application/vnd.apple.mpegurl";

/// The native audio/video element the player drives
pub trait MediaElement {
    /// Start playback; completion is reported through `MediaEvent::Play`
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;

    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);
    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);

    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, time: f64);
    /// NaN until the duration is known, infinite for live streams
    fn duration(&self) -> f64;

    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);

    /// Point the element at a URL it plays by itself
    fn set_source(&mut self, url: &Url);
    /// Drop the current source
    fn clear_source(&mut self);

    /// Whether the element can play `mime` without an engine
    fn can_play_type(&self, mime: &str) -> bool;

    /// The element's current `MediaError`, if any
    fn error(&self) -> Option<ElementError>;
}

/// `MediaError.code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaErrorCode {
    Aborted,
    Network,
    Decode,
    SrcNotSupported,
}

impl MediaErrorCode {
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(MediaErrorCode::Aborted),
            2 => Some(MediaErrorCode::Network),
            3 => Some(MediaErrorCode::Decode),
            4 => Some(MediaErrorCode::SrcNotSupported),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MediaErrorCode::Aborted => "MEDIA_ERR_ABORTED",
            MediaErrorCode::Network => "MEDIA_ERR_NETWORK",
            MediaErrorCode::Decode => "MEDIA_ERR_DECODE",
            MediaErrorCode::SrcNotSupported => "MEDIA_ERR_SRC_NOT_SUPPORTED",
        }
    }
}

/// Error reported by the media element itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementError {
    pub code: MediaErrorCode,
    pub message: String,
}

impl ElementError {
    pub fn new(code: MediaErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Playback error for a failure while playing `url`.
    ///
    /// An aborted fetch is not a failure and yields `None`.
    pub fn playback_error(&self, url: &Url) -> Option<Error> {
        let details = if self.message.is_empty() {
            self.code.name().to_string()
        } else {
            format!("{}: {}", self.code.name(), self.message)
        };
        match self.code {
            MediaErrorCode::Aborted => None,
            MediaErrorCode::Network => Some(Error::Network {
                url: url.to_string(),
                details,
            }),
            MediaErrorCode::Decode => Some(Error::Decode(details)),
            // The element could not open the manifest at all
            MediaErrorCode::SrcNotSupported => Some(Error::ManifestLoad {
                url: url.to_string(),
                details,
            }),
        }
    }
}

/// DOM events fired by the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaEvent {
    Play,
    Pause,
    TimeUpdate,
    Seeking,
    Seeked,
    Ended,
    /// The element failed; details are read through `MediaElement::error`
    Error,
}

impl MediaEvent {
    pub const ALL: [MediaEvent; 7] = [
        MediaEvent::Play,
        MediaEvent::Pause,
        MediaEvent::TimeUpdate,
        MediaEvent::Seeking,
        MediaEvent::Seeked,
        MediaEvent::Ended,
        MediaEvent::Error,
    ];

    /// DOM event type
    pub fn dom_type(&self) -> &'static str {
        match self {
            MediaEvent::Play => "play",
            MediaEvent::Pause => "pause",
            MediaEvent::TimeUpdate => "timeupdate",
            MediaEvent::Seeking => "seeking",
            MediaEvent::Seeked => "seeked",
            MediaEvent::Ended => "ended",
            MediaEvent::Error => "error",
        }
    }
}
