//! Fullscreen capability
//!
//! Browsers expose fullscreen under up to four vendor-prefixed names. The
//! variant is chosen once at startup with [`FullscreenApi::detect`]; callers
//! then only talk to a [`FullscreenController`].

use crate::Result;

/// Fullscreen on/off for the player element
pub trait FullscreenController {
    /// Whether the document currently shows an element fullscreen
    fn is_active(&self) -> bool;
    /// Request fullscreen for the player element
    fn enter(&self) -> Result<()>;
    /// Leave fullscreen
    fn exit(&self) -> Result<()>;
}

/// Vendor variant of the Fullscreen API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FullscreenApi {
    Standard,
    Webkit,
    Moz,
    Ms,
}

impl FullscreenApi {
    /// Probe order
    pub const ALL: [FullscreenApi; 4] = [
        FullscreenApi::Standard,
        FullscreenApi::Webkit,
        FullscreenApi::Moz,
        FullscreenApi::Ms,
    ];

    /// Method on the element that enters fullscreen
    pub fn request_method(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "requestFullscreen",
            FullscreenApi::Webkit => "webkitRequestFullscreen",
            FullscreenApi::Moz => "mozRequestFullScreen",
            FullscreenApi::Ms => "msRequestFullscreen",
        }
    }

    /// Method on the document that leaves fullscreen
    pub fn exit_method(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "exitFullscreen",
            FullscreenApi::Webkit => "webkitExitFullscreen",
            FullscreenApi::Moz => "mozCancelFullScreen",
            FullscreenApi::Ms => "msExitFullscreen",
        }
    }

    /// Document property holding the fullscreen element
    pub fn element_property(&self) -> &'static str {
        match self {
            FullscreenApi::Standard => "fullscreenElement",
            FullscreenApi::Webkit => "webkitFullscreenElement",
            FullscreenApi::Moz => "mozFullScreenElement",
            FullscreenApi::Ms => "msFullscreenElement",
        }
    }

    /// First variant whose request method the element exposes
    pub fn detect(has_method: impl Fn(&str) -> bool) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|api| has_method(api.request_method()))
    }
}
