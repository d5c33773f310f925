//! `<video>` element adapter

use marquee_core::{ElementError, MediaElement, MediaErrorCode};
use tracing::{debug, warn};
use url::Url;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlVideoElement;

/// [`MediaElement`] backed by an `HTMLVideoElement`
pub struct DomMedia {
    el: HtmlVideoElement,
}

impl DomMedia {
    pub fn new(el: HtmlVideoElement) -> Self {
        Self { el }
    }

    pub fn element(&self) -> &HtmlVideoElement {
        &self.el
    }
}

impl MediaElement for DomMedia {
    fn play(&mut self) {
        // Rejections come from autoplay policy or a superseded load
        match self.el.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    warn!(error = ?e, "play() rejected");
                }
            }),
            Err(e) => warn!(error = ?e, "play() threw"),
        }
    }

    fn pause(&mut self) {
        if let Err(e) = self.el.pause() {
            warn!(error = ?e, "pause() threw");
        }
    }

    fn is_paused(&self) -> bool {
        self.el.paused()
    }

    fn volume(&self) -> f64 {
        self.el.volume()
    }

    fn set_volume(&mut self, volume: f64) {
        self.el.set_volume(volume);
    }

    fn is_muted(&self) -> bool {
        self.el.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.el.set_muted(muted);
    }

    fn current_time(&self) -> f64 {
        self.el.current_time()
    }

    fn set_current_time(&mut self, time: f64) {
        self.el.set_current_time(time);
    }

    fn duration(&self) -> f64 {
        self.el.duration()
    }

    fn playback_rate(&self) -> f64 {
        self.el.playback_rate()
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.el.set_playback_rate(rate);
    }

    fn set_source(&mut self, url: &Url) {
        self.el.set_src(url.as_str());
    }

    fn clear_source(&mut self) {
        if let Err(e) = self.el.remove_attribute("src") {
            debug!(error = ?e, "Failed to clear src");
        }
        self.el.load();
    }

    fn can_play_type(&self, mime: &str) -> bool {
        !self.el.can_play_type(mime).is_empty()
    }

    fn error(&self) -> Option<ElementError> {
        let err = self.el.error()?;
        let code = MediaErrorCode::from_code(err.code())?;
        Some(ElementError::new(code, err.message()))
    }
}
