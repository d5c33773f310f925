//! Recording test doubles for the controller's collaborators

#![allow(dead_code)]

use marquee_core::{
    ControlsView, ElementError, Error, FullscreenController, LoadId, MediaElement, PlayButton,
    PlaybackController, PlayerConfig, Playlist, PlaylistEntry, Result, StreamingEngine,
    VolumeIcon,
};
use std::cell::Cell;
use url::Url;

pub type TestController = PlaybackController<FakeEngine, FakeMedia, FakeFullscreen, FakeView>;

pub const FIRST: &str = "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8";
pub const SECOND: &str = "http://devimages.apple.com/iphone/samples/bipbop/gear1/prog_index.m3u8";
pub const THIRD: &str = "http://content.jwplatform.com/manifests/vM7nH0Kl.m3u8";

/// Three videos; the first declares the second as its successor
pub fn playlist() -> Playlist {
    Playlist::from_json(&format!(
        r#"[
            {{"video": "{FIRST}", "next": "{SECOND}", "poster": "first.jpg"}},
            {{"video": "{SECOND}", "poster": "second.jpg"}},
            {{"video": "{THIRD}", "poster": "third.jpg"}}
        ]"#
    ))
    .unwrap()
}

pub fn controller() -> TestController {
    controller_with(FakeEngine::default(), FakeMedia::default(), PlayerConfig::default())
}

pub fn controller_with(engine: FakeEngine, media: FakeMedia, config: PlayerConfig) -> TestController {
    PlaybackController::new(
        playlist(),
        config,
        engine,
        media,
        FakeFullscreen::default(),
        FakeView::default(),
    )
    .unwrap()
}

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

#[derive(Debug)]
pub struct FakeEngine {
    pub supported: bool,
    pub calls: Vec<&'static str>,
    /// Manifests currently loading or loaded
    pub sources: Vec<(LoadId, Url)>,
    pub attached: bool,
    pub double_attach: bool,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self {
            supported: true,
            calls: Vec::new(),
            sources: Vec::new(),
            attached: false,
            double_attach: false,
        }
    }
}

impl FakeEngine {
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Default::default()
        }
    }
}

impl StreamingEngine for FakeEngine {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn load_source(&mut self, load: LoadId, url: &Url) {
        self.calls.push("load_source");
        self.sources.push((load, url.clone()));
    }

    fn attach_media(&mut self) {
        self.calls.push("attach_media");
        if self.attached {
            self.double_attach = true;
        }
        self.attached = true;
    }

    fn detach_media(&mut self) {
        self.calls.push("detach_media");
        self.attached = false;
    }

    fn stop_load(&mut self) {
        self.calls.push("stop_load");
        self.sources.clear();
    }
}

#[derive(Debug)]
pub struct FakeMedia {
    pub paused: bool,
    pub volume: f64,
    pub muted: bool,
    pub current_time: f64,
    pub duration: f64,
    pub rate: f64,
    pub src: Option<Url>,
    pub native_hls: bool,
    pub play_calls: usize,
    pub clear_calls: usize,
    pub error: Option<ElementError>,
}

impl Default for FakeMedia {
    fn default() -> Self {
        Self {
            paused: true,
            volume: 1.0,
            muted: false,
            current_time: 0.0,
            duration: f64::NAN,
            rate: 1.0,
            src: None,
            native_hls: false,
            play_calls: 0,
            clear_calls: 0,
            error: None,
        }
    }
}

impl MediaElement for FakeMedia {
    fn play(&mut self) {
        self.paused = false;
        self.play_calls += 1;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, time: f64) {
        self.current_time = time;
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    fn set_source(&mut self, url: &Url) {
        self.src = Some(url.clone());
    }

    /// Reloading an emptied element pauses it
    fn clear_source(&mut self) {
        self.src = None;
        self.paused = true;
        self.error = None;
        self.clear_calls += 1;
    }

    fn can_play_type(&self, mime: &str) -> bool {
        self.native_hls && mime == "application/vnd.apple.mpegurl"
    }

    fn error(&self) -> Option<ElementError> {
        self.error.clone()
    }
}

#[derive(Debug, Default)]
pub struct FakeFullscreen {
    pub active: Cell<bool>,
    pub enters: Cell<u32>,
    pub exits: Cell<u32>,
}

impl FullscreenController for FakeFullscreen {
    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn enter(&self) -> Result<()> {
        self.enters.set(self.enters.get() + 1);
        self.active.set(true);
        Ok(())
    }

    fn exit(&self) -> Result<()> {
        self.exits.set(self.exits.get() + 1);
        self.active.set(false);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct FakeView {
    pub play_button: Option<PlayButton>,
    pub volume_fill: Option<f64>,
    pub volume_icon: Option<VolumeIcon>,
    pub progress_fill: Option<f64>,
    pub time_label: Option<String>,
    pub active_speed: Option<f64>,
    pub autoload_label: Option<String>,
    pub playlist: Vec<PlaylistEntry>,
    pub current: Option<usize>,
    /// Code of the error on the banner
    pub error: Option<&'static str>,
}

impl ControlsView for FakeView {
    fn set_play_button(&mut self, state: PlayButton) {
        self.play_button = Some(state);
    }

    fn set_volume_fill(&mut self, ratio: f64) {
        self.volume_fill = Some(ratio);
    }

    fn set_volume_icon(&mut self, icon: VolumeIcon) {
        self.volume_icon = Some(icon);
    }

    fn set_progress_fill(&mut self, ratio: f64) {
        self.progress_fill = Some(ratio);
    }

    fn set_time_label(&mut self, label: &str) {
        self.time_label = Some(label.to_string());
    }

    fn set_active_speed(&mut self, rate: f64) {
        self.active_speed = Some(rate);
    }

    fn set_autoload_label(&mut self, label: &str) {
        self.autoload_label = Some(label.to_string());
    }

    fn render_playlist(&mut self, entries: &[PlaylistEntry]) {
        self.playlist = entries.to_vec();
    }

    fn mark_current(&mut self, index: Option<usize>) {
        self.current = index;
    }

    fn show_error(&mut self, error: Option<&Error>) {
        self.error = error.map(Error::error_code);
    }
}
