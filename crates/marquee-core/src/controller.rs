//! Playback Controller - bridges user intent and playback lifecycle
//!
//! Coordinates:
//! - Loading videos through the streaming engine (or native HLS)
//! - Transport controls: play/pause, volume, seek, speed, fullscreen
//! - Keyboard shortcuts
//! - Autoload of the declared successor when a video ends
//! - Keeping the control widgets in sync with playback state

use crate::{
    engine::{playback_error, EngineEvent, StreamingEngine},
    format::time_label,
    media::{MediaElement, MediaEvent, HLS_MIME_TYPE},
    Backend, ControlAction, ControlsView, Error, FullscreenController, LoadId, PlayButton,
    PlayerConfig, PlayerState, Playlist, Result, VideoItem, VolumeIcon,
};
use tracing::{debug, error, info, instrument, warn};

/// Owns the current video and every piece of controller state
pub struct PlaybackController<E, M, F, V> {
    config: PlayerConfig,
    playlist: Playlist,
    engine: E,
    media: M,
    fullscreen: F,
    view: V,
    backend: Backend,
    state: PlayerState,
    current: Option<VideoItem>,
    /// Id handed to the most recent load
    last_load: LoadId,
    /// Load still waiting for its manifest
    pending: Option<LoadId>,
    /// Start playback once the pending manifest is parsed
    autoplay: bool,
    /// A `pause` from resetting a playing element's source is on its way
    reset_pause_pending: bool,
    play_button: PlayButton,
    /// Volume restored by unmuting
    last_volume: f64,
    muted_by_user: bool,
    autoload: bool,
    last_error: Option<Error>,
}

impl<E, M, F, V> PlaybackController<E, M, F, V>
where
    E: StreamingEngine,
    M: MediaElement,
    F: FullscreenController,
    V: ControlsView,
{
    /// Create a controller and bring the widgets to their initial state
    pub fn new(
        playlist: Playlist,
        config: PlayerConfig,
        engine: E,
        mut media: M,
        fullscreen: F,
        mut view: V,
    ) -> Result<Self> {
        config.validate()?;

        let backend = if engine.is_supported() {
            Backend::Engine
        } else if media.can_play_type(HLS_MIME_TYPE) {
            Backend::Native
        } else {
            Backend::Unavailable
        };
        info!(%backend, videos = playlist.len(), "Playback controller created");

        let volume = media.volume();
        media.set_playback_rate(config.default_speed);

        view.render_playlist(&playlist.entries(None));
        view.set_play_button(PlayButton::Paused);
        view.set_volume_fill(volume);
        view.set_volume_icon(VolumeIcon::for_volume(volume, config.loud_threshold));
        view.set_active_speed(config.default_speed);
        view.set_autoload_label(autoload_label(config.autoload));

        let last_error = if backend == Backend::Unavailable {
            let err = Error::EngineUnsupported;
            warn!(code = err.error_code(), "No playback backend");
            view.show_error(Some(&err));
            Some(err)
        } else {
            view.show_error(None);
            None
        };

        Ok(Self {
            autoload: config.autoload,
            config,
            playlist,
            engine,
            media,
            fullscreen,
            view,
            backend,
            state: PlayerState::Idle,
            current: None,
            last_load: LoadId::default(),
            pending: None,
            autoplay: false,
            reset_pause_pending: false,
            play_button: PlayButton::Paused,
            last_volume: if volume > 0.0 { volume } else { 1.0 },
            muted_by_user: false,
            last_error,
        })
    }

    /// Current state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Video currently loaded
    pub fn current_video(&self) -> Option<&VideoItem> {
        self.current.as_ref()
    }

    /// State the play button currently shows
    pub fn play_button(&self) -> PlayButton {
        self.play_button
    }

    /// Volume restored by the next unmute
    pub fn last_volume(&self) -> f64 {
        self.last_volume
    }

    pub fn muted_by_user(&self) -> bool {
        self.muted_by_user
    }

    pub fn is_autoload(&self) -> bool {
        self.autoload
    }

    /// Whether the document is fullscreen right now
    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_active()
    }

    /// Last fatal playback error, cleared by the next load
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Load awaiting its manifest, if any
    pub fn pending_load(&self) -> Option<LoadId> {
        self.pending
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn fullscreen(&self) -> &F {
        &self.fullscreen
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Transition to new state; invalid transitions are logged and dropped
    fn set_state(&mut self, new_state: PlayerState) -> bool {
        let current = self.state;
        if !current.can_transition_to(new_state) {
            warn!(from = %current, to = %new_state, "Ignoring invalid state transition");
            return false;
        }
        if current != new_state {
            info!(from = %current, to = %new_state, "State transition");
        }
        self.state = new_state;
        true
    }

    fn set_play_button(&mut self, state: PlayButton) {
        self.play_button = state;
        self.view.set_play_button(state);
    }

    /// Cue the first playlist item without starting playback
    pub fn cue_first(&mut self) -> Result<()> {
        let item = self.playlist.first().clone();
        self.begin_load(item, false)
    }

    /// Playlist selection callback
    pub fn select(&mut self, index: usize) -> Result<()> {
        let item = self.playlist.get(index)?.clone();
        self.load_video(item)
    }

    /// Switch to `item` and start playing once its manifest is parsed
    pub fn load_video(&mut self, item: VideoItem) -> Result<()> {
        self.begin_load(item, true)?;
        self.set_play_button(PlayButton::Playing);
        Ok(())
    }

    #[instrument(skip(self, item), fields(url = %item.video()))]
    fn begin_load(&mut self, item: VideoItem, autoplay: bool) -> Result<()> {
        if self.backend == Backend::Unavailable {
            let err = Error::EngineUnsupported;
            self.view.show_error(Some(&err));
            return Err(err);
        }

        let load = self.last_load.next();
        self.last_load = load;
        info!(%load, autoplay, backend = %self.backend, "Loading video");

        if self.backend == Backend::Engine {
            self.engine.stop_load();
            self.engine.detach_media();
        }

        self.set_state(PlayerState::Loading);
        self.autoplay = autoplay;
        self.current = Some(item.clone());
        self.last_error = None;
        self.view.show_error(None);
        self.reset_pause_pending = !self.media.is_paused();
        self.media.clear_source();

        if self.backend == Backend::Engine {
            self.engine.load_source(load, item.video());
            self.engine.attach_media();
            self.pending = Some(load);
        } else {
            self.media.set_source(item.video());
            self.pending = None;
            if autoplay {
                self.media.play();
            } else {
                self.set_state(PlayerState::Paused);
            }
        }

        self.view.mark_current(self.playlist.position_of(item.video()));
        Ok(())
    }

    /// React to an engine event; events of superseded loads are dropped
    pub fn on_engine_event(&mut self, event: EngineEvent) {
        if event.load() != self.last_load {
            debug!(load = %event.load(), current = %self.last_load, "Dropping stale engine event");
            return;
        }

        match event {
            EngineEvent::ManifestParsed { load } => {
                if self.pending != Some(load) {
                    debug!(%load, "Manifest already handled");
                    return;
                }
                self.pending = None;
                info!(%load, "Manifest parsed");
                if self.autoplay {
                    self.media.play();
                } else if self.state == PlayerState::Loading && self.media.is_paused() {
                    self.set_state(PlayerState::Paused);
                }
            }
            EngineEvent::Error {
                load,
                kind,
                fatal,
                details,
            } => {
                if !fatal {
                    warn!(%load, ?kind, %details, "Recoverable engine error");
                    return;
                }
                let Some(item) = self.current.as_ref() else {
                    return;
                };
                let err = playback_error(item.video(), kind, &details);
                error!(%load, code = err.error_code(), error = %err, "Fatal engine error");
                self.fail(err);
            }
        }
    }

    /// Failure reported by the media element. Only the native backend
    /// relies on it; hls.js reports the same failures as engine errors.
    fn on_element_error(&mut self) {
        if self.backend != Backend::Native {
            debug!(backend = %self.backend, "Element error left to the engine");
            return;
        }
        let (Some(item), Some(fault)) = (self.current.as_ref(), self.media.error()) else {
            return;
        };
        let Some(err) = fault.playback_error(item.video()) else {
            debug!(code = fault.code.name(), "Media fetch aborted");
            return;
        };
        error!(code = err.error_code(), error = %err, "Fatal media element error");
        self.fail(err);
    }

    /// Enter the error state and surface `err`
    fn fail(&mut self, err: Error) {
        if self.backend == Backend::Engine {
            self.engine.stop_load();
        }
        self.pending = None;
        self.autoplay = false;
        self.set_state(PlayerState::Error);
        self.set_play_button(PlayButton::Paused);
        self.view.show_error(Some(&err));
        self.last_error = Some(err);
    }

    /// React to a media element event
    pub fn on_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Play => {
                if self.set_state(PlayerState::Playing) {
                    self.set_play_button(PlayButton::Playing);
                }
            }
            MediaEvent::Pause => {
                let from_reset = std::mem::take(&mut self.reset_pause_pending);
                if from_reset && self.autoplay && self.state == PlayerState::Loading {
                    debug!("Ignoring pause from source reset");
                    return;
                }
                if self.set_state(PlayerState::Paused) {
                    self.set_play_button(PlayButton::Paused);
                }
            }
            MediaEvent::TimeUpdate => self.update_progress(),
            MediaEvent::Seeking => debug!(time = self.media.current_time(), "Seeking"),
            MediaEvent::Seeked => debug!(time = self.media.current_time(), "Seek ended"),
            MediaEvent::Ended => {
                self.set_state(PlayerState::Ended);
                self.set_play_button(PlayButton::Paused);
                if let Err(e) = self.load_next() {
                    error!(error = %e, "Autoload failed");
                }
            }
            MediaEvent::Error => self.on_element_error(),
        }
    }

    /// Toggle play/pause
    pub fn toggle_play(&mut self) {
        if self.current.is_none() || self.state == PlayerState::Error {
            debug!(state = %self.state, "Nothing playable, ignoring play toggle");
            return;
        }

        let play = self.media.is_paused();
        if play {
            self.media.play();
        } else {
            self.reset_pause_pending = false;
            self.media.pause();
        }
        // A manifest still loading honours the latest choice
        if self.pending.is_some() {
            self.autoplay = play;
        }
        self.set_play_button(if play { PlayButton::Playing } else { PlayButton::Paused });

        if !self.muted_by_user {
            self.media.set_muted(false);
        }
    }

    /// Set volume from the pointer position within the volume slider
    pub fn change_volume(&mut self, ratio: f64) {
        let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        let volume = if ratio < self.config.mute_threshold { 0.0 } else { ratio };

        self.media.set_volume(volume);
        self.view.set_volume_fill(volume);
        self.view
            .set_volume_icon(VolumeIcon::for_volume(volume, self.config.loud_threshold));

        if volume > 0.0 {
            self.last_volume = volume;
            self.muted_by_user = false;
        }
        debug!(volume, "Volume changed");
    }

    /// Mute, remembering the volume, or restore it
    pub fn toggle_mute(&mut self) {
        let volume = self.media.volume();
        if volume > 0.0 {
            self.last_volume = volume;
            self.media.set_volume(0.0);
            self.view.set_volume_icon(VolumeIcon::Muted);
            self.view.set_volume_fill(0.0);
            self.muted_by_user = true;
        } else {
            let restored = self.last_volume;
            self.media.set_volume(restored);
            self.view
                .set_volume_icon(VolumeIcon::for_volume(restored, self.config.loud_threshold));
            self.view.set_volume_fill(restored);
            self.muted_by_user = false;
        }
        debug!(muted = self.muted_by_user, "Mute toggled");
    }

    /// Seek to the pointer position within the progress bar
    pub fn set_progress(&mut self, ratio: f64) {
        let ratio = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 0.0 };
        self.view.set_progress_fill(ratio);

        let duration = self.media.duration();
        if duration.is_finite() && duration > 0.0 {
            self.media.set_current_time(ratio * duration);
        } else {
            debug!(ratio, "Duration unknown, seek skipped");
        }
    }

    /// Refresh the progress fill and time label
    pub fn update_progress(&mut self) {
        let current = self.media.current_time();
        let duration = self.media.duration();
        let Some(label) = time_label(current, duration) else {
            return;
        };
        self.view.set_progress_fill((current / duration).clamp(0.0, 1.0));
        self.view.set_time_label(&label);
    }

    /// Enter or leave fullscreen, based on the document's current state
    pub fn toggle_fullscreen(&mut self) -> Result<()> {
        if self.fullscreen.is_active() {
            self.fullscreen.exit()
        } else {
            self.fullscreen.enter()
        }
    }

    /// Set the playback rate and highlight its option.
    ///
    /// Only rates offered in the speed menu are accepted.
    pub fn set_speed(&mut self, rate: f64) -> Result<()> {
        if !self.config.speeds.contains(&rate) {
            return Err(Error::InvalidSpeed(rate));
        }
        self.media.set_playback_rate(rate);
        self.view.set_active_speed(rate);
        debug!(rate, "Playback rate changed");
        Ok(())
    }

    /// Keyboard shortcuts. Returns true when the key was handled.
    pub fn handle_key(&mut self, key: &str) -> bool {
        match ControlAction::from_key(key, self.config.seek_step) {
            Some(ControlAction::PlayPause) => self.toggle_play(),
            Some(ControlAction::SeekForward(step)) => self.seek_by(step),
            Some(ControlAction::SeekBackward(step)) => self.seek_by(-step),
            None => return false,
        }
        true
    }

    fn seek_by(&mut self, delta: f64) {
        if self.current.is_none() {
            return;
        }
        let target = self.media.current_time() + delta;
        let duration = self.media.duration();
        let target = if duration.is_finite() {
            target.clamp(0.0, duration)
        } else {
            target.max(0.0)
        };
        self.media.set_current_time(target);
    }

    /// Load the successor of the current video if autoload is on.
    ///
    /// Returns whether a load was started.
    pub fn load_next(&mut self) -> Result<bool> {
        if !self.autoload {
            return Ok(false);
        }
        let Some(next) = self
            .current
            .as_ref()
            .and_then(|current| self.playlist.successor_of(current))
        else {
            debug!("No successor declared");
            return Ok(false);
        };

        info!(next = %next.video(), "Autoloading next video");
        self.load_video(next)?;
        Ok(true)
    }

    /// Flip the autoload toggle
    pub fn toggle_autoload(&mut self) {
        self.autoload = !self.autoload;
        self.view.set_autoload_label(autoload_label(self.autoload));
        info!(autoload = self.autoload, "Autoload toggled");
    }
}

fn autoload_label(enabled: bool) -> &'static str {
    if enabled {
        "ON"
    } else {
        "OFF"
    }
}
