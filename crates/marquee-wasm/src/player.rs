//! Mounted player exported to JavaScript
//!
//! Owns the controller and every event registration feeding it. Handlers
//! are registered once at mount time; dropping the player removes them.

use crate::{
    fullscreen::DomFullscreen,
    hls::{HlsEngine, HlsSubscription},
    js_error,
    listeners::Listener,
    media::DomMedia,
    to_js,
    view::DomControls,
};
use marquee_core::{
    Backend, EngineEvent, MediaEvent, PlaybackController, PlayerConfig, PlayerState, Playlist,
    VideoItem,
};
use serde::Serialize;
use std::{cell::RefCell, rc::Rc};
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, MouseEvent};

type DomController = PlaybackController<HlsEngine, DomMedia, DomFullscreen, DomControls>;
type SharedController = Rc<RefCell<DomController>>;

/// Run `action` now, or on the microtask queue if the controller is
/// already borrowed (an event fired from inside another handler).
fn dispatch(controller: &SharedController, action: impl FnOnce(&mut DomController) + 'static) {
    if let Ok(mut c) = controller.try_borrow_mut() {
        action(&mut c);
        return;
    }
    let controller = Rc::clone(controller);
    wasm_bindgen_futures::spawn_local(async move {
        match controller.try_borrow_mut() {
            Ok(mut c) => action(&mut c),
            Err(_) => warn!("Controller still busy, dropping event"),
        }
    });
}

/// Pointer position within `bar` as a ratio of its width
fn pointer_ratio(event: &Event, bar: &HtmlElement) -> Option<f64> {
    let event = event.dyn_ref::<MouseEvent>()?;
    let rect = bar.get_bounding_client_rect();
    (rect.width() > 0.0).then(|| (f64::from(event.client_x()) - rect.left()) / rect.width())
}

/// Nearest ancestor of the event target matching `selector`
fn closest(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

/// Snapshot returned by `status_json`
#[derive(Serialize)]
struct PlayerStatus {
    state: PlayerState,
    backend: Backend,
    current: Option<String>,
    autoload: bool,
    fullscreen: bool,
    last_volume: f64,
    error: Option<&'static str>,
}

/// A player mounted into a page element
#[wasm_bindgen]
pub struct MarqueePlayer {
    // Declared first so handlers are gone before the controller drops
    listeners: Vec<Listener>,
    subscriptions: Vec<HlsSubscription>,
    controller: SharedController,
}

impl MarqueePlayer {
    fn with<T>(&self, action: impl FnOnce(&mut DomController) -> T) -> Result<T, JsValue> {
        let mut controller = self
            .controller
            .try_borrow_mut()
            .map_err(|_| js_error("player is busy"))?;
        Ok(action(&mut controller))
    }
}

#[wasm_bindgen]
impl MarqueePlayer {
    /// Render the player into `root`.
    ///
    /// `playlist` is an array of `{ video, next?, poster? }`; `config` is an
    /// optional object with any `PlayerConfig` fields.
    pub fn mount(root: Element, playlist: JsValue, config: JsValue) -> Result<MarqueePlayer, JsValue> {
        let items: Vec<VideoItem> = serde_wasm_bindgen::from_value(playlist)
            .map_err(|e| js_error(format!("invalid playlist: {e}")))?;
        let playlist = Playlist::new(items).map_err(to_js)?;

        let config: PlayerConfig = if config.is_undefined() || config.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| js_error(format!("invalid config: {e}")))?
        };
        let cue_first = config.cue_first;

        let window = web_sys::window().ok_or_else(|| js_error("no global window"))?;
        let document = window.document().ok_or_else(|| js_error("no document"))?;

        let controls = DomControls::mount(&document, &root)?;
        controls.render_speeds(&config.speeds)?;

        let video = controls.video.clone();
        let play_btn = controls.play_btn.clone();
        let volume_btn = controls.volume_btn.clone();
        let volume_slider = controls.volume_slider.clone();
        let progress = controls.progress.clone();
        let speed_list = controls.speed_list.clone();
        let fullscreen_btn = controls.fullscreen_btn.clone();
        let playlist_el = controls.playlist.clone();
        let autoload_btn = controls.autoload_btn.clone();

        let engine = HlsEngine::new(video.clone().into());
        let fullscreen = DomFullscreen::new(controls.player.clone().into(), document);
        let media = DomMedia::new(video.clone());

        let controller =
            PlaybackController::new(playlist, config, engine, media, fullscreen, controls)
                .map_err(to_js)?;
        let controller: SharedController = Rc::new(RefCell::new(controller));

        let subscriptions = {
            let c = Rc::clone(&controller);
            let deliver = move |event: EngineEvent| dispatch(&c, move |p| p.on_engine_event(event));
            controller.borrow().engine().subscribe(deliver)
        };

        let mut listeners = Vec::new();

        for event in MediaEvent::ALL {
            let c = Rc::clone(&controller);
            listeners.push(Listener::new(&video, event.dom_type(), move |_| {
                dispatch(&c, move |p| p.on_media_event(event))
            })?);
        }

        let c = Rc::clone(&controller);
        listeners.push(Listener::new(&play_btn, "click", move |_| {
            dispatch(&c, |p| p.toggle_play())
        })?);

        let c = Rc::clone(&controller);
        listeners.push(Listener::new(&volume_btn, "click", move |_| {
            dispatch(&c, |p| p.toggle_mute())
        })?);

        let c = Rc::clone(&controller);
        let bar = volume_slider.clone();
        listeners.push(Listener::new(&volume_slider, "click", move |event| {
            if let Some(ratio) = pointer_ratio(&event, &bar) {
                dispatch(&c, move |p| p.change_volume(ratio));
            }
        })?);

        let c = Rc::clone(&controller);
        let bar = progress.clone();
        listeners.push(Listener::new(&progress, "click", move |event| {
            if let Some(ratio) = pointer_ratio(&event, &bar) {
                dispatch(&c, move |p| p.set_progress(ratio));
            }
        })?);

        let c = Rc::clone(&controller);
        listeners.push(Listener::new(&speed_list, "click", move |event| {
            let rate = closest(&event, ".speed-item")
                .and_then(|item| item.get_attribute("data-speed"))
                .and_then(|s| s.parse::<f64>().ok());
            if let Some(rate) = rate {
                dispatch(&c, move |p| {
                    if let Err(e) = p.set_speed(rate) {
                        warn!(error = %e, "Speed change rejected");
                    }
                });
            }
        })?);

        let c = Rc::clone(&controller);
        listeners.push(Listener::new(&fullscreen_btn, "click", move |_| {
            dispatch(&c, |p| {
                if let Err(e) = p.toggle_fullscreen() {
                    warn!(error = %e, "Fullscreen toggle failed");
                }
            })
        })?);

        let c = Rc::clone(&controller);
        listeners.push(Listener::new(&autoload_btn, "click", move |_| {
            dispatch(&c, |p| p.toggle_autoload())
        })?);

        let c = Rc::clone(&controller);
        listeners.push(Listener::new(&playlist_el, "click", move |event| {
            let Some(link) = closest(&event, "a[data-index]") else {
                return;
            };
            event.prevent_default();
            let index = link
                .get_attribute("data-index")
                .and_then(|s| s.parse::<usize>().ok());
            if let Some(index) = index {
                dispatch(&c, move |p| {
                    if let Err(e) = p.select(index) {
                        error!(index, error = %e, "Playlist selection failed");
                    }
                });
            }
        })?);

        let c = Rc::clone(&controller);
        listeners.push(Listener::new(&window, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if closest(&event, "input, textarea, select, [contenteditable]").is_some() {
                return;
            }
            match c.try_borrow_mut() {
                Ok(mut p) => {
                    if p.handle_key(&key) {
                        event.prevent_default();
                    }
                }
                Err(_) => warn!(%key, "Controller busy, key dropped"),
            }
        })?);

        if cue_first {
            if let Err(e) = controller.borrow_mut().cue_first() {
                warn!(error = %e, "Could not cue first video");
            }
        }

        info!(
            listeners = listeners.len(),
            subscriptions = subscriptions.len(),
            "Player mounted"
        );

        Ok(MarqueePlayer {
            listeners,
            subscriptions,
            controller,
        })
    }

    /// Load and play the playlist item at `index`
    pub fn select(&self, index: u32) -> Result<(), JsValue> {
        self.with(|p| p.select(index as usize))?.map_err(to_js)
    }

    pub fn toggle_play(&self) -> Result<(), JsValue> {
        self.with(|p| p.toggle_play())
    }

    pub fn toggle_mute(&self) -> Result<(), JsValue> {
        self.with(|p| p.toggle_mute())
    }

    pub fn toggle_autoload(&self) -> Result<(), JsValue> {
        self.with(|p| p.toggle_autoload())
    }

    pub fn toggle_fullscreen(&self) -> Result<(), JsValue> {
        self.with(|p| p.toggle_fullscreen())?.map_err(to_js)
    }

    pub fn set_speed(&self, rate: f64) -> Result<(), JsValue> {
        self.with(|p| p.set_speed(rate))?.map_err(to_js)
    }

    /// Current state name, e.g. `"playing"`
    pub fn state(&self) -> Result<String, JsValue> {
        self.with(|p| p.state().to_string())
    }

    /// Manifest URL of the current video
    pub fn current_video(&self) -> Result<Option<String>, JsValue> {
        self.with(|p| p.current_video().map(|item| item.video().to_string()))
    }

    pub fn is_autoload(&self) -> Result<bool, JsValue> {
        self.with(|p| p.is_autoload())
    }

    /// Controller state as JSON
    pub fn status_json(&self) -> Result<String, JsValue> {
        let json = self.with(|p| {
            let status = PlayerStatus {
                state: p.state(),
                backend: p.backend(),
                current: p.current_video().map(|item| item.video().to_string()),
                autoload: p.is_autoload(),
                fullscreen: p.is_fullscreen(),
                last_volume: p.last_volume(),
                error: p.last_error().map(|e| e.error_code()),
            };
            serde_json::to_string(&status)
        })?;
        json.map_err(|e| js_error(format!("status serialization failed: {e}")))
    }

    /// Remove every listener and release the engine
    pub fn unmount(self) {
        info!("Player unmounted");
    }
}
