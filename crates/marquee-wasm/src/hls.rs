//! hls.js engine
//!
//! Binds the global `Hls` class and adapts it to [`StreamingEngine`].
//!
//! ```javascript
//! <script src="https://cdn.jsdelivr.net/npm/hls.js@1"></script>
//! ```

use marquee_core::{EngineErrorKind, EngineEvent, LoadId, StreamingEngine};
use serde::Deserialize;
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, warn};
use url::Url;
use wasm_bindgen::prelude::*;
use web_sys::HtmlMediaElement;

/// `Hls.Events.MANIFEST_PARSED`
pub const MANIFEST_PARSED: &str = "hlsManifestParsed";
/// `Hls.Events.ERROR`
pub const ERROR: &str = "hlsError";

#[wasm_bindgen]
extern "C" {
    /// The hls.js player class
    #[derive(Debug, Clone)]
    pub type Hls;

    #[wasm_bindgen(static_method_of = Hls, js_name = isSupported, catch)]
    fn is_supported() -> Result<bool, JsValue>;

    #[wasm_bindgen(constructor, catch)]
    fn new() -> Result<Hls, JsValue>;

    #[wasm_bindgen(method, js_name = loadSource)]
    fn load_source(this: &Hls, url: &str);

    #[wasm_bindgen(method, js_name = attachMedia)]
    fn attach_media(this: &Hls, media: &HtmlMediaElement);

    #[wasm_bindgen(method, js_name = detachMedia)]
    fn detach_media(this: &Hls);

    #[wasm_bindgen(method, js_name = stopLoad)]
    fn stop_load(this: &Hls);

    #[wasm_bindgen(method)]
    fn destroy(this: &Hls);

    #[wasm_bindgen(method)]
    fn on(this: &Hls, event: &str, listener: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn off(this: &Hls, event: &str, listener: &js_sys::Function);
}

/// Payload of `hlsError`
#[derive(Debug, Deserialize)]
struct HlsErrorData {
    #[serde(rename = "type")]
    kind: String,
    details: String,
    #[serde(default)]
    fatal: bool,
}

/// [`StreamingEngine`] backed by one hls.js instance
pub struct HlsEngine {
    hls: Option<Hls>,
    media: HtmlMediaElement,
    /// Latest id handed to `load_source`. Read when an event fires, so an
    /// event hls.js queued before a newer load is tagged with the newer id.
    load: Rc<Cell<LoadId>>,
}

impl HlsEngine {
    /// Create an engine for `media`. Without hls.js the engine reports
    /// itself unsupported.
    pub fn new(media: HtmlMediaElement) -> Self {
        let hls = match Hls::is_supported() {
            Ok(true) => Hls::new()
                .map_err(|e| warn!(error = ?e, "Failed to construct Hls"))
                .ok(),
            Ok(false) => None,
            Err(e) => {
                warn!(error = ?e, "hls.js not found");
                None
            }
        };

        Self {
            hls,
            media,
            load: Rc::new(Cell::new(LoadId::default())),
        }
    }

    /// Subscribe `deliver` to manifest-parsed and error events.
    ///
    /// Handlers are registered once for the lifetime of the engine.
    pub fn subscribe(&self, deliver: impl Fn(EngineEvent) + 'static) -> Vec<HlsSubscription> {
        let Some(hls) = self.hls.clone() else {
            return Vec::new();
        };
        let deliver = Rc::new(deliver);

        let load = Rc::clone(&self.load);
        let on_parsed = Rc::clone(&deliver);
        let parsed = HlsSubscription::new(&hls, MANIFEST_PARSED, move |_, _| {
            on_parsed(EngineEvent::ManifestParsed { load: load.get() });
        });

        let load = Rc::clone(&self.load);
        let error = HlsSubscription::new(&hls, ERROR, move |_, data| {
            match serde_wasm_bindgen::from_value::<HlsErrorData>(data) {
                Ok(data) => deliver(EngineEvent::Error {
                    load: load.get(),
                    kind: EngineErrorKind::from_hls(&data.kind),
                    fatal: data.fatal,
                    details: data.details,
                }),
                Err(e) => warn!(error = %e, "Unreadable hls.js error payload"),
            }
        });

        vec![parsed, error]
    }
}

impl StreamingEngine for HlsEngine {
    fn is_supported(&self) -> bool {
        self.hls.is_some()
    }

    fn load_source(&mut self, load: LoadId, url: &Url) {
        if let Some(hls) = &self.hls {
            self.load.set(load);
            debug!(%load, %url, "hls.loadSource");
            hls.load_source(url.as_str());
        }
    }

    fn attach_media(&mut self) {
        if let Some(hls) = &self.hls {
            hls.attach_media(&self.media);
        }
    }

    fn detach_media(&mut self) {
        if let Some(hls) = &self.hls {
            hls.detach_media();
        }
    }

    fn stop_load(&mut self) {
        if let Some(hls) = &self.hls {
            hls.stop_load();
        }
    }
}

impl Drop for HlsEngine {
    fn drop(&mut self) {
        if let Some(hls) = self.hls.take() {
            hls.destroy();
        }
    }
}

/// An `hls.on` registration, removed with `hls.off` on drop
pub struct HlsSubscription {
    hls: Hls,
    event: &'static str,
    closure: Closure<dyn FnMut(JsValue, JsValue)>,
}

impl HlsSubscription {
    fn new(hls: &Hls, event: &'static str, handler: impl FnMut(JsValue, JsValue) + 'static) -> Self {
        let closure = Closure::<dyn FnMut(JsValue, JsValue)>::new(handler);
        hls.on(event, closure.as_ref().unchecked_ref());
        Self {
            hls: hls.clone(),
            event,
            closure,
        }
    }
}

impl Drop for HlsSubscription {
    fn drop(&mut self) {
        self.hls.off(self.event, self.closure.as_ref().unchecked_ref());
    }
}
