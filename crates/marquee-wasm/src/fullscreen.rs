//! Fullscreen through whichever vendor API the browser exposes

use js_sys::{Function, Promise, Reflect};
use marquee_core::{Error, FullscreenApi, FullscreenController, Result};
use tracing::{info, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element};

/// [`FullscreenController`] for the player element
pub struct DomFullscreen {
    api: Option<FullscreenApi>,
    element: Element,
    document: Document,
}

impl DomFullscreen {
    /// Probe the vendor API once
    pub fn new(element: Element, document: Document) -> Self {
        let api = FullscreenApi::detect(|name| {
            Reflect::has(&element, &JsValue::from_str(name)).unwrap_or(false)
        });
        info!(?api, "Fullscreen API selected");
        Self { api, element, document }
    }

    fn api(&self) -> Result<FullscreenApi> {
        self.api
            .ok_or_else(|| Error::Fullscreen("no fullscreen API in this browser".into()))
    }
}

/// Call `target[method]()` and log a rejected promise
fn call_method(target: &JsValue, method: &str) -> Result<()> {
    let function: Function = Reflect::get(target, &JsValue::from_str(method))
        .and_then(|f| f.dyn_into::<Function>())
        .map_err(|e| Error::Fullscreen(format!("{method} unavailable: {e:?}")))?;

    let ret = function
        .call0(target)
        .map_err(|e| Error::Fullscreen(format!("{method} threw: {e:?}")))?;

    if let Ok(promise) = ret.dyn_into::<Promise>() {
        let method = method.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                warn!(method, error = ?e, "Fullscreen request rejected");
            }
        });
    }
    Ok(())
}

impl FullscreenController for DomFullscreen {
    fn is_active(&self) -> bool {
        let Some(api) = self.api else {
            return false;
        };
        Reflect::get(&self.document, &JsValue::from_str(api.element_property()))
            .map(|el| !el.is_null() && !el.is_undefined())
            .unwrap_or(false)
    }

    fn enter(&self) -> Result<()> {
        call_method(&self.element, self.api()?.request_method())
    }

    fn exit(&self) -> Result<()> {
        call_method(&self.document, self.api()?.exit_method())
    }
}
