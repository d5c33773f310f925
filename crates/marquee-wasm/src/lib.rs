//! Marquee WASM - browser HLS player
//!
//! Mounts the player markup into a page element and drives it with
//! [`marquee_core::PlaybackController`], using hls.js where available and
//! native HLS otherwise.
//!
//! ## Usage
//!
//! ```javascript
//! import init, { MarqueePlayer } from '@marquee/wasm';
//!
//! await init();
//! const player = MarqueePlayer.mount(document.getElementById('player'), [
//!   { video: 'https://cdn.example/a/index.m3u8', next: 'https://cdn.example/b/index.m3u8', poster: 'a.jpg' },
//!   { video: 'https://cdn.example/b/index.m3u8', poster: 'b.jpg' },
//! ], { autoload: true });
//!
//! player.select(1);
//! ```

use wasm_bindgen::prelude::*;

mod fullscreen;
mod hls;
mod listeners;
mod media;
mod player;
mod view;

pub use fullscreen::DomFullscreen;
pub use hls::{Hls, HlsEngine, HlsSubscription};
pub use listeners::Listener;
pub use media::DomMedia;
pub use player::MarqueePlayer;
pub use view::DomControls;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    marquee_core::init();
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn js_error(message: impl Into<String>) -> JsValue {
    js_sys::Error::new(&message.into()).into()
}

/// Surface a core error to JavaScript, code included
pub(crate) fn to_js(err: marquee_core::Error) -> JsValue {
    js_error(format!("{err} ({})", err.error_code()))
}
