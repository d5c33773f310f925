//! DOM controls - player markup and the [`ControlsView`] over it

use marquee_core::{ControlsView, Error, PlayButton, PlaylistEntry, VolumeIcon};
use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlVideoElement};

use crate::js_error;

/// Player markup; styling is left to the embedding page
const MARKUP: &str = r#"
<div class="player-container">
  <div class="player">
    <video class="player-video" playsinline></video>
    <div class="player-error" hidden></div>
    <div class="controls">
      <div class="time"><span class="time-current"></span></div>
      <div class="progress"><div class="progress-filled"></div></div>
      <div class="controls-main">
        <div class="controls-left">
          <div class="volume">
            <div class="volume-btn"></div>
            <div class="volume-slider"><div class="volume-filled"></div></div>
          </div>
        </div>
        <div class="play-btn paused"></div>
        <div class="controls-right">
          <div class="speed"><ul class="speed-list"></ul></div>
          <div class="fullscreen"></div>
        </div>
      </div>
    </div>
  </div>
</div>
<div class="list-div"><ul class="playlist"></ul></div>
<div class="auto-container"><button class="auto-load">OFF</button></div>
"#;

/// Handles to every widget of a mounted player
pub struct DomControls {
    document: Document,
    pub(crate) player: HtmlElement,
    pub(crate) video: HtmlVideoElement,
    error_banner: HtmlElement,
    time_current: HtmlElement,
    pub(crate) progress: HtmlElement,
    progress_fill: HtmlElement,
    pub(crate) volume_btn: HtmlElement,
    pub(crate) volume_slider: HtmlElement,
    volume_fill: HtmlElement,
    pub(crate) play_btn: HtmlElement,
    pub(crate) speed_list: HtmlElement,
    pub(crate) fullscreen_btn: HtmlElement,
    pub(crate) playlist: HtmlElement,
    pub(crate) autoload_btn: HtmlElement,
}

fn find<T: JsCast>(root: &Element, selector: &str) -> Result<T, JsValue> {
    root.query_selector(selector)?
        .ok_or_else(|| js_error(format!("player markup is missing {selector}")))?
        .dyn_into::<T>()
        .map_err(|_| js_error(format!("{selector} has an unexpected element type")))
}

impl DomControls {
    /// Render the player markup into `root` and collect the widgets
    pub fn mount(document: &Document, root: &Element) -> Result<Self, JsValue> {
        root.set_inner_html(MARKUP);

        Ok(Self {
            document: document.clone(),
            player: find(root, ".player")?,
            video: find(root, ".player-video")?,
            error_banner: find(root, ".player-error")?,
            time_current: find(root, ".time-current")?,
            progress: find(root, ".progress")?,
            progress_fill: find(root, ".progress-filled")?,
            volume_btn: find(root, ".volume-btn")?,
            volume_slider: find(root, ".volume-slider")?,
            volume_fill: find(root, ".volume-filled")?,
            play_btn: find(root, ".play-btn")?,
            speed_list: find(root, ".speed-list")?,
            fullscreen_btn: find(root, ".fullscreen")?,
            playlist: find(root, ".playlist")?,
            autoload_btn: find(root, ".auto-load")?,
        })
    }

    /// Render one `li.speed-item` per rate
    pub fn render_speeds(&self, speeds: &[f64]) -> Result<(), JsValue> {
        self.speed_list.set_inner_html("");
        for rate in speeds {
            let item = self.document.create_element("li")?;
            item.set_class_name("speed-item");
            item.set_attribute("data-speed", &rate.to_string())?;
            item.set_text_content(Some(&format!("{rate}x")));
            self.speed_list.append_child(&item)?;
        }
        Ok(())
    }

    fn set_width(el: &HtmlElement, ratio: f64) {
        let width = format!("{}%", (ratio * 100.0).clamp(0.0, 100.0));
        if let Err(e) = el.style().set_property("width", &width) {
            debug!(error = ?e, "Failed to set width");
        }
    }

    fn children(parent: &Element, selector: &str) -> Vec<Element> {
        let Ok(nodes) = parent.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn build_entry(&self, entry: &PlaylistEntry) -> Result<Element, JsValue> {
        let li = self.document.create_element("li")?;
        if entry.active {
            li.class_list().add_1("active")?;
        }

        let link = self.document.create_element("a")?;
        link.set_attribute("href", "#")?;
        link.set_attribute("data-index", &entry.index.to_string())?;
        link.set_attribute("data-url", &entry.video)?;

        let poster = self.document.create_element("img")?;
        poster.set_attribute("src", &entry.poster)?;
        poster.set_attribute("alt", "")?;

        link.append_child(&poster)?;
        li.append_child(&link)?;
        Ok(li)
    }
}

impl ControlsView for DomControls {
    fn set_play_button(&mut self, state: PlayButton) {
        let classes = self.play_btn.class_list();
        let _ = classes.remove_2("playing", "paused");
        let _ = classes.add_1(state.css_class());
    }

    fn set_volume_fill(&mut self, ratio: f64) {
        Self::set_width(&self.volume_fill, ratio);
    }

    fn set_volume_icon(&mut self, icon: VolumeIcon) {
        let classes = self.volume_btn.class_list();
        let _ = classes.remove_2("muted", "loud");
        if let Some(class) = icon.css_class() {
            let _ = classes.add_1(class);
        }
    }

    fn set_progress_fill(&mut self, ratio: f64) {
        Self::set_width(&self.progress_fill, ratio);
    }

    fn set_time_label(&mut self, label: &str) {
        self.time_current.set_text_content(Some(label));
    }

    fn set_active_speed(&mut self, rate: f64) {
        for item in Self::children(&self.speed_list, ".speed-item") {
            let speed = item
                .get_attribute("data-speed")
                .and_then(|s| s.parse::<f64>().ok());
            let _ = item.class_list().toggle_with_force("active", speed == Some(rate));
        }
    }

    fn set_autoload_label(&mut self, label: &str) {
        self.autoload_btn.set_text_content(Some(label));
    }

    fn render_playlist(&mut self, entries: &[PlaylistEntry]) {
        self.playlist.set_inner_html("");
        for entry in entries {
            match self.build_entry(entry) {
                Ok(li) => {
                    if let Err(e) = self.playlist.append_child(&li) {
                        warn!(error = ?e, "Failed to append playlist entry");
                    }
                }
                Err(e) => warn!(index = entry.index, error = ?e, "Failed to build playlist entry"),
            }
        }
    }

    fn mark_current(&mut self, index: Option<usize>) {
        for (i, li) in Self::children(&self.playlist, "li").into_iter().enumerate() {
            let _ = li.class_list().toggle_with_force("active", Some(i) == index);
        }
    }

    fn show_error(&mut self, error: Option<&Error>) {
        match error {
            Some(err) => {
                self.error_banner
                    .set_text_content(Some(&format!("{err} ({})", err.error_code())));
                let _ = self.error_banner.set_attribute("data-code", err.error_code());
                self.error_banner.set_hidden(false);
            }
            None => {
                self.error_banner.set_text_content(None);
                let _ = self.error_banner.remove_attribute("data-code");
                self.error_banner.set_hidden(true);
            }
        }
    }
}
