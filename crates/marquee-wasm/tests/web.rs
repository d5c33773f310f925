//! Browser tests for the DOM layer.
//!
//! Run with `wasm-pack test --headless --chrome crates/marquee-wasm`.

#![cfg(target_arch = "wasm32")]

use marquee_core::{ControlsView, Error, PlayButton, PlaylistEntry, VolumeIcon};
use marquee_wasm::{DomControls, MarqueePlayer};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;
use web_sys::{Document, Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn root() -> Element {
    let doc = document();
    let root = doc.create_element("div").unwrap();
    doc.body().unwrap().append_child(&root).unwrap();
    root
}

fn query(root: &Element, selector: &str) -> HtmlElement {
    root.query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into::<HtmlElement>()
        .unwrap()
}

fn entry(index: usize, active: bool) -> PlaylistEntry {
    PlaylistEntry {
        index,
        video: format!("https://cdn.example/{index}/index.m3u8"),
        poster: format!("/posters/{index}.jpg"),
        active,
    }
}

#[wasm_bindgen_test]
fn mount_renders_widgets() {
    let root = root();
    let controls = DomControls::mount(&document(), &root).unwrap();
    controls.render_speeds(&[0.5, 1.0, 2.0]).unwrap();

    assert!(root.query_selector(".player-video").unwrap().is_some());
    assert_eq!(root.query_selector_all(".speed-item").unwrap().length(), 3);
    assert!(query(&root, ".player-error").hidden());
}

#[wasm_bindgen_test]
fn button_classes_follow_state() {
    let root = root();
    let mut controls = DomControls::mount(&document(), &root).unwrap();

    controls.set_play_button(PlayButton::Playing);
    let play = query(&root, ".play-btn");
    assert!(play.class_list().contains("playing"));
    assert!(!play.class_list().contains("paused"));

    controls.set_volume_icon(VolumeIcon::Muted);
    assert!(query(&root, ".volume-btn").class_list().contains("muted"));
    controls.set_volume_icon(VolumeIcon::Normal);
    let volume = query(&root, ".volume-btn");
    assert!(!volume.class_list().contains("muted"));
    assert!(!volume.class_list().contains("loud"));
}

#[wasm_bindgen_test]
fn active_speed_is_exclusive() {
    let root = root();
    let mut controls = DomControls::mount(&document(), &root).unwrap();
    controls.render_speeds(&[0.5, 1.0, 2.0]).unwrap();

    controls.set_active_speed(2.0);
    assert_eq!(root.query_selector_all(".speed-item.active").unwrap().length(), 1);
    let active = root.query_selector(".speed-item.active").unwrap().unwrap();
    assert_eq!(active.get_attribute("data-speed").as_deref(), Some("2"));
}

#[wasm_bindgen_test]
fn playlist_renders_and_marks_current() {
    let root = root();
    let mut controls = DomControls::mount(&document(), &root).unwrap();

    controls.render_playlist(&[entry(0, true), entry(1, false), entry(2, false)]);
    assert_eq!(root.query_selector_all(".playlist li").unwrap().length(), 3);
    let link = root.query_selector(".playlist a[data-index='1']").unwrap().unwrap();
    assert_eq!(
        link.get_attribute("data-url").as_deref(),
        Some("https://cdn.example/1/index.m3u8")
    );

    controls.mark_current(Some(2));
    let active = root.query_selector_all(".playlist li.active").unwrap();
    assert_eq!(active.length(), 1);
    let marked = root
        .query_selector(".playlist li.active a")
        .unwrap()
        .unwrap();
    assert_eq!(marked.get_attribute("data-index").as_deref(), Some("2"));
}

#[wasm_bindgen_test]
fn error_banner_shows_and_clears() {
    let root = root();
    let mut controls = DomControls::mount(&document(), &root).unwrap();
    let banner = query(&root, ".player-error");

    controls.show_error(Some(&Error::EngineUnsupported));
    assert!(!banner.hidden());
    assert_eq!(
        banner.get_attribute("data-code").as_deref(),
        Some("ENGINE_UNSUPPORTED")
    );

    controls.show_error(None);
    assert!(banner.hidden());
    assert!(banner.get_attribute("data-code").is_none());
}

#[wasm_bindgen_test]
fn player_mounts_with_playlist() {
    let root = root();
    let playlist = js_sys::JSON::parse(
        r#"[
            {"video": "https://cdn.example/a/index.m3u8", "next": "https://cdn.example/b/index.m3u8", "poster": "a.jpg"},
            {"video": "https://cdn.example/b/index.m3u8", "poster": "b.jpg"}
        ]"#,
    )
    .unwrap();

    let player = MarqueePlayer::mount(root.clone(), playlist, JsValue::UNDEFINED).unwrap();
    assert_eq!(root.query_selector_all(".playlist li").unwrap().length(), 2);
    assert!(!player.is_autoload().unwrap());

    player.toggle_autoload().unwrap();
    assert!(player.is_autoload().unwrap());
    assert_eq!(query(&root, ".auto-load").text_content().as_deref(), Some("ON"));

    assert!(player.set_speed(0.0).is_err());
    assert!(player.set_speed(3.0).is_err());
    player.set_speed(1.5).unwrap();
    let active = root.query_selector(".speed-item.active").unwrap().unwrap();
    assert_eq!(active.get_attribute("data-speed").as_deref(), Some("1.5"));
    player.unmount();
}

#[wasm_bindgen_test]
fn status_json_reports_controller_state() {
    let playlist = js_sys::JSON::parse(r#"[{"video": "https://cdn.example/a/index.m3u8"}]"#).unwrap();
    let config = js_sys::JSON::parse(r#"{"autoload": true, "cue_first": false}"#).unwrap();
    let player = MarqueePlayer::mount(root(), playlist, config).unwrap();

    let status: serde_json::Value = serde_json::from_str(&player.status_json().unwrap()).unwrap();
    assert_eq!(status["state"], "Idle");
    assert_eq!(status["autoload"], true);
    assert!(status["current"].is_null());
}

#[wasm_bindgen_test]
fn empty_playlist_is_rejected() {
    let playlist = js_sys::Array::new();
    assert!(MarqueePlayer::mount(root(), playlist.into(), JsValue::NULL).is_err());
}
