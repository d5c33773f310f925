//! Keyboard control handling

/// Action bound to a key press
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    PlayPause,
    SeekForward(f64),
    SeekBackward(f64),
}

impl ControlAction {
    /// Map a DOM `KeyboardEvent.key` value to an action
    pub fn from_key(key: &str, seek_step: f64) -> Option<Self> {
        match key {
            " " => Some(ControlAction::PlayPause),
            "ArrowRight" => Some(ControlAction::SeekForward(seek_step)),
            "ArrowLeft" => Some(ControlAction::SeekBackward(seek_step)),
            _ => None,
        }
    }
}
