//! Control widgets seam
//!
//! The controller never touches markup. It pushes state into a
//! [`ControlsView`], which the browser layer backs with DOM elements.

use crate::{Error, PlayButton, PlaylistEntry, VolumeIcon};

/// Visual controls kept in sync with playback
pub trait ControlsView {
    fn set_play_button(&mut self, state: PlayButton);

    /// Volume fill as a ratio in `[0, 1]`
    fn set_volume_fill(&mut self, ratio: f64);
    fn set_volume_icon(&mut self, icon: VolumeIcon);

    /// Progress fill as a ratio in `[0, 1]`
    fn set_progress_fill(&mut self, ratio: f64);
    fn set_time_label(&mut self, label: &str);

    /// Highlight the speed option matching `rate`, clearing the others
    fn set_active_speed(&mut self, rate: f64);

    fn set_autoload_label(&mut self, label: &str);

    /// Render the playlist rows
    fn render_playlist(&mut self, entries: &[PlaylistEntry]);
    /// Highlight the row of the current video
    fn mark_current(&mut self, index: Option<usize>);

    /// Show a playback error, or clear the banner with `None`
    fn show_error(&mut self, error: Option<&Error>);
}
