use std::time::Duration;

use crate::library::Location;

use super::types::PlaybackError;

/// The single playback handle driven by the controller.
///
/// Mirrors a media element: one loaded resource, a paused flag, a position,
/// a duration that becomes known once the resource is decoded, and a volume.
pub trait AudioOutput {
    /// Replace the loaded resource. The new resource starts paused at zero.
    fn load(&mut self, location: Location);
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    fn seek_to(&mut self, position: Duration);
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    fn set_volume(&mut self, volume: f32);
    fn volume(&self) -> f32;
}
