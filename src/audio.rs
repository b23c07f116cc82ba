//! Audio playback: a `rodio` thread driven by commands.
//!
//! [`AudioPlayer`] is the controller-facing handle and implements
//! [`AudioOutput`]; the thread fetches track bytes through the shared media
//! source, decodes them and publishes progress into a [`PlaybackHandle`].

mod output;
mod player;
mod sink;
mod thread;
mod types;

pub use output::AudioOutput;
pub use player::AudioPlayer;
pub use types::*;
