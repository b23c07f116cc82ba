//! Application module: the player controller and its seams.
//!
//! `Player` owns the player state, the audio output and the view. The album
//! browser and playlist renderer are `Player` operations in their own files.

mod browser;
mod controller;
mod format;
mod playlist;
mod state;
mod view;

pub use controller::Player;
pub use format::*;
pub use playlist::playlist_entries;
pub use state::PlayerState;
pub use view::*;

#[cfg(test)]
mod tests;
