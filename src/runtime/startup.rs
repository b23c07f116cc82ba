use tracing::info;

use crate::app::{Player, PlayerView};
use crate::audio::AudioOutput;

/// Read the manifest, show the album cards and cue the first album paused.
pub fn prepare<O: AudioOutput, V: PlayerView>(player: &mut Player<O, V>) {
    player.load_manifest();
    player.render_albums();
    player.preload_first_album();
    info!(albums = player.cards().len(), "library ready");
}
