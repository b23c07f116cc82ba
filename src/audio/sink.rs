//! Utilities for creating `rodio` sinks from fetched track bytes.
//!
//! The helpers here decode an in-memory track, report its length and prepare
//! a paused `Sink` at the requested start position.

use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::library::Location;

use super::types::PlaybackError;

/// Bytes of the loaded track, shared so the sink can be rebuilt cheaply.
pub(super) type TrackBytes = Arc<[u8]>;

/// Create a paused `Sink` for `bytes` that starts playback at `start_at`.
///
/// Returns the sink and the track length as reported by the decoder.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    location: &Location,
    bytes: &TrackBytes,
    start_at: Duration,
    volume: f32,
) -> Result<(Sink, Option<Duration>), PlaybackError> {
    let decoder = Decoder::new(Cursor::new(bytes.clone())).map_err(|e| PlaybackError::Decode {
        location: location.clone(),
        message: e.to_string(),
    })?;
    let total = decoder.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    // `skip_duration` is our fallback seeking primitive; even Duration::ZERO is fine.
    sink.append(decoder.skip_duration(start_at));
    sink.pause();
    Ok((sink, total))
}

/// Read the track length from container metadata.
pub(super) fn probe_duration(bytes: &TrackBytes) -> Option<Duration> {
    let tagged = Probe::new(Cursor::new(&bytes[..]))
        .guess_file_type()
        .ok()?
        .read()
        .ok()?;
    let duration = tagged.properties().duration();
    (!duration.is_zero()).then_some(duration)
}
