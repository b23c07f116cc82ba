//! Filename normalization shared by display and address building.
//!
//! A manifest entry is percent-decoded exactly once to obtain its canonical
//! name. Labels and local paths use the canonical name; URLs re-encode it.
//! Entries written either as `a b.mp3` or `a%20b.mp3` therefore resolve to
//! the same file.

use std::borrow::Cow;

/// Decode percent-escapes in a manifest filename.
///
/// Falls back to the raw text when the escapes do not decode to valid UTF-8.
pub fn canonical_name(raw: &str) -> Cow<'_, str> {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(raw),
    }
}

/// Human-readable label for a playlist entry or now-playing line.
pub fn display_name(raw: &str) -> String {
    canonical_name(raw).trim().to_string()
}

/// Percent-encode a single path segment for use in a URL.
pub fn url_segment(raw: &str) -> String {
    urlencoding::encode(&canonical_name(raw)).into_owned()
}
