//! Output data model for a parsed share page. Wire field names follow the
//! original frontend contract: snake_case song-info keys, camelCase timing
//! keys, and `char_timing` for per-word timing.

use serde::{Deserialize, Serialize};

/// Everything recovered from one share page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsDocument {
    /// Filtered lyric lines joined with newlines.
    pub lyrics: String,
    /// The same filtered lines, in the same order, with timing.
    #[serde(rename = "lyrics_with_timing")]
    pub lines: Vec<TimedLine>,
    pub song_info: SongInfo,
    pub source: String,
}

/// Song-level metadata. Every field is optional; absence of a nested
/// sub-object (album, artists, stats) is valid, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SongInfo {
    pub track_id: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    /// Track duration in seconds.
    pub duration: Option<f64>,
    pub artist_id: Option<String>,
    /// Production-team credit sentences from the page.
    #[serde(default)]
    pub song_maker_team: Vec<String>,
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<AlbumInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<ArtistInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<TrackStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlbumInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub cover_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtistInfo {
    pub id: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackStats {
    pub collected_count: Option<i64>,
    pub comment_count: Option<i64>,
    pub shared_count: Option<i64>,
}

/// One lyric line that passed the metadata filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedLine {
    pub text: String,
    /// Line start in seconds.
    #[serde(rename = "startTime")]
    pub start_time: f64,
    /// Line end in seconds.
    #[serde(rename = "endTime")]
    pub end_time: f64,
    /// Per-word timing, empty when the page provides none.
    #[serde(rename = "char_timing", default)]
    pub words: Vec<TimedWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedWord {
    pub text: String,
    #[serde(rename = "startTime")]
    pub start_time: f64,
    #[serde(rename = "endTime")]
    pub end_time: f64,
}
