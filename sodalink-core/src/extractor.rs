//! The extraction pipeline: fetch a Soda Music share page, locate the
//! embedded `_ROUTER_DATA` payload, and walk it into a [`LyricsDocument`].

use crate::classifier::is_metadata_line;
use crate::error::{CoreError, Result};
use crate::model::{
    AlbumInfo, ArtistInfo, LyricsDocument, SongInfo, TimedLine, TimedWord, TrackStats,
};
use crate::payload::{find_embedded_json, ROUTER_DATA_MARKER};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

const LOG_TARGET: &str = "sodalink::extractor";

/// Domain substring identifying a Soda Music share link.
pub const SHARE_DOMAIN: &str = "qishui.douyin.com";

/// Source label attached to every successful result.
pub const SOURCE_LABEL: &str = "soda music";

/// Timeout for fetching the share page (30 seconds)
const FETCH_TIMEOUT_SECS: u64 = 30;

/// The share server rejects requests without a browser-looking User-Agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// JSON pointer from the router data root to the audio/lyrics payload.
const AUDIO_DATA_POINTER: &str = "/loaderData/track_page/audioWithLyricsOption";

/// Soda Music share-link lyrics extractor.
///
/// Stateless apart from its HTTP client; each [`extract`](Self::extract)
/// call is self-contained, with no retries and no caching.
pub struct SodaExtractor {
    client: reqwest::Client,
}

impl SodaExtractor {
    /// Create a new extractor with a redirect-following, 30-second-timeout
    /// HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Check whether `url` looks like a Soda Music share link.
    #[must_use]
    pub fn is_share_link(url: &str) -> bool {
        url.contains(SHARE_DOMAIN)
    }

    /// Fetch a share page and extract song metadata and timed lyrics.
    ///
    /// # Errors
    ///
    /// Returns a [`CoreError`] for network failures, a missing or malformed
    /// embedded payload, or a payload without audio data. Missing optional
    /// sub-objects (album, artists, stats, word timing) are not errors.
    pub async fn extract(&self, url: &str) -> Result<LyricsDocument> {
        info!(target: LOG_TARGET, "Fetching share page: {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(target: LOG_TARGET, "Fetched {} bytes", body.len());

        parse_page(&body)
    }
}

/// Parse a fetched share-page body into a [`LyricsDocument`].
///
/// This is the network-free part of the pipeline: payload location, JSON
/// parsing, structure navigation, and metadata-line filtering.
///
/// # Errors
///
/// Returns [`CoreError::PayloadNotFound`] when the `_ROUTER_DATA` marker is
/// absent, [`CoreError::JsonParse`] when the payload is malformed, and
/// [`CoreError::AudioDataNotFound`] when the audio/lyrics subtree is missing
/// or empty.
pub fn parse_page(body: &str) -> Result<LyricsDocument> {
    let raw = find_embedded_json(body, ROUTER_DATA_MARKER).ok_or(CoreError::PayloadNotFound)?;
    let router_data: Value = serde_json::from_str(raw)?;

    let audio = router_data
        .pointer(AUDIO_DATA_POINTER)
        .filter(|value| !is_missing(value))
        .ok_or(CoreError::AudioDataNotFound)?;
    let audio: AudioWithLyricsOption = serde_json::from_value(audio.clone())?;

    let song_info = build_song_info(&audio);
    let (plain_lines, lines) = build_lyric_lines(audio.lyrics);

    info!(
        target: LOG_TARGET,
        "Extracted {} lyric lines for track {:?}",
        lines.len(),
        song_info.track_name.as_deref().unwrap_or("<unknown>")
    );

    Ok(LyricsDocument {
        lyrics: plain_lines.join("\n"),
        lines,
        song_info,
        source: SOURCE_LABEL.to_string(),
    })
}

/// An absent, null, or empty audio subtree all mean the page carries no
/// audio data.
fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn build_song_info(audio: &AudioWithLyricsOption) -> SongInfo {
    let mut album = None;
    let mut artists = None;
    let mut stats = None;

    if let Some(ref track_info) = audio.track_info {
        album = track_info
            .album
            .as_ref()
            .filter(|raw| raw.has_content())
            .map(|raw| AlbumInfo {
                id: raw.id.clone(),
                name: raw.name.clone(),
                release_date: raw.release_date.clone(),
                cover_url: raw.url_cover.as_ref().and_then(|cover| cover.uri.clone()),
            });

        artists = track_info
            .artists
            .as_ref()
            .filter(|list| !list.is_empty())
            .map(|list| {
                list.iter()
                    .map(|raw| ArtistInfo {
                        id: raw.id.clone(),
                        name: raw.name.clone(),
                        avatar_url: raw.url_avatar.as_ref().and_then(|a| a.uri.clone()),
                        display_name: raw.simple_display_name.clone(),
                    })
                    .collect()
            });

        stats = track_info
            .stats
            .as_ref()
            .filter(|raw| raw.has_content())
            .map(|raw| TrackStats {
                collected_count: raw.count_collected,
                comment_count: raw.count_comment,
                shared_count: raw.count_shared,
            });
    }

    SongInfo {
        track_id: audio.track_id.clone(),
        track_name: audio.track_name.clone(),
        artist_name: audio.artist_name.clone(),
        duration: audio.duration.as_ref().and_then(NumberOrText::as_f64),
        artist_id: audio.artist_id.clone(),
        song_maker_team: audio.song_maker_team.clone(),
        audio_url: audio.url.clone(),
        album,
        artists,
        stats,
    }
}

/// Filter sentences through the metadata classifier and convert their timing.
/// The plain-text list and the timed list are built from the same filtered
/// set, so their lengths and order always agree.
fn build_lyric_lines(lyrics: Option<RawLyrics>) -> (Vec<String>, Vec<TimedLine>) {
    let mut plain = Vec::new();
    let mut lines = Vec::new();

    let Some(lyrics) = lyrics else {
        return (plain, lines);
    };

    for sentence in lyrics.sentences {
        let text = sentence.text.as_deref().unwrap_or("").trim();
        if text.is_empty() || is_metadata_line(text) {
            continue;
        }

        let words = sentence
            .words
            .into_iter()
            .filter_map(|word| {
                let word_text = word.text.unwrap_or_default();
                if word_text.is_empty() {
                    return None;
                }
                Some(TimedWord {
                    text: word_text,
                    start_time: timing_secs(word.start_ms, word.start_time),
                    end_time: timing_secs(word.end_ms, word.end_time),
                })
            })
            .collect();

        plain.push(text.to_string());
        lines.push(TimedLine {
            text: text.to_string(),
            start_time: timing_secs(sentence.start_ms, sentence.start_time),
            end_time: timing_secs(sentence.end_ms, sentence.end_time),
            words,
        });
    }

    (plain, lines)
}

/// Millisecond timestamp to seconds, preferring the `*Ms` field and falling
/// back to the `*Time` spelling; both are milliseconds in the page data.
fn timing_secs(ms: Option<f64>, fallback: Option<f64>) -> f64 {
    ms.or(fallback).unwrap_or(0.0) / 1000.0
}

/// Deserialize a value, mapping any shape mismatch to `None` instead of
/// failing the whole payload. Optional subtrees of the page vary across
/// track types.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

// Raw page structures under `audioWithLyricsOption`, field names as they
// appear in the hydration payload.

#[derive(Debug, Deserialize)]
struct AudioWithLyricsOption {
    track_id: Option<String>,
    #[serde(rename = "trackName")]
    track_name: Option<String>,
    #[serde(rename = "artistName")]
    artist_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    duration: Option<NumberOrText>,
    #[serde(rename = "artistIdStr")]
    artist_id: Option<String>,
    #[serde(rename = "songMakerTeamSentences", default)]
    song_maker_team: Vec<String>,
    url: Option<String>,
    #[serde(rename = "trackInfo", default, deserialize_with = "lenient")]
    track_info: Option<RawTrackInfo>,
    #[serde(default, deserialize_with = "lenient")]
    lyrics: Option<RawLyrics>,
}

/// Duration appears as either a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

impl NumberOrText {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawTrackInfo {
    #[serde(default, deserialize_with = "lenient")]
    album: Option<RawAlbum>,
    #[serde(default, deserialize_with = "lenient")]
    artists: Option<Vec<RawArtist>>,
    #[serde(default, deserialize_with = "lenient")]
    stats: Option<RawStats>,
}

#[derive(Debug, Deserialize)]
struct RawAlbum {
    id: Option<String>,
    name: Option<String>,
    release_date: Option<String>,
    url_cover: Option<RawImage>,
}

impl RawAlbum {
    /// An empty album object is treated the same as no album.
    fn has_content(&self) -> bool {
        self.id.is_some() || self.name.is_some() || self.release_date.is_some()
            || self.url_cover.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct RawArtist {
    id: Option<String>,
    name: Option<String>,
    url_avatar: Option<RawImage>,
    simple_display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStats {
    count_collected: Option<i64>,
    count_comment: Option<i64>,
    count_shared: Option<i64>,
}

impl RawStats {
    fn has_content(&self) -> bool {
        self.count_collected.is_some() || self.count_comment.is_some()
            || self.count_shared.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct RawLyrics {
    #[serde(default)]
    sentences: Vec<RawSentence>,
}

#[derive(Debug, Deserialize)]
struct RawSentence {
    text: Option<String>,
    #[serde(rename = "startMs")]
    start_ms: Option<f64>,
    #[serde(rename = "endMs")]
    end_ms: Option<f64>,
    #[serde(rename = "startTime")]
    start_time: Option<f64>,
    #[serde(rename = "endTime")]
    end_time: Option<f64>,
    #[serde(default)]
    words: Vec<RawWord>,
}

#[derive(Debug, Deserialize)]
struct RawWord {
    text: Option<String>,
    #[serde(rename = "startMs")]
    start_ms: Option<f64>,
    #[serde(rename = "endMs")]
    end_ms: Option<f64>,
    #[serde(rename = "startTime")]
    start_time: Option<f64>,
    #[serde(rename = "endTime")]
    end_time: Option<f64>,
}
