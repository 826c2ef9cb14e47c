//! Core extraction pipeline for Soda Music share links: embedded-payload
//! location, structure navigation, and metadata-line filtering.

pub mod classifier;
pub mod error;
pub mod extractor;
pub mod model;
pub mod payload;

pub use classifier::is_metadata_line;
pub use error::{CoreError, Result};
pub use extractor::{parse_page, SodaExtractor, SHARE_DOMAIN, SOURCE_LABEL};
pub use model::{
    AlbumInfo, ArtistInfo, LyricsDocument, SongInfo, TimedLine, TimedWord, TrackStats,
};
pub use payload::{find_embedded_json, ROUTER_DATA_MARKER};
