//! Animeworld core: record types and the pure normalizers behind every extractor.
mod content;
mod labels;
pub mod normalize;

pub use content::{
    CategoryPage, ContentSummary, ContentType, DetailsRecord, EmbedResult, EmbedServer,
    EpisodeList, EpisodeSummary, HomeSnapshot, SearchResult,
};
pub use labels::{
    parse_episode_label, post_id_from_body_class, series_id_from_episode_id, SeasonEpisode,
};
pub use normalize::{
    classify_url, derive_id_and_type, normalize_image_url, resolve_url, sanitize_text,
    LinkIdentity,
};
