//! Animeworld engine: document fetching and the per-page extractors.
mod category;
mod client;
mod decode;
mod details;
mod dom;
mod embed;
mod engine;
mod episodes;
mod extract;
mod fallback;
mod fetch;
mod home;
mod search;
mod site;
mod types;
mod user_agent;

pub use category::{fetch_category, CategoryExtractor};
pub use client::{RequestOptions, SiteClient, DEFAULT_HEADERS};
pub use decode::{decode_html, DecodedHtml};
pub use details::{fetch_details, DetailsExtractor};
pub use dom::extract_attribute;
pub use embed::{fetch_embed, EmbedExtractor};
pub use engine::SiteScraper;
pub use episodes::{fetch_episodes, find_post_id, resolve_post_id, EpisodesExtractor};
pub use extract::Extractor;
pub use fallback::FallbackChain;
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use home::{fetch_home, HomeExtractor};
pub use search::{
    extract_nonce, search_full_page, search_suggest, PostListExtractor, SuggestionExtractor,
};
pub use site::{SiteConfig, DEFAULT_BASE_URL};
pub use types::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, FetchRequest, HttpMethod, ScrapeError,
    ScrapeErrorKind,
};
pub use user_agent::{FixedUserAgent, RotatingUserAgents, UserAgentSource};

pub use scraper::Html;
