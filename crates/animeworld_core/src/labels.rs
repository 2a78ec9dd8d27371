use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::expect_used)]
static CROSS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)[xX](\d+)").expect("valid regex"));

#[allow(clippy::expect_used)]
static SE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[sS](\d+)[eE](\d+)").expect("valid regex"));

#[allow(clippy::expect_used)]
static EPISODE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)-\d+x\d+$").expect("valid regex"));

#[allow(clippy::expect_used)]
static POST_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"postid-(\d+)").expect("valid regex"));

/// Season and episode numbers as printed on the site, kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeasonEpisode {
    pub season: String,
    pub episode: String,
}

/// Parse `2x1` (either case of `x`) or `S2E1` (any case). The first format
/// wins when both appear; anything else yields two empty strings.
pub fn parse_episode_label(label: &str) -> SeasonEpisode {
    CROSS_LABEL
        .captures(label)
        .or_else(|| SE_LABEL.captures(label))
        .map(|caps| SeasonEpisode {
            season: caps[1].to_string(),
            episode: caps[2].to_string(),
        })
        .unwrap_or_default()
}

/// `spy-x-family-3x1` -> `spy-x-family`. Ids without the suffix are returned
/// unchanged.
pub fn series_id_from_episode_id(episode_id: &str) -> &str {
    EPISODE_SUFFIX
        .captures(episode_id)
        .and_then(|caps| caps.get(1))
        .map_or(episode_id, |m| m.as_str())
}

/// The internal post id from a `<body class="...">` value.
pub fn post_id_from_body_class(class: &str) -> Option<String> {
    POST_ID.captures(class).map(|caps| caps[1].to_string())
}
