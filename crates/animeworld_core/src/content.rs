use serde::{Deserialize, Serialize};

/// Category of a listing, inferred from the shape of its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Series,
    Movie,
    #[default]
    Unknown,
}

/// A card from a listing widget (home page, category page).
///
/// `season` and `episodes` are only filled for the "newest drops" widget and
/// only when the card shows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub title: String,
    pub image: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episodes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    pub id: String,
    /// Empty when the episode label carries no recognizable numbering.
    pub season: String,
    pub episode: String,
    pub title: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeList {
    pub post_id: String,
    pub episodes: Vec<EpisodeSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedServer {
    pub server: u32,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedResult {
    pub id: String,
    /// Ascending by `server`.
    pub servers: Vec<EmbedServer>,
}

/// One search hit. Suggestion results carry no image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<ContentSummary> for SearchResult {
    fn from(card: ContentSummary) -> Self {
        Self {
            id: card.id,
            kind: card.kind,
            title: card.title,
            image: Some(card.image),
        }
    }
}

/// The five listing widgets of the landing page, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSnapshot {
    pub newest_drops: Vec<ContentSummary>,
    pub new_anime_arrivals: Vec<ContentSummary>,
    pub cartoon_series: Vec<ContentSummary>,
    pub anime_movies: Vec<ContentSummary>,
    pub cartoon_films: Vec<ContentSummary>,
}

impl HomeSnapshot {
    pub fn total_items(&self) -> usize {
        self.newest_drops.len()
            + self.new_anime_arrivals.len()
            + self.cartoon_series.len()
            + self.anime_movies.len()
            + self.cartoon_films.len()
    }
}

/// Everything the series or movie page shows about one title.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    pub title: String,
    pub image: String,
    pub description: String,
    pub year: String,
    pub duration: String,
    pub genres: Vec<String>,
    pub seasons: Vec<String>,
    pub cast: Vec<String>,
    pub episodes: Vec<EpisodeSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    pub path: String,
    pub page: u32,
    pub items: Vec<ContentSummary>,
    pub has_next: bool,
}
