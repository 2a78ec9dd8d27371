use animeworld_core::{ContentSummary, HomeSnapshot};
use animeworld_logging::aw_info;
use scraper::Html;
use url::Url;

use crate::dom::select_all;
use crate::extract::{extract_card, Extractor};
use crate::{ScrapeError, SiteClient, SiteConfig};

const NEWEST_DROPS: &str = "#widget_list_episodes-5 .swiper-slide, .widget_list_episodes .swiper-slide";
const NEW_ANIME_ARRIVALS: &str = "#widget_list_movies_series-2 .post";
const CARTOON_SERIES: &str = "#widget_list_movies_series-8 .post";
const ANIME_MOVIES: &str = "#widget_list_movies_series-4 .post";
const CARTOON_FILMS: &str = "#widget_list_movies_series-11 .post";

/// Landing page widgets.
#[derive(Debug, Clone)]
pub struct HomeExtractor {
    base: Url,
}

impl HomeExtractor {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    fn section(&self, document: &Html, css: &str, with_progress: bool) -> Vec<ContentSummary> {
        select_all(document, css)
            .into_iter()
            .filter_map(|item| extract_card(item, &self.base, with_progress))
            .collect()
    }
}

impl Extractor for HomeExtractor {
    type Output = HomeSnapshot;

    fn extract(&self, document: &Html) -> HomeSnapshot {
        HomeSnapshot {
            newest_drops: self.section(document, NEWEST_DROPS, true),
            new_anime_arrivals: self.section(document, NEW_ANIME_ARRIVALS, false),
            cartoon_series: self.section(document, CARTOON_SERIES, false),
            anime_movies: self.section(document, ANIME_MOVIES, false),
            cartoon_films: self.section(document, CARTOON_FILMS, false),
        }
    }
}

pub async fn fetch_home(client: &SiteClient, site: &SiteConfig) -> Result<HomeSnapshot, ScrapeError> {
    let url = site.home_url();
    aw_info!("Scraping URL: {}", url);
    let html = client.get(&url, &client.options()).await?;
    Ok(HomeExtractor::new(site.base().clone()).extract_html(&html))
}
