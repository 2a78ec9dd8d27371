use animeworld_core::{
    derive_id_and_type, normalize_image_url, parse_episode_label, post_id_from_body_class,
    EpisodeList, EpisodeSummary,
};
use animeworld_logging::{aw_debug, aw_info, aw_trace};
use scraper::{ElementRef, Html};
use url::Url;

use crate::dom::{element_text, extract_attribute, find_first, select_all, select_first};
use crate::extract::Extractor;
use crate::{FallbackChain, ScrapeError, SiteClient, SiteConfig};

/// Episode cards (`li`) as served by the season AJAX endpoint or embedded in
/// a details page.
#[derive(Debug, Clone)]
pub struct EpisodesExtractor {
    base: Url,
    scope: &'static str,
}

impl EpisodesExtractor {
    pub fn new(base: Url) -> Self {
        Self { base, scope: "li" }
    }

    /// Only list items under `scope`, e.g. `#episode_by_temp li`.
    pub fn scoped(base: Url, scope: &'static str) -> Self {
        Self { base, scope }
    }

    fn extract_episode(&self, item: ElementRef<'_>) -> Option<EpisodeSummary> {
        let title = element_text(find_first(item, ".entry-title"));
        if title.is_empty() {
            aw_trace!("Dropping episode item without title");
            return None;
        }
        let label = element_text(find_first(item, ".num-epi"));
        let image = extract_attribute(find_first(item, "img"), "src");
        let link = extract_attribute(find_first(item, "a.lnk-blk"), "href");
        let numbering = parse_episode_label(&label);

        Some(EpisodeSummary {
            id: derive_id_and_type(&link, &self.base).id,
            season: numbering.season,
            episode: numbering.episode,
            title,
            image: normalize_image_url(&image),
        })
    }
}

impl Extractor for EpisodesExtractor {
    type Output = Vec<EpisodeSummary>;

    fn extract(&self, document: &Html) -> Vec<EpisodeSummary> {
        select_all(document, self.scope)
            .into_iter()
            .filter_map(|item| self.extract_episode(item))
            .collect()
    }
}

/// Post id from the `<body class>` of a full page.
pub fn find_post_id(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let class = extract_attribute(select_first(&document, "body"), "class");
    post_id_from_body_class(&class)
}

/// Look up the numeric post id behind a series or movie slug.
pub async fn resolve_post_id(
    client: &SiteClient,
    site: &SiteConfig,
    id: &str,
) -> Result<String, ScrapeError> {
    let chain = FallbackChain::new(format!("post id of {id}"), site.detail_candidates(id));
    chain
        .run(|url| async move {
            let html = client.get(&url, &client.options()).await?;
            let post_id = find_post_id(&html);
            if post_id.is_none() {
                aw_debug!("No postid token on {}", url);
            }
            Ok(post_id)
        })
        .await
}

/// Episodes of one season, fetched through the site's AJAX endpoint.
pub async fn fetch_episodes(
    client: &SiteClient,
    site: &SiteConfig,
    id: &str,
    season: &str,
) -> Result<EpisodeList, ScrapeError> {
    let post_id = resolve_post_id(client, site, id).await?;
    aw_info!("Resolved {} to post {}", id, post_id);

    let url = site.season_ajax_url(season, &post_id);
    let options = client
        .options()
        .header("Accept", "*/*")
        .header("Accept-Language", "en-US,en;q=0.9")
        .header("Referer", site.series_url(id))
        .header("X-Requested-With", "XMLHttpRequest");
    let html = client.get(&url, &options).await?;
    let episodes = EpisodesExtractor::new(site.base().clone()).extract_html(&html);

    Ok(EpisodeList { post_id, episodes })
}
