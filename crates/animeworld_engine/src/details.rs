use animeworld_core::{classify_url, normalize_image_url, post_id_from_body_class, DetailsRecord};
use animeworld_logging::aw_info;
use scraper::Html;
use url::Url;

use crate::dom::{element_text, extract_attribute, find_all, select_all, select_first, texts};
use crate::episodes::EpisodesExtractor;
use crate::extract::Extractor;
use crate::{FallbackChain, ScrapeError, SiteClient, SiteConfig};

/// A series or movie page. The `id` and `kind` fields are left for the caller,
/// which knows which URL the page came from.
#[derive(Debug, Clone)]
pub struct DetailsExtractor {
    base: Url,
}

impl DetailsExtractor {
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl Extractor for DetailsExtractor {
    type Output = DetailsRecord;

    fn extract(&self, document: &Html) -> DetailsRecord {
        let mut title = element_text(select_first(document, ".entry-header .entry-title"));
        if title.is_empty() {
            title = element_text(select_first(document, "h1"));
        }

        let thumbnail = select_first(document, ".post-thumbnail img");
        let mut image = extract_attribute(thumbnail, "src");
        if image.is_empty() {
            image = extract_attribute(thumbnail, "data-src");
        }

        let seasons = select_all(document, ".choose-season li a[data-season]")
            .into_iter()
            .map(|link| extract_attribute(Some(link), "data-season"))
            .filter(|season| !season.is_empty())
            .collect();

        let body_class = extract_attribute(select_first(document, "body"), "class");

        DetailsRecord {
            post_id: post_id_from_body_class(&body_class),
            title,
            image: normalize_image_url(&image),
            description: element_text(select_first(document, ".description")),
            year: element_text(select_first(document, ".entry-meta .year")),
            duration: element_text(select_first(document, ".entry-meta .duration")),
            genres: texts(&select_all(document, ".genres a")),
            seasons,
            cast: select_first(document, ".cast-lst")
                .map(|list| texts(&find_all(list, "a")))
                .unwrap_or_default(),
            episodes: EpisodesExtractor::scoped(self.base.clone(), "#episode_by_temp li")
                .extract(document),
            ..DetailsRecord::default()
        }
    }
}

/// Details for a series or movie slug: the series page first, then the
/// movie page. A page that loads without a title does not count.
pub async fn fetch_details(
    client: &SiteClient,
    site: &SiteConfig,
    id: &str,
) -> Result<DetailsRecord, ScrapeError> {
    aw_info!("Fetching details for: {}", id);
    let extractor = DetailsExtractor::new(site.base().clone());
    let extractor = &extractor;

    FallbackChain::new(format!("details of {id}"), site.detail_candidates(id))
        .run(|url| async move {
            let html = client.get(&url, &client.options()).await?;
            let mut record = extractor.extract_html(&html);
            if record.title.is_empty() {
                return Err(ScrapeError::parse(format!("no title on {url}")));
            }
            record.id = id.to_string();
            record.kind = classify_url(&url);
            Ok(Some(record))
        })
        .await
}
