use animeworld_core::{CategoryPage, ContentSummary};
use animeworld_logging::aw_info;
use scraper::Html;
use url::Url;

use crate::dom::select_first;
use crate::extract::Extractor;
use crate::search::PostListExtractor;
use crate::{ScrapeError, SiteClient, SiteConfig};

const NEXT_PAGE: &str = ".pagination a.next, a.next.page-numbers";

/// One page of a category archive.
#[derive(Debug, Clone)]
pub struct CategoryExtractor {
    cards: PostListExtractor,
}

impl CategoryExtractor {
    pub fn new(base: Url) -> Self {
        Self {
            cards: PostListExtractor::new(base),
        }
    }
}

impl Extractor for CategoryExtractor {
    /// Cards plus whether a next page is linked.
    type Output = (Vec<ContentSummary>, bool);

    fn extract(&self, document: &Html) -> Self::Output {
        let items = self.cards.extract(document);
        let has_next = select_first(document, NEXT_PAGE).is_some();
        (items, has_next)
    }
}

pub async fn fetch_category(
    client: &SiteClient,
    site: &SiteConfig,
    path: &str,
    page: u32,
) -> Result<CategoryPage, ScrapeError> {
    let page = page.max(1);
    let url = site.category_url(path, page);
    aw_info!("Scraping URL: {}", url);
    let html = client.get(&url, &client.options()).await?;
    let (items, has_next) = CategoryExtractor::new(site.base().clone()).extract_html(&html);

    Ok(CategoryPage {
        path: path.trim_matches('/').to_string(),
        page,
        items,
        has_next,
    })
}
