use std::sync::LazyLock;

use animeworld_core::{derive_id_and_type, ContentSummary, ContentType, SearchResult};
use animeworld_logging::{aw_debug, aw_info};
use regex::Regex;
use scraper::{ElementRef, Html};
use url::form_urlencoded;
use url::Url;

use crate::dom::{extract_attribute, find_first, own_text, select_all, select_first};
use crate::extract::{extract_card, Extractor};
use crate::{ScrapeError, SiteClient, SiteConfig};

const NONCE_SCRIPT: &str = "#funciones_public_js-js-extra";
const SUGGEST_ACTION: &str = "action_tr_search_suggest";
const MORE_RESULTS_ID: &str = "more-shm";
const VOID_LINK: &str = "javascript:void(0)";

#[allow(clippy::expect_used)]
static NONCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""nonce"\s*:\s*"([^"]+)""#).expect("valid regex"));

/// Pull the search nonce out of the inline `torofilm_Public` script.
pub fn extract_nonce(html: &str) -> Result<String, ScrapeError> {
    let document = Html::parse_document(html);
    let script = select_first(&document, NONCE_SCRIPT)
        .ok_or_else(|| ScrapeError::parse("nonce script tag not found"))?;
    let content: String = script.text().collect();
    NONCE
        .captures(&content)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ScrapeError::parse("nonce not found in script tag"))
}

/// The flat `li` list returned by the suggestion endpoint.
#[derive(Debug, Clone)]
pub struct SuggestionExtractor {
    base: Url,
}

impl SuggestionExtractor {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    fn extract_item(&self, item: ElementRef<'_>) -> Option<SearchResult> {
        let class = item.value().attr("class").unwrap_or_default();
        if class.contains("title") {
            return None;
        }

        let link_el = find_first(item, "a")?;
        let link = extract_attribute(Some(link_el), "href");
        let link_id = link_el.value().attr("id").unwrap_or_default();
        if link.is_empty() || link == VOID_LINK || link_id == MORE_RESULTS_ID {
            return None;
        }

        let title = own_text(link_el);
        if title.is_empty() {
            return None;
        }

        let identity = derive_id_and_type(&link, &self.base);
        let kind = find_first(link_el, r#"span[class^="type-"]"#)
            .map(|span| type_from_class(span.value().attr("class").unwrap_or_default()))
            .unwrap_or(identity.kind);

        Some(SearchResult {
            id: identity.id,
            kind,
            title,
            image: None,
        })
    }
}

fn type_from_class(class: &str) -> ContentType {
    if class.contains("type-series") {
        ContentType::Series
    } else if class.contains("type-movie") {
        ContentType::Movie
    } else {
        ContentType::Unknown
    }
}

impl Extractor for SuggestionExtractor {
    type Output = Vec<SearchResult>;

    fn extract(&self, document: &Html) -> Vec<SearchResult> {
        select_all(document, "li")
            .into_iter()
            .filter_map(|item| self.extract_item(item))
            .collect()
    }
}

/// Result cards of a full listing page (`.post-lst li`), used by search
/// result pages and category pages alike.
#[derive(Debug, Clone)]
pub struct PostListExtractor {
    base: Url,
}

impl PostListExtractor {
    pub fn new(base: Url) -> Self {
        Self { base }
    }
}

impl Extractor for PostListExtractor {
    type Output = Vec<ContentSummary>;

    fn extract(&self, document: &Html) -> Self::Output {
        select_all(document, ".post-lst li")
            .into_iter()
            .filter_map(|item| extract_card(item, &self.base, false))
            .collect()
    }
}

/// Live suggestions for `term`: nonce from the home page, then the AJAX POST.
pub async fn search_suggest(
    client: &SiteClient,
    site: &SiteConfig,
    term: &str,
) -> Result<Vec<SearchResult>, ScrapeError> {
    let home = client.get(&site.home_url(), &client.options()).await?;
    let nonce = extract_nonce(&home)?;
    aw_debug!("Search nonce {}", nonce);

    let body = form_urlencoded::Serializer::new(String::new())
        .append_pair("action", SUGGEST_ACTION)
        .append_pair("nonce", &nonce)
        .append_pair("term", term)
        .finish();
    let options = client
        .options()
        .header("Accept", "*/*")
        .header("Accept-Language", "en-US,en;q=0.9")
        .header(
            "Content-Type",
            "application/x-www-form-urlencoded; charset=UTF-8",
        )
        .header("Origin", site.origin())
        .header("Referer", site.home_url())
        .header("X-Requested-With", "XMLHttpRequest");

    aw_info!("Searching suggestions for: {}", term);
    let html = client.post(&site.ajax_url(), body, &options).await?;
    Ok(SuggestionExtractor::new(site.base().clone()).extract_html(&html))
}

/// The regular `?s=` search results page.
pub async fn search_full_page(
    client: &SiteClient,
    site: &SiteConfig,
    query: &str,
) -> Result<Vec<SearchResult>, ScrapeError> {
    let url = site.search_url(query);
    aw_info!("Scraping URL: {}", url);
    let html = client.get(&url, &client.options()).await?;
    let cards = PostListExtractor::new(site.base().clone()).extract_html(&html);
    Ok(cards.into_iter().map(SearchResult::from).collect())
}
