use std::sync::LazyLock;

use animeworld_core::{series_id_from_episode_id, EmbedResult, EmbedServer};
use animeworld_logging::aw_info;
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::dom::{element_text, extract_attribute, find_first, select_all, select_first};
use crate::extract::Extractor;
use crate::{FallbackChain, ScrapeError, SiteClient, SiteConfig};

#[allow(clippy::expect_used)]
static OPTION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"options-(\d+)").expect("valid regex"));

/// Player options (`div#options-<n>`) on an episode, series or movie page.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedExtractor;

impl EmbedExtractor {
    fn extract_server(&self, document: &Html, option: ElementRef<'_>) -> Option<EmbedServer> {
        let option_id = option.value().attr("id")?;
        let server: u32 = OPTION_ID.captures(option_id)?[1].parse().ok()?;

        let iframe = find_first(option, "iframe");
        let mut url = extract_attribute(iframe, "src");
        if url.is_empty() {
            url = extract_attribute(iframe, "data-src");
        }
        if url.is_empty() {
            return None;
        }

        let tab = format!(r##"a[href="#{option_id}"] .server"##);
        let name = element_text(select_first(document, &tab));
        let name = if name.is_empty() {
            format!("Server {server}")
        } else {
            name
        };

        Some(EmbedServer { server, name, url })
    }
}

impl Extractor for EmbedExtractor {
    type Output = Vec<EmbedServer>;

    fn extract(&self, document: &Html) -> Vec<EmbedServer> {
        let mut servers: Vec<EmbedServer> = select_all(document, r#"div[id^="options-"]"#)
            .into_iter()
            .filter_map(|option| self.extract_server(document, option))
            .collect();
        servers.sort_by_key(|entry| entry.server);
        servers
    }
}

async fn fetch_servers(client: &SiteClient, url: &str) -> Result<Vec<EmbedServer>, ScrapeError> {
    let html = client.get(url, &client.options()).await?;
    Ok(EmbedExtractor.extract_html(&html))
}

/// Player servers for an episode id, falling back to the series and movie
/// pages when the episode page does not exist.
pub async fn fetch_embed(
    client: &SiteClient,
    site: &SiteConfig,
    id: &str,
) -> Result<EmbedResult, ScrapeError> {
    let episode_url = site.episode_url(id);
    aw_info!("Scraping URL: {}", episode_url);

    let servers = match fetch_servers(client, &episode_url).await {
        Ok(servers) => servers,
        Err(err) if err.is_not_found() => {
            let series_id = series_id_from_episode_id(id);
            aw_info!(
                "Episode page not found, trying details pages for: {} (series id {})",
                id,
                series_id
            );
            FallbackChain::new(
                format!("embed servers of {id}"),
                site.detail_candidates(series_id),
            )
            .run(|url| async move { fetch_servers(client, &url).await.map(Some) })
            .await?
        }
        Err(err) => return Err(err),
    };

    Ok(EmbedResult {
        id: id.to_string(),
        servers,
    })
}
