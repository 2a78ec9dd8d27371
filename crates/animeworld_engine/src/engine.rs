use std::sync::Arc;

use animeworld_core::{
    CategoryPage, DetailsRecord, EmbedResult, EpisodeList, HomeSnapshot, SearchResult,
};

use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::user_agent::{RotatingUserAgents, UserAgentSource};
use crate::{
    category, details, embed, episodes, home, search, FetchError, RequestOptions, ScrapeError,
    SiteClient, SiteConfig,
};

/// Entry point used by front ends: one value per process, shared freely
/// between concurrent calls. Every call fetches fresh pages.
#[derive(Clone)]
pub struct SiteScraper {
    client: SiteClient,
    site: SiteConfig,
}

impl SiteScraper {
    pub fn new(client: SiteClient, site: SiteConfig) -> Self {
        Self { client, site }
    }

    /// Production wiring: pooled reqwest fetcher plus rotating browser identities.
    pub fn with_settings(
        site: SiteConfig,
        settings: FetchSettings,
        user_agents: Vec<String>,
        defaults: RequestOptions,
    ) -> Result<Self, FetchError> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(settings)?);
        let user_agents: Arc<dyn UserAgentSource> = Arc::new(RotatingUserAgents::new(user_agents));
        let client = SiteClient::new(fetcher, user_agents).with_defaults(defaults);
        Ok(Self::new(client, site))
    }

    pub fn client(&self) -> &SiteClient {
        &self.client
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub async fn extract_home(&self) -> Result<HomeSnapshot, ScrapeError> {
        home::fetch_home(&self.client, &self.site).await
    }

    pub async fn extract_details(&self, id: &str) -> Result<DetailsRecord, ScrapeError> {
        details::fetch_details(&self.client, &self.site, id).await
    }

    pub async fn extract_episodes(&self, id: &str, season: &str) -> Result<EpisodeList, ScrapeError> {
        episodes::fetch_episodes(&self.client, &self.site, id, season).await
    }

    pub async fn extract_embed(&self, id: &str) -> Result<EmbedResult, ScrapeError> {
        embed::fetch_embed(&self.client, &self.site, id).await
    }

    pub async fn search_suggest(&self, term: &str) -> Result<Vec<SearchResult>, ScrapeError> {
        search::search_suggest(&self.client, &self.site, term).await
    }

    pub async fn search_full_page(&self, query: &str) -> Result<Vec<SearchResult>, ScrapeError> {
        search::search_full_page(&self.client, &self.site, query).await
    }

    pub async fn extract_category(&self, path: &str, page: u32) -> Result<CategoryPage, ScrapeError> {
        category::fetch_category(&self.client, &self.site, path, page).await
    }
}
