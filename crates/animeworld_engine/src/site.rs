use url::form_urlencoded;
use url::Url;

use crate::{FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://watchanimeworld.in";

/// Where the site lives and how its pages are addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    base: Url,
    root: String,
}

impl SiteConfig {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let base = Url::parse(base_url.trim())
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{base_url}: {err}")))?;
        let root = base.as_str().trim_end_matches('/').to_string();
        Ok(Self { base, root })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Base URL without a trailing slash, as used in `Origin` headers.
    pub fn origin(&self) -> &str {
        &self.root
    }

    pub fn home_url(&self) -> String {
        format!("{}/", self.root)
    }

    pub fn episode_url(&self, id: &str) -> String {
        format!("{}/episode/{id}/", self.root)
    }

    pub fn series_url(&self, id: &str) -> String {
        format!("{}/series/{id}/", self.root)
    }

    pub fn movie_url(&self, id: &str) -> String {
        format!("{}/movies/{id}/", self.root)
    }

    /// Series page first, then the movie page: the lookup order for any id
    /// whose type is not known up front.
    pub fn detail_candidates(&self, id: &str) -> Vec<String> {
        vec![self.series_url(id), self.movie_url(id)]
    }

    pub fn ajax_url(&self) -> String {
        format!("{}/wp-admin/admin-ajax.php", self.root)
    }

    pub fn season_ajax_url(&self, season: &str, post_id: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("action", "action_select_season")
            .append_pair("season", season)
            .append_pair("post", post_id)
            .finish();
        format!("{}?{query}", self.ajax_url())
    }

    pub fn search_url(&self, query: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        format!("{}/?s={encoded}", self.root)
    }

    /// Page 0 and page 1 both address the first page.
    pub fn category_url(&self, path: &str, page: u32) -> String {
        let path = path.trim_matches('/');
        if page <= 1 {
            format!("{}/category/{path}/", self.root)
        } else {
            format!("{}/category/{path}/page/{page}/", self.root)
        }
    }
}

impl Default for SiteConfig {
    #[allow(clippy::expect_used)]
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL).expect("valid default base url")
    }
}
