use animeworld_core::{derive_id_and_type, normalize_image_url, ContentSummary};
use animeworld_logging::aw_trace;
use scraper::{ElementRef, Html};
use url::Url;

use crate::dom::{element_text, extract_attribute, find_first};

/// Turns one parsed page (or AJAX fragment) into typed records.
///
/// Implementations never fail: malformed or missing markup yields fewer or
/// emptier records.
pub trait Extractor {
    type Output;

    fn extract(&self, document: &Html) -> Self::Output;

    /// Parse `html` and extract in one step. The parsed tree is dropped before
    /// returning, so callers can hold the result across `.await`.
    fn extract_html(&self, html: &str) -> Self::Output {
        let document = Html::parse_document(html);
        self.extract(&document)
    }
}

/// Read one listing card: `.entry-title`, first `img[src]`, `a.lnk-blk[href]`
/// and, when `with_progress` is set, the `.post-ql` season and `.year`
/// episode badges.
///
/// Returns `None` for cards without a title.
pub(crate) fn extract_card(
    item: ElementRef<'_>,
    base: &Url,
    with_progress: bool,
) -> Option<ContentSummary> {
    let title = element_text(find_first(item, ".entry-title"));
    if title.is_empty() {
        aw_trace!("Dropping card without title");
        return None;
    }

    let image = extract_attribute(find_first(item, "img"), "src");
    let link = extract_attribute(find_first(item, "a.lnk-blk"), "href");
    let identity = derive_id_and_type(&link, base);

    let (season, episodes) = if with_progress {
        (
            non_empty(element_text(find_first(item, ".post-ql"))),
            non_empty(element_text(find_first(item, ".year"))),
        )
    } else {
        (None, None)
    };

    Some(ContentSummary {
        id: identity.id,
        kind: identity.kind,
        title,
        image: normalize_image_url(&image),
        season,
        episodes,
    })
}

fn non_empty(text: String) -> Option<String> {
    (!text.is_empty()).then_some(text)
}
