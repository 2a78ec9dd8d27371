//! Pure field normalizers shared by every extractor.
//!
//! None of these fail: missing or malformed input yields an empty value.

use url::Url;

use crate::ContentType;

/// Image host still referenced by older listings.
pub const LEGACY_IMAGE_HOST: &str = "img.anime-world.co";
/// Host that serves those images today.
pub const IMAGE_HOST: &str = "img.watchanimeworld.in";

/// Trim and collapse every whitespace run into a single space.
pub fn sanitize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Make an image URL absolute and point it at the current image host.
pub fn normalize_image_url(image_url: &str) -> String {
    let image_url = image_url.trim();
    if image_url.is_empty() {
        return String::new();
    }

    let absolute = if image_url.starts_with("//") {
        format!("https:{image_url}")
    } else {
        image_url.to_string()
    };

    absolute.replace(LEGACY_IMAGE_HOST, IMAGE_HOST)
}

/// Resolve an href (absolute, root-relative, relative or protocol-relative)
/// against the site base.
pub fn resolve_url(link: &str, base: &Url) -> String {
    let link = link.trim();
    if link.is_empty() {
        return String::new();
    }
    if let Ok(url) = Url::parse(link) {
        return url.into();
    }
    match base.join(link) {
        Ok(url) => url.into(),
        Err(_) => link.to_string(),
    }
}

/// Content type by URL shape: `/series/` beats `/movies/` and `/movie/`.
pub fn classify_url(url: &str) -> ContentType {
    if url.contains("/series/") {
        ContentType::Series
    } else if url.contains("/movies/") || url.contains("/movie/") {
        ContentType::Movie
    } else {
        ContentType::Unknown
    }
}

/// Last non-empty path segment of an absolute URL, percent-decoded.
///
/// Query and fragment are not part of the id. Strings that do not parse as a
/// URL are split on `/` as-is. A segment that does not decode to UTF-8 is
/// returned still encoded.
pub fn last_path_segment(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .unwrap_or_default()
            .to_string(),
        Err(_) => url
            .split('/')
            .filter(|s| !s.is_empty())
            .last()
            .unwrap_or_default()
            .to_string(),
    };
    urlencoding::decode(&segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or(segment)
}

/// Identifier and type of the resource an href points at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkIdentity {
    pub id: String,
    pub kind: ContentType,
    /// Canonical absolute form of the link.
    pub url: String,
}

pub fn derive_id_and_type(link: &str, base: &Url) -> LinkIdentity {
    let url = resolve_url(link, base);
    if url.is_empty() {
        return LinkIdentity::default();
    }
    LinkIdentity {
        id: last_path_segment(&url),
        kind: classify_url(&url),
        url,
    }
}
