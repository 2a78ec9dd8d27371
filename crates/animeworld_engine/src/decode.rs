use chardetng::EncodingDetector;
use encoding_rs::Encoding;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedHtml {
    pub html: String,
    pub encoding_label: String,
    /// Malformed sequences were replaced with U+FFFD.
    pub had_errors: bool,
}

/// Decode raw bytes into UTF-8 using: BOM -> Content-Type charset -> chardetng fallback.
///
/// Never fails; undecodable bytes become replacement characters.
pub fn decode_html(bytes: &[u8], content_type: Option<&str>) -> DecodedHtml {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }

    if let Some(enc) = content_type
        .and_then(extract_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return decode_with(bytes, enc);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let enc = detector.guess(None, true);
    decode_with(bytes, enc)
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .filter_map(|part| {
            let (key, value) = part.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("charset")
                .then(|| value.trim_matches([' ', '"', '\''].as_ref()).to_string())
        })
        .next()
}

fn decode_with(bytes: &[u8], enc: &'static Encoding) -> DecodedHtml {
    let (text, used, had_errors) = enc.decode(bytes);
    DecodedHtml {
        html: text.into_owned(),
        encoding_label: used.name().to_string(),
        had_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charset_header_is_respected() {
        let decoded = decode_html(b"caf\xe9", Some("text/html; charset=ISO-8859-1"));
        assert_eq!(decoded.html, "caf\u{e9}");
        assert!(!decoded.had_errors);
    }

    #[test]
    fn bom_wins_over_header() {
        let decoded = decode_html(b"\xEF\xBB\xBFhello", Some("text/html; charset=ISO-8859-1"));
        assert_eq!(decoded.html, "hello");
        assert_eq!(decoded.encoding_label, "UTF-8");
    }

    #[test]
    fn malformed_utf8_is_replaced_not_rejected() {
        let decoded = decode_html(b"ok \xff\xfe end", Some("text/html; charset=utf-8"));
        assert!(decoded.had_errors);
        assert!(decoded.html.starts_with("ok "));
    }
}
