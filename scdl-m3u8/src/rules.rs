//! Named patterns over single manifest lines.

use regex::Regex;
use std::sync::LazyLock;

/// A rendition playlist url inside a master playlist.
/// Must be served over https and carry `rendition`, `token` and `expires` parameters.
pub static RENDITION_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https:.+rendition=.+token=.+&expires.+").unwrap());

/// An `#EXT-X-KEY` declaration with a quoted `URI` followed by an `IV` attribute.
pub static KEY_DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"#EXT-X-KEY.+URI=".+",IV.+"#).unwrap());

/// The quoted `URI` attribute of a key declaration.
pub static KEY_URI_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"URI="[^"]*""#).unwrap());

/// The hex run of an `IV=0x...` attribute, captured in group 1.
pub static IV_ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"IV=0x([0-9A-Fa-f]+)").unwrap());

/// Marker whose presence means the stream carries an initialization vector.
pub const IV_MARKER: &str = "IV=";

const SECURE_TRANSPORT_MARKER: &str = "https://";
const SEGMENT_FILE_MARKER: &str = ".ts";

/// Returns true if `line` references a media segment.
pub fn is_segment_line(line: &str) -> bool {
    line.contains(SECURE_TRANSPORT_MARKER) && line.contains(SEGMENT_FILE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendition_url_requires_all_markers() {
        assert!(RENDITION_URL.is_match(
            "https://vixcloud.co/playlist/1?type=video&rendition=720p&token=abc&expires=1700000000"
        ));
        assert!(!RENDITION_URL.is_match(
            "http://vixcloud.co/playlist/1?rendition=720p&token=abc&expires=1700000000"
        ));
        assert!(!RENDITION_URL.is_match("https://vixcloud.co/playlist/1?rendition=720p&token=abc"));
        assert!(!RENDITION_URL.is_match("https://vixcloud.co/playlist/1?token=abc&expires=1"));
        assert!(!RENDITION_URL.is_match(
            "#EXT-X-STREAM-INF https://x/?rendition=1&token=2&expires=3"
        ));
    }

    #[test]
    fn key_declaration_requires_uri_and_iv() {
        assert!(KEY_DECLARATION.is_match(
            r#"#EXT-X-KEY:METHOD=AES-128,URI="https://origin/key",IV=0x00000000000000000000000000000001"#
        ));
        assert!(!KEY_DECLARATION.is_match(r#"#EXT-X-KEY:METHOD=AES-128,URI="https://origin/key""#));
        assert!(!KEY_DECLARATION.is_match("#EXT-X-KEY:METHOD=NONE"));
    }

    #[test]
    fn key_uri_attribute_stops_at_closing_quote() {
        let line = r#"#EXT-X-KEY:METHOD=AES-128,URI="https://origin/key",IV=0x01,KEYFORMAT="identity""#;
        let found = KEY_URI_ATTRIBUTE.find(line).unwrap();
        assert_eq!(found.as_str(), r#"URI="https://origin/key""#);
    }

    #[test]
    fn iv_attribute_captures_hex_only() {
        let caps = IV_ATTRIBUTE.captures("IV=0x0aFf,KEYFORMAT").unwrap();
        assert_eq!(&caps[1], "0aFf");
        assert!(IV_ATTRIBUTE.captures("IV=0xzz").is_none());
        assert!(IV_ATTRIBUTE.captures("IV=1234").is_none());
    }

    #[test]
    fn segment_line_needs_https_and_ts() {
        assert!(is_segment_line("https://cdn/seg-1.ts?token=x"));
        assert!(!is_segment_line("http://cdn/seg-1.ts"));
        assert!(!is_segment_line("https://cdn/seg-1.m4s"));
        assert!(!is_segment_line("#EXTINF:4.0,"));
    }
}
