use crate::rules::{KEY_DECLARATION, KEY_URI_ATTRIBUTE, is_segment_line};
use regex::NoExpand;
use std::fmt::{self, Display};

/// Directive allowing players to cache decrypted media.
pub const ALLOW_CACHE_DIRECTIVE: &str = "#EXT-X-ALLOW-CACHE:YES";

/// Index at which [`ALLOW_CACHE_DIRECTIVE`] is inserted, right after the format and version headers.
const ALLOW_CACHE_INDEX: usize = 2;

/// Text of a rendition playlist held as lines.
///
/// Lines are split on `\n` only, so `\r` and any other bytes of untouched
/// lines are written back exactly as they were read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaPlaylist {
    lines: Vec<String>,
}

impl MediaPlaylist {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(|x| x.to_owned()).collect(),
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|x| x.as_str())
    }

    /// Inserts [`ALLOW_CACHE_DIRECTIVE`] as the third line.
    /// Playlists shorter than two lines are padded with empty lines first.
    pub fn insert_allow_cache(&mut self) {
        while self.lines.len() < ALLOW_CACHE_INDEX {
            self.lines.push(String::new());
        }

        self.lines
            .insert(ALLOW_CACHE_INDEX, ALLOW_CACHE_DIRECTIVE.to_owned());
    }

    /// Points the first key declaration at `key_url`.
    ///
    /// Only the quoted `URI` value changes, every other attribute on the line
    /// is kept. Returns false if the playlist has no key declaration.
    pub fn rewrite_key_uri(&mut self, key_url: &str) -> bool {
        let Some(line) = self.lines.iter_mut().find(|x| KEY_DECLARATION.is_match(x.as_str())) else {
            return false;
        };

        let uri = format!("URI=\"{}\"", key_url);
        *line = KEY_URI_ATTRIBUTE
            .replace(line.as_str(), NoExpand(&uri))
            .into_owned();
        true
    }

    /// Segment urls in playback order.
    pub fn segment_urls(&self) -> Vec<String> {
        self.lines()
            .filter(|x| is_segment_line(x))
            .map(|x| x.trim().to_owned())
            .collect()
    }
}

impl Display for MediaPlaylist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}

/// Inserts the cache directive and points the key declaration at `key_url`.
pub fn rewrite_key_reference(playlist: &str, key_url: &str) -> String {
    let mut playlist = MediaPlaylist::parse(playlist);
    playlist.insert_allow_cache();
    playlist.rewrite_key_uri(key_url);
    playlist.to_string()
}

/// Segment urls of a rendition playlist in playback order.
pub fn segment_urls(playlist: &str) -> Vec<String> {
    playlist
        .split('\n')
        .filter(|x| is_segment_line(x))
        .map(|x| x.trim().to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_URL: &str = "https://scws.work/storage/enc.key";
    const PLAYLIST: &str = "#EXTM3U\n\
        #EXT-X-VERSION:3\n\
        #EXT-X-TARGETDURATION:4\n\
        #EXT-X-KEY:METHOD=AES-128,URI=\"https://origin/enc.key?t=1\",IV=0x0102030405060708090a0b0c0d0e0f10\n\
        #EXTINF:4.0,\n\
        https://cdn.example/seg-0.ts?token=a\n\
        #EXTINF:4.0,\n\
        https://cdn.example/seg-1.ts?token=a \n\
        #EXT-X-ENDLIST";

    #[test]
    fn directive_is_third_line() {
        let rewritten = rewrite_key_reference(PLAYLIST, KEY_URL);
        let lines = rewritten.split('\n').collect::<Vec<_>>();
        assert_eq!(lines[0], "#EXTM3U");
        assert_eq!(lines[1], "#EXT-X-VERSION:3");
        assert_eq!(lines[2], ALLOW_CACHE_DIRECTIVE);
        assert_eq!(lines[3], "#EXT-X-TARGETDURATION:4");
    }

    #[test]
    fn directive_position_holds_for_short_texts() {
        for text in ["", "#EXTM3U", "#EXTM3U\n#EXT-X-VERSION:3"] {
            let rewritten = rewrite_key_reference(text, KEY_URL);
            assert_eq!(rewritten.split('\n').nth(2), Some(ALLOW_CACHE_DIRECTIVE));
        }
    }

    #[test]
    fn only_uri_value_changes() {
        let rewritten = rewrite_key_reference(PLAYLIST, KEY_URL);
        let key_line = rewritten
            .split('\n')
            .find(|x| x.starts_with("#EXT-X-KEY"))
            .unwrap();
        assert_eq!(
            key_line,
            "#EXT-X-KEY:METHOD=AES-128,URI=\"https://scws.work/storage/enc.key\",IV=0x0102030405060708090a0b0c0d0e0f10"
        );
    }

    #[test]
    fn untouched_lines_survive() {
        let rewritten = rewrite_key_reference(PLAYLIST, KEY_URL);
        let before = PLAYLIST
            .split('\n')
            .filter(|x| !x.starts_with("#EXT-X-KEY"))
            .collect::<Vec<_>>();
        let after = rewritten
            .split('\n')
            .filter(|x| !x.starts_with("#EXT-X-KEY") && *x != ALLOW_CACHE_DIRECTIVE)
            .collect::<Vec<_>>();
        assert_eq!(before, after);
    }

    #[test]
    fn only_first_key_declaration_is_rewritten() {
        let text = "#EXTM3U\n\
            #EXT-X-KEY:METHOD=AES-128,URI=\"https://a\",IV=0x01\n\
            #EXT-X-KEY:METHOD=AES-128,URI=\"https://b\",IV=0x02";
        let rewritten = rewrite_key_reference(text, KEY_URL);
        assert!(rewritten.contains(&format!("URI=\"{}\",IV=0x01", KEY_URL)));
        assert!(rewritten.contains("URI=\"https://b\",IV=0x02"));
    }

    #[test]
    fn dollar_signs_in_key_url_are_literal() {
        let mut playlist = MediaPlaylist::parse(PLAYLIST);
        assert!(playlist.rewrite_key_uri("https://keys/$1"));
        assert!(playlist.to_string().contains("URI=\"https://keys/$1\""));
    }

    #[test]
    fn without_key_declaration_only_directive_is_added() {
        let text = "#EXTM3U\n#EXT-X-VERSION:3\nhttps://cdn/0.ts";
        let mut playlist = MediaPlaylist::parse(text);
        playlist.insert_allow_cache();
        assert!(!playlist.rewrite_key_uri(KEY_URL));
        assert_eq!(
            playlist.to_string(),
            "#EXTM3U\n#EXT-X-VERSION:3\n#EXT-X-ALLOW-CACHE:YES\nhttps://cdn/0.ts"
        );
    }

    #[test]
    fn segments_are_trimmed_and_ordered() {
        let rewritten = rewrite_key_reference(PLAYLIST, KEY_URL);
        assert_eq!(
            segment_urls(&rewritten),
            vec![
                "https://cdn.example/seg-0.ts?token=a",
                "https://cdn.example/seg-1.ts?token=a",
            ]
        );
        assert_eq!(
            MediaPlaylist::parse(&rewritten).segment_urls(),
            segment_urls(&rewritten)
        );
    }
}
