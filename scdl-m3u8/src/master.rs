use crate::{Error, Result, rules::RENDITION_URL};

/// Returns the first line of a master playlist which is a rendition playlist url.
pub fn find_rendition(master_playlist: &str) -> Result<&str> {
    master_playlist
        .split('\n')
        .find(|line| RENDITION_URL.is_match(line))
        .map(str::trim_end)
        .ok_or(Error::MissingRendition)
}

/// Same as [`find_rendition`] but yields an empty string when no line matches.
///
/// An empty url is not rejected here, the subsequent fetch against it is what fails.
pub fn select_rendition(master_playlist: &str) -> String {
    find_rendition(master_playlist)
        .map(str::to_owned)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "#EXTM3U\n\
        #EXT-X-STREAM-INF:BANDWIDTH=1200000,CODECS=\"avc1.640028,mp4a.40.2\",RESOLUTION=1280x720\n\
        https://vixcloud.co/playlist/181?type=video&rendition=720p&token=AbC&expires=1700000000\n\
        #EXT-X-STREAM-INF:BANDWIDTH=4500000,RESOLUTION=1920x1080\n\
        https://vixcloud.co/playlist/181?type=video&rendition=1080p&token=AbC&expires=1700000000\n";

    #[test]
    fn first_matching_line_wins() {
        assert_eq!(
            select_rendition(MASTER),
            "https://vixcloud.co/playlist/181?type=video&rendition=720p&token=AbC&expires=1700000000"
        );
    }

    #[test]
    fn carriage_returns_are_not_part_of_the_url() {
        let master = MASTER.replace('\n', "\r\n");
        assert!(!select_rendition(&master).ends_with('\r'));
    }

    #[test]
    fn missing_rendition_yields_empty_string() {
        let master = "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=1\nhttps://vixcloud.co/playlist/1\n";
        assert_eq!(select_rendition(master), "");
        assert_eq!(find_rendition(master), Err(Error::MissingRendition));
    }
}
