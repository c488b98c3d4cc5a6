//! Catalog side of the site: title search, title details and master playlist urls.

mod embed;
mod html;
mod matching;
mod page;
mod types;

pub use html::decode_html;
pub use matching::{Similarity, compare_strings};
pub use types::{Episode, Image, ImageKind, Season, Title};

use crate::{
    Error, Result,
    downloader::{Fetch, Fetcher},
};
use log::{debug, info};
use reqwest::{Client, StatusCode, Url};
use types::{SearchProps, SeasonProps, TitleProps, TitleRecord};

pub const DEFAULT_BASE_URL: &str = "https://streamingcommunity.boston";
pub const DEFAULT_PLAYLIST_BASE_URL: &str = "https://vixcloud.co/playlist";

/// Endpoints of the catalog site. Passed explicitly to every [`Catalog`], the site moves domains often.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    base_url: String,
    playlist_base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_PLAYLIST_BASE_URL)
    }
}

impl SiteConfig {
    pub fn new(base_url: &str, playlist_base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            playlist_base_url: playlist_base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Same configuration pointing at another catalog domain.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_owned();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn playlist_base_url(&self) -> &str {
        &self.playlist_base_url
    }

    fn cdn_url(&self) -> String {
        self.base_url.replacen("https://", "https://cdn.", 1)
    }
}

/// Filters applied to search results.
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Search records looked at, matched or not.
    pub max_results: usize,
    /// Keep only titles whose name equals the query, ignoring case.
    pub match_exact: bool,
    /// With `match_exact`, keep titles sharing at least half of the query words instead.
    pub match_estimate: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_results: 3,
            match_exact: false,
            match_estimate: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Catalog {
    config: SiteConfig,
    fetcher: Fetcher,
}

impl Catalog {
    pub fn new(client: Client, config: SiteConfig) -> Self {
        Self {
            config,
            fetcher: Fetcher::new(client),
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Returns true if the base url still answers with 200.
    pub async fn check_url(&self) -> bool {
        match self.fetcher.status(&self.config.base_url).await {
            Ok(status) => status == StatusCode::OK,
            Err(e) => {
                debug!("{}", e);
                false
            }
        }
    }

    pub async fn search(&self, name: &str, options: &SearchOptions) -> Result<Vec<Title>> {
        let url = Url::parse_with_params(&format!("{}/search", self.config.base_url), [("q", name)])
            .map_err(|x| Error::scrape(&self.config.base_url, x.to_string()))?;
        let props = page::props::<SearchProps>(&self.fetcher, url.as_str()).await?;
        info!("Search for '{}' returned {} records", name, props.titles.len());

        let mut titles = vec![];

        for record in props.titles.into_iter().take(options.max_results) {
            if let Some(title) = self.title(record, name, options).await? {
                titles.push(title);
            }
        }

        Ok(titles)
    }

    /// Master playlist url of a movie, or of an episode when `episode_id` is not zero.
    pub async fn playlist_url(&self, id: u64, scws_id: u64, episode_id: u64) -> Result<Url> {
        let iframe_url = format!(
            "{}/iframe/{}?episode_id={}",
            self.config.base_url, id, episode_id
        );
        let iframe = self.fetcher.text(&iframe_url).await?;
        let embed_url = embed::embed_url(&iframe_url, &iframe)?;
        debug!("embed url {}", embed_url);

        let embed = self.fetcher.text(embed_url.as_str()).await?;
        embed::playlist_url(&self.config.playlist_base_url, scws_id, &embed_url, &embed)
    }

    async fn title(&self, record: TitleRecord, query: &str, options: &SearchOptions) -> Result<Option<Title>> {
        let title_url = format!("{}/titles/{}-{}", self.config.base_url, record.id, record.slug);
        let info = page::props::<TitleProps>(&self.fetcher, &title_url).await?.title;

        if options.match_exact && !is_match(query, &info.name, options.match_estimate) {
            debug!("skipping '{}'", info.name);
            return Ok(None);
        }

        let cdn_url = self.config.cdn_url();
        let images = record
            .images
            .into_iter()
            .map(|x| Image {
                kind: x.kind,
                url: format!("{}/images/{}", cdn_url, x.filename),
            })
            .collect();

        let youtube_id = info.trailers.first().and_then(|x| x.youtube_id.clone());

        let mut seasons = vec![];

        for season in &info.seasons {
            let season_url = format!("{}/stagione-{}", title_url, season.number);
            let props = page::props::<SeasonProps>(&self.fetcher, &season_url).await?;

            seasons.push(Season {
                number: season.number,
                episodes: props.loaded_season.episodes,
            });
        }

        Ok(Some(Title {
            id: record.id,
            slug: record.slug,
            friendly_name: info.name,
            images,
            plot: info.plot,
            release_date: info.release_date,
            score: info.score,
            scws_id: info.scws_id,
            is_series: !seasons.is_empty(),
            seasons,
            trailer_url: youtube_id
                .as_ref()
                .map(|x| format!("https://youtube.com/watch?v={}", x)),
            embed_trailer_url: youtube_id.map(|x| format!("https://youtube.com/embed/{}", x)),
        }))
    }
}

fn is_match(query: &str, name: &str, estimate: bool) -> bool {
    if estimate {
        compare_strings(query, name).is_close()
    } else {
        name.to_lowercase() == query.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_dropped() {
        let config = SiteConfig::new("https://streamingcommunity.at/", "https://vixcloud.co/playlist/");
        assert_eq!(config.base_url(), "https://streamingcommunity.at");
        assert_eq!(config.playlist_base_url(), "https://vixcloud.co/playlist");
    }

    #[test]
    fn base_url_swap_keeps_the_rest() {
        let config = SiteConfig::default().with_base_url("https://streamingcommunity.at");
        assert_eq!(config.base_url(), "https://streamingcommunity.at");
        assert_eq!(config.playlist_base_url(), DEFAULT_PLAYLIST_BASE_URL);
        assert_eq!(config.cdn_url(), "https://cdn.streamingcommunity.at");
    }

    #[test]
    fn exact_and_estimated_matches() {
        assert!(is_match("enola holmes", "Enola Holmes", false));
        assert!(!is_match("enola holmes", "Enola Holmes 2", false));
        assert!(is_match("enola holmes", "Enola Holmes 2", true));
        assert!(!is_match("rick and morty", "Rick", true));
    }
}
