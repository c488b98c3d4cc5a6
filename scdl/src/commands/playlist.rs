use super::SiteArgs;
use anyhow::Result;
use clap::Args;

/// Print the master playlist url of a movie or an episode.
#[derive(Debug, Clone, Args)]
pub struct Playlist {
    /// Catalog id of the title.
    pub id: u64,

    /// Streaming backend id of the movie or the episode.
    pub scws_id: u64,

    /// Catalog id of the episode, 0 for movies.
    #[arg(short, long, default_value_t = 0)]
    pub episode: u64,
}

impl Playlist {
    pub async fn execute(self, site: &SiteArgs) -> Result<()> {
        let url = site
            .catalog()?
            .playlist_url(self.id, self.scws_id, self.episode)
            .await?;
        println!("{}", url);
        Ok(())
    }
}
