mod check;
mod download;
mod playlist;
mod search;

pub use check::Check;
pub use download::Download;
pub use playlist::Playlist;
pub use search::Search;

use crate::{
    catalog::{Catalog, DEFAULT_BASE_URL, DEFAULT_PLAYLIST_BASE_URL, SiteConfig},
    downloader::{self, DEFAULT_KEY_URL, DEFAULT_USER_AGENT},
};
use anyhow::Result;
use clap::{ArgAction, ColorChoice, Parser, Subcommand};
use log::LevelFilter;
use reqwest::Client;
use std::time::Duration;

/// Search StreamingCommunity titles and download their streams as a single decrypted file.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub site: SiteArgs,

    /// When to output colored text.
    #[arg(long, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Increase logging verbosity, -v for debug and -vv for trace messages.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    Check(Check),
    Download(Download),
    Playlist(Playlist),
    Search(Search),
}

/// Endpoints and http client options shared by every command.
#[derive(Debug, Clone, clap::Args)]
pub struct SiteArgs {
    /// Base url of the catalog site.
    #[arg(long, global = true, env = "SCDL_BASE_URL", default_value = DEFAULT_BASE_URL, help_heading = "Site Options")]
    pub base_url: String,

    /// Base url master playlists are built on.
    #[arg(long, global = true, default_value = DEFAULT_PLAYLIST_BASE_URL, help_heading = "Site Options")]
    pub playlist_base_url: String,

    /// Key endpoint written into rendition playlists and used for decryption.
    #[arg(long, global = true, env = "SCDL_KEY_URL", default_value = DEFAULT_KEY_URL, help_heading = "Site Options")]
    pub key_url: String,

    /// Maximum time in seconds for every single request.
    /// By default requests never time out.
    #[arg(long, global = true, value_name = "SECONDS", help_heading = "Client Options")]
    pub timeout: Option<u64>,

    /// Update and set user agent header for requests.
    #[arg(long, global = true, default_value = DEFAULT_USER_AGENT, hide_default_value = true, help_heading = "Client Options")]
    pub user_agent: String,
}

impl SiteArgs {
    fn client(&self) -> Result<Client> {
        Ok(downloader::client(
            &self.user_agent,
            self.timeout.map(Duration::from_secs),
        )?)
    }

    fn config(&self) -> SiteConfig {
        SiteConfig::new(&self.base_url, &self.playlist_base_url)
    }

    fn catalog(&self) -> Result<Catalog> {
        Ok(Catalog::new(self.client()?, self.config()))
    }
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }

        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Check(args) => args.execute(&self.site).await,
            Commands::Download(args) => args.execute(&self.site).await,
            Commands::Playlist(args) => args.execute(&self.site).await,
            Commands::Search(args) => args.execute(&self.site).await,
        }
    }
}
