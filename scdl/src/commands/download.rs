use super::SiteArgs;
use crate::downloader::{DownloadOptions, Downloader, Output, ReturnType};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use log::info;
use std::path::PathBuf;

/// Download, decrypt and assemble the stream of a master playlist.
#[derive(Debug, Clone, Args)]
pub struct Download {
    /// Master playlist url, as printed by the playlist command.
    #[arg(required = true)]
    pub input: String,

    /// Path the assembled stream is written to.
    /// Ignored with `--return-type url`.
    #[arg(short, long, default_value = "video.ts")]
    pub output: PathBuf,

    /// `buffer` writes the stream to --output.
    /// `url` prints a transient file url and keeps it alive until Ctrl+C.
    #[arg(long, default_value_t = ReturnType::Buffer, value_name = "url|buffer")]
    pub return_type: ReturnType,

    /// Number of batches segments are split into.
    /// All segments of a batch are downloaded concurrently.
    #[arg(long, help_heading = "Download Options", default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..=64))]
    pub batches: u8,
}

impl Download {
    pub async fn execute(self, site: &SiteArgs) -> Result<()> {
        let options = DownloadOptions {
            key_url: site.key_url.clone(),
            batches: self.batches as usize,
        };
        let downloader = Downloader::new(site.client()?, options);

        match downloader.download(&self.input, self.return_type).await? {
            Output::Buffer(data) => {
                tokio::fs::write(&self.output, &data).await?;
                info!(
                    "Saved {} bytes to {}",
                    data.len(),
                    self.output.to_string_lossy().bold()
                );
            }
            Output::Url(blob) => {
                println!("{}", blob.url());
                info!("Holding {} bytes, press Ctrl+C to release", blob.len());
                tokio::signal::ctrl_c().await?;
            }
        }

        Ok(())
    }
}
