//! Master playlist to decrypted stream.

mod assemble;
mod batch;
mod encryption;
mod fetch;
mod key;

pub use assemble::{Blob, Output, ReturnType, assemble};
pub use batch::{DEFAULT_BATCHES, batch_size, partition, run_batches};
pub use encryption::Decrypter;
pub use fetch::{DEFAULT_USER_AGENT, Fetch, Fetcher, client};
pub use key::{fetch_key, resolve};

use crate::Result;
use bytes::Bytes;
use log::{info, warn};
use reqwest::Client;
use scdl_m3u8::{rewrite_key_reference, segment_urls, select_rendition};

/// Key endpoint substituted for the key reference of every rendition playlist.
pub const DEFAULT_KEY_URL: &str = "https://scws.work/storage/enc.key";

#[derive(Clone, Debug)]
pub struct DownloadOptions {
    /// Key endpoint written into the rendition playlist and fetched for decryption.
    pub key_url: String,
    /// Number of batches segments are split into.
    pub batches: usize,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            key_url: DEFAULT_KEY_URL.to_owned(),
            batches: DEFAULT_BATCHES,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Downloader<F = Fetcher> {
    fetcher: F,
    options: DownloadOptions,
}

impl Downloader {
    pub fn new(client: Client, options: DownloadOptions) -> Self {
        Self::with_fetcher(Fetcher::new(client), options)
    }
}

impl<F: Fetch> Downloader<F> {
    pub fn with_fetcher(fetcher: F, options: DownloadOptions) -> Self {
        Self { fetcher, options }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn options(&self) -> &DownloadOptions {
        &self.options
    }

    /// Downloads the stream behind `master_playlist_url`.
    ///
    /// Either every segment is fetched, decrypted and assembled in playlist
    /// order, or the first failure is returned and nothing is produced.
    pub async fn download(&self, master_playlist_url: &str, return_type: ReturnType) -> Result<Output> {
        let master_playlist = self.fetcher.text(master_playlist_url).await?;
        let playlist = self.rendition_playlist(&master_playlist).await?;
        let decrypter = key::resolve(&self.fetcher, &self.options.key_url, &playlist).await?;
        let segments = self.download_segments(&playlist, &decrypter).await?;
        let output = Output::new(segments, return_type)?;
        info!("Assembled {} bytes as {}", output.len(), return_type);
        Ok(output)
    }

    /// Fetches the canonical rendition of `master_playlist` and points its key declaration at the key endpoint.
    pub async fn rendition_playlist(&self, master_playlist: &str) -> Result<String> {
        let url = select_rendition(master_playlist);

        if url.is_empty() {
            warn!("Master playlist has no rendition playlist url");
        } else {
            info!("Selected rendition {}", url);
        }

        let playlist = self.fetcher.text(&url).await?;
        Ok(rewrite_key_reference(&playlist, &self.options.key_url))
    }

    /// Fetches every segment of `playlist` batch by batch, decrypting each one as soon as it arrives.
    pub async fn download_segments(&self, playlist: &str, decrypter: &Decrypter) -> Result<Vec<Bytes>> {
        let urls = segment_urls(playlist);
        let batches = self.options.batches;

        info!(
            "Downloading {} segments in {} batches of up to {}",
            urls.len(),
            partition(urls.len(), batches).len(),
            batch_size(urls.len(), batches)
        );

        let fetcher = &self.fetcher;
        let urls = &urls;

        run_batches(urls.len(), batches, move |index| {
            let url = urls[index].as_str();

            async move {
                let data = fetcher.bytes(url).await?;
                decrypter.decrypt(url, data)
            }
        })
        .await
    }
}

/// Downloads `master_playlist_url` with a default client and [`DownloadOptions::default`].
pub async fn download(master_playlist_url: &str, return_type: ReturnType) -> Result<Output> {
    let client = client(DEFAULT_USER_AGENT, None)?;
    Downloader::new(client, DownloadOptions::default())
        .download(master_playlist_url, return_type)
        .await
}
