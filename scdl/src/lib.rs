//! Resolve titles of a StreamingCommunity catalog and download their HLS
//! streams as one decrypted file.
//!
//! The [`catalog`] module turns a title into a master playlist url. The
//! [`downloader`] module takes that url, selects the canonical rendition,
//! points its key declaration at a key endpoint we control, fetches every
//! segment in ordered batches, decrypts them with AES-CBC when the playlist
//! carries an IV and assembles the result.
//!
//! ```no_run
//! # async fn run() -> scdl::Result<()> {
//! use scdl::downloader::{Output, ReturnType};
//!
//! let output = scdl::download("https://vixcloud.co/playlist/181?token=t&expires=1", ReturnType::Buffer).await?;
//!
//! if let Output::Buffer(bytes) = output {
//!     std::fs::write("movie.ts", bytes)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod catalog;
mod commands;
pub mod downloader;
mod error;
mod logger;

#[doc(hidden)]
pub use commands::Args;
#[doc(hidden)]
pub use logger::Logger;

pub use downloader::download;
pub use error::{Error, Result};
pub use reqwest;
