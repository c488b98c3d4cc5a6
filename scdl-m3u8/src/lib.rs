//! Line oriented grammar rules for the HLS manifests served by the
//! StreamingCommunity video backend.
//!
//! Manifests are never parsed into a tree. Each rule in [`rules`] names one
//! textual pattern, and the operations in this crate scan raw text with those
//! rules so that every line which is not deliberately rewritten survives
//! byte-for-byte.
//!
//! - [`select_rendition`] picks the canonical rendition out of a master playlist.
//! - [`MediaPlaylist`] rewrites the key reference of a rendition playlist.
//! - [`parse_iv`] reads the initialization vector, if the stream has one.
//! - [`segment_urls`] lists segment urls in playback order.

mod error;
mod iv;
mod master;
mod media;
pub mod rules;

pub use error::Error;
pub use iv::{IV_LEN, Iv, parse_iv};
pub use master::{find_rendition, select_rendition};
pub use media::{ALLOW_CACHE_DIRECTIVE, MediaPlaylist, rewrite_key_reference, segment_urls};

/// A `Result` alias where the `Err` case is `scdl_m3u8::Error`.
pub type Result<T> = std::result::Result<T, Error>;
