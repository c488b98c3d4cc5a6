use thiserror::Error;

/// The errors that may occur while reading manifest text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("master playlist does not contain a rendition playlist url")]
    MissingRendition,

    #[error("expected a hex run after `IV=0x` but found `{fragment}`")]
    MissingIv { fragment: String },
}
