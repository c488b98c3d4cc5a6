use thiserror::Error;

/// The error type returned by catalog and download operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or non success status while fetching `url`.
    #[error("while trying to get '{url}': {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Manifest text did not match an expected pattern.
    #[error(transparent)]
    Parse(#[from] scdl_m3u8::Error),

    /// Key or IV rejected by the cipher, or ciphertext that cannot be decrypted.
    #[error("cannot decrypt '{url}': {reason}")]
    Crypto { url: String, reason: String },

    /// A catalog page whose payload cannot be located or decoded.
    #[error("unexpected page data from '{url}': {reason}")]
    Scrape { url: String, reason: String },

    #[error("invalid return type '{0}' (expected 'url' or 'buffer')")]
    ReturnType(String),

    #[error("cannot build http client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn network(url: &str, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.to_owned(),
            source,
        }
    }

    pub(crate) fn crypto<T: Into<String>>(url: &str, reason: T) -> Self {
        Self::Crypto {
            url: url.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn scrape<T: Into<String>>(url: &str, reason: T) -> Self {
        Self::Scrape {
            url: url.to_owned(),
            reason: reason.into(),
        }
    }

    /// Url the failing request was sent to, if the error came from one.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Network { url, .. } | Self::Crypto { url, .. } | Self::Scrape { url, .. } => {
                Some(url)
            }
            _ => None,
        }
    }
}

/// A `Result` alias where the `Err` case is `scdl::Error`.
pub type Result<T> = std::result::Result<T, Error>;
