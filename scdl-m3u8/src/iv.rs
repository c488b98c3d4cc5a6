use crate::{
    Error, Result,
    rules::{IV_ATTRIBUTE, IV_MARKER},
};

/// Size of an initialization vector in bytes.
pub const IV_LEN: usize = 16;

/// Initialization vector read from an `IV=0x...` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Iv {
    bytes: [u8; IV_LEN],
    digits: usize,
}

impl Iv {
    pub fn as_bytes(&self) -> &[u8; IV_LEN] {
        &self.bytes
    }

    /// Number of hex digits that were decoded, at most 32.
    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Returns true if fewer than 32 hex digits were present and the tail was zero filled.
    pub fn is_truncated(&self) -> bool {
        self.digits < IV_LEN * 2
    }

    fn decode(run: &str) -> Self {
        let digits = &run[..run.len().min(IV_LEN * 2)];
        let even = digits.len() & !1;
        let mut bytes = [0_u8; IV_LEN];

        if let Ok(decoded) = hex::decode(&digits[..even]) {
            bytes[..decoded.len()].copy_from_slice(&decoded);
        }

        // A dangling nibble is read as a single digit value.
        if even < digits.len() {
            bytes[even / 2] = digits[even..]
                .chars()
                .next()
                .and_then(|x| x.to_digit(16))
                .unwrap_or(0) as u8;
        }

        Self {
            bytes,
            digits: digits.len(),
        }
    }
}

/// Reads the initialization vector of a rendition playlist.
///
/// `Ok(None)` means the playlist has no `IV=` marker at all and its segments
/// are served in the clear. A marker without a `0x` hex run after it is an error.
pub fn parse_iv(playlist: &str) -> Result<Option<Iv>> {
    let Some(position) = playlist.find(IV_MARKER) else {
        return Ok(None);
    };

    let run = IV_ATTRIBUTE
        .captures(playlist)
        .and_then(|x| x.get(1))
        .ok_or_else(|| Error::MissingIv {
            fragment: playlist[position..]
                .lines()
                .next()
                .unwrap_or_default()
                .chars()
                .take(40)
                .collect(),
        })?;

    Ok(Some(Iv::decode(run.as_str())))
}
