use super::{encryption::Decrypter, fetch::Fetch};
use crate::Result;
use bytes::Bytes;
use log::{debug, info, warn};

/// Raw key bytes served by the key endpoint.
pub async fn fetch_key(fetcher: &impl Fetch, key_url: &str) -> Result<Bytes> {
    let key = fetcher.bytes(key_url).await?;
    debug!("fetched {} byte key from {}", key.len(), key_url);
    Ok(key)
}

/// Decides once for the whole stream whether segments need decryption.
///
/// The IV is read from the rewritten playlist. Without one, segments pass
/// through untouched and the key endpoint is never contacted.
pub async fn resolve(fetcher: &impl Fetch, key_url: &str, playlist: &str) -> Result<Decrypter> {
    let Some(iv) = scdl_m3u8::parse_iv(playlist)? else {
        info!("Playlist has no IV, segments are kept as served");
        return Ok(Decrypter::None);
    };

    if iv.is_truncated() {
        warn!(
            "IV has only {} hex digits, remaining bytes are zero filled",
            iv.digits()
        );
    }

    let key = fetch_key(fetcher, key_url).await?;
    let bits = key.len() * 8;
    let decrypter = Decrypter::aes_cbc(key, *iv.as_bytes(), key_url)?;
    info!("Decrypting segments with AES-{}-CBC", bits);
    Ok(decrypter)
}
