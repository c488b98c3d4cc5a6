use crate::{Error, Result};
use aes::cipher::{BlockDecryptMut, KeyIvInit, block_padding::Pkcs7};
use bytes::Bytes;
use scdl_m3u8::IV_LEN;

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;
type Aes192CbcDec = cbc::Decryptor<aes::Aes192>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// Decision made once per stream: decrypt every segment with the same key and IV, or pass them through.
#[derive(Clone, Debug)]
pub enum Decrypter {
    AesCbc { key: Bytes, iv: [u8; IV_LEN] },
    None,
}

impl Decrypter {
    /// AES-CBC decrypter, the cipher width follows the key length.
    /// `key_url` is only used to name the key source on failure.
    pub fn aes_cbc(key: Bytes, iv: [u8; IV_LEN], key_url: &str) -> Result<Self> {
        match key.len() {
            16 | 24 | 32 => Ok(Self::AesCbc { key, iv }),
            x => Err(Error::crypto(
                key_url,
                format!("expected a 16, 24 or 32 byte key but got {} bytes", x),
            )),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Decrypts one segment, `url` names it on failure.
    pub fn decrypt(&self, url: &str, data: Bytes) -> Result<Bytes> {
        let (key, iv) = match self {
            Self::AesCbc { key, iv } => (key, iv),
            Self::None => return Ok(data),
        };

        let mut buf = data.to_vec();
        let len = match key.len() {
            16 => decrypt_padded::<Aes128CbcDec>(url, key, iv, &mut buf)?,
            24 => decrypt_padded::<Aes192CbcDec>(url, key, iv, &mut buf)?,
            32 => decrypt_padded::<Aes256CbcDec>(url, key, iv, &mut buf)?,
            x => return Err(Error::crypto(url, format!("unsupported key length of {} bytes", x))),
        };

        buf.truncate(len);
        Ok(Bytes::from(buf))
    }
}

fn decrypt_padded<D>(url: &str, key: &[u8], iv: &[u8], buf: &mut [u8]) -> Result<usize>
where
    D: KeyIvInit + BlockDecryptMut,
{
    D::new_from_slices(key, iv)
        .map_err(|x| Error::crypto(url, x.to_string()))?
        .decrypt_padded_mut::<Pkcs7>(buf)
        .map(|x| x.len())
        .map_err(|x| Error::crypto(url, x.to_string()))
}
