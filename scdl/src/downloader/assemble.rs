use crate::{Error, Result};
use bytes::{Bytes, BytesMut};
use reqwest::Url;
use std::{
    fmt,
    io::{self, Write},
    path::Path,
    str::FromStr,
};
use tempfile::NamedTempFile;

/// How a caller wants the assembled stream handed back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReturnType {
    /// A transient reference for local playback.
    Url,
    /// The materialized bytes.
    #[default]
    Buffer,
}

impl FromStr for ReturnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "url" => Ok(Self::Url),
            "buffer" => Ok(Self::Buffer),
            x => Err(Error::ReturnType(x.to_owned())),
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Url => "url",
            Self::Buffer => "buffer",
        })
    }
}

/// Assembled stream.
#[derive(Debug)]
pub enum Output {
    Url(Blob),
    Buffer(Bytes),
}

impl Output {
    /// Concatenates `segments` in order and wraps the result as requested.
    pub fn new(segments: Vec<Bytes>, return_type: ReturnType) -> Result<Self> {
        let data = assemble(segments);

        Ok(match return_type {
            ReturnType::Url => Self::Url(Blob::new(&data)?),
            ReturnType::Buffer => Self::Buffer(data),
        })
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Url(blob) => blob.len(),
            Self::Buffer(data) => data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Concatenates segments in the order given.
pub fn assemble(segments: Vec<Bytes>) -> Bytes {
    let mut data = BytesMut::with_capacity(segments.iter().map(|x| x.len()).sum());

    for segment in segments {
        data.extend_from_slice(&segment);
    }

    data.freeze()
}

/// Assembled stream stored in a temporary file owned by this process.
///
/// The file, and with it the url, goes away when the blob is dropped.
#[derive(Debug)]
pub struct Blob {
    file: NamedTempFile,
    len: usize,
    url: Url,
}

impl Blob {
    pub fn new(data: &[u8]) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("scdl-")
            .suffix(".ts")
            .tempfile()?;
        file.write_all(data)?;
        file.flush()?;

        let url = Url::from_file_path(file.path()).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot express {} as a url", file.path().display()),
            )
        })?;

        Ok(Self {
            file,
            len: data.len(),
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reads the referenced bytes back.
    pub fn read(&self) -> Result<Bytes> {
        Ok(Bytes::from(std::fs::read(self.file.path())?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments() -> Vec<Bytes> {
        vec![
            Bytes::from_static(&[0xaa; 3]),
            Bytes::new(),
            Bytes::from_static(&[0xbb; 5]),
            Bytes::from_static(&[0xcc]),
        ]
    }

    #[test]
    fn return_type_literals() {
        assert_eq!("url".parse::<ReturnType>().unwrap(), ReturnType::Url);
        assert_eq!("buffer".parse::<ReturnType>().unwrap(), ReturnType::Buffer);
        assert!(matches!("blob".parse::<ReturnType>(), Err(Error::ReturnType(x)) if x == "blob"));
        assert_eq!(ReturnType::Url.to_string(), "url");
    }

    #[test]
    fn concatenation_keeps_order() {
        let mut expected = vec![0xaa; 3];
        expected.extend([0xbb; 5]);
        expected.push(0xcc);
        assert_eq!(assemble(segments()), expected);
    }

    #[test]
    fn both_modes_carry_the_same_bytes() {
        let buffer = match Output::new(segments(), ReturnType::Buffer).unwrap() {
            Output::Buffer(x) => x,
            Output::Url(_) => unreachable!(),
        };

        let blob = match Output::new(segments(), ReturnType::Url).unwrap() {
            Output::Url(x) => x,
            Output::Buffer(_) => unreachable!(),
        };

        assert_eq!(blob.url().scheme(), "file");
        assert_eq!(blob.len(), buffer.len());
        assert_eq!(blob.read().unwrap(), buffer);
    }

    #[test]
    fn blob_is_removed_on_drop() {
        let blob = Blob::new(b"transient").unwrap();
        let path = blob.path().to_owned();
        assert!(path.exists());
        drop(blob);
        assert!(!path.exists());
    }
}
