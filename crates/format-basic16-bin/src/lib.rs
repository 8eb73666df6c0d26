//! Basic16 raw program image.
//!
//! An image is nothing but instruction words back to back, each stored in
//! the host's native byte order. There is no header and no length field:
//! the word count is the file size divided by two.

use std::fs;
use std::path::Path;

use thiserror::Error;

/// Bytes per instruction word.
pub const WORD_SIZE: usize = 2;

/// Largest image the machine can hold, in words.
pub const MAX_WORDS: usize = 256;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("i/o error")]
    Io(#[from] std::io::Error),
    #[error("image is {0} bytes, not a whole number of 16-bit words")]
    OddLength(usize),
    #[error("image holds {0} words, memory only has 256")]
    TooLarge(usize),
}

/// A program image: the words loaded at address 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramImage {
    words: Vec<u16>,
}

impl ProgramImage {
    #[must_use]
    pub fn new(words: Vec<u16>) -> Self {
        Self { words }
    }

    /// Parse raw bytes in native byte order.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ImageError> {
        if data.len() % WORD_SIZE != 0 {
            return Err(ImageError::OddLength(data.len()));
        }
        if data.len() / WORD_SIZE > MAX_WORDS {
            return Err(ImageError::TooLarge(data.len() / WORD_SIZE));
        }
        let words = data
            .chunks_exact(WORD_SIZE)
            .map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
            .collect();
        Ok(Self { words })
    }

    /// Serialise to raw bytes in native byte order.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.words.iter().flat_map(|w| w.to_ne_bytes()).collect()
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let image = Self::from_bytes(&fs::read(path)?)?;
        log::debug!("read {} words from {}", image.len(), path.display());
        Ok(image)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ImageError> {
        let path = path.as_ref();
        fs::write(path, self.to_bytes())?;
        log::debug!("wrote {} words to {}", self.len(), path.display());
        Ok(())
    }

    #[must_use]
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl From<Vec<u16>> for ProgramImage {
    fn from(words: Vec<u16>) -> Self {
        Self::new(words)
    }
}
