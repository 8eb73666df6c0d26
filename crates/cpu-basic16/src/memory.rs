//! Basic16 main memory.
//!
//! 256 words behind a single-port bus. The CPU latches a mode, then calls
//! [`Memory::access`] with its address latch (MAR) and data latch (MDR).

use crate::error::MemoryError;

/// Number of addressable words.
pub const MEMORY_SIZE: usize = 256;

/// By convention programs leave their answer at this address.
pub const RESULT_ADDR: u16 = 0x64;

/// Direction of the next bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryMode {
    #[default]
    Read,
    Write,
}

/// Word-addressed RAM with a latched bus mode.
#[derive(Debug, Clone)]
pub struct Memory {
    pub mode: MemoryMode,
    words: [u16; MEMORY_SIZE],
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl Memory {
    /// Create zeroed memory in read mode.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: MemoryMode::Read,
            words: [0; MEMORY_SIZE],
        }
    }

    fn index(address: u16) -> Result<usize, MemoryError> {
        let index = usize::from(address);
        if index < MEMORY_SIZE {
            Ok(index)
        } else {
            Err(MemoryError::OutOfRange {
                address,
                size: MEMORY_SIZE,
            })
        }
    }

    /// Perform one bus cycle in the latched mode.
    ///
    /// Read copies the addressed word into `mdr`; write stores `mdr` at the
    /// address. An address past the end of memory faults without touching
    /// either side.
    pub fn access(&mut self, mar: u16, mdr: &mut u16) -> Result<(), MemoryError> {
        let index = Self::index(mar)?;
        match self.mode {
            MemoryMode::Read => *mdr = self.words[index],
            MemoryMode::Write => self.words[index] = *mdr,
        }
        Ok(())
    }

    /// Read a word without a bus cycle. `None` past the end of memory.
    #[must_use]
    pub fn peek(&self, address: u16) -> Option<u16> {
        self.words.get(usize::from(address)).copied()
    }

    /// Write a word without a bus cycle (loaders and tests).
    pub fn poke(&mut self, address: u16, value: u16) -> Result<(), MemoryError> {
        let index = Self::index(address)?;
        self.words[index] = value;
        Ok(())
    }

    /// Copy a program image into memory starting at `base`.
    pub fn load(&mut self, base: u16, image: &[u16]) -> Result<(), MemoryError> {
        let start = usize::from(base);
        let Some(dest) = self.words.get_mut(start..start + image.len()) else {
            return Err(MemoryError::ImageTooLarge {
                base,
                len: image.len(),
                size: MEMORY_SIZE,
            });
        };
        dest.copy_from_slice(image);
        Ok(())
    }

    /// The whole memory array.
    #[must_use]
    pub fn words(&self) -> &[u16] {
        &self.words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_fills_data_latch() {
        let mut mem = Memory::new();
        mem.poke(0x10, 0xBEEF).expect("in range");
        let mut mdr = 0;
        mem.mode = MemoryMode::Read;
        mem.access(0x10, &mut mdr).expect("in range");
        assert_eq!(mdr, 0xBEEF);
    }

    #[test]
    fn write_stores_data_latch() {
        let mut mem = Memory::new();
        let mut mdr = 0x1234;
        mem.mode = MemoryMode::Write;
        mem.access(RESULT_ADDR, &mut mdr).expect("in range");
        assert_eq!(mem.peek(RESULT_ADDR), Some(0x1234));
        assert_eq!(mdr, 0x1234);
    }

    #[test]
    fn last_word_is_addressable() {
        let mut mem = Memory::new();
        let mut mdr = 7;
        mem.mode = MemoryMode::Write;
        assert!(mem.access(0x00FF, &mut mdr).is_ok());
        assert_eq!(mem.peek(0x00FF), Some(7));
    }

    #[test]
    fn out_of_range_access_faults() {
        let mut mem = Memory::new();
        let mut mdr = 0xAAAA;
        let err = mem.access(0x0100, &mut mdr).expect_err("past the end");
        assert_eq!(
            err,
            MemoryError::OutOfRange {
                address: 0x0100,
                size: MEMORY_SIZE
            }
        );
        assert_eq!(mdr, 0xAAAA);
        assert_eq!(mem.peek(0x0100), None);
    }

    #[test]
    fn load_places_image() {
        let mut mem = Memory::new();
        mem.load(2, &[1, 2, 3]).expect("fits");
        assert_eq!(&mem.words()[..6], &[0, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn load_rejects_oversized_image() {
        let mut mem = Memory::new();
        assert!(mem.load(0, &[0; MEMORY_SIZE]).is_ok());
        assert!(matches!(
            mem.load(1, &[0; MEMORY_SIZE]),
            Err(MemoryError::ImageTooLarge { len: MEMORY_SIZE, .. })
        ));
    }
}
