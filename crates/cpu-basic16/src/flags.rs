//! Program status word (PSW) view.
//!
//! The PSW has no storage of its own: it lives in register r5 of the
//! register file. [`Psw`] borrows that word and only ever touches its top two
//! bits. Any instruction that writes r5 directly may clobber the flags.

/// Negative flag (bit 15).
pub const NF: u16 = 0b1000_0000_0000_0000;

/// Zero flag (bit 14).
pub const ZF: u16 = 0b0100_0000_0000_0000;

/// Negative flag of a raw PSW word, as 0 or 1.
#[must_use]
pub const fn negative(word: u16) -> u16 {
    (word >> 15) & 0x1
}

/// Zero flag of a raw PSW word, as 0 or 1.
#[must_use]
pub const fn zero(word: u16) -> u16 {
    (word >> 14) & 0x1
}

/// Mutable flag view over a borrowed PSW word.
#[derive(Debug)]
pub struct Psw<'a> {
    word: &'a mut u16,
}

impl<'a> Psw<'a> {
    #[must_use]
    pub fn new(word: &'a mut u16) -> Self {
        Self { word }
    }

    fn set_if(&mut self, mask: u16, on: bool) {
        if on {
            *self.word |= mask;
        } else {
            *self.word &= !mask;
        }
    }

    pub fn set_negative(&mut self, on: bool) {
        self.set_if(NF, on);
    }

    pub fn set_zero(&mut self, on: bool) {
        self.set_if(ZF, on);
    }

    #[must_use]
    pub fn get_negative(&self) -> u16 {
        negative(*self.word)
    }

    #[must_use]
    pub fn get_zero(&self) -> u16 {
        zero(*self.word)
    }
}
