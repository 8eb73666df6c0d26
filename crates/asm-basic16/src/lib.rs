//! Basic16 assembler.
//!
//! Turns mnemonic source into instruction words:
//!
//! ```text
//! ldl r0, 0x05   ; r0 = 5
//! ldl r1, 0x03
//! add r0, r1
//! st  r0, 0x64   ; leave the answer in the result slot
//! hlt
//! ```
//!
//! Labels (`name:`) resolve to the index of the instruction that follows
//! them, which is also its address since programs load at 0.

mod codegen;
mod error;
pub mod lexer;
pub mod parser;

pub use codegen::{generate, listing_line};
pub use error::AsmError;
pub use parser::LabelTable;

use cpu_basic16::Program;
use format_basic16_bin::ProgramImage;

/// The result of assembling one source file.
#[derive(Debug, Clone)]
pub struct Assembly {
    programs: Vec<Program>,
    words: Vec<u16>,
    labels: LabelTable,
}

impl Assembly {
    #[must_use]
    pub fn programs(&self) -> &[Program] {
        &self.programs
    }

    #[must_use]
    pub fn words(&self) -> &[u16] {
        &self.words
    }

    #[must_use]
    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// One listing line per instruction.
    #[must_use]
    pub fn listing(&self) -> Vec<String> {
        self.programs
            .iter()
            .zip(&self.words)
            .enumerate()
            .map(|(index, (program, &word))| listing_line(index + 1, program, word))
            .collect()
    }

    /// The words as a loadable image.
    #[must_use]
    pub fn image(&self) -> ProgramImage {
        ProgramImage::new(self.words.clone())
    }
}

/// Assemble source text.
pub fn assemble(source: &str) -> Result<Assembly, AsmError> {
    let tokens = lexer::tokenize(source);
    let labels = parser::collect_labels(&tokens)?;
    let programs = parser::parse(&tokens, &labels)?;
    let words = generate(&programs);
    log::debug!("assembled {} instructions", words.len());
    Ok(Assembly {
        programs,
        words,
        labels,
    })
}
