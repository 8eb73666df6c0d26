//! Instruction word encoding.
//!
//! ```text
//! 15   14 13 12 11   10 9 8   7 6 5 4 3 2 1 0
//! -    opcode        first    second
//! ```
//!
//! Double-operand instructions put a register code in `first` and either a
//! register code (bits 7-5) or an 8-bit immediate in `second`. Single-operand
//! instructions carry one pre-positioned operand: a register already shifted
//! into bits 10-8 (SL, SR) or a jump target in bits 7-0 (JE, JMP).

use crate::error::DecodeError;
use crate::isa::{self, Instruction, OperandType};

const OPCODE_MASK: u16 = 0b0111_1000_0000_0000;
const FIRST_MASK: u16 = 0b0000_0111_0000_0000;
const SECOND_MASK: u16 = 0b0000_0000_1111_1111;

/// An instruction together with its operand fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Program {
    pub inst: &'static Instruction,
    pub first_operand: u16,
    pub second_operand: u16,
}

impl Program {
    #[must_use]
    pub const fn new(inst: &'static Instruction, first_operand: u16, second_operand: u16) -> Self {
        Self {
            inst,
            first_operand,
            second_operand,
        }
    }

    /// Pack into a 16-bit instruction word.
    ///
    /// Operands are masked to their fields, so bit 15 and the opcode can
    /// never be corrupted by an oversized operand.
    #[must_use]
    pub fn encode(&self) -> u16 {
        let mut code = u16::from(self.inst.opcode) << 11;
        match self.inst.operands {
            OperandType::None => {}
            OperandType::Single => {
                code |= self.first_operand & (FIRST_MASK | SECOND_MASK);
            }
            OperandType::Double => {
                code |= (self.first_operand << 8) & FIRST_MASK;
                code |= self.second_operand & SECOND_MASK;
            }
        }
        code
    }

    /// Split an instruction word into opcode and operand fields.
    pub fn decode(word: u16) -> Result<Self, DecodeError> {
        let opcode = ((word & OPCODE_MASK) >> 11) as u8;
        let inst = isa::by_opcode(opcode).ok_or(DecodeError::UnknownOpcode { opcode, word })?;
        Ok(Self {
            inst,
            first_operand: (word & FIRST_MASK) >> 8,
            second_operand: word & SECOND_MASK,
        })
    }

    /// Register code held in bits 7-5 of the second operand.
    #[must_use]
    pub const fn second_register(&self) -> usize {
        ((self.second_operand >> 5) & 0b111) as usize
    }
}
