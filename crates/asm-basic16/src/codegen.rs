//! Programs to instruction words and listing lines.

use cpu_basic16::{OperandType, Program};

/// One listing line: `[n] mnemonic ops<TAB><16-bit binary>`.
///
/// `position` counts from 1. Operands are printed in decimal exactly as
/// they were placed, so a shifted register shows its shifted value.
#[must_use]
pub fn listing_line(position: usize, program: &Program, word: u16) -> String {
    let operands = match program.inst.operands {
        OperandType::None => String::new(),
        OperandType::Single => program.first_operand.to_string(),
        OperandType::Double => {
            format!("{}, {}", program.first_operand, program.second_operand)
        }
    };
    format!("[{position}] {} {operands}\t{word:016b}", program.inst.mnemonic)
}

/// Encode every program in order.
#[must_use]
pub fn generate(programs: &[Program]) -> Vec<u16> {
    programs.iter().map(Program::encode).collect()
}
