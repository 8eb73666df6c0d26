//! Basic16 instruction set and register tables.
//!
//! Both tables are tiny and fixed, so lookups are linear scans where the
//! first match wins.

/// Every instruction the CPU understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InstructionType {
    Mov,
    Add,
    Sub,
    And,
    Or,
    Sl,
    Sr,
    Ldl,
    Ldh,
    Cmp,
    Je,
    Jmp,
    Ld,
    St,
    Hlt,
}

/// How many operands the assembler expects for an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum OperandType {
    None,
    Single,
    Double,
}

/// Static definition of one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instruction {
    pub kind: InstructionType,
    pub mnemonic: &'static str,
    /// 4-bit opcode, placed at bits 14-11 of the instruction word.
    pub opcode: u8,
    pub operands: OperandType,
}

/// Static definition of one register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register {
    pub name: &'static str,
    /// 3-bit register code.
    pub code: u8,
}

const fn inst(
    kind: InstructionType,
    mnemonic: &'static str,
    opcode: u8,
    operands: OperandType,
) -> Instruction {
    Instruction {
        kind,
        mnemonic,
        opcode,
        operands,
    }
}

/// The instruction table. Opcode `0b0111` is unassigned.
pub static INSTRUCTIONS: [Instruction; 15] = [
    inst(InstructionType::Mov, "mov", 0b0000, OperandType::Double),
    inst(InstructionType::Add, "add", 0b0001, OperandType::Double),
    inst(InstructionType::Sub, "sub", 0b0010, OperandType::Double),
    inst(InstructionType::And, "and", 0b0011, OperandType::Double),
    inst(InstructionType::Or, "or", 0b0100, OperandType::Double),
    inst(InstructionType::Sl, "sl", 0b0101, OperandType::Single),
    inst(InstructionType::Sr, "sr", 0b0110, OperandType::Single),
    inst(InstructionType::Ldl, "ldl", 0b1000, OperandType::Double),
    inst(InstructionType::Ldh, "ldh", 0b1001, OperandType::Double),
    inst(InstructionType::Cmp, "cmp", 0b1010, OperandType::Double),
    inst(InstructionType::Je, "je", 0b1011, OperandType::Single),
    inst(InstructionType::Jmp, "jmp", 0b1100, OperandType::Single),
    inst(InstructionType::Ld, "ld", 0b1101, OperandType::Double),
    inst(InstructionType::St, "st", 0b1110, OperandType::Double),
    inst(InstructionType::Hlt, "hlt", 0b1111, OperandType::None),
];

/// The register table. r5 is the PSW, r6 the stack pointer, r7 the PC.
pub static REGISTERS: [Register; 8] = [
    Register { name: "r0", code: 0b000 },
    Register { name: "r1", code: 0b001 },
    Register { name: "r2", code: 0b010 },
    Register { name: "r3", code: 0b011 },
    Register { name: "r4", code: 0b100 },
    Register { name: "r5", code: 0b101 },
    Register { name: "r6", code: 0b110 },
    Register { name: "r7", code: 0b111 },
];

/// Look up an instruction by its assembler mnemonic.
#[must_use]
pub fn by_mnemonic(mnemonic: &str) -> Option<&'static Instruction> {
    INSTRUCTIONS.iter().find(|i| i.mnemonic == mnemonic)
}

/// Look up an instruction by its 4-bit opcode.
#[must_use]
pub fn by_opcode(opcode: u8) -> Option<&'static Instruction> {
    INSTRUCTIONS.iter().find(|i| i.opcode == opcode)
}

/// Look up the definition for an instruction type.
#[must_use]
pub fn by_type(kind: InstructionType) -> &'static Instruction {
    // Every variant has exactly one table entry.
    match INSTRUCTIONS.iter().find(|i| i.kind == kind) {
        Some(inst) => inst,
        None => unreachable!("instruction table is missing {kind:?}"),
    }
}

/// Look up a register by name.
#[must_use]
pub fn register_by_name(name: &str) -> Option<&'static Register> {
    REGISTERS.iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn opcodes_are_unique_and_four_bits() {
        let mut seen = HashSet::new();
        for inst in &INSTRUCTIONS {
            assert!(inst.opcode < 16, "{} opcode too wide", inst.mnemonic);
            assert!(seen.insert(inst.opcode), "duplicate opcode {}", inst.opcode);
        }
    }

    #[test]
    fn every_type_has_a_definition() {
        let kinds: HashSet<_> = INSTRUCTIONS.iter().map(|i| i.kind).collect();
        assert_eq!(kinds.len(), INSTRUCTIONS.len());
        assert_eq!(by_type(InstructionType::Ld).mnemonic, "ld");
    }

    #[test]
    fn lookup_by_mnemonic() {
        let add = by_mnemonic("add").expect("add is defined");
        assert_eq!(add.kind, InstructionType::Add);
        assert_eq!(add.opcode, 0b0001);
        assert_eq!(add.operands, OperandType::Double);
        assert!(by_mnemonic("nop").is_none());
        assert!(by_mnemonic("ADD").is_none());
    }

    #[test]
    fn lookup_by_opcode() {
        assert_eq!(by_opcode(0b1111).map(|i| i.kind), Some(InstructionType::Hlt));
        assert_eq!(by_opcode(0b1011).map(|i| i.kind), Some(InstructionType::Je));
        assert!(by_opcode(0b0111).is_none());
    }

    #[test]
    fn lookup_registers() {
        assert_eq!(register_by_name("r7").map(|r| r.code), Some(7));
        assert_eq!(register_by_name("r0").map(|r| r.code), Some(0));
        assert!(register_by_name("r8").is_none());
        assert!(register_by_name("pc").is_none());
    }
}
