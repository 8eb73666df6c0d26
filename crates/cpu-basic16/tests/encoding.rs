//! Property tests for the instruction word contract shared with the
//! assembler.

use cpu_basic16::isa::{INSTRUCTIONS, by_opcode};
use cpu_basic16::{DecodeError, Instruction, OperandType, Program};
use proptest::prelude::*;

fn with_arity(arity: OperandType) -> Vec<&'static Instruction> {
    INSTRUCTIONS.iter().filter(|i| i.operands == arity).collect()
}

fn any_double() -> impl Strategy<Value = &'static Instruction> {
    prop::sample::select(with_arity(OperandType::Double))
}

fn any_single() -> impl Strategy<Value = &'static Instruction> {
    prop::sample::select(with_arity(OperandType::Single))
}

#[test]
fn halt_round_trips() {
    for inst in with_arity(OperandType::None) {
        let p = Program::new(inst, 0, 0);
        assert_eq!(Program::decode(p.encode()), Ok(p));
    }
}

#[test]
fn only_opcode_seven_is_unassigned() {
    for opcode in 0u8..16 {
        let word = u16::from(opcode) << 11;
        match Program::decode(word) {
            Ok(p) => assert_eq!(p.inst.opcode, opcode),
            Err(DecodeError::UnknownOpcode { opcode: bad, .. }) => {
                assert_eq!(bad, 0b0111);
                assert!(by_opcode(bad).is_none());
            }
        }
    }
}

proptest! {
    #[test]
    fn double_operand_round_trips(inst in any_double(), first in 0u16..8, second in 0u16..256) {
        let p = Program::new(inst, first, second);
        prop_assert_eq!(Program::decode(p.encode()), Ok(p));
    }

    #[test]
    fn register_pair_round_trips(inst in any_double(), dst in 0u16..8, src in 0u16..8) {
        let p = Program::new(inst, dst, src << 5);
        let decoded = Program::decode(p.encode()).expect("assigned opcode");
        prop_assert_eq!(decoded.first_operand, dst);
        prop_assert_eq!(decoded.second_register(), usize::from(src));
        prop_assert_eq!(decoded.second_operand & 0b1_1111, 0);
    }

    #[test]
    fn single_register_lands_in_first_field(inst in any_single(), reg in 0u16..8) {
        let decoded = Program::decode(Program::new(inst, reg << 8, 0).encode())
            .expect("assigned opcode");
        prop_assert_eq!(decoded.inst, inst);
        prop_assert_eq!(decoded.first_operand, reg);
        prop_assert_eq!(decoded.second_operand, 0);
    }

    #[test]
    fn single_target_lands_in_second_field(inst in any_single(), target in 0u16..256) {
        let decoded = Program::decode(Program::new(inst, target, 0).encode())
            .expect("assigned opcode");
        prop_assert_eq!(decoded.inst, inst);
        prop_assert_eq!(decoded.first_operand, 0);
        prop_assert_eq!(decoded.second_operand, target);
    }

    #[test]
    fn bit_15_is_never_set(
        inst in prop::sample::select(INSTRUCTIONS.iter().collect::<Vec<_>>()),
        a: u16,
        b: u16,
    ) {
        let word = Program::new(inst, a, b).encode();
        prop_assert_eq!(word & 0x8000, 0);
        prop_assert_eq!(Program::decode(word).map(|p| p.inst.kind), Ok(inst.kind));
    }

    #[test]
    fn decoded_words_re_encode(word in 0u16..0x8000) {
        // Double-operand and halt words survive decode then encode unchanged.
        if let Ok(p) = Program::decode(word) {
            if p.inst.operands == OperandType::Double {
                prop_assert_eq!(p.encode(), word);
            }
        }
    }
}
