//! Text rendering of a CPU snapshot.
//!
//! The panel has five sections: clock, current instruction, phase list,
//! register file and a memory window around the PC followed by the result
//! slot. Register and memory words are shown in binary.

use std::fmt::Write;

use cpu_basic16::{OperandType, PC_REG, PSW_REG, Phase, SP_REG, Snapshot};

/// ANSI sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[0;0H";

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}");
}

/// Render `snap` as a multi-line panel.
#[must_use]
pub fn render(snap: &Snapshot) -> String {
    let mut out = String::new();

    heading(&mut out, "----------CLOCK------------");
    let _ = writeln!(out, " CLOCK [{}]", snap.clock);

    heading(&mut out, "-------INSTRUCTION---------");
    if let Some(program) = &snap.program {
        let _ = write!(out, " IR [ {} ", program.inst.mnemonic);
        match program.inst.operands {
            OperandType::None => {}
            OperandType::Single => {
                let _ = write!(out, "{:03b} ", program.first_operand & 0b111);
            }
            OperandType::Double => {
                let _ = write!(
                    out,
                    "{:03b} {:08b} ",
                    program.first_operand & 0b111,
                    program.second_operand & 0xFF
                );
            }
        }
        let _ = writeln!(out, "]");
    }

    heading(&mut out, "------STATUS COUNTER--------");
    for phase in Phase::ALL {
        let marker = if phase == snap.phase { "  <" } else { "" };
        let _ = writeln!(out, " {} {marker}", phase.name());
    }

    heading(&mut out, "---------REGISTER-----------");
    for (index, &value) in snap.registers.0.iter().enumerate() {
        let _ = write!(out, " R{index} [{value:016b}] (0x{value:x}) ");
        match index {
            PC_REG => out.push_str(" (PC) "),
            SP_REG => out.push_str(" (SP) "),
            PSW_REG => {
                let _ = write!(
                    out,
                    "N = {} Z = {}  (PSW) ",
                    snap.negative(),
                    snap.zero()
                );
            }
            _ => {}
        }
        out.push('\n');
    }

    heading(&mut out, "----------MEMORY------------");
    let pc = snap.registers.pc();
    for cell in &snap.window {
        let _ = write!(out, " [0x{:x}] [{:016b}] ", cell.address, cell.value);
        if cell.address == pc {
            out.push_str("(PC)");
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "\n [0x{:x}] [{:016b}] ({}) ",
        snap.result.address, snap.result.value, snap.result.value
    );
    out.push_str("--------------------------\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpu_basic16::Basic16;
    use sim_core::Cpu;

    fn after_phases(program: &[u16], phases: usize) -> Snapshot {
        let mut cpu = Basic16::with_program(program).expect("fits");
        for _ in 0..phases {
            cpu.tick().expect("no fault");
        }
        cpu.snapshot()
    }

    #[test]
    fn test_fresh_cpu_has_no_instruction_line() {
        let text = render(&Basic16::new().snapshot());
        assert!(text.contains(" CLOCK [0]"));
        assert!(!text.contains("IR ["));
        assert!(text.contains(" FETCH_INST_0   <\n"));
    }

    #[test]
    fn test_double_operand_instruction_line() {
        // ldl r1, 0x03 decoded at the third phase.
        let text = render(&after_phases(&[0x4103, 0x7800], 3));
        assert!(text.contains(" IR [ ldl 001 00000011 ]\n"));
        assert!(text.contains(" EXEC_INST   <\n"));
    }

    #[test]
    fn test_register_annotations() {
        let text = render(&after_phases(&[0x4103, 0x7800], 5));
        assert!(text.contains(" R1 [0000000000000011] (0x3) \n"));
        assert!(text.contains(" R5 [0000000000000000] (0x0) N = 0 Z = 0  (PSW) \n"));
        assert!(text.contains(" R6 [0000000000000000] (0x0)  (SP) \n"));
        assert!(text.contains(" R7 [0000000000000001] (0x1)  (PC) \n"));
    }

    #[test]
    fn test_memory_window_marks_pc() {
        let text = render(&after_phases(&[0x4103, 0x7800], 5));
        assert!(text.contains(" [0x0] [0100000100000011] \n"));
        assert!(text.contains(" [0x1] [0111100000000000] (PC)\n"));
        assert!(text.contains(" [0x64] [0000000000000000] (0) \n"));
    }
}
