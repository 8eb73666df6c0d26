//! End-to-end tests: assemble source, load the image, run to halt.

use asm_basic16::assemble;
use cpu_basic16::{CpuError, DecodeError, Phase};
use emu_basic16::{Emulator, EmulatorConfig, EmulatorError};
use format_basic16_bin::ProgramImage;
use sim_core::{Cpu, Observable, Value};

const ADD_PROGRAM: &str = "\
ldl r0, 0x05
ldl r1, 0x03
add r0, r1
st r0, 0x64
hlt
";

/// Sum 1..=10 into word 0x64.
const SUM_PROGRAM: &str = "\
        ldl r1, 0x01    ; step
        ldl r2, 0x0a    ; counter
        ldl r3, 0x00    ; zero
loop:   add r0, r2
        sub r2, r1
        cmp r2, r3
        je done
        jmp loop
done:   st r0, 0x64
        hlt
";

fn machine(source: &str) -> Emulator {
    let assembly = assemble(source).expect("assembles");
    let mut emu = Emulator::new(EmulatorConfig::default());
    emu.load_image(&assembly.image()).expect("fits");
    emu
}

#[test]
fn test_add_program() {
    let mut emu = machine(ADD_PROGRAM);
    assert_eq!(emu.run(|_| {}).expect("halts"), 8);
    assert_eq!(emu.cpu().instructions(), 5);
    assert_eq!(emu.cpu().clock().get(), 25);
    assert_eq!(emu.cpu().query("result"), Some(Value::U16(8)));
}

#[test]
fn test_counting_loop() {
    let mut emu = machine(SUM_PROGRAM);
    assert_eq!(emu.run(|_| {}).expect("halts"), 55);
    assert_eq!(emu.cpu().registers().get(2), 0);
    assert_eq!(emu.cpu().registers().zero(), 1);
}

#[test]
fn test_image_file_round_trip() {
    let path = std::env::temp_dir().join(format!("basic16-e2e-{}.bin", std::process::id()));
    assemble(ADD_PROGRAM)
        .expect("assembles")
        .image()
        .write(&path)
        .expect("write");

    let mut emu = Emulator::new(EmulatorConfig::default());
    let loaded = emu.load_file(&path);
    let _ = std::fs::remove_file(&path);
    loaded.expect("load");
    assert_eq!(emu.run(|_| {}).expect("halts"), 8);
}

#[test]
fn test_missing_image_file() {
    let mut emu = Emulator::new(EmulatorConfig::default());
    let err = emu
        .load_file(std::env::temp_dir().join("basic16-no-such-image.bin"))
        .expect_err("missing");
    assert!(matches!(err, EmulatorError::Image(_)));
}

#[test]
fn test_snapshot_json() {
    let mut emu = machine(ADD_PROGRAM);
    emu.run(|_| {}).expect("halts");

    let json = serde_json::to_value(emu.snapshot()).expect("serializes");
    assert_eq!(json["clock"], 25);
    assert_eq!(json["instructions"], 5);
    assert_eq!(json["halted"], true);
    assert_eq!(json["registers"][0], 8);
    assert_eq!(json["result"]["address"], 0x64);
    assert_eq!(json["result"]["value"], 8);
    assert_eq!(json["program"]["inst"]["mnemonic"], "hlt");
}

#[test]
fn test_trace_snapshots_follow_phases() {
    let assembly = assemble(ADD_PROGRAM).expect("assembles");
    let mut emu = Emulator::new(EmulatorConfig {
        trace: true,
        ..EmulatorConfig::default()
    });
    emu.load_image(&assembly.image()).expect("fits");

    let mut phases = Vec::new();
    emu.run(|snap| phases.push(snap.phase)).expect("halts");

    // First instruction: ldl, no memory operand phase.
    assert_eq!(
        &phases[..5],
        &[
            Phase::FetchInst1,
            Phase::FetchOperand0,
            Phase::ExecInst,
            Phase::WriteBack,
            Phase::FetchInst0,
        ]
    );
    assert_eq!(phases.len(), 25);
}

#[test]
fn test_unknown_opcode_stops_the_run() {
    let mut words = assemble("ldl r0, 0x01\n").expect("assembles").words().to_vec();
    words.push(0x3800);
    words.push(0x7800);

    let mut emu = Emulator::new(EmulatorConfig::default());
    emu.load_image(&ProgramImage::new(words)).expect("fits");
    let err = emu.run(|_| {}).expect_err("faults");

    assert!(matches!(
        err,
        EmulatorError::Cpu(CpuError::Decode {
            pc: 1,
            source: DecodeError::UnknownOpcode { opcode: 7, .. }
        })
    ));
    assert_eq!(emu.cpu().registers().get(0), 1);
    assert!(!emu.cpu().is_halted());
    assert_eq!(emu.result(), 0);
}

#[test]
fn test_runaway_program_hits_phase_limit() {
    let assembly = assemble("spin: jmp spin\n").expect("assembles");
    let mut emu = Emulator::new(EmulatorConfig {
        max_phases: Some(1_000),
        ..EmulatorConfig::default()
    });
    emu.load_image(&assembly.image()).expect("fits");
    assert!(matches!(
        emu.run(|_| {}),
        Err(EmulatorError::PhaseLimit { limit: 1_000 })
    ));
}
