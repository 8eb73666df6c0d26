//! Tests that drive the `emulator` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

use format_basic16_bin::ProgramImage;

// ldl r0,0x05 / ldl r1,0x03 / add r0,r1 / st r0,0x64 / hlt
const ADD_PROGRAM: [u16; 5] = [0x4005, 0x4103, 0x0820, 0x7064, 0x7800];

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("basic16-cli-{}-{name}", std::process::id()))
}

fn write_image(name: &str, words: &[u16]) -> PathBuf {
    let path = temp_path(name);
    ProgramImage::new(words.to_vec()).write(&path).expect("write image");
    path
}

fn emulator(args: &[&std::ffi::OsStr], rust_log: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_emulator"));
    cmd.args(args);
    match rust_log {
        Some(filter) => cmd.env("RUST_LOG", filter),
        None => cmd.env_remove("RUST_LOG"),
    };
    cmd.output().expect("emulator runs")
}

#[test]
fn test_prints_result() {
    let image = write_image("add.bin", &ADD_PROGRAM);
    let out = emulator(&[image.as_os_str()], None);
    let _ = std::fs::remove_file(&image);

    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "RESULT is [8]\n");
}

#[test]
fn test_missing_argument_prints_usage() {
    let out = emulator(&[], None);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage:"));
}

#[test]
fn test_fault_is_reported_whatever_the_log_filter() {
    let image = write_image("bad-opcode.bin", &[0x3800, 0x7800]);
    for filter in [None, Some("off"), Some("cpu_basic16=debug")] {
        let out = emulator(&[image.as_os_str()], filter);
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert_eq!(out.status.code(), Some(1), "filter {filter:?}");
        assert!(stderr.contains("error: "), "filter {filter:?}: {stderr:?}");
        assert!(stderr.contains("decode fault at 0x0000"), "{stderr:?}");
        assert_eq!(stderr.matches("invalid opcode").count(), 1, "{stderr:?}");
        assert!(out.stdout.is_empty());
    }
    let _ = std::fs::remove_file(&image);
}

#[test]
fn test_missing_image_exits_with_error() {
    let path = temp_path("does-not-exist.bin");
    let out = emulator(&[path.as_os_str()], Some("off"));
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("cannot load program image"));
}

#[test]
fn test_dump_state_writes_json() {
    let image = write_image("dump.bin", &ADD_PROGRAM);
    let dump = temp_path("dump.json");
    let out = emulator(
        &[image.as_os_str(), "--dump-state".as_ref(), dump.as_os_str()],
        None,
    );
    let json = std::fs::read_to_string(&dump);
    let _ = std::fs::remove_file(&image);
    let _ = std::fs::remove_file(&dump);

    assert!(out.status.success());
    let state: serde_json::Value =
        serde_json::from_str(&json.expect("dump written")).expect("valid json");
    assert_eq!(state["result"]["value"], 8);
    assert_eq!(state["halted"], true);
}
