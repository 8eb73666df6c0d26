//! Basic16 emulator binary.
//!
//! Runs a program image to completion and prints the result word. With
//! `--trace` the machine state is redrawn after every phase.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use emu_basic16::{Emulator, EmulatorConfig, debug};

#[derive(Parser, Debug)]
#[command(name = "emulator", about = "Run a Basic16 program image until it halts.")]
struct Args {
    /// Program image produced by the assembler.
    program: PathBuf,

    /// Redraw the machine state after every phase.
    #[arg(long)]
    trace: bool,

    /// Pause between phases while tracing, in milliseconds.
    #[arg(long, value_name = "MS", default_value_t = 100)]
    delay_ms: u64,

    /// Stop with an error if the program has not halted after this many phases.
    #[arg(long, value_name = "N")]
    max_phases: Option<u64>,

    /// Write the final machine state as JSON.
    #[arg(long, value_name = "PATH")]
    dump_state: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> EmulatorConfig {
        EmulatorConfig {
            step_delay: if self.trace {
                Duration::from_millis(self.delay_ms)
            } else {
                Duration::ZERO
            },
            max_phases: self.max_phases,
            trace: self.trace,
            ..EmulatorConfig::default()
        }
    }
}

fn dump_state(emu: &Emulator, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&emu.snapshot())?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut emu = Emulator::new(args.config());
    emu.load_file(&args.program)
        .with_context(|| format!("loading {}", args.program.display()))?;

    let outcome = emu.run(|snap| {
        print!("{}{}", debug::CLEAR_SCREEN, debug::render(snap));
    });

    if let Some(path) = &args.dump_state {
        dump_state(&emu, path)?;
    }

    let result = outcome.with_context(|| format!("running {}", args.program.display()))?;
    println!("RESULT is [{result}]");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if let Err(err) = run(&args) {
        log::debug!("{err:?}");
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}
