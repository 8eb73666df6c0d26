//! Basic16 assembler binary.
//!
//! Assembles a source file, prints a listing and writes the raw image.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "assembler", about = "Assemble Basic16 source into a program image.")]
struct Args {
    /// Assembly source file.
    input: PathBuf,

    /// Where to write the program image.
    output: PathBuf,
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let assembly = asm_basic16::assemble(&source)
        .with_context(|| format!("assembling {}", args.input.display()))?;

    for line in assembly.listing() {
        println!("{line}");
    }

    assembly
        .image()
        .write(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("output binary in {}", args.output.display());
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
