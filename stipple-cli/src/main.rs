//! Host shell: loads a bytecode image, runs it on process stdio and maps
//! the outcome to an exit code.

use anyhow::{bail, Context};
use clap::Parser;

use stipple_asm::Instruction;
use stipple_vm::consts::PROGRAM_MAX_SIZE;
use stipple_vm::prelude::*;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "stipple", version, about = "Stipple VM bytecode interpreter")]
struct Args {
    /// Bytecode image to execute.
    file: PathBuf,

    /// Print a disassembly listing instead of executing.
    #[arg(long)]
    disassemble: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<ExitCode> {
    let image = fs::read(&args.file)
        .with_context(|| format!("cannot read '{}'", args.file.display()))?;

    if image.is_empty() {
        bail!("'{}' is empty", args.file.display());
    }
    if image.len() > PROGRAM_MAX_SIZE {
        bail!(
            "'{}' is {} bytes, the maximum program size is {PROGRAM_MAX_SIZE}",
            args.file.display(),
            image.len()
        );
    }

    let mut vm = Interpreter::stdio();
    vm.init();
    vm.load_program(&image)
        .context("cannot load the program image")?;

    if args.disassemble {
        print!("{}", listing(&vm));
        return Ok(ExitCode::SUCCESS);
    }

    match vm.run() {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            eprintln!("Program error at PC=0x{:04X}: {err}", vm.pc());
            eprint!("{}", vm.dump_state());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Walk the image instruction by instruction. An undecodable position ends
/// the listing, mirroring how execution would stop there.
fn listing(vm: &StdioInterpreter) -> String {
    let mut out = String::new();
    let mut pc = 0u32;

    while pc < vm.program_len() {
        out.push_str(&vm.disassemble(pc));
        out.push('\n');

        match Instruction::decode(vm.program(), pc as usize) {
            Ok(instruction) => pc += instruction.size() as u32,
            Err(_) => break,
        }
    }

    out
}
