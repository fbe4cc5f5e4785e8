use std::process::exit;

use anyhow::Context;
use camino::Utf8Path;
use mips_emulator::constants::Address;
use mips_emulator::parser::{parse_number, ParseNumberError};
use mips_emulator::Computer;
use tracing::info;

mod completion;
mod dump;
mod print;
mod run;

#[derive(clap::Subcommand, Debug)]
pub enum Subcommand {
    /// Load and run a program
    Run(self::run::RunOpt),

    /// Print the instructions and labels of a program
    Print(self::print::PrintOpt),

    /// Print a memory range after loading a program
    Dump(self::dump::DumpOpt),

    /// Generate shell completions
    Completion(self::completion::CompletionOpt),
}

impl Subcommand {
    /// Run a subcommand
    pub fn exec(self) -> anyhow::Result<()> {
        match self {
            Self::Run(opt) => opt.exec(),
            Self::Print(opt) => opt.exec(),
            Self::Dump(opt) => opt.exec(),
            Self::Completion(opt) => opt.exec(),
        }
    }
}

/// Parse an address argument, in decimal or `0x` hexadecimal
pub(crate) fn parse_address(value: &str) -> Result<Address, ParseNumberError> {
    parse_number(value)
}

/// Read and load a program. Load errors are rendered against the source and exit the process.
pub(crate) fn load(input: &Utf8Path) -> anyhow::Result<Computer> {
    info!(path = %input, "Reading program");
    let source = std::fs::read_to_string(input)
        .with_context(|| format!("could not read program from {input}"))?;

    let mut computer = Computer::default();
    if let Err(e) = computer.load(&source) {
        let report = miette::Report::new(e)
            .with_source_code(miette::NamedSource::new(input.as_str(), source));
        eprintln!("{report:?}");
        exit(1);
    }

    Ok(computer)
}
