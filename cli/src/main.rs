#![forbid(unsafe_code)]

use std::io::IsTerminal;
use std::process::exit;

use clap::{ArgAction, ArgGroup, Parser};
use tracing::error;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

mod commands;

use crate::commands::Subcommand;

/// Assemble and interpret MIPS programs
///
/// The emulated program owns stdin and stdout: syscalls read from and print to them. Everything
/// the emulator itself reports, from load summaries to run-time warnings, goes to stderr.
#[derive(Parser)]
#[command(name = "mips", version, author, group = ArgGroup::new("format"))]
struct Opt {
    /// Show more of what the emulator does: data layout, then every executed instruction, then
    /// operand decoding. Can be used multiple times.
    #[arg(short, long, action = ArgAction::Count, global = true, conflicts_with = "quiet")]
    verbose: u8,

    /// Only report warnings raised by the program, like unresolved labels or bad registers
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Force colored logs. Default is to check if stderr is a terminal
    #[arg(short = 'c', long, global = true, group = "format")]
    color: bool,

    /// Force non-colored logs. Default is to check if stderr is a terminal
    #[arg(short = 'C', long, global = true, group = "format")]
    no_color: bool,

    /// Log as JSON lines on stderr
    #[arg(short, long, global = true, group = "format")]
    json: bool,

    #[command(subcommand)]
    command: Subcommand,
}

impl Opt {
    /// Filter directives used when `RUST_LOG` is not set
    const fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }

        match self.verbose {
            0 => "info",
            // How the source got laid out in memory
            1 => "mips_emulator::assembler=debug,mips=debug,info",
            // One line per executed instruction and syscall
            2 => "mips_emulator=debug,mips=debug,info",
            3 => "mips_emulator=trace,mips=trace,info",
            4..=u8::MAX => "trace",
        }
    }

    fn should_use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            std::io::stderr().is_terminal()
        }
    }

    fn filter_layer(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.log_filter()))
    }
}

fn main() {
    let opt = Opt::parse();

    // Logs must never interleave with what the program prints on stdout
    let registry = tracing_subscriber::Registry::default().with(opt.filter_layer());
    if opt.json {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr);
        registry.with(json_layer).init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .without_time()
            .with_ansi(opt.should_use_colors())
            .with_target(false)
            .with_writer(std::io::stderr);
        registry.with(fmt_layer).init();
    }

    if let Err(e) = opt.command.exec() {
        error!("{:#}", e);
        exit(1);
    }
}
