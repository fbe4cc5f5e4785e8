use camino::Utf8PathBuf;
use clap::{Parser, ValueHint};
use mips_emulator::constants::Address;
use tracing::debug;

use super::parse_address;

#[derive(Parser, Debug)]
pub struct DumpOpt {
    /// Input file
    #[arg(value_hint = ValueHint::FilePath)]
    input: Utf8PathBuf,

    /// First address of the range
    #[arg(value_parser = parse_address)]
    start: Address,

    /// Last address of the range, included
    #[arg(value_parser = parse_address)]
    end: Address,

    /// Run the program before dumping the memory
    #[arg(short, long)]
    run: bool,
}

impl DumpOpt {
    pub fn exec(self) -> anyhow::Result<()> {
        let mut computer = super::load(&self.input)?;

        if self.run {
            debug!("Running program");
            computer.run();
        }

        print!("{}", computer.memory.display_range(self.start, self.end));

        Ok(())
    }
}
