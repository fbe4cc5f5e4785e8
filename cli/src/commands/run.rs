use camino::Utf8PathBuf;
use clap::{Parser, ValueHint};
use tracing::{info, warn};

#[derive(Parser, Debug)]
pub struct RunOpt {
    /// Input file
    #[arg(value_hint = ValueHint::FilePath)]
    input: Utf8PathBuf,

    /// Stop after this many instructions if the program is still running
    #[arg(long, value_name = "N")]
    max_steps: Option<u64>,
}

impl RunOpt {
    pub fn exec(self) -> anyhow::Result<()> {
        let mut computer = super::load(&self.input)?;

        info!("Running program");
        let reason = match self.max_steps {
            Some(max_steps) => computer.run_for(max_steps),
            None => Some(computer.run()),
        };

        match reason {
            Some(reason) => info!(steps = computer.steps(), "End of program: {}", reason),
            None => warn!(
                steps = computer.steps(),
                "Program still running, stopped at {:#010x}",
                computer.pc
            ),
        }

        println!();
        print!("{}", computer.snapshot());

        Ok(())
    }
}
