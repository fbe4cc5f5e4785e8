use camino::Utf8PathBuf;
use clap::{Parser, ValueHint};

#[derive(Parser, Debug)]
pub struct PrintOpt {
    /// Input file
    #[arg(value_hint = ValueHint::FilePath)]
    input: Utf8PathBuf,
}

impl PrintOpt {
    pub fn exec(&self) -> anyhow::Result<()> {
        let computer = super::load(&self.input)?;
        let program = computer.program();

        println!(".text");
        for statement in program.statements() {
            match statement.opcode {
                Some(opcode) => println!("{statement}  # {}", opcode.class()),
                None => println!("{statement}  # unsupported"),
            }
        }

        println!();
        println!("labels");
        for (label, address) in program.labels().iter() {
            println!("{address:#010x}: {label}");
        }

        Ok(())
    }
}
