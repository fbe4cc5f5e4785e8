use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::Opt;

#[derive(Parser, Debug)]
pub struct CompletionOpt {
    /// Shell to generate the completion script for
    #[arg(value_enum)]
    shell: Shell,
}

impl CompletionOpt {
    pub fn exec(&self) -> anyhow::Result<()> {
        let mut command = Opt::command();
        let name = command.get_name().to_owned();
        clap_complete::generate(self.shell, &mut command, name, &mut std::io::stdout());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap_complete::Shell;

    use crate::Opt;

    #[test]
    fn completion_mentions_subcommands_test() {
        let mut command = <Opt as clap::CommandFactory>::command();
        let mut script = Vec::new();
        clap_complete::generate(Shell::Bash, &mut command, "mips", &mut script);
        let script = String::from_utf8(script).unwrap();
        assert!(script.contains("max-steps"));
        assert!(script.contains("dump"));
    }
}
