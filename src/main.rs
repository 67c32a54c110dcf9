use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use artifactory_resource::client::JfrogCliClient;
use artifactory_resource::commands;

#[derive(Parser)]
#[command(name = "artifactory-resource")]
#[command(version, about = "Concourse resource for Artifactory artifacts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List artifact versions newer than the last observed build
    Check,
    /// Fetch an artifact into DIRECTORY (the resource's `in` step)
    In { directory: PathBuf },
    /// Upload artifacts from DIRECTORY (the resource's `out` step)
    Out { directory: PathBuf },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Check => commands::check::run(stdin, &mut stdout, JfrogCliClient::connect)?,
        Command::In { directory } => {
            commands::get::run(stdin, &mut stdout, &directory, JfrogCliClient::connect)?
        }
        Command::Out { directory } => {
            commands::put::run(stdin, &mut stdout, &directory, JfrogCliClient::connect)?
        }
    }
    Ok(())
}
