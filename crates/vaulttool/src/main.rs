use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use vaulttool_core::{BacklinkRequest, run_request};

#[derive(Debug, Parser)]
#[command(
    name = "vaulttool",
    version,
    about = "Read-only query helpers for a vault of plain-text markdown notes"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "List the notes that link to the given note")]
    Backlinks(BacklinksArgs),
}

#[derive(Debug, Args)]
struct BacklinksArgs {
    #[arg(value_name = "TARGET", help = "Vault-relative path of the target note")]
    target_path: String,
    #[arg(
        long,
        value_name = "PATH",
        default_value = ".",
        help = "Vault root directory to scan"
    )]
    vault: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Backlinks(args)) => run_backlinks(args),
        None => {
            let mut command = Cli::command();
            command.print_help()?;
            println!();
            Ok(())
        }
    }
}

fn run_backlinks(args: BacklinksArgs) -> Result<()> {
    let request = BacklinkRequest {
        target_path: Some(args.target_path),
        vault_path: Some(args.vault.to_string_lossy().replace('\\', "/")),
    };
    let results = run_request(&request)?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
