use clap::{Parser, Subcommand};
use eyre::Result;
use std::path::PathBuf;

mod cmd;

use cmd::console::ConsoleArgs;
use cmd::dump::DumpArgs;
use cmd::serve::ServeArgs;

#[derive(Debug, Parser)]
#[command(
    name = "activity-feed",
    version,
    about = "Browse, filter and replay a team's activity log"
)]
struct Cli {
    /// Write diagnostics to this file (filtered by RUST_LOG)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Interactive terminal feed
    Console(ConsoleArgs),
    /// Print one window of the feed and exit
    Dump(DumpArgs),
    /// Serve a JSON file of log records at /logs
    Serve(ServeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Console(args) => {
            // stderr belongs to the terminal UI, so only log to a file.
            if let Some(path) = cli.log_file.as_deref() {
                cmd::logging::init_file(path)?;
            }
            args.run()
        }
        Command::Dump(args) => {
            cmd::logging::init(cli.log_file.as_deref())?;
            args.run()
        }
        Command::Serve(args) => {
            cmd::logging::init(cli.log_file.as_deref())?;
            args.run()
        }
    }
}
