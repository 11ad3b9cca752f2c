//! HexClear CLI - Command-line interface
//!
//! Commands:
//! - solve: Search a level for a clearing sequence
//! - validate: Check level files and confirm par is reachable
//! - show: Render a level board as text

mod show_cmd;
mod solve_cmd;
mod validate_cmd;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hexclear")]
#[command(about = "HexClear puzzle solver and level toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search a level for a clearing sequence
    Solve(solve_cmd::SolveArgs),
    /// Check level files and confirm par is reachable
    Validate(validate_cmd::ValidateArgs),
    /// Render a level board as text
    Show(show_cmd::ShowArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => solve_cmd::run(args),
        Commands::Validate(args) => validate_cmd::run(args),
        Commands::Show(args) => show_cmd::run(args),
    }
}
