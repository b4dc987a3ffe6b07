pub mod handlers;

use crate::config::Overrides;
use crate::presentation::cli::{Cli, Commands};
use clap::Parser;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Reorganize {
            input,
            out,
            deterministic,
            codec,
            password,
            max_entries,
            max_uncompressed,
            config,
            report,
        } => handlers::handle_reorganize(
            input,
            out,
            Overrides {
                deterministic,
                codec,
                password,
                max_entries,
                max_uncompressed,
            },
            config,
            report,
        ),
        Commands::Plan {
            input,
            password,
            config,
        } => handlers::handle_plan(input, password, config),
        Commands::List { archive } => handlers::handle_list(archive),
        Commands::Rewrite { file, kind } => handlers::handle_rewrite(file, kind),
    }
}
