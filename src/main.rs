// Entrypoint for the CLI application.
// - Parses the subcommand surface with clap and dispatches to
//   `commands`; each command handles its own errors.
// - Returns `anyhow::Result` for the few setup failures (help output).

use clap::{CommandFactory, Parser, Subcommand};
use vibebench_cli::api::ApiClient;
use vibebench_cli::commands;
use vibebench_cli::format::Theme;

#[derive(Parser)]
#[command(name = "vibebench", version, about = "Vote on AI models from your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Vote on a model (interactive if no arguments)
    Vote {
        /// Model slug to vote on
        model: Option<String>,
        /// Vote type: fire, mid, or cursed
        #[arg(value_name = "TYPE")]
        vote_type: Option<String>,
        /// Optional comment
        comment: Option<String>,
    },
    /// Get statistics for a specific model
    Stats {
        /// Model slug to get stats for
        model: String,
    },
    /// Show leaderboard
    Top {
        /// Number of models to show
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// List all available models
    Models,
    /// Check your rate limit status
    Status,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let api = ApiClient::from_env();
    let theme = Theme::from_env();

    match cli.command {
        Some(Command::Vote {
            model,
            vote_type,
            comment,
        }) => commands::vote(&api, &theme, model, vote_type, comment),
        Some(Command::Stats { model }) => commands::stats(&api, &theme, &model),
        Some(Command::Top { count }) => commands::top(&api, &theme, count),
        Some(Command::Models) => commands::models(&api, &theme),
        Some(Command::Status) => commands::status(&api, &theme),
        None => Cli::command().print_help()?,
    }
    Ok(())
}
