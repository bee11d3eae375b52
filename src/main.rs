use anyhow::Result;

use tier_rankings::cli::Command;
use tier_rankings::{
    handle_leaderboard, handle_lookup, handle_reconcile, handle_register, handle_retire, handle_serve, handle_set_tier,
    handle_unretire, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Register { id, name } => handle_register(id, name),
        Command::SetTier { player, mode, tier } => handle_set_tier(player, *mode, *tier),
        Command::Retire { player, mode } => handle_retire(player, *mode),
        Command::Unretire { player, mode, outcome } => handle_unretire(player, *mode, *outcome),
        Command::Reconcile => handle_reconcile(),
        Command::Leaderboard { view, search } => handle_leaderboard(*view, search.as_deref()),
        Command::Lookup { key } => handle_lookup(key),
    }
}
