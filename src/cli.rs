use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::{GameMode, LeaderboardView, TestOutcome, Tier};

#[derive(Parser, Debug)]
#[command(author, version, about = "tier rankings engine")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the read-only API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Add a player with no placements
    Register {
        /// Player id, with or without hyphens
        id: String,
        name: String,
    },
    /// Put a player at a tier in one mode
    SetTier {
        /// Player id or display name
        player: String,
        mode: GameMode,
        tier: Tier,
    },
    /// Retire a division 1 or 2 placement
    Retire {
        /// Player id or display name
        player: String,
        mode: GameMode,
    },
    /// Bring a retired placement back after an evaluation match
    Unretire {
        /// Player id or display name
        player: String,
        mode: GameMode,
        #[arg(long, value_enum)]
        outcome: Outcome,
    },
    /// Demote extra HT1 holders in every mode
    Reconcile,
    /// Print a leaderboard
    Leaderboard {
        /// A mode name or Overall
        #[arg(short, long, default_value = "Overall")]
        view: LeaderboardView,
        /// Only players whose name or id contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show a player's profile
    Lookup {
        /// Player id, display name, or former display name
        key: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl From<Outcome> for TestOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Won => TestOutcome::Won,
            Outcome::Lost => TestOutcome::Lost,
        }
    }
}
