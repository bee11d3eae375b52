pub mod api;
pub mod champion;
pub mod cli;
pub mod config;
pub mod database;
pub mod directory;
pub mod domain;
pub mod errors;
pub mod http;
pub mod identity;
pub mod ranking;
pub mod rate_limiter;
pub mod report;
pub mod scoring;
pub mod services;
pub mod store;
pub mod transitions;

#[cfg(test)]
pub mod test_util;

use anyhow::{Result, bail};
use chrono::Utc;
use clap::Parser;
use log::info;
use std::sync::Arc;

use crate::cli::{Cli, Command, Outcome};
use crate::config::AppConfig;
use crate::directory::MojangDirectory;
use crate::domain::{GameMode, LeaderboardView, PlayerId, Tier};
use crate::identity::IdentityResolver;
use crate::services::TierService;
use crate::services::server::ServerService;
use crate::store::{PlayerStore, SqlitePlayerStore};
use crate::transitions::TierChange;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_register(id: &str, name: &str) -> Result<()> {
    let Some(id) = PlayerId::parse(id) else {
        bail!("Not a player id: {}", id);
    };

    let store = SqlitePlayerStore::open(&AppConfig::database_path())?;
    if store.register_player(&id, name)? {
        info!("Registered {} as {}", id, name);
        println!("Registered {} ({})", name, id);
    } else {
        println!("{} is already registered", id);
    }
    Ok(())
}

pub fn handle_set_tier(player: &str, mode: GameMode, tier: Tier) -> Result<()> {
    handle_change(player, mode, TierChange::SetTier { tier })
}

pub fn handle_retire(player: &str, mode: GameMode) -> Result<()> {
    handle_change(player, mode, TierChange::Retire)
}

pub fn handle_unretire(player: &str, mode: GameMode, outcome: Outcome) -> Result<()> {
    handle_change(
        player,
        mode,
        TierChange::Unretire {
            outcome: outcome.into(),
        },
    )
}

pub fn handle_reconcile() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let store = open_store()?;
        let service = TierService::new(store, config.ranking);

        let demotions = service.reconcile_champions(Utc::now()).await?;
        if demotions.is_empty() {
            println!("Every mode has at most one HT1 holder");
        }
        report::print_demotions(&demotions);
        Ok(())
    })
}

pub fn handle_leaderboard(view: LeaderboardView, search: Option<&str>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let players = open_store()?.list_players().await?;
        let search = search.unwrap_or_default();

        match view {
            LeaderboardView::Overall => report::print_overall(&players, search),
            LeaderboardView::Mode(_) => report::print_mode(&players, view, search),
        }
        Ok(())
    })
}

pub fn handle_lookup(key: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let resolver = build_resolver(open_store()?, &config)?;

        let lookup = resolver.lookup(key).await?;
        report::print_profile(&lookup, config.ranking.spotlight_tiers);
        Ok(())
    })
}

// --- Helper Methods ---

fn handle_change(player: &str, mode: GameMode, change: TierChange) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let store = open_store()?;
        let resolver = build_resolver(store.clone(), &config)?;
        let service = TierService::new(store, config.ranking.clone());

        let target = resolver.resolve(player).await?;
        info!("Applying {:?} to {} in {}", change, target.display_name, mode);

        let update = service.apply(&target.id, mode, change, Utc::now()).await?;
        report::print_update(&update);
        Ok(())
    })
}

fn open_store() -> Result<Arc<dyn PlayerStore>> {
    let db_path = AppConfig::database_path();
    Ok(Arc::new(SqlitePlayerStore::open(&db_path)?))
}

fn build_resolver(store: Arc<dyn PlayerStore>, config: &AppConfig) -> Result<IdentityResolver> {
    let directory = Arc::new(MojangDirectory::new(&config.directory)?);
    Ok(IdentityResolver::new(store, directory, config.resolver.clone()))
}
