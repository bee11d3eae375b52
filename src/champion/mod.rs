//! At most one active HT1 holder per mode.
//!
//! The holder set is always derived by scanning the players of a mode; no
//! "current champion" is cached anywhere. Planning happens here on a
//! snapshot, the store then commits the plan under a [`ChampionGuard`].

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::domain::{GameMode, Placement, Player, PlayerId, Tier};
use crate::errors::{TierError, TierResult};
use crate::store::{ChampionGuard, PlacementBatch, PlacementWrite};
use crate::transitions;

/// What happens to the incumbent when somebody else reaches active HT1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChampionPolicy {
    /// The incumbent drops to LT1 in the same commit
    #[default]
    AutoDemote,
    /// The promotion is refused while an incumbent exists
    Reject,
}

/// A player moved off HT1 to restore the invariant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Demotion {
    pub player_id: PlayerId,
    pub display_name: String,
    pub mode: GameMode,
}

/// Players holding active HT1 in `mode`
pub fn active_champions(players: &[Player], mode: GameMode) -> Vec<&Player> {
    players
        .iter()
        .filter(|player| player.is_active_champion(mode))
        .collect()
}

/// Builds the commit for `target` moving to `updated` in `mode`.
///
/// When `updated` is not an active HT1 the batch holds the single write.
/// Otherwise every other active holder is demoted to LT1 (or the call is
/// refused under [`ChampionPolicy::Reject`]) and the batch is guarded by the
/// holder set seen in `players`.
pub fn plan_write(
    players: &[Player],
    target: &Player,
    mode: GameMode,
    updated: Placement,
    policy: ChampionPolicy,
    at: DateTime<Utc>,
) -> TierResult<(PlacementBatch, Vec<Demotion>)> {
    let own_write = PlacementWrite {
        player_id: target.id.clone(),
        mode,
        expected: target.placement(mode).cloned(),
        placement: updated,
    };

    if !own_write.placement.is_active_champion() {
        let batch = PlacementBatch {
            writes: vec![own_write],
            champion_guard: None,
        };
        return Ok((batch, Vec::new()));
    }

    let holders = active_champions(players, mode);
    let incumbents: Vec<&Player> = holders
        .iter()
        .copied()
        .filter(|player| player.id != target.id)
        .collect();

    if policy == ChampionPolicy::Reject
        && let Some(incumbent) = incumbents.first()
    {
        return Err(TierError::invalid_transition(format!(
            "{} already holds HT1 in {}",
            incumbent.display_name, mode
        )));
    }

    let guard = ChampionGuard::new(mode, holders.iter().map(|player| player.id.clone()).collect());
    let mut writes = vec![own_write];
    let mut demotions = Vec::new();

    for incumbent in incumbents {
        writes.push(demotion_write(incumbent, mode, at)?);
        demotions.push(Demotion {
            player_id: incumbent.id.clone(),
            display_name: incumbent.display_name.clone(),
            mode,
        });
    }

    Ok((
        PlacementBatch {
            writes,
            champion_guard: Some(guard),
        },
        demotions,
    ))
}

/// Repairs a mode that ended up with several active HT1 holders.
///
/// The most recently evaluated holder keeps HT1 (ties: higher total score,
/// then smaller id). Returns `None` when the mode already satisfies the
/// invariant.
pub fn plan_reconciliation(
    players: &[Player],
    mode: GameMode,
    at: DateTime<Utc>,
) -> TierResult<Option<(PlacementBatch, Vec<Demotion>)>> {
    let mut holders = active_champions(players, mode);
    if holders.len() <= 1 {
        return Ok(None);
    }

    holders.sort_by_key(|player| {
        let evaluated_at = player.placement(mode).map(|placement| placement.last_evaluated_at);
        (Reverse(evaluated_at), Reverse(player.total_score()), player.id.clone())
    });

    let guard = ChampionGuard::new(mode, holders.iter().map(|player| player.id.clone()).collect());
    let keeper = holders[0];
    info!(
        "{} has {} active HT1 holders; keeping {}",
        mode,
        holders.len(),
        keeper.display_name
    );

    let mut writes = Vec::new();
    let mut demotions = Vec::new();
    for extra in &holders[1..] {
        writes.push(demotion_write(extra, mode, at)?);
        demotions.push(Demotion {
            player_id: extra.id.clone(),
            display_name: extra.display_name.clone(),
            mode,
        });
    }

    Ok(Some((
        PlacementBatch {
            writes,
            champion_guard: Some(guard),
        },
        demotions,
    )))
}

fn demotion_write(incumbent: &Player, mode: GameMode, at: DateTime<Utc>) -> TierResult<PlacementWrite> {
    let current = incumbent.placement(mode).cloned();
    let demoted = transitions::set_tier(current.as_ref(), Tier::TOP.next_worse(), at)?;

    Ok(PlacementWrite {
        player_id: incumbent.id.clone(),
        mode,
        expected: current,
        placement: demoted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn player(raw_id: &str, name: &str) -> Player {
        Player::new(PlayerId::parse(raw_id).unwrap(), name)
    }

    const A: &str = "d219c8eed32e4da2b22e0aa69d36c88a";
    const B: &str = "06ec3577329945fabbdf613b1f86c8ab";
    const C: &str = "ebd7af32759e41e2b2279eeb8576d609";

    #[test]
    fn test_non_champion_write_is_unguarded() {
        let now = Utc::now();
        let a = player(A, "A");
        let (batch, demotions) =
            plan_write(&[a.clone()], &a, GameMode::Pot, Placement::new(Tier::LT1, now), ChampionPolicy::AutoDemote, now)
                .unwrap();

        assert_eq!(batch.writes.len(), 1);
        assert!(batch.champion_guard.is_none());
        assert!(demotions.is_empty());
    }

    #[test]
    fn test_promotion_demotes_incumbent() {
        let now = Utc::now();
        let a = player(A, "A").with_placement(GameMode::Sword, Placement::new(Tier::HT1, now));
        let b = player(B, "B").with_placement(GameMode::Sword, Placement::new(Tier::LT1, now));
        let players = vec![a.clone(), b.clone()];

        let promoted = transitions::set_tier(b.placement(GameMode::Sword), Tier::HT1, now).unwrap();
        let (batch, demotions) =
            plan_write(&players, &b, GameMode::Sword, promoted, ChampionPolicy::AutoDemote, now).unwrap();

        assert_eq!(batch.writes.len(), 2);
        assert_eq!(batch.writes[1].player_id, a.id);
        assert_eq!(batch.writes[1].placement.current, Tier::LT1);
        assert_eq!(batch.writes[1].placement.peak, Some(Tier::HT1));
        assert_eq!(batch.champion_guard, Some(ChampionGuard::new(GameMode::Sword, vec![a.id.clone()])));
        assert_eq!(demotions.len(), 1);
        assert_eq!(demotions[0].display_name, "A");
    }

    #[test]
    fn test_retired_champion_is_not_an_incumbent() {
        let now = Utc::now();
        let mut retired = Placement::new(Tier::HT1, now);
        retired.retired = true;
        retired.peak = None;
        let a = player(A, "A").with_placement(GameMode::Sword, retired);
        let b = player(B, "B");
        let players = vec![a, b.clone()];

        let (batch, demotions) = plan_write(
            &players,
            &b,
            GameMode::Sword,
            Placement::new(Tier::HT1, now),
            ChampionPolicy::Reject,
            now,
        )
        .unwrap();

        assert_eq!(batch.writes.len(), 1);
        assert!(demotions.is_empty());
    }

    #[test]
    fn test_reject_policy_refuses_second_champion() {
        let now = Utc::now();
        let a = player(A, "A").with_placement(GameMode::Sword, Placement::new(Tier::HT1, now));
        let b = player(B, "B");
        let players = vec![a, b.clone()];

        let result = plan_write(
            &players,
            &b,
            GameMode::Sword,
            Placement::new(Tier::HT1, now),
            ChampionPolicy::Reject,
            now,
        );
        assert!(matches!(result, Err(TierError::InvalidTransition(_))));
    }

    #[test]
    fn test_reconciliation_keeps_latest_holder() {
        let now = Utc::now();
        let a = player(A, "A").with_placement(GameMode::Uhc, Placement::new(Tier::HT1, now - Duration::days(2)));
        let b = player(B, "B").with_placement(GameMode::Uhc, Placement::new(Tier::HT1, now));
        let c = player(C, "C").with_placement(GameMode::Uhc, Placement::new(Tier::HT1, now - Duration::days(1)));
        let players = vec![a.clone(), b, c.clone()];

        let (batch, demotions) = plan_reconciliation(&players, GameMode::Uhc, now).unwrap().unwrap();
        let demoted: Vec<&PlayerId> = batch.writes.iter().map(|write| &write.player_id).collect();

        assert_eq!(demoted, vec![&c.id, &a.id]);
        assert!(batch.writes.iter().all(|write| write.placement.current == Tier::LT1));
        assert_eq!(demotions.len(), 2);
    }

    #[test]
    fn test_reconciliation_noop_for_single_holder() {
        let now = Utc::now();
        let a = player(A, "A").with_placement(GameMode::Uhc, Placement::new(Tier::HT1, now));
        assert!(plan_reconciliation(&[a], GameMode::Uhc, now).unwrap().is_none());
    }
}
