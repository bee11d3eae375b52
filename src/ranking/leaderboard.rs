use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::domain::{GameMode, LeaderboardView, Player, PlayerId, TIER_ORDER, Tier};

/// Orders players by total score, highest first.
///
/// The sort is stable, so players with equal scores keep their input order
/// and repeated calls on the same snapshot agree.
pub fn rank_all(players: &[Player]) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    sort_by_score(&mut ranked);
    ranked
}

/// 1-based position of `target` in [`rank_all`]
pub fn global_rank(players: &[Player], target: &PlayerId) -> Option<usize> {
    rank_all(players)
        .iter()
        .position(|player| &player.id == target)
        .map(|idx| idx + 1)
}

/// Buckets players by tier for a leaderboard view.
///
/// Mode views skip retired placements. The Overall view files each player
/// under their best tier across all modes, retired ones included. Every
/// tier has a bucket, possibly empty, ordered by total score.
pub fn group_by_tier(players: &[Player], view: LeaderboardView) -> BTreeMap<Tier, Vec<&Player>> {
    let mut groups: BTreeMap<Tier, Vec<&Player>> = TIER_ORDER.iter().map(|tier| (*tier, Vec::new())).collect();

    for player in players {
        let tier = match view {
            LeaderboardView::Overall => overall_tier(player),
            LeaderboardView::Mode(mode) => player
                .placement(mode)
                .filter(|placement| placement.is_active())
                .map(|placement| placement.current),
        };

        if let Some(tier) = tier {
            groups.entry(tier).or_default().push(player);
        }
    }

    for bucket in groups.values_mut() {
        sort_by_score(bucket);
    }

    groups
}

/// Best current tier across every mode, retired placements included
pub fn overall_tier(player: &Player) -> Option<Tier> {
    player.placements.values().map(|placement| placement.current).min()
}

/// Case-insensitive substring search over display names and ids.
/// Id matching ignores hyphens, so a dashless id finds its player.
/// A blank query returns the input untouched.
pub fn filter_by_search<'a>(players: &'a [Player], query: &str) -> Vec<&'a Player> {
    let query = query.trim();
    if query.is_empty() {
        return players.iter().collect();
    }

    let needle = query.to_lowercase();
    let id_needle = needle.replace('-', "");
    players
        .iter()
        .filter(|player| {
            player.display_name.to_lowercase().contains(&needle) || id_matches(&player.id, &id_needle)
        })
        .collect()
}

fn id_matches(id: &PlayerId, id_needle: &str) -> bool {
    !id_needle.is_empty() && id.as_str().replace('-', "").contains(id_needle)
}

/// Active players of `mode` sitting in LT3 or below
pub fn rising_ranks(players: &[Player], mode: GameMode) -> Vec<&Player> {
    let mut rising: Vec<&Player> = players
        .iter()
        .filter(|player| {
            player
                .placement(mode)
                .is_some_and(|placement| placement.is_active() && placement.current.is_rising())
        })
        .collect();
    sort_by_score(&mut rising);
    rising
}

/// Headline player of a view: the mode's HT1, or the overall leader
pub fn spotlight(players: &[Player], view: LeaderboardView) -> Option<&Player> {
    match view {
        LeaderboardView::Overall => rank_all(players).into_iter().next(),
        LeaderboardView::Mode(_) => group_by_tier(players, view)
            .remove(&Tier::TOP)
            .and_then(|champions| champions.into_iter().next()),
    }
}

fn sort_by_score(players: &mut [&Player]) {
    players.sort_by_key(|player| Reverse(player.total_score()));
}
