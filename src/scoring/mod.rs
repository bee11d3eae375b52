use std::collections::BTreeMap;

use crate::domain::{GameMode, Placement};

/// Sums the points of every placement's current tier.
///
/// Retired placements keep counting: retirement hides a player from the
/// per-mode boards but the aggregate score reflects the best known tier.
pub fn compute_total_score(placements: &BTreeMap<GameMode, Placement>) -> u32 {
    sum_points(placements.values())
}

/// Same as [`compute_total_score`] for placements in any order or container
pub fn sum_points<'a, I>(placements: I) -> u32
where
    I: IntoIterator<Item = &'a Placement>,
{
    placements
        .into_iter()
        .map(|placement| placement.current.points())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Tier;
    use chrono::Utc;

    fn placement(tier: Tier, retired: bool) -> Placement {
        let mut placement = Placement::new(tier, Utc::now());
        placement.retired = retired;
        if retired {
            placement.peak = None;
        }
        placement
    }

    #[test]
    fn test_empty_placements_score_zero() {
        assert_eq!(compute_total_score(&BTreeMap::new()), 0);
    }

    #[test]
    fn test_retired_placements_still_count() {
        let mut placements = BTreeMap::new();
        placements.insert(GameMode::Sword, placement(Tier::HT1, false));
        placements.insert(GameMode::Pot, placement(Tier::LT2, true));
        placements.insert(GameMode::Uhc, placement(Tier::LT5, false));

        assert_eq!(compute_total_score(&placements), 60 + 20 + 1);
    }

    #[test]
    fn test_order_independent_and_idempotent() {
        let items = vec![placement(Tier::HT3, false), placement(Tier::LT1, false), placement(Tier::HT5, true)];
        let reversed: Vec<Placement> = items.iter().rev().cloned().collect();

        let first = sum_points(&items);
        assert_eq!(first, sum_points(&reversed));
        assert_eq!(first, sum_points(&items));
        assert_eq!(first, 10 + 45 + 2);
    }
}
