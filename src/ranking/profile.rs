use crate::domain::{ALL_MODES, GameMode, Placement, Player};

/// Up to `limit` active placements, best tier first
pub fn best_tiers(player: &Player, limit: usize) -> Vec<(GameMode, &Placement)> {
    let mut active: Vec<(GameMode, &Placement)> = player
        .placements
        .iter()
        .filter(|(_, placement)| placement.is_active())
        .map(|(mode, placement)| (*mode, placement))
        .collect();

    active.sort_by_key(|(_, placement)| placement.current);
    active.truncate(limit);
    active
}

/// Every mode in profile order: active placements, then retired ones, each
/// best tier first, then unranked modes
pub fn profile_modes(player: &Player) -> Vec<(GameMode, Option<&Placement>)> {
    let mut modes: Vec<(GameMode, Option<&Placement>)> =
        ALL_MODES.iter().map(|mode| (*mode, player.placement(*mode))).collect();

    modes.sort_by_key(|(_, placement)| match placement {
        Some(placement) => (0, placement.retired, placement.current.ordinal()),
        None => (1, false, 0),
    });
    modes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerId, Tier};
    use chrono::Utc;

    fn sample() -> Player {
        let now = Utc::now();
        let mut retired = Placement::new(Tier::HT1, now);
        retired.retired = true;
        retired.peak = None;

        Player::new(PlayerId::parse("d219c8eed32e4da2b22e0aa69d36c88a").unwrap(), "Marlowww")
            .with_placement(GameMode::Sword, retired)
            .with_placement(GameMode::Pot, Placement::new(Tier::LT3, now))
            .with_placement(GameMode::Uhc, Placement::new(Tier::HT2, now))
            .with_placement(GameMode::Vanilla, Placement::new(Tier::LT1, now))
            .with_placement(GameMode::Speed, Placement::new(Tier::HT5, now))
    }

    #[test]
    fn test_best_tiers_skips_retired() {
        let player = sample();
        let best: Vec<GameMode> = best_tiers(&player, 3).into_iter().map(|(mode, _)| mode).collect();
        assert_eq!(best, vec![GameMode::Vanilla, GameMode::Uhc, GameMode::Pot]);
    }

    #[test]
    fn test_profile_modes_order() {
        let player = sample();
        let order: Vec<GameMode> = profile_modes(&player).into_iter().map(|(mode, _)| mode).collect();

        assert_eq!(
            order,
            vec![
                GameMode::Vanilla,
                GameMode::Uhc,
                GameMode::Pot,
                GameMode::Speed,
                GameMode::Sword,
                GameMode::NethOp,
                GameMode::Smp,
                GameMode::DiamondSmp,
            ]
        );
    }
}
