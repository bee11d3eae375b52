//! Per (player, mode) placement state machine: Active(tier) or Retired(tier).
//!
//! Every function here is pure. It takes the stored placement and returns
//! the placement to write, or the typed reason the transition is refused.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Placement, TestOutcome, Tier};
use crate::errors::{TierError, TierResult};

/// A requested change to one placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TierChange {
    SetTier { tier: Tier },
    Retire,
    Unretire { outcome: TestOutcome },
}

/// Applies `change` to `existing` at time `at`
pub fn apply_change(
    existing: Option<&Placement>,
    change: TierChange,
    at: DateTime<Utc>,
) -> TierResult<Placement> {
    match change {
        TierChange::SetTier { tier } => set_tier(existing, tier, at),
        TierChange::Retire => retire(require_placement(existing, "retire")?, at),
        TierChange::Unretire { outcome } => {
            unretire(require_placement(existing, "unretire")?, outcome, at)
        }
    }
}

/// Moves an active placement to `tier`, creating it when absent
pub fn set_tier(existing: Option<&Placement>, tier: Tier, at: DateTime<Utc>) -> TierResult<Placement> {
    let Some(placement) = existing else {
        return Ok(Placement::new(tier, at));
    };

    if placement.retired {
        return Err(TierError::invalid_transition(format!(
            "cannot set tier on a retired {} placement; unretire it first",
            placement.current
        )));
    }

    let peak = match placement.peak {
        Some(peak) if !tier.is_better_than(peak) => Some(peak),
        _ => Some(tier),
    };

    Ok(Placement {
        current: tier,
        peak,
        retired: false,
        last_evaluated_at: stamp(placement, at),
    })
}

/// Retires a division 1 or 2 placement and clears its peak
pub fn retire(placement: &Placement, at: DateTime<Utc>) -> TierResult<Placement> {
    if placement.retired {
        return Err(TierError::invalid_transition("placement is already retired"));
    }

    if !placement.current.is_retireable() {
        return Err(TierError::invalid_transition(format!(
            "{} is a development tier and cannot be retired",
            placement.current
        )));
    }

    Ok(Placement {
        current: placement.current,
        peak: None,
        retired: true,
        last_evaluated_at: stamp(placement, at),
    })
}

/// Returns a retired placement to active play.
///
/// Losing the evaluation drops the placement one tier (LT5 stays LT5),
/// winning keeps it. Peak history restarts either way.
pub fn unretire(placement: &Placement, outcome: TestOutcome, at: DateTime<Utc>) -> TierResult<Placement> {
    if !placement.retired {
        return Err(TierError::invalid_transition(format!(
            "{} placement is not retired",
            placement.current
        )));
    }

    let current = match outcome {
        TestOutcome::Lost => placement.current.next_worse(),
        TestOutcome::Won => placement.current,
    };

    Ok(Placement {
        current,
        peak: None,
        retired: false,
        last_evaluated_at: stamp(placement, at),
    })
}

// --- Helper Methods ---

fn require_placement<'a>(existing: Option<&'a Placement>, operation: &str) -> TierResult<&'a Placement> {
    existing.ok_or_else(|| {
        TierError::invalid_transition(format!("cannot {} an unranked placement", operation))
    })
}

/// lastEvaluatedAt never moves backwards
fn stamp(placement: &Placement, at: DateTime<Utc>) -> DateTime<Utc> {
    placement.last_evaluated_at.max(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn active(tier: Tier) -> Placement {
        Placement::new(tier, Utc::now())
    }

    fn retired(tier: Tier) -> Placement {
        Placement {
            current: tier,
            peak: None,
            retired: true,
            last_evaluated_at: Utc::now(),
        }
    }

    #[test]
    fn test_set_tier_creates_placement_with_peak() {
        let now = Utc::now();
        let placement = set_tier(None, Tier::HT3, now).unwrap();
        assert_eq!(placement.current, Tier::HT3);
        assert_eq!(placement.peak, Some(Tier::HT3));
        assert!(!placement.retired);
        assert_eq!(placement.last_evaluated_at, now);
    }

    #[test]
    fn test_set_tier_tracks_peak() {
        let now = Utc::now();
        let promoted = set_tier(Some(&active(Tier::LT2)), Tier::LT1, now).unwrap();
        assert_eq!(promoted.peak, Some(Tier::LT1));

        let demoted = set_tier(Some(&promoted), Tier::HT3, now).unwrap();
        assert_eq!(demoted.current, Tier::HT3);
        assert_eq!(demoted.peak, Some(Tier::LT1));
    }

    #[test]
    fn test_set_tier_fills_missing_peak() {
        let mut placement = active(Tier::HT4);
        placement.peak = None;
        let updated = set_tier(Some(&placement), Tier::LT4, Utc::now()).unwrap();
        assert_eq!(updated.peak, Some(Tier::LT4));
    }

    #[test]
    fn test_set_tier_refuses_retired_placement() {
        let result = set_tier(Some(&retired(Tier::HT2)), Tier::HT1, Utc::now());
        assert!(matches!(result, Err(TierError::InvalidTransition(_))));
    }

    #[test]
    fn test_retire_only_division_one_and_two() {
        for tier in [Tier::HT3, Tier::LT3, Tier::HT4, Tier::LT4, Tier::HT5, Tier::LT5] {
            let result = retire(&active(tier), Utc::now());
            assert!(matches!(result, Err(TierError::InvalidTransition(_))), "{tier} must not retire");
        }

        for tier in [Tier::HT1, Tier::LT1, Tier::HT2, Tier::LT2] {
            let placement = retire(&active(tier), Utc::now()).unwrap();
            assert!(placement.retired);
            assert_eq!(placement.peak, None);
            assert_eq!(placement.current, tier);
        }
    }

    #[test]
    fn test_retire_twice_is_refused() {
        let result = retire(&retired(Tier::LT1), Utc::now());
        assert!(matches!(result, Err(TierError::InvalidTransition(_))));
    }

    #[test]
    fn test_unretire_lost_drops_one_tier() {
        let placement = unretire(&retired(Tier::HT2), TestOutcome::Lost, Utc::now()).unwrap();
        assert_eq!(placement.current, Tier::LT2);
        assert!(!placement.retired);
        assert_eq!(placement.peak, None);

        let bottom = unretire(&retired(Tier::LT5), TestOutcome::Lost, Utc::now()).unwrap();
        assert_eq!(bottom.current, Tier::LT5);
    }

    #[test]
    fn test_unretire_won_keeps_tier() {
        let placement = unretire(&retired(Tier::LT1), TestOutcome::Won, Utc::now()).unwrap();
        assert_eq!(placement.current, Tier::LT1);
        assert!(!placement.retired);
    }

    #[test]
    fn test_unretire_requires_retired() {
        let result = unretire(&active(Tier::HT2), TestOutcome::Won, Utc::now());
        assert!(matches!(result, Err(TierError::InvalidTransition(_))));
    }

    #[test]
    fn test_retire_and_unretire_need_a_placement() {
        let now = Utc::now();
        assert!(matches!(
            apply_change(None, TierChange::Retire, now),
            Err(TierError::InvalidTransition(_))
        ));
        assert!(matches!(
            apply_change(None, TierChange::Unretire { outcome: TestOutcome::Won }, now),
            Err(TierError::InvalidTransition(_))
        ));
    }

    #[test]
    fn test_timestamp_never_moves_backwards() {
        let placement = active(Tier::HT2);
        let earlier = placement.last_evaluated_at - Duration::hours(1);
        let later = placement.last_evaluated_at + Duration::hours(1);

        let stale = set_tier(Some(&placement), Tier::LT2, earlier).unwrap();
        assert_eq!(stale.last_evaluated_at, placement.last_evaluated_at);

        let fresh = retire(&placement, later).unwrap();
        assert_eq!(fresh.last_evaluated_at, later);
    }
}
