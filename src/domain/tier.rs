use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TierError;

/// Tier placements ordered from best (HT1) to worst (LT5)
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    HT1,
    LT1,
    HT2,
    LT2,
    HT3,
    LT3,
    HT4,
    LT4,
    HT5,
    LT5,
}

pub const TIER_ORDER: [Tier; 10] = [
    Tier::HT1,
    Tier::LT1,
    Tier::HT2,
    Tier::LT2,
    Tier::HT3,
    Tier::LT3,
    Tier::HT4,
    Tier::LT4,
    Tier::HT5,
    Tier::LT5,
];

/// Tiers surfaced on the "Rising Ranks" board
pub const RISING_TIERS: [Tier; 5] = [Tier::LT3, Tier::HT4, Tier::LT4, Tier::HT5, Tier::LT5];

impl Tier {
    pub const TOP: Tier = Tier::HT1;
    pub const BOTTOM: Tier = Tier::LT5;

    /// 0 for HT1 up to 9 for LT5
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn points(self) -> u32 {
        match self {
            Tier::HT1 => 60,
            Tier::LT1 => 45,
            Tier::HT2 => 30,
            Tier::LT2 => 20,
            Tier::HT3 => 10,
            Tier::LT3 => 6,
            Tier::HT4 => 4,
            Tier::LT4 => 3,
            Tier::HT5 => 2,
            Tier::LT5 => 1,
        }
    }

    /// Division numeral, 1..=5
    pub fn division(self) -> u8 {
        (self.ordinal() / 2 + 1) as u8
    }

    pub fn is_high(self) -> bool {
        self.ordinal() % 2 == 0
    }

    pub fn is_better_than(self, other: Tier) -> bool {
        self.ordinal() < other.ordinal()
    }

    /// Only division 1 and 2 placements carry legacy status
    pub fn is_retireable(self) -> bool {
        self.division() <= 2
    }

    pub fn is_rising(self) -> bool {
        RISING_TIERS.contains(&self)
    }

    /// One step down the order; LT5 stays LT5
    pub fn next_worse(self) -> Tier {
        TIER_ORDER
            .get(self.ordinal() + 1)
            .copied()
            .unwrap_or(Tier::BOTTOM)
    }

    pub fn code(self) -> &'static str {
        match self {
            Tier::HT1 => "HT1",
            Tier::LT1 => "LT1",
            Tier::HT2 => "HT2",
            Tier::LT2 => "LT2",
            Tier::HT3 => "HT3",
            Tier::LT3 => "LT3",
            Tier::HT4 => "HT4",
            Tier::LT4 => "LT4",
            Tier::HT5 => "HT5",
            Tier::LT5 => "LT5",
        }
    }

    /// Badge text: `R(HT2)` for a retired placement
    pub fn label(self, retired: bool) -> String {
        if retired {
            format!("R({})", self.code())
        } else {
            self.code().to_string()
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Tier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TIER_ORDER
            .iter()
            .copied()
            .find(|tier| tier.code().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TierError::InvalidTier(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_strictly_decrease_with_order() {
        for pair in TIER_ORDER.windows(2) {
            assert!(pair[0].is_better_than(pair[1]));
            assert!(pair[0].points() > pair[1].points());
        }
        assert_eq!(Tier::HT1.points(), 60);
        assert_eq!(Tier::LT5.points(), 1);
    }

    #[test]
    fn test_divisions_and_high_low() {
        assert_eq!(Tier::HT1.division(), 1);
        assert_eq!(Tier::LT1.division(), 1);
        assert_eq!(Tier::HT3.division(), 3);
        assert_eq!(Tier::LT5.division(), 5);
        assert!(Tier::HT4.is_high());
        assert!(!Tier::LT4.is_high());
        assert_eq!(Tier::LT5.ordinal(), 9);
    }

    #[test]
    fn test_retireable_and_rising_sets() {
        let retireable: Vec<Tier> = TIER_ORDER.into_iter().filter(|t| t.is_retireable()).collect();
        assert_eq!(retireable, vec![Tier::HT1, Tier::LT1, Tier::HT2, Tier::LT2]);

        assert!(!Tier::HT3.is_rising());
        assert!(Tier::LT3.is_rising());
        assert!(Tier::LT5.is_rising());
    }

    #[test]
    fn test_next_worse_stops_at_bottom() {
        assert_eq!(Tier::HT2.next_worse(), Tier::LT2);
        assert_eq!(Tier::LT1.next_worse(), Tier::HT2);
        assert_eq!(Tier::LT5.next_worse(), Tier::LT5);
    }

    #[test]
    fn test_parse_rejects_unknown_codes() {
        assert_eq!("ht3".parse::<Tier>().unwrap(), Tier::HT3);
        assert_eq!(" LT1 ".parse::<Tier>().unwrap(), Tier::LT1);
        assert!(matches!("HT6".parse::<Tier>(), Err(TierError::InvalidTier(_))));
        assert!(matches!("".parse::<Tier>(), Err(TierError::InvalidTier(_))));
    }

    #[test]
    fn test_label() {
        assert_eq!(Tier::HT2.label(true), "R(HT2)");
        assert_eq!(Tier::HT2.label(false), "HT2");
    }
}
