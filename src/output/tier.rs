//! Severity tiers used to colour scores and classifications

use serde::{Deserialize, Serialize};

/// Lower bound of the success band
pub const SUCCESS_THRESHOLD: f64 = 80.0;
/// Lower bound of the warning band
pub const WARNING_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Success,
    Warning,
    Attention,
    Danger,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Success => "success",
            Tier::Warning => "warning",
            Tier::Attention => "attention",
            Tier::Danger => "danger",
        }
    }

    /// 0 is best. Attention sits between warning and danger.
    pub fn severity(&self) -> u8 {
        match self {
            Tier::Success => 0,
            Tier::Warning => 1,
            Tier::Attention => 2,
            Tier::Danger => 3,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a 0-100 score onto success / warning / danger.
///
/// Total over `f64`: values past either end land in the terminal band, NaN is danger.
pub fn score_tier(score: f64) -> Tier {
    if score >= SUCCESS_THRESHOLD {
        Tier::Success
    } else if score >= WARNING_THRESHOLD {
        Tier::Warning
    } else {
        Tier::Danger
    }
}

/// Map a service classification label onto a tier. Unknown labels are danger.
pub fn classification_tier(label: &str) -> Tier {
    match label {
        "Strong Match" => Tier::Success,
        "Moderate Match" => Tier::Warning,
        "Developing Match" => Tier::Attention,
        "Weak Match" => Tier::Danger,
        _ => Tier::Danger,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert_eq!(score_tier(100.0), Tier::Success);
        assert_eq!(score_tier(80.0), Tier::Success);
        assert_eq!(score_tier(79.99), Tier::Warning);
        assert_eq!(score_tier(50.0), Tier::Warning);
        assert_eq!(score_tier(49.9), Tier::Danger);
        assert_eq!(score_tier(0.0), Tier::Danger);
    }

    #[test]
    fn test_out_of_range_scores_use_terminal_bands() {
        assert_eq!(score_tier(250.0), Tier::Success);
        assert_eq!(score_tier(f64::INFINITY), Tier::Success);
        assert_eq!(score_tier(-3.0), Tier::Danger);
        assert_eq!(score_tier(f64::NEG_INFINITY), Tier::Danger);
        assert_eq!(score_tier(f64::NAN), Tier::Danger);
    }

    #[test]
    fn test_score_tier_never_gets_worse_as_score_rises() {
        let mut previous = score_tier(-20.0);
        let mut score = -20.0;
        while score <= 120.0 {
            let tier = score_tier(score);
            assert!(tier.severity() <= previous.severity(), "tier worsened at {}", score);
            assert_ne!(tier, Tier::Attention);
            previous = tier;
            score += 0.25;
        }
    }

    #[test]
    fn test_known_classifications() {
        assert_eq!(classification_tier("Strong Match"), Tier::Success);
        assert_eq!(classification_tier("Moderate Match"), Tier::Warning);
        assert_eq!(classification_tier("Developing Match"), Tier::Attention);
        assert_eq!(classification_tier("Weak Match"), Tier::Danger);
    }

    #[test]
    fn test_unknown_classification_falls_back_to_danger() {
        assert_eq!(classification_tier(""), Tier::Danger);
        assert_eq!(classification_tier("strong match"), Tier::Danger);
        assert_eq!(classification_tier("Excellent Match"), Tier::Danger);
    }
}
