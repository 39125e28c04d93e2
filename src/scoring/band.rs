use serde::Serialize;
use std::fmt;

/// Qualitative band shown next to a calculated score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,
    VeryGood,
    Good,
    Fair,
    NeedsImprovement,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 95.0 {
            ScoreBand::Excellent
        } else if score >= 85.0 {
            ScoreBand::VeryGood
        } else if score >= 75.0 {
            ScoreBand::Good
        } else if score >= 65.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::VeryGood => "Very Good",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ScoreBand::from_score(99.95), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(95.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(94.99), ScoreBand::VeryGood);
        assert_eq!(ScoreBand::from_score(86.76), ScoreBand::VeryGood);
        assert_eq!(ScoreBand::from_score(75.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(65.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(64.99), ScoreBand::NeedsImprovement);
        assert_eq!(ScoreBand::from_score(0.0), ScoreBand::NeedsImprovement);
    }

    #[test]
    fn test_label() {
        assert_eq!(ScoreBand::VeryGood.to_string(), "Very Good");
    }
}
