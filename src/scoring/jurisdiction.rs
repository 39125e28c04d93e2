use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalculationError;

/// Jurisdiction whose rules decide subject selection and normalisation.
///
/// Serialized as its code; deserialized with the same rules as [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum JurisdictionId {
    Nsw,
    Vic,
    Qld,
    Sa,
    Wa,
    Tas,
}

/// How a jurisdiction picks the subjects that count towards its aggregate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// Best anchor subject plus the best `others` non-anchor subjects
    AnchorPlusBest { others: usize },
    /// Best `full` subjects at full weight, the next `tail` subjects at `tail_weight`
    BestWithTail {
        full: usize,
        tail: usize,
        tail_weight: f64,
    },
    /// Best `count` subjects overall
    Best { count: usize },
}

/// Rule bound to exactly one jurisdiction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JurisdictionRule {
    pub selection: Selection,
    pub denominator: f64,
    pub requires_anchor: bool,
}

impl JurisdictionId {
    pub const ALL: [JurisdictionId; 6] = [
        JurisdictionId::Nsw,
        JurisdictionId::Vic,
        JurisdictionId::Qld,
        JurisdictionId::Sa,
        JurisdictionId::Wa,
        JurisdictionId::Tas,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            JurisdictionId::Nsw => "nsw",
            JurisdictionId::Vic => "vic",
            JurisdictionId::Qld => "qld",
            JurisdictionId::Sa => "sa",
            JurisdictionId::Wa => "wa",
            JurisdictionId::Tas => "tas",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            JurisdictionId::Nsw => "New South Wales",
            JurisdictionId::Vic => "Victoria",
            JurisdictionId::Qld => "Queensland",
            JurisdictionId::Sa => "South Australia",
            JurisdictionId::Wa => "Western Australia",
            JurisdictionId::Tas => "Tasmania",
        }
    }

    /// The selection, denominator and anchor requirement for this jurisdiction.
    pub const fn rule(self) -> JurisdictionRule {
        match self {
            JurisdictionId::Nsw => JurisdictionRule {
                selection: Selection::AnchorPlusBest { others: 4 },
                denominator: 500.0,
                requires_anchor: true,
            },
            JurisdictionId::Vic => JurisdictionRule {
                selection: Selection::BestWithTail {
                    full: 4,
                    tail: 2,
                    tail_weight: 0.1,
                },
                denominator: 400.0,
                requires_anchor: false,
            },
            JurisdictionId::Qld => JurisdictionRule {
                selection: Selection::Best { count: 5 },
                denominator: 500.0,
                requires_anchor: true,
            },
            JurisdictionId::Sa => JurisdictionRule {
                selection: Selection::Best { count: 4 },
                denominator: 400.0,
                requires_anchor: false,
            },
            JurisdictionId::Wa => JurisdictionRule {
                selection: Selection::Best { count: 4 },
                denominator: 400.0,
                requires_anchor: true,
            },
            JurisdictionId::Tas => JurisdictionRule {
                selection: Selection::Best { count: 5 },
                denominator: 500.0,
                requires_anchor: false,
            },
        }
    }
}

impl FromStr for JurisdictionId {
    type Err = CalculationError;

    /// Accepts the short code ("nsw"), the rule letter ("a") or the state name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        JurisdictionId::ALL
            .into_iter()
            .find(|j| {
                key == j.code() || key == j.letter() || key == j.name().to_ascii_lowercase()
            })
            .ok_or_else(|| CalculationError::UnknownJurisdiction {
                id: s.trim().to_string(),
            })
    }
}

impl TryFrom<String> for JurisdictionId {
    type Error = CalculationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl JurisdictionId {
    fn letter(self) -> &'static str {
        match self {
            JurisdictionId::Nsw => "a",
            JurisdictionId::Vic => "b",
            JurisdictionId::Qld => "c",
            JurisdictionId::Sa => "d",
            JurisdictionId::Wa => "e",
            JurisdictionId::Tas => "f",
        }
    }
}

impl fmt::Display for JurisdictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code().to_ascii_uppercase())
    }
}
