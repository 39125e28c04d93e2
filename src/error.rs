use thiserror::Error;

use crate::scoring::JurisdictionId;

/// Minimum number of complete subject entries a calculation needs.
pub const MIN_SUBJECTS: usize = 4;

/// Errors raised by a single score calculation.
///
/// Every variant is fatal to the calculation that produced it; the engine never
/// returns a partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    /// Grade outside the A-F scale
    #[error("unknown grade '{grade}' (expected one of A, B, C, D, E, F)")]
    UnknownGrade { grade: String },

    /// Not enough subjects with both a name and a grade
    #[error("at least {required} subjects with grades are required, found {found}")]
    InsufficientSubjects { found: usize, required: usize },

    /// Jurisdiction requires an anchor (English-equivalent) subject and none was given
    #[error("{jurisdiction} requires at least one English subject")]
    MissingMandatoryAnchor { jurisdiction: JurisdictionId },

    /// Jurisdiction id outside the supported set
    #[error("unknown jurisdiction '{id}' (expected one of nsw, vic, qld, sa, wa, tas)")]
    UnknownJurisdiction { id: String },

    /// Subject missing from the catalog while unknown subjects are rejected
    #[error("subject '{name}' is not in the {jurisdiction} catalog")]
    UnknownSubject {
        name: String,
        jurisdiction: JurisdictionId,
    },
}

impl CalculationError {
    /// Whether the person entering grades can fix this by changing their input.
    ///
    /// An unknown jurisdiction comes from the integrating application, not the user.
    pub fn is_user_recoverable(&self) -> bool {
        !matches!(self, CalculationError::UnknownJurisdiction { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_subjects_message() {
        let err = CalculationError::InsufficientSubjects {
            found: 3,
            required: MIN_SUBJECTS,
        };
        assert_eq!(
            err.to_string(),
            "at least 4 subjects with grades are required, found 3"
        );
    }

    #[test]
    fn test_missing_anchor_message_names_jurisdiction() {
        let err = CalculationError::MissingMandatoryAnchor {
            jurisdiction: JurisdictionId::Qld,
        };
        assert_eq!(err.to_string(), "QLD requires at least one English subject");
    }

    #[test]
    fn test_unknown_jurisdiction_is_not_user_recoverable() {
        let err = CalculationError::UnknownJurisdiction {
            id: "act".to_string(),
        };
        assert!(!err.is_user_recoverable());

        let err = CalculationError::UnknownGrade {
            grade: "Z".to_string(),
        };
        assert!(err.is_user_recoverable());
    }
}
