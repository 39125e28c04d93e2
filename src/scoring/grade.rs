use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CalculationError;

/// Letter grade on the A-F scale. No partial credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeLetter {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl GradeLetter {
    pub const ALL: [GradeLetter; 6] = [
        GradeLetter::A,
        GradeLetter::B,
        GradeLetter::C,
        GradeLetter::D,
        GradeLetter::E,
        GradeLetter::F,
    ];

    /// Base mark before subject scaling
    pub const fn base_mark(self) -> u32 {
        match self {
            GradeLetter::A => 90,
            GradeLetter::B => 80,
            GradeLetter::C => 70,
            GradeLetter::D => 60,
            GradeLetter::E => 50,
            GradeLetter::F => 40,
        }
    }
}

impl FromStr for GradeLetter {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(GradeLetter::A),
            "B" => Ok(GradeLetter::B),
            "C" => Ok(GradeLetter::C),
            "D" => Ok(GradeLetter::D),
            "E" => Ok(GradeLetter::E),
            "F" => Ok(GradeLetter::F),
            _ => Err(CalculationError::UnknownGrade {
                grade: s.trim().to_string(),
            }),
        }
    }
}

impl fmt::Display for GradeLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            GradeLetter::A => "A",
            GradeLetter::B => "B",
            GradeLetter::C => "C",
            GradeLetter::D => "D",
            GradeLetter::E => "E",
            GradeLetter::F => "F",
        };
        f.write_str(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_marks() {
        let marks: Vec<u32> = GradeLetter::ALL.iter().map(|g| g.base_mark()).collect();
        assert_eq!(marks, vec![90, 80, 70, 60, 50, 40]);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(" b ".parse::<GradeLetter>().unwrap(), GradeLetter::B);
        assert_eq!("f".parse::<GradeLetter>().unwrap(), GradeLetter::F);
    }

    #[test]
    fn test_parse_unknown_grade() {
        let err = "A+".parse::<GradeLetter>().unwrap_err();
        assert_eq!(
            err,
            CalculationError::UnknownGrade {
                grade: "A+".to_string()
            }
        );
        assert!("G".parse::<GradeLetter>().is_err());
        assert!("".parse::<GradeLetter>().is_err());
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for grade in GradeLetter::ALL {
            assert_eq!(grade.to_string().parse::<GradeLetter>().unwrap(), grade);
        }
    }
}
