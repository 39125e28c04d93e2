use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::band::ScoreBand;
use super::grade::GradeLetter;
use super::jurisdiction::JurisdictionId;
use super::normalize::normalize;
use super::rules::{self, Contribution};
use crate::catalog::{CourseRecord, SubjectCatalog, SubjectCatalogEntry, UnknownSubjectPolicy};
use crate::eligibility::match_courses;
use crate::error::{CalculationError, MIN_SUBJECTS};

/// A subject and grade as the user typed them. Either field may be blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubjectEntry {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade: String,
}

impl SubjectEntry {
    pub fn new(subject: impl Into<String>, grade: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            grade: grade.into(),
        }
    }

    /// Both a subject name and a grade are filled in
    pub fn is_complete(&self) -> bool {
        !self.subject.trim().is_empty() && !self.grade.trim().is_empty()
    }
}

/// A subject after grade conversion and catalog scaling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSubject {
    pub subject_name: String,
    pub grade: GradeLetter,
    pub scaling_factor: f64,
    pub is_mandatory_anchor: bool,
    pub scaled_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub raw_total: f64,
    pub denominator: f64,
    pub contributions: Vec<Contribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    pub jurisdiction: JurisdictionId,
    /// Normalised score in `0.0..=99.95`, rounded to 2 places
    pub score: f64,
    pub band: ScoreBand,
    /// Selected subjects in selection order
    pub contributing_subjects: Vec<ScoredSubject>,
    pub breakdown: ScoreBreakdown,
    pub eligible_courses: Vec<CourseRecord>,
}

/// Round `base_mark(grade) * scaling_factor` half away from zero.
///
/// The product is snapped to 1e-9 first so float error cannot move a .5 tie
/// (50 * 1.15 evaluates to 57.49999999999999).
pub fn scaled_score(grade: GradeLetter, scaling_factor: f64) -> u32 {
    let product = grade.base_mark() as f64 * scaling_factor;
    let snapped = (product * 1e9).round() / 1e9;
    snapped.round().max(0.0) as u32
}

/// Calculate a score for `jurisdiction` and match it against `courses`.
///
/// `catalog` is the jurisdiction's subject list. Subjects it does not contain
/// are scored with a factor of 1.0.
pub fn calculate(
    jurisdiction: JurisdictionId,
    subjects: &[SubjectEntry],
    catalog: &[SubjectCatalogEntry],
    courses: &[CourseRecord],
) -> Result<CalculationResult, CalculationError> {
    calculate_with_policy(
        jurisdiction,
        subjects,
        catalog,
        courses,
        UnknownSubjectPolicy::default(),
    )
}

/// Same as [`calculate`], with explicit handling of subjects missing from the catalog.
pub fn calculate_with_policy(
    jurisdiction: JurisdictionId,
    subjects: &[SubjectEntry],
    catalog: &[SubjectCatalogEntry],
    courses: &[CourseRecord],
    policy: UnknownSubjectPolicy,
) -> Result<CalculationResult, CalculationError> {
    let complete: Vec<&SubjectEntry> = subjects.iter().filter(|s| s.is_complete()).collect();
    if complete.len() < MIN_SUBJECTS {
        return Err(CalculationError::InsufficientSubjects {
            found: complete.len(),
            required: MIN_SUBJECTS,
        });
    }

    let catalog = SubjectCatalog::new(catalog);
    let scored = complete
        .into_iter()
        .map(|entry| score_entry(jurisdiction, entry, &catalog, policy))
        .collect::<Result<Vec<_>, _>>()?;

    let aggregate = rules::aggregate(jurisdiction, &scored)?;
    let score = normalize(aggregate.raw_total, aggregate.denominator);
    let eligible_courses = match_courses(score, courses);

    debug!(
        %jurisdiction,
        raw_total = aggregate.raw_total,
        denominator = aggregate.denominator,
        score,
        "calculated score"
    );

    Ok(CalculationResult {
        jurisdiction,
        score,
        band: ScoreBand::from_score(score),
        contributing_subjects: aggregate
            .contributions
            .iter()
            .map(|c| c.subject.clone())
            .collect(),
        breakdown: ScoreBreakdown {
            raw_total: aggregate.raw_total,
            denominator: aggregate.denominator,
            contributions: aggregate.contributions,
        },
        eligible_courses,
    })
}

fn score_entry(
    jurisdiction: JurisdictionId,
    entry: &SubjectEntry,
    catalog: &SubjectCatalog<'_>,
    policy: UnknownSubjectPolicy,
) -> Result<ScoredSubject, CalculationError> {
    let grade: GradeLetter = entry.grade.parse()?;
    let name = entry.subject.trim();
    let resolution = catalog.resolve(name);

    if !resolution.matched {
        match policy {
            UnknownSubjectPolicy::Reject => {
                return Err(CalculationError::UnknownSubject {
                    name: name.to_string(),
                    jurisdiction,
                });
            }
            UnknownSubjectPolicy::Fallback => {
                warn!(
                    subject = name,
                    %jurisdiction,
                    "subject not in catalog, scoring with default factor"
                );
            }
        }
    }

    Ok(ScoredSubject {
        subject_name: name.to_string(),
        grade,
        scaling_factor: resolution.scaling_factor,
        is_mandatory_anchor: resolution.is_mandatory_anchor,
        scaled_score: scaled_score(grade, resolution.scaling_factor),
    })
}
