use std::collections::HashSet;

use super::schema::Config;
use crate::catalog::{default_subjects, CourseRecord, SubjectCatalogEntry};
use crate::scoring::{JurisdictionId, MAX_SCORE};

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(ref subjects) = config.subjects {
        check_subjects("subjects", subjects, &mut errors);
    }

    for (jurisdiction, subjects) in &config.jurisdictions {
        check_subjects(
            &format!("jurisdictions.{}", jurisdiction.code()),
            subjects,
            &mut errors,
        );
    }

    // A catalog without any anchor makes every calculation fail for these jurisdictions
    let shared = config.subjects.clone().unwrap_or_else(default_subjects);
    for jurisdiction in JurisdictionId::ALL {
        if !jurisdiction.rule().requires_anchor {
            continue;
        }
        let (label, subjects) = match config.jurisdictions.get(&jurisdiction) {
            Some(subjects) => (format!("jurisdictions.{}", jurisdiction.code()), subjects),
            None => ("subjects".to_string(), &shared),
        };
        if !subjects.iter().any(|s| s.is_mandatory_anchor) {
            errors.push(format!(
                "{}: no anchor subject, but {} requires one",
                label, jurisdiction
            ));
        }
    }

    errors.extend(validate_courses("courses", &config.courses));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a course list, labelling problems with `label` (e.g. "courses" or a file name).
pub fn validate_courses(label: &str, courses: &[CourseRecord]) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, course) in courses.iter().enumerate() {
        if course.id.trim().is_empty() {
            errors.push(format!("{}[{}].id: must not be empty", label, i));
        } else if !seen.insert(course.id.trim()) {
            errors.push(format!("{}[{}].id: duplicate id '{}'", label, i, course.id));
        }

        if let Some(cutoff) = course.cutoff_score {
            if !cutoff.is_finite() || !(0.0..=MAX_SCORE).contains(&cutoff) {
                errors.push(format!(
                    "{}[{}].cutoff_score: {} is outside 0-{}",
                    label, i, cutoff, MAX_SCORE
                ));
            }
        }
    }

    errors
}

fn check_subjects(label: &str, subjects: &[SubjectCatalogEntry], errors: &mut Vec<String>) {
    let mut seen = HashSet::new();

    for (i, subject) in subjects.iter().enumerate() {
        let name = subject.name.trim();
        if name.is_empty() {
            errors.push(format!("{}[{}].name: must not be empty", label, i));
        } else if !seen.insert(name.to_ascii_lowercase()) {
            errors.push(format!("{}[{}].name: duplicate subject '{}'", label, i, name));
        }

        if !subject.scaling_factor.is_finite() || subject.scaling_factor <= 0.0 {
            errors.push(format!(
                "{}[{}].scaling_factor: must be positive, got {}",
                label, i, subject.scaling_factor
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_negative_scaling_factor() {
        let config = Config {
            subjects: Some(vec![
                SubjectCatalogEntry::anchor("English", 1.0),
                SubjectCatalogEntry::new("Physics", -1.0),
            ]),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("subjects[1].scaling_factor"));
    }

    #[test]
    fn test_duplicate_subject_names_ignore_case() {
        let config = Config {
            subjects: Some(vec![
                SubjectCatalogEntry::anchor("English", 1.0),
                SubjectCatalogEntry::new("english", 1.05),
            ]),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("subjects[1].name: duplicate subject"));
    }

    #[test]
    fn test_missing_anchor_reported_per_jurisdiction() {
        let mut config = Config::default();
        config.jurisdictions.insert(
            JurisdictionId::Wa,
            vec![SubjectCatalogEntry::new("Physics", 1.0)],
        );
        // Vic does not need an anchor, so an anchorless list is fine there
        config.jurisdictions.insert(
            JurisdictionId::Vic,
            vec![SubjectCatalogEntry::new("Physics", 1.0)],
        );
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec!["jurisdictions.wa: no anchor subject, but WA requires one"]);
    }

    #[test]
    fn test_shared_catalog_without_anchor() {
        let config = Config {
            subjects: Some(vec![SubjectCatalogEntry::new("Physics", 1.0)]),
            ..Config::default()
        };
        // Nsw, Qld and Wa all fall back to the shared list
        assert_eq!(validate_config(&config).unwrap_err().len(), 3);
    }

    #[test]
    fn test_course_errors() {
        let courses = vec![
            CourseRecord::new("c1", "Law", Some(120.0)),
            CourseRecord::new("c1", "Law again", Some(80.0)),
            CourseRecord::new(" ", "Nameless", None),
        ];
        let errors = validate_courses("courses", &courses);
        assert_eq!(errors.len(), 3);
        assert!(errors[0].contains("courses[0].cutoff_score"));
        assert!(errors[1].contains("courses[1].id: duplicate id"));
        assert!(errors[2].contains("courses[2].id: must not be empty"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            subjects: Some(vec![SubjectCatalogEntry::anchor("", 0.0)]),
            courses: vec![CourseRecord::new("c1", "Law", Some(-1.0))],
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
