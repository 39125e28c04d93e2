//! End-to-end calculations driven by config and course files on disk.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use atar_calc::config::{self, config_base_dir, load_config};
use atar_calc::scoring::{calculate_with_policy, JurisdictionId, ScoreBand, SubjectEntry};
use atar_calc::CalculationError;

const CONFIG_YAML: &str = r#"
jurisdiction: qld
unknown_subjects: reject
subjects:
  - { name: English, scaling_factor: 1.0, is_mandatory_anchor: true }
  - { name: Maths, scaling_factor: 1.0 }
  - { name: Physics, scaling_factor: 1.1 }
  - { name: Chemistry, scaling_factor: 1.0 }
  - { name: Art, scaling_factor: 0.9 }
jurisdictions:
  vic:
    - { name: English, scaling_factor: 1.0, is_mandatory_anchor: true }
    - { name: Maths, scaling_factor: 1.0 }
    - { name: Physics, scaling_factor: 1.0 }
    - { name: Chemistry, scaling_factor: 1.0 }
    - { name: Art, scaling_factor: 1.0 }
    - { name: Music, scaling_factor: 1.0 }
courses_file: courses.json
"#;

const COURSES_JSON: &str = r#"[
  { "id": "med", "name": "Medicine", "cutoff_score": 95.0, "institution": "Uni A" },
  { "id": "eng", "name": "Engineering", "cutoff_score": 85.0 },
  { "id": "arts", "name": "Arts", "cutoff_score": 60.0 },
  { "id": "sci", "name": "Science", "cutoff_score": 82.16 },
  { "id": "tba", "name": "New course" }
]"#;

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let config_path = dir.join("config.yaml");
    fs::write(&config_path, CONFIG_YAML).unwrap();
    fs::write(dir.join("courses.json"), COURSES_JSON).unwrap();
    config_path
}

fn subjects(pairs: &[(&str, &str)]) -> Vec<SubjectEntry> {
    pairs
        .iter()
        .map(|(subject, grade)| SubjectEntry::new(*subject, *grade))
        .collect()
}

#[test]
fn test_config_driven_qld_calculation() {
    let dir = TempDir::new().unwrap();
    let (config, path) = load_config(Some(write_fixture(dir.path()))).unwrap();
    config::validate_config(&config).unwrap();

    let courses = config.load_all_courses(&config_base_dir(&path)).unwrap();
    assert_eq!(courses.len(), 5);
    assert!(config::validate_courses("courses", &courses).is_empty());

    let jurisdiction = config.jurisdiction.unwrap();
    assert_eq!(jurisdiction, JurisdictionId::Qld);

    let catalogs = config.catalogs();
    let result = calculate_with_policy(
        jurisdiction,
        &subjects(&[
            ("English", "A"),
            ("Maths", "A"),
            ("Physics", "B"),
            ("Chemistry", "B"),
            ("Art", "C"),
        ]),
        catalogs.for_jurisdiction(jurisdiction),
        &courses,
        config.unknown_subjects,
    )
    .unwrap();

    // 90 + 90 + 88 + 80 + 63 = 411 of 500
    assert_eq!(result.breakdown.raw_total, 411.0);
    assert_eq!(result.score, 82.16);
    assert_eq!(result.band, ScoreBand::Good);

    // Cutoff equal to the score matches; a course without a cutoff never does.
    let ids: Vec<&str> = result.eligible_courses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["sci", "arts"]);
}

#[test]
fn test_jurisdiction_catalog_override() {
    let dir = TempDir::new().unwrap();
    let (config, path) = load_config(Some(write_fixture(dir.path()))).unwrap();
    let courses = config.load_all_courses(&config_base_dir(&path)).unwrap();
    let catalogs = config.catalogs();

    let result = calculate_with_policy(
        JurisdictionId::Vic,
        &subjects(&[
            ("English", "A"),
            ("Maths", "A"),
            ("Physics", "B"),
            ("Chemistry", "B"),
            ("Art", "C"),
            ("Music", "D"),
        ]),
        catalogs.for_jurisdiction(JurisdictionId::Vic),
        &courses,
        config.unknown_subjects,
    )
    .unwrap();

    // 90 + 90 + 80 + 80 full weight, (70 + 60) at 10%
    assert!((result.breakdown.raw_total - 353.0).abs() < 1e-9);
    assert_eq!(result.score, 88.21);
    assert_eq!(result.contributing_subjects.len(), 6);
    let ids: Vec<&str> = result.eligible_courses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["eng", "sci", "arts"]);
}

#[test]
fn test_music_unknown_outside_override() {
    let dir = TempDir::new().unwrap();
    let (config, _) = load_config(Some(write_fixture(dir.path()))).unwrap();
    let catalogs = config.catalogs();

    let err = calculate_with_policy(
        JurisdictionId::Qld,
        &subjects(&[
            ("English", "A"),
            ("Maths", "A"),
            ("Physics", "B"),
            ("Music", "B"),
        ]),
        catalogs.for_jurisdiction(JurisdictionId::Qld),
        &[],
        config.unknown_subjects,
    )
    .unwrap_err();

    assert_eq!(
        err,
        CalculationError::UnknownSubject {
            name: "Music".to_string(),
            jurisdiction: JurisdictionId::Qld,
        }
    );
    assert!(err.is_user_recoverable());
}

#[test]
fn test_missing_course_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, CONFIG_YAML).unwrap();

    let (config, path) = load_config(Some(config_path)).unwrap();
    let err = config
        .load_all_courses(&config_base_dir(&path))
        .unwrap_err();
    assert!(format!("{:#}", err).contains("courses.json"));
}
