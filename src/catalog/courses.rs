use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A course offered by an institution, with its admission cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseRecord {
    pub id: String,
    pub name: String,

    /// Minimum score for entry. `None` means the course needs manual review.
    #[serde(default)]
    pub cutoff_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
}

impl CourseRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cutoff_score: Option<f64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cutoff_score,
            institution: None,
        }
    }
}

/// Load a course list from a file.
///
/// `.json` files are read as JSON, anything else as YAML. The file holds a
/// plain list of courses.
pub fn load_courses(path: &Path) -> Result<Vec<CourseRecord>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read course file at {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let courses: Vec<CourseRecord> = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse courses: invalid JSON in {}", path.display()))?
    } else {
        serde_saphyr::from_str(&content)
            .with_context(|| format!("Failed to parse courses: invalid YAML in {}", path.display()))?
    };

    debug!(count = courses.len(), path = %path.display(), "loaded course catalog");
    Ok(courses)
}
