use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::catalog::{
    default_subjects, load_courses, CatalogSet, CourseRecord, SubjectCatalogEntry,
    UnknownSubjectPolicy,
};
use crate::scoring::JurisdictionId;

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// jurisdiction: nsw
/// unknown_subjects: fallback
/// subjects:
///   - { name: "English (Advanced)", scaling_factor: 1.05, is_mandatory_anchor: true }
///   - { name: Physics, scaling_factor: 1.05 }
/// jurisdictions:
///   vic:
///     - { name: "English", scaling_factor: 1.0, is_mandatory_anchor: true }
/// courses_file: courses.yaml
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Jurisdiction used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<JurisdictionId>,

    /// Handling of subjects missing from the catalog
    #[serde(default)]
    pub unknown_subjects: UnknownSubjectPolicy,

    /// Shared subject catalog (built-in list when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subjects: Option<Vec<SubjectCatalogEntry>>,

    /// Catalogs that replace the shared one for a single jurisdiction
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub jurisdictions: BTreeMap<JurisdictionId, Vec<SubjectCatalogEntry>>,

    /// Courses listed inline
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<CourseRecord>,

    /// Course file (YAML or JSON), relative paths resolve against the config directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub courses_file: Option<PathBuf>,
}

impl Config {
    /// Subject catalogs with the built-in list standing in for a missing shared catalog.
    pub fn catalogs(&self) -> CatalogSet {
        let shared = self.subjects.clone().unwrap_or_else(default_subjects);
        self.jurisdictions
            .iter()
            .fold(CatalogSet::new(shared), |set, (jurisdiction, entries)| {
                set.with_jurisdiction(*jurisdiction, entries.clone())
            })
    }

    /// Resolve `courses_file` against `base_dir` when it is relative.
    pub fn courses_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.courses_file.as_ref().map(|file| {
            if file.is_relative() {
                base_dir.join(file)
            } else {
                file.clone()
            }
        })
    }

    /// Inline courses followed by the ones from `courses_file`.
    pub fn load_all_courses(&self, base_dir: &Path) -> Result<Vec<CourseRecord>> {
        let mut courses = self.courses.clone();
        if let Some(path) = self.courses_path(base_dir) {
            courses.extend(load_courses(&path)?);
        }
        Ok(courses)
    }
}
