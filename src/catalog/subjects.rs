use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::JurisdictionId;

/// Scaling factor used for subjects the catalog does not know.
pub const DEFAULT_SCALING_FACTOR: f64 = 1.0;

/// One subject in a jurisdiction's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubjectCatalogEntry {
    pub name: String,

    /// Multiplier applied to the grade's base mark (typically 0.85-1.15)
    pub scaling_factor: f64,

    /// English-equivalent subject some jurisdictions require
    #[serde(default)]
    pub is_mandatory_anchor: bool,
}

impl SubjectCatalogEntry {
    pub fn new(name: impl Into<String>, scaling_factor: f64) -> Self {
        Self {
            name: name.into(),
            scaling_factor,
            is_mandatory_anchor: false,
        }
    }

    pub fn anchor(name: impl Into<String>, scaling_factor: f64) -> Self {
        Self {
            is_mandatory_anchor: true,
            ..Self::new(name, scaling_factor)
        }
    }
}

/// What the catalog says about a subject name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectResolution {
    pub scaling_factor: f64,
    pub is_mandatory_anchor: bool,
    /// False when the defaults were substituted for an unknown subject
    pub matched: bool,
}

impl SubjectResolution {
    fn unmatched() -> Self {
        Self {
            scaling_factor: DEFAULT_SCALING_FACTOR,
            is_mandatory_anchor: false,
            matched: false,
        }
    }
}

impl From<&SubjectCatalogEntry> for SubjectResolution {
    fn from(entry: &SubjectCatalogEntry) -> Self {
        Self {
            scaling_factor: entry.scaling_factor,
            is_mandatory_anchor: entry.is_mandatory_anchor,
            matched: true,
        }
    }
}

/// What to do when a subject is missing from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownSubjectPolicy {
    /// Score it with factor 1.0 as a non-anchor subject
    #[default]
    Fallback,
    /// Fail the calculation
    Reject,
}

/// Borrowed view over one jurisdiction's subject list.
#[derive(Debug, Clone, Copy)]
pub struct SubjectCatalog<'a> {
    entries: &'a [SubjectCatalogEntry],
}

impl<'a> SubjectCatalog<'a> {
    pub fn new(entries: &'a [SubjectCatalogEntry]) -> Self {
        Self { entries }
    }

    /// Look a subject up by name, ignoring surrounding whitespace and ASCII case.
    pub fn find(&self, name: &str) -> Option<&'a SubjectCatalogEntry> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|entry| entry.name.trim().eq_ignore_ascii_case(name))
    }

    pub fn resolve(&self, name: &str) -> SubjectResolution {
        self.find(name)
            .map(SubjectResolution::from)
            .unwrap_or_else(SubjectResolution::unmatched)
    }
}

/// Subject catalogs for every jurisdiction: a shared list plus per-jurisdiction overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSet {
    shared: Vec<SubjectCatalogEntry>,
    by_jurisdiction: BTreeMap<JurisdictionId, Vec<SubjectCatalogEntry>>,
}

impl Default for CatalogSet {
    fn default() -> Self {
        Self::new(default_subjects())
    }
}

impl CatalogSet {
    pub fn new(shared: Vec<SubjectCatalogEntry>) -> Self {
        Self {
            shared,
            by_jurisdiction: BTreeMap::new(),
        }
    }

    /// Replace the list used for one jurisdiction.
    pub fn with_jurisdiction(
        mut self,
        jurisdiction: JurisdictionId,
        entries: Vec<SubjectCatalogEntry>,
    ) -> Self {
        self.by_jurisdiction.insert(jurisdiction, entries);
        self
    }

    /// The list a jurisdiction's calculations run against.
    pub fn for_jurisdiction(&self, jurisdiction: JurisdictionId) -> &[SubjectCatalogEntry] {
        self.by_jurisdiction
            .get(&jurisdiction)
            .map(Vec::as_slice)
            .unwrap_or(&self.shared)
    }

    pub fn resolve(&self, jurisdiction: JurisdictionId, subject_name: &str) -> SubjectResolution {
        SubjectCatalog::new(self.for_jurisdiction(jurisdiction)).resolve(subject_name)
    }
}

/// Built-in catalog used when no subjects are configured.
pub fn default_subjects() -> Vec<SubjectCatalogEntry> {
    vec![
        SubjectCatalogEntry::anchor("English (Standard)", 1.0),
        SubjectCatalogEntry::anchor("English (Advanced)", 1.05),
        SubjectCatalogEntry::anchor("English Extension 1", 1.1),
        SubjectCatalogEntry::anchor("English Extension 2", 1.15),
        SubjectCatalogEntry::new("Mathematics (Standard)", 1.0),
        SubjectCatalogEntry::new("Mathematics (Advanced)", 1.05),
        SubjectCatalogEntry::new("Mathematics Extension 1", 1.1),
        SubjectCatalogEntry::new("Mathematics Extension 2", 1.15),
        SubjectCatalogEntry::new("Physics", 1.05),
        SubjectCatalogEntry::new("Chemistry", 1.05),
        SubjectCatalogEntry::new("Biology", 1.0),
        SubjectCatalogEntry::new("Economics", 1.0),
        SubjectCatalogEntry::new("Business Studies", 0.95),
        SubjectCatalogEntry::new("Legal Studies", 0.95),
        SubjectCatalogEntry::new("Modern History", 1.0),
        SubjectCatalogEntry::new("Ancient History", 1.0),
        SubjectCatalogEntry::new("Geography", 0.95),
        SubjectCatalogEntry::new("Visual Arts", 0.9),
        SubjectCatalogEntry::new("Music", 0.95),
        SubjectCatalogEntry::new("Drama", 0.9),
        SubjectCatalogEntry::new("Design and Technology", 0.9),
        SubjectCatalogEntry::new("Information Technology", 0.95),
        SubjectCatalogEntry::new("Software Design & Development", 1.0),
        SubjectCatalogEntry::new("Personal Development, Health & PE", 0.85),
        SubjectCatalogEntry::new("Food Technology", 0.85),
        SubjectCatalogEntry::new("Textiles and Design", 0.85),
    ]
}
