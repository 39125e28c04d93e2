pub mod courses;
pub mod subjects;

pub use courses::{load_courses, CourseRecord};
pub use subjects::{
    default_subjects, CatalogSet, SubjectCatalog, SubjectCatalogEntry, SubjectResolution,
    UnknownSubjectPolicy, DEFAULT_SCALING_FACTOR,
};
