pub mod formatter;

pub use formatter::{
    format_course_table, format_json, format_result, format_score, format_subject_catalog,
    format_tsv, should_use_colors,
};
