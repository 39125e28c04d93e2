use tracing::debug;

use crate::catalog::CourseRecord;

/// Maximum number of courses returned for one score.
pub const MAX_ELIGIBLE_COURSES: usize = 10;

/// Courses whose cutoff the score meets, highest cutoff first, at most
/// [`MAX_ELIGIBLE_COURSES`].
///
/// Courses without a cutoff need manual review and are never matched.
/// Equal cutoffs keep catalog order.
pub fn match_courses(score: f64, courses: &[CourseRecord]) -> Vec<CourseRecord> {
    let mut eligible: Vec<(&CourseRecord, f64)> = courses
        .iter()
        .filter_map(|course| course.cutoff_score.map(|cutoff| (course, cutoff)))
        .filter(|(_, cutoff)| *cutoff <= score)
        .collect();

    eligible.sort_by(|a, b| b.1.total_cmp(&a.1));

    debug!(
        score,
        eligible = eligible.len(),
        catalog = courses.len(),
        "matched courses against score"
    );

    eligible
        .into_iter()
        .take(MAX_ELIGIBLE_COURSES)
        .map(|(course, _)| course.clone())
        .collect()
}
