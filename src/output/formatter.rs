use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::catalog::{CourseRecord, SubjectCatalogEntry};
use crate::scoring::{CalculationResult, ScoreBand};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Scores and cutoffs always print with two decimals ("86.76", "70.00")
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

fn paint_band(text: &str, band: ScoreBand) -> String {
    match band {
        ScoreBand::Excellent => text.green().to_string(),
        ScoreBand::VeryGood => text.blue().to_string(),
        ScoreBand::Good => text.yellow().to_string(),
        ScoreBand::Fair => text.magenta().to_string(),
        ScoreBand::NeedsImprovement => text.red().to_string(),
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Headline, selected subjects and eligible courses for one calculation.
pub fn format_result(result: &CalculationResult, use_colors: bool) -> String {
    let score = format_score(result.score);
    let headline = if use_colors {
        format!(
            "{} score: {} ({})",
            result.jurisdiction,
            paint_band(&score, result.band).bold(),
            paint_band(result.band.label(), result.band)
        )
    } else {
        format!("{} score: {} ({})", result.jurisdiction, score, result.band)
    };

    let mut sections = vec![headline, format_breakdown(result, use_colors)];
    sections.push(String::new());
    sections.push(if result.eligible_courses.is_empty() {
        "No courses found for this score.".to_string()
    } else {
        format!(
            "Courses you may be eligible for:\n{}",
            format_course_table(&result.eligible_courses, use_colors)
        )
    });
    sections.join("\n")
}

/// One line per selected subject: name, grade, scaling, scaled score and weight
fn format_breakdown(result: &CalculationResult, use_colors: bool) -> String {
    let name_width = result
        .breakdown
        .contributions
        .iter()
        .map(|c| c.subject.subject_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = result
        .breakdown
        .contributions
        .iter()
        .map(|c| {
            let subject = &c.subject;
            let marker = if subject.is_mandatory_anchor { "*" } else { " " };
            let weight = if c.weight < 1.0 {
                format!("  (weight {:.0}%)", c.weight * 100.0)
            } else {
                String::new()
            };
            let name = format!("{:<width$}", subject.subject_name, width = name_width);
            let line = format!(
                "  {}{}  {}  x{:.2}  {:>3}{}",
                marker, name, subject.grade, subject.scaling_factor, subject.scaled_score, weight
            );
            if use_colors && c.weight < 1.0 {
                line.dimmed().to_string()
            } else {
                line
            }
        })
        .collect();

    lines.push(format!(
        "  aggregate {:.1} / {:.0}",
        result.breakdown.raw_total, result.breakdown.denominator
    ));
    lines.join("\n")
}

/// Format courses as a table with columns: Index, Cutoff, Name, Institution
/// No headers. Names are truncated to the terminal width when stdout is a TTY.
pub fn format_course_table(courses: &[CourseRecord], use_colors: bool) -> String {
    if courses.is_empty() {
        return "No courses found.".to_string();
    }

    let term_width = get_terminal_width();
    let index_width = 3;
    let cutoff_width = 6;
    let separator = "  ";

    courses
        .iter()
        .enumerate()
        .map(|(idx, course)| {
            let index_str = format!("{:>2}.", idx + 1);
            let cutoff = course
                .cutoff_score
                .map(format_score)
                .unwrap_or_else(|| "-".to_string());
            let cutoff_padded = format!("{:>width$}", cutoff, width = cutoff_width);
            let institution = course.institution.as_deref().unwrap_or("");

            let fixed_width = index_width
                + 1
                + cutoff_width
                + separator.len() * 2
                + institution.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate(&course.name, width - fixed_width)
                }
                Some(_) => truncate(&course.name, 20),
                None => course.name.clone(),
            };

            let line = if use_colors {
                format!(
                    "{} {}{}{}",
                    index_str.dimmed(),
                    cutoff_padded.bold(),
                    separator,
                    name
                )
            } else {
                format!("{} {}{}{}", index_str, cutoff_padded, separator, name)
            };

            if institution.is_empty() {
                line
            } else if use_colors {
                format!("{}{}{}", line, separator, institution.cyan())
            } else {
                format!("{}{}{}", line, separator, institution)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format eligible courses as tab-separated values for scripting
/// Columns: score, cutoff, course id, course name (no headers, no colors)
pub fn format_tsv(result: &CalculationResult) -> String {
    let score = format_score(result.score);
    result
        .eligible_courses
        .iter()
        .map(|course| {
            format!(
                "{}\t{}\t{}\t{}",
                score,
                course.cutoff_score.map(format_score).unwrap_or_default(),
                course.id,
                course.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full result as pretty-printed JSON
pub fn format_json(result: &CalculationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize result as JSON")
}

/// List a subject catalog, anchors marked with '*'
pub fn format_subject_catalog(subjects: &[SubjectCatalogEntry], use_colors: bool) -> String {
    if subjects.is_empty() {
        return "No subjects configured.".to_string();
    }

    subjects
        .iter()
        .map(|subject| {
            let marker = if subject.is_mandatory_anchor { "*" } else { " " };
            let factor = format!("x{:.2}", subject.scaling_factor);
            if use_colors {
                format!("{} {}  {}", marker.bold(), factor.dimmed(), subject.name)
            } else {
                format!("{} {}  {}", marker, factor, subject.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
