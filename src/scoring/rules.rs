use serde::Serialize;
use tracing::debug;

use super::engine::ScoredSubject;
use super::jurisdiction::{JurisdictionId, JurisdictionRule, Selection};
use crate::error::CalculationError;

/// A selected subject and the weight it carries in the raw total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub subject: ScoredSubject,
    pub weight: f64,
}

impl Contribution {
    pub fn points(&self) -> f64 {
        self.subject.scaled_score as f64 * self.weight
    }
}

/// Output of one jurisdiction rule, before normalisation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub raw_total: f64,
    pub denominator: f64,
    pub contributions: Vec<Contribution>,
}

/// Run the jurisdiction's rule over the scored subjects.
pub fn aggregate(
    jurisdiction: JurisdictionId,
    subjects: &[ScoredSubject],
) -> Result<Aggregate, CalculationError> {
    let rule = jurisdiction.rule();
    if rule.requires_anchor && !subjects.iter().any(|s| s.is_mandatory_anchor) {
        return Err(CalculationError::MissingMandatoryAnchor { jurisdiction });
    }

    let ranked = rank(subjects);
    let contributions = select(&rule, &ranked);
    let raw_total = contributions.iter().map(Contribution::points).sum();

    debug!(
        %jurisdiction,
        selected = contributions.len(),
        available = subjects.len(),
        raw_total,
        "applied jurisdiction rule"
    );

    Ok(Aggregate {
        raw_total,
        denominator: rule.denominator,
        contributions,
    })
}

/// Highest scaled score first. The sort is stable so ties keep input order.
fn rank(subjects: &[ScoredSubject]) -> Vec<&ScoredSubject> {
    let mut ranked: Vec<&ScoredSubject> = subjects.iter().collect();
    ranked.sort_by(|a, b| b.scaled_score.cmp(&a.scaled_score));
    ranked
}

fn select(rule: &JurisdictionRule, ranked: &[&ScoredSubject]) -> Vec<Contribution> {
    let full = |s: &&ScoredSubject| Contribution {
        subject: (*s).clone(),
        weight: 1.0,
    };

    match rule.selection {
        Selection::AnchorPlusBest { others } => {
            // Other anchor subjects are not eligible for the non-anchor slots.
            let anchor = ranked.iter().find(|s| s.is_mandatory_anchor);
            anchor
                .into_iter()
                .chain(ranked.iter().filter(|s| !s.is_mandatory_anchor).take(others))
                .map(full)
                .collect()
        }
        Selection::BestWithTail {
            full: count,
            tail,
            tail_weight,
        } => {
            let mut picked: Vec<Contribution> = ranked.iter().take(count).map(full).collect();
            picked.extend(ranked.iter().skip(count).take(tail).map(|s| Contribution {
                subject: (*s).clone(),
                weight: tail_weight,
            }));
            picked
        }
        Selection::Best { count } => ranked.iter().take(count).map(full).collect(),
    }
}
