use std::sync::Arc;

use tracing::debug;

use super::answers::{validate_answers, AnswerValue, ValidationError};
use super::catalog::QuestionCatalog;
use super::domain::AnswerScale;
use super::report::{CategoryScore, QuestionScore, ScoreReport, ValueCount};

/// Scores a complete answer set against `catalog`.
///
/// Pure and deterministic: identical inputs always produce an identical report.
pub fn score(
    catalog: &QuestionCatalog,
    answers: &[AnswerValue],
) -> Result<ScoreReport, ValidationError> {
    let raw = validate_answers(catalog, answers)?;
    let scale = catalog.scale();

    let per_question: Vec<QuestionScore> = catalog
        .questions()
        .iter()
        .zip(&raw)
        .map(|(question, &answer)| QuestionScore {
            id: question.id,
            category: question.category.clone(),
            weight: question.weight,
            answer,
            normalized_pct: normalize(question.polarity.orient(answer, scale), scale),
        })
        .collect();

    let per_category = aggregate_categories(catalog, &per_question);
    let overall_pct = weighted_pct(&per_question.iter().collect::<Vec<_>>());

    let raw_sum: i64 = raw.iter().sum();
    let raw_mean = raw_sum as f64 / raw.len() as f64;
    let distribution = scale
        .values()
        .map(|value| ValueCount {
            value,
            count: raw.iter().filter(|&&answer| answer == value).count(),
        })
        .collect();

    debug!(
        questions = raw.len(),
        categories = per_category.len(),
        overall_pct,
        "scored answer set"
    );

    Ok(ScoreReport {
        overall_pct,
        raw_mean,
        raw_sum,
        answered_count: raw.len(),
        distribution,
        per_category,
        per_question,
    })
}

/// Linear rescale of an oriented answer onto 0..=100.
fn normalize(answer: i64, scale: AnswerScale) -> f64 {
    let pct = (answer - scale.min) as f64 / scale.span() as f64 * 100.0;
    clamp_pct(pct)
}

fn clamp_pct(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Weighted mean of `normalized_pct`; falls back to the plain mean when the
/// weights sum to zero. `scores` is never empty.
fn weighted_pct(scores: &[&QuestionScore]) -> f64 {
    let total_weight: f64 = scores.iter().map(|score| score.weight).sum();
    let pct = if total_weight > 0.0 {
        scores
            .iter()
            .map(|score| score.weight * score.normalized_pct)
            .sum::<f64>()
            / total_weight
    } else {
        scores.iter().map(|score| score.normalized_pct).sum::<f64>() / scores.len() as f64
    };
    clamp_pct(pct)
}

fn aggregate_categories(
    catalog: &QuestionCatalog,
    per_question: &[QuestionScore],
) -> Vec<CategoryScore> {
    // declared order first, then any category only questions mention
    let mut order: Vec<&str> = catalog
        .categories()
        .iter()
        .map(|category| category.key.as_str())
        .collect();
    for score in per_question {
        if !order.contains(&score.category.as_str()) {
            order.push(score.category.as_str());
        }
    }

    let mut categories: Vec<CategoryScore> = order
        .into_iter()
        .filter_map(|key| {
            let members: Vec<&QuestionScore> = per_question
                .iter()
                .filter(|score| score.category == key)
                .collect();
            if members.is_empty() {
                return None;
            }

            Some(CategoryScore {
                category: key.to_string(),
                label: catalog.category_label(key).to_string(),
                weighted_pct: weighted_pct(&members),
                total_weight: members.iter().map(|score| score.weight).sum(),
                question_count: members.len(),
            })
        })
        .collect();

    // stable: equal scores keep declaration order
    categories.sort_by(|a, b| b.weighted_pct.total_cmp(&a.weighted_pct));
    categories
}

/// Scoring entry point shared across request handlers.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<QuestionCatalog>,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn standard() -> Self {
        Self::new(Arc::new(QuestionCatalog::standard()))
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn score(&self, answers: &[AnswerValue]) -> Result<ScoreReport, ValidationError> {
        score(&self.catalog, answers)
    }
}
