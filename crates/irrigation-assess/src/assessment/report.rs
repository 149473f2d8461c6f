use serde::Serialize;

/// Rounds a percentage for display or export. Never applied to intermediate sums.
pub fn round_pct(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionScore {
    pub id: u32,
    pub category: String,
    pub weight: f64,
    pub answer: i64,
    pub normalized_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: String,
    pub label: String,
    pub weighted_pct: f64,
    pub total_weight: f64,
    pub question_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: i64,
    pub count: usize,
}

/// Outcome of scoring one complete answer set.
///
/// Percentages are kept at full precision; call [`ScoreReport::rounded`] at the
/// point where the report is shown or exported.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub overall_pct: f64,
    pub raw_mean: f64,
    pub raw_sum: i64,
    pub answered_count: usize,
    pub distribution: Vec<ValueCount>,
    pub per_category: Vec<CategoryScore>,
    pub per_question: Vec<QuestionScore>,
}

impl ScoreReport {
    pub fn category(&self, key: &str) -> Option<&CategoryScore> {
        self.per_category
            .iter()
            .find(|category| category.category == key)
    }

    pub fn strongest_category(&self) -> Option<&CategoryScore> {
        self.per_category.first()
    }

    pub fn weakest_category(&self) -> Option<&CategoryScore> {
        self.per_category.last()
    }

    /// Raw answers in catalog order.
    pub fn answers(&self) -> Vec<i64> {
        self.per_question.iter().map(|score| score.answer).collect()
    }

    /// Copy of the report with every percentage and the raw mean at two decimals.
    pub fn rounded(&self) -> Self {
        Self {
            overall_pct: round_pct(self.overall_pct),
            raw_mean: round_pct(self.raw_mean),
            raw_sum: self.raw_sum,
            answered_count: self.answered_count,
            distribution: self.distribution.clone(),
            per_category: self
                .per_category
                .iter()
                .map(|category| CategoryScore {
                    weighted_pct: round_pct(category.weighted_pct),
                    ..category.clone()
                })
                .collect(),
            per_question: self
                .per_question
                .iter()
                .map(|question| QuestionScore {
                    normalized_pct: round_pct(question.normalized_pct),
                    ..question.clone()
                })
                .collect(),
        }
    }
}
