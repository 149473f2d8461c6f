use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::SummaryError;
use crate::assessment::{round_pct, ScoreReport};

pub const SUMMARY_CATEGORY_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryCategory {
    pub label: String,
    pub score_pct: f64,
}

/// Condensed report handed to the chat model: the overall percentage and one
/// entry per category, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub overall_pct: f64,
    pub categories: Vec<SummaryCategory>,
}

impl SummaryRequest {
    /// Reads a loosely typed request body, naming the first field that is off.
    pub fn from_json(body: &Value) -> Result<Self, SummaryError> {
        let overall_pct = body
            .get("overallPct")
            .and_then(Value::as_f64)
            .ok_or_else(|| invalid("overallPct must be a number"))?;

        let entries = body
            .get("categories")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("categories must be an array"))?;

        let categories = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let label = entry.get("label").and_then(Value::as_str).ok_or_else(|| {
                    invalid(format!("categories[{index}].label must be a string"))
                })?;
                let score_pct = entry
                    .get("scorePct")
                    .and_then(Value::as_f64)
                    .ok_or_else(|| {
                        invalid(format!("categories[{index}].scorePct must be a number"))
                    })?;
                Ok(SummaryCategory {
                    label: label.to_string(),
                    score_pct,
                })
            })
            .collect::<Result<Vec<_>, SummaryError>>()?;

        let request = Self {
            overall_pct,
            categories,
        };
        request.validate()?;
        Ok(request)
    }

    pub fn from_report(report: &ScoreReport) -> Result<Self, SummaryError> {
        let request = Self {
            overall_pct: report.overall_pct,
            categories: report
                .per_category
                .iter()
                .map(|category| SummaryCategory {
                    label: category.label.clone(),
                    score_pct: category.weighted_pct,
                })
                .collect(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn validate(&self) -> Result<(), SummaryError> {
        if self.categories.len() != SUMMARY_CATEGORY_COUNT {
            return Err(invalid(format!(
                "expected {SUMMARY_CATEGORY_COUNT} categories, received {}",
                self.categories.len()
            )));
        }
        if !self.overall_pct.is_finite() {
            return Err(invalid("overallPct must be finite"));
        }
        if let Some(index) = self
            .categories
            .iter()
            .position(|category| !category.score_pct.is_finite())
        {
            return Err(invalid(format!("categories[{index}].scorePct must be finite")));
        }
        Ok(())
    }

    pub fn rounded(&self) -> Self {
        Self {
            overall_pct: round_pct(self.overall_pct),
            categories: self
                .categories
                .iter()
                .map(|category| SummaryCategory {
                    label: category.label.clone(),
                    score_pct: round_pct(category.score_pct),
                })
                .collect(),
        }
    }
}

fn invalid(detail: impl Into<String>) -> SummaryError {
    SummaryError::InvalidPayload(detail.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn five_categories() -> Value {
        json!([
            {"label": "Water Delivery Efficiency", "scorePct": 80.456},
            {"label": "Distribution Equity", "scorePct": 70},
            {"label": "Maintenance & Infrastructure", "scorePct": 60},
            {"label": "Financial Sustainability", "scorePct": 50},
            {"label": "Water User Satisfaction", "scorePct": 40}
        ])
    }

    #[test]
    fn parses_valid_body() {
        let body = json!({"overallPct": 61.237, "categories": five_categories()});
        let request = SummaryRequest::from_json(&body).expect("valid body");
        assert_eq!(request.categories.len(), 5);
        assert_eq!(request.categories[1].score_pct, 70.0);

        let rounded = request.rounded();
        assert_eq!(rounded.overall_pct, 61.24);
        assert_eq!(rounded.categories[0].score_pct, 80.46);
    }

    #[test]
    fn rejects_non_numeric_overall() {
        let body = json!({"overallPct": "61", "categories": five_categories()});
        let err = SummaryRequest::from_json(&body).expect_err("string overall");
        assert_eq!(err.to_string(), "Invalid payload: overallPct must be a number");
    }

    #[test]
    fn rejects_wrong_category_count() {
        let body = json!({"overallPct": 50, "categories": [{"label": "A", "scorePct": 50}]});
        let err = SummaryRequest::from_json(&body).expect_err("one category");
        assert!(matches!(err, SummaryError::InvalidPayload(_)));
        assert!(err.to_string().contains("expected 5 categories, received 1"));
    }

    #[test]
    fn rejects_malformed_category_entry() {
        let mut categories = five_categories();
        categories[2]["scorePct"] = json!(null);
        let body = json!({"overallPct": 50, "categories": categories});
        let err = SummaryRequest::from_json(&body).expect_err("null score");
        assert!(err.to_string().contains("categories[2].scorePct"));
    }

    #[test]
    fn rejects_missing_categories() {
        let err = SummaryRequest::from_json(&json!({"overallPct": 50})).expect_err("missing");
        assert!(err.to_string().contains("categories must be an array"));
    }
}
