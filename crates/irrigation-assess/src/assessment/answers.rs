use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog::QuestionCatalog;
use super::domain::AnswerScale;

/// One caller-supplied entry of an answer set, as it arrives from a form or URL.
///
/// Numeric strings are accepted and parsed; anything else that is not a number
/// is kept so validation can report exactly what was received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Unanswered,
    Unsupported(Value),
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Option<i64>> for AnswerValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Unanswered, Self::from)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Reasons an answer set is refused before any score is computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("question catalog is empty")]
    EmptyCatalog,
    #[error("answer scale {min}..={max} is not a valid range")]
    InvalidScale { min: i64, max: i64 },
    #[error("expected {expected} answers (one per question), received {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error("answer #{} (question {question_id}) is missing", .index + 1)]
    Unanswered { index: usize, question_id: u32 },
    #[error("answer #{} (question {question_id}) is not a number: {value}", .index + 1)]
    NotNumeric {
        index: usize,
        question_id: u32,
        value: String,
    },
    #[error("answer #{} (question {question_id}) must be a whole number, received {value}", .index + 1)]
    NotWholeNumber {
        index: usize,
        question_id: u32,
        value: f64,
    },
    #[error("answer #{} (question {question_id}) is {value}, expected a value in {min}..={max}", .index + 1)]
    OutOfRange {
        index: usize,
        question_id: u32,
        value: f64,
        min: i64,
        max: i64,
    },
}

/// Coerces a caller-supplied answer set into raw integers in catalog order.
///
/// Stops at the first offending entry; no partial result is produced.
pub fn validate_answers(
    catalog: &QuestionCatalog,
    answers: &[AnswerValue],
) -> Result<Vec<i64>, ValidationError> {
    if catalog.is_empty() {
        return Err(ValidationError::EmptyCatalog);
    }

    let scale = catalog.scale();
    if !scale.is_usable() {
        return Err(ValidationError::InvalidScale {
            min: scale.min,
            max: scale.max,
        });
    }

    if answers.len() != catalog.len() {
        return Err(ValidationError::LengthMismatch {
            expected: catalog.len(),
            actual: answers.len(),
        });
    }

    catalog
        .questions()
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(index, (question, answer))| coerce_answer(index, question.id, answer, scale))
        .collect()
}

fn coerce_answer(
    index: usize,
    question_id: u32,
    answer: &AnswerValue,
    scale: AnswerScale,
) -> Result<i64, ValidationError> {
    let value = match answer {
        AnswerValue::Number(value) => *value,
        AnswerValue::Text(raw) => {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::NotNumeric {
                    index,
                    question_id,
                    value: raw.clone(),
                })?
        }
        AnswerValue::Unanswered => {
            return Err(ValidationError::Unanswered { index, question_id });
        }
        AnswerValue::Unsupported(other) => {
            return Err(ValidationError::NotNumeric {
                index,
                question_id,
                value: other.to_string(),
            });
        }
    };

    if !value.is_finite() {
        return Err(ValidationError::NotNumeric {
            index,
            question_id,
            value: value.to_string(),
        });
    }

    if value < scale.min as f64 || value > scale.max as f64 {
        return Err(ValidationError::OutOfRange {
            index,
            question_id,
            value,
            min: scale.min,
            max: scale.max,
        });
    }

    if value.fract() != 0.0 {
        return Err(ValidationError::NotWholeNumber {
            index,
            question_id,
            value,
        });
    }

    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::{CategoryDefinition, QuestionDefinition};
    use serde_json::json;

    fn small_catalog() -> QuestionCatalog {
        let question = |id| QuestionDefinition {
            id,
            text: format!("Q{id}"),
            category: "a".to_string(),
            weight: 1.0,
            polarity: Default::default(),
            options: Vec::new(),
        };
        QuestionCatalog::new(
            AnswerScale::STANDARD,
            vec![CategoryDefinition::new("a", "A")],
            vec![question(10), question(20)],
        )
    }

    fn numbers(values: &[i64]) -> Vec<AnswerValue> {
        values.iter().copied().map(AnswerValue::from).collect()
    }

    #[test]
    fn deserializes_mixed_form_values() {
        let answers: Vec<AnswerValue> =
            serde_json::from_value(json!([5, "3", null, true])).expect("answers parse");
        assert_eq!(answers[0], AnswerValue::Number(5.0));
        assert_eq!(answers[1], AnswerValue::Text("3".to_string()));
        assert_eq!(answers[2], AnswerValue::Unanswered);
        assert_eq!(answers[3], AnswerValue::Unsupported(json!(true)));
    }

    #[test]
    fn coerces_numeric_strings() {
        let answers = [" 4 ".into(), AnswerValue::Number(2.0)];
        let raw = validate_answers(&small_catalog(), &answers).expect("valid");
        assert_eq!(raw, vec![4, 2]);
    }

    #[test]
    fn reports_question_for_non_numeric_text() {
        let answers = [AnswerValue::Number(1.0), "high".into()];
        let err = validate_answers(&small_catalog(), &answers).expect_err("rejected");
        assert_eq!(
            err,
            ValidationError::NotNumeric {
                index: 1,
                question_id: 20,
                value: "high".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "answer #2 (question 20) is not a number: high"
        );
    }

    #[test]
    fn rejects_unanswered_entries() {
        let answers = [AnswerValue::Unanswered, AnswerValue::Number(3.0)];
        let err = validate_answers(&small_catalog(), &answers).expect_err("rejected");
        assert_eq!(
            err,
            ValidationError::Unanswered {
                index: 0,
                question_id: 10
            }
        );
    }

    #[test]
    fn rejects_values_outside_scale() {
        let err = validate_answers(&small_catalog(), &numbers(&[0, 3])).expect_err("rejected");
        assert!(matches!(
            err,
            ValidationError::OutOfRange { index: 0, min: 1, max: 5, .. }
        ));
    }

    #[test]
    fn rejects_fractional_and_non_finite_values() {
        let fractional = validate_answers(
            &small_catalog(),
            &[AnswerValue::Number(2.5), AnswerValue::Number(3.0)],
        )
        .expect_err("rejected");
        assert!(matches!(fractional, ValidationError::NotWholeNumber { .. }));

        let answers = ["NaN".into(), AnswerValue::Number(3.0)];
        let nan = validate_answers(&small_catalog(), &answers).expect_err("rejected");
        assert!(matches!(nan, ValidationError::NotNumeric { .. }));
    }

    #[test]
    fn missing_option_converts_to_unanswered() {
        assert_eq!(AnswerValue::from(None::<i64>), AnswerValue::Unanswered);
        assert_eq!(AnswerValue::from(Some(4_i64)), AnswerValue::Number(4.0));
    }

    #[test]
    fn rejects_wrong_length() {
        let err = validate_answers(&small_catalog(), &numbers(&[3])).expect_err("rejected");
        assert_eq!(
            err,
            ValidationError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn rejects_empty_catalog_before_length() {
        let catalog = QuestionCatalog::new(AnswerScale::STANDARD, Vec::new(), Vec::new());
        let err = validate_answers(&catalog, &[]).expect_err("rejected");
        assert_eq!(err, ValidationError::EmptyCatalog);
    }
}
