use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::metadata::RespondentMetadata;
use super::report::{round_pct, CategoryScore, QuestionScore, ScoreReport, ValueCount};

/// Downloadable results artifact: raw answers, optional respondent details and
/// every computed metric at two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub generated_at: DateTime<Utc>,
    pub answers: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<RespondentMetadata>,
    pub overall_pct: f64,
    pub raw_mean: f64,
    pub raw_sum: i64,
    pub answered_count: usize,
    pub distribution: Vec<ValueCount>,
    pub per_category: Vec<CategoryScore>,
    pub per_question: Vec<QuestionScore>,
}

impl ExportDocument {
    pub fn new(
        report: &ScoreReport,
        meta: Option<RespondentMetadata>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let rounded = report.rounded();
        Self {
            generated_at,
            answers: report.answers(),
            meta,
            overall_pct: rounded.overall_pct,
            raw_mean: rounded.raw_mean,
            raw_sum: rounded.raw_sum,
            answered_count: rounded.answered_count,
            distribution: rounded.distribution,
            per_category: rounded.per_category,
            per_question: rounded.per_question,
        }
    }

    pub const FILE_NAME: &'static str = "results.json";

    pub fn to_json_pretty(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), ExportError> {
        let body = self.to_json_pretty()?;
        std::fs::write(path, body)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct QuestionRow<'a> {
    id: u32,
    category: &'a str,
    weight: f64,
    answer: i64,
    normalized_pct: f64,
}

/// Writes one CSV row per question, with a header, in catalog order.
pub fn write_question_csv<W: Write>(report: &ScoreReport, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for question in &report.per_question {
        csv_writer.serialize(QuestionRow {
            id: question.id,
            category: &question.category,
            weight: question.weight,
            answer: question.answer,
            normalized_pct: round_pct(question.normalized_pct),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode export document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode question CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::answers::AnswerValue;
    use crate::assessment::catalog::QuestionCatalog;
    use crate::assessment::domain::{AnswerScale, CategoryDefinition, QuestionDefinition};
    use crate::assessment::scoring::score;
    use chrono::TimeZone;

    fn report() -> ScoreReport {
        let questions = [(1, "a", 1.0), (2, "a", 2.0), (3, "b", 1.0)]
            .into_iter()
            .map(|(id, category, weight)| QuestionDefinition {
                id,
                text: format!("Q{id}"),
                category: category.to_string(),
                weight,
                polarity: Default::default(),
                options: Vec::new(),
            })
            .collect();
        let catalog = QuestionCatalog::new(
            AnswerScale::STANDARD,
            vec![CategoryDefinition::new("a", "A"), CategoryDefinition::new("b", "B")],
            questions,
        );
        let answers: Vec<AnswerValue> = [5, 2, 4].into_iter().map(AnswerValue::from).collect();
        score(&catalog, &answers).expect("valid answers")
    }

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[test]
    fn document_carries_answers_and_rounded_metrics() {
        let document = ExportDocument::new(&report(), None, timestamp());
        let value = serde_json::to_value(&document).expect("serializes");

        assert_eq!(value["answers"], serde_json::json!([5, 2, 4]));
        assert_eq!(value["perCategory"][0]["category"], "b");
        assert_eq!(value["perCategory"][0]["weightedPct"], 75.0);
        // (1*100 + 2*25) / 3
        assert_eq!(value["perCategory"][1]["weightedPct"], 50.0);
        assert_eq!(value["overallPct"], 56.25);
        assert_eq!(value["rawMean"], 3.67);
        assert_eq!(value["generatedAt"], "2024-05-01T08:30:00Z");
        assert!(value.get("meta").is_none());
    }

    #[test]
    fn document_includes_metadata_when_present() {
        let meta = RespondentMetadata::new().with("networkName", "North Canal");
        let document = ExportDocument::new(&report(), Some(meta), timestamp());
        let json = document.to_json_pretty().expect("encodes");
        assert!(json.contains("\"networkName\": \"North Canal\""));
    }

    #[test]
    fn writes_question_csv_with_header() {
        let mut buffer = Vec::new();
        write_question_csv(&report(), &mut buffer).expect("csv written");
        let text = String::from_utf8(buffer).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,category,weight,answer,normalized_pct");
        assert_eq!(lines[1], "1,a,1.0,5,100.0");
        assert_eq!(lines[2], "2,a,2.0,2,25.0");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn write_into_missing_directory_reports_io_error() {
        let path = std::env::temp_dir()
            .join("irrigation-assess-missing-dir")
            .join("nested")
            .join(ExportDocument::FILE_NAME);
        let err = ExportDocument::new(&report(), None, timestamp())
            .write_json(&path)
            .expect_err("parent directory does not exist");
        assert!(matches!(err, ExportError::Io(_)));
        assert!(err.to_string().starts_with("failed to write export: "));
    }
}
