//! URL state transfer between the questionnaire and the results view.
//!
//! Answers travel as a JSON array and metadata as a flat JSON object, each in its
//! own query parameter. Axum's `Query` extractor has already percent-decoded them.

use reqwest::Url;
use serde::Deserialize;

use super::answers::AnswerValue;
use super::metadata::RespondentMetadata;

pub const RESULTS_PATH: &str = "/api/v1/assessments/results";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsQuery {
    pub answers: Option<String>,
    pub meta: Option<String>,
}

impl ResultsQuery {
    pub fn decode(
        &self,
    ) -> Result<(Vec<AnswerValue>, Option<RespondentMetadata>), TransferError> {
        let answers = self
            .answers
            .as_deref()
            .ok_or(TransferError::MissingAnswers)
            .and_then(decode_answers)?;
        let meta = self.meta.as_deref().map(decode_metadata).transpose()?;
        Ok((answers, meta))
    }
}

pub fn decode_answers(raw: &str) -> Result<Vec<AnswerValue>, TransferError> {
    serde_json::from_str(raw).map_err(|source| TransferError::Answers { source })
}

pub fn decode_metadata(raw: &str) -> Result<RespondentMetadata, TransferError> {
    serde_json::from_str(raw).map_err(|source| TransferError::Metadata { source })
}

pub fn encode_answers(answers: &[i64]) -> Result<String, TransferError> {
    serde_json::to_string(answers).map_err(|source| TransferError::Encode { source })
}

/// Link to the results view of `base` that reproduces this answer set.
pub fn results_url(
    base: &str,
    answers: &[i64],
    meta: Option<&RespondentMetadata>,
) -> Result<Url, TransferError> {
    let mut url = Url::parse(base)
        .and_then(|base| base.join(RESULTS_PATH))
        .map_err(|err| TransferError::BaseUrl(err.to_string()))?;

    let answers = encode_answers(answers)?;
    let meta = meta
        .map(serde_json::to_string)
        .transpose()
        .map_err(|source| TransferError::Encode { source })?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("answers", &answers);
        if let Some(meta) = &meta {
            pairs.append_pair("meta", meta);
        }
    }
    Ok(url)
}

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("missing 'answers' parameter")]
    MissingAnswers,
    #[error("'answers' must be a JSON array: {source}")]
    Answers {
        #[source]
        source: serde_json::Error,
    },
    #[error("'meta' must be a JSON object of strings: {source}")]
    Metadata {
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to encode results state: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid base URL for results link: {0}")]
    BaseUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mixed_answer_entries() {
        let answers = decode_answers(r#"[1, "4", null, 2.5]"#).expect("array decodes");
        assert_eq!(
            answers,
            vec![
                AnswerValue::Number(1.0),
                AnswerValue::Text("4".to_string()),
                AnswerValue::Unanswered,
                AnswerValue::Number(2.5),
            ]
        );
    }

    #[test]
    fn keeps_unsupported_entries_for_validation() {
        let answers = decode_answers(r#"[true, [1]]"#).expect("array decodes");
        assert!(matches!(answers[0], AnswerValue::Unsupported(_)));
        assert!(matches!(answers[1], AnswerValue::Unsupported(_)));
    }

    #[test]
    fn rejects_non_array_answers() {
        let err = decode_answers(r#"{"1": 3}"#).expect_err("object refused");
        assert!(matches!(err, TransferError::Answers { .. }));
    }

    #[test]
    fn query_requires_answers() {
        let query = ResultsQuery::default();
        assert!(matches!(query.decode(), Err(TransferError::MissingAnswers)));
    }

    #[test]
    fn query_decodes_optional_metadata() {
        let query = ResultsQuery {
            answers: Some(encode_answers(&[5, 1, 3]).expect("encodes")),
            meta: Some(r#"{"networkName":"North Canal"}"#.to_string()),
        };
        let (answers, meta) = query.decode().expect("decodes");
        assert_eq!(answers.len(), 3);
        let meta = meta.expect("metadata present");
        assert_eq!(meta.network_name(), Some("North Canal"));
    }

    #[test]
    fn encodes_answers_as_json_array() {
        assert_eq!(encode_answers(&[5, 1, 3]).expect("encodes"), "[5,1,3]");
        assert_eq!(encode_answers(&[]).expect("encodes"), "[]");
    }

    #[test]
    fn results_url_round_trips_through_query_decoding() {
        let meta = RespondentMetadata::new().with("networkName", "North & South Canal");
        let url = results_url("http://127.0.0.1:3000", &[5, 1, 3], Some(&meta)).expect("url");

        assert_eq!(url.path(), RESULTS_PATH);
        let mut query = ResultsQuery::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "answers" => query.answers = Some(value.into_owned()),
                "meta" => query.meta = Some(value.into_owned()),
                other => panic!("unexpected parameter {other}"),
            }
        }

        let (answers, meta) = query.decode().expect("decodes");
        assert_eq!(
            answers,
            vec![
                AnswerValue::Number(5.0),
                AnswerValue::Number(1.0),
                AnswerValue::Number(3.0),
            ]
        );
        let meta = meta.expect("metadata present");
        assert_eq!(meta.network_name(), Some("North & South Canal"));
    }

    #[test]
    fn results_url_rejects_relative_base() {
        let err = results_url("not a url", &[1], None).expect_err("relative base");
        assert!(matches!(err, TransferError::BaseUrl(_)));
    }

    #[test]
    fn rejects_nested_metadata_values() {
        let err = decode_metadata(r#"{"networkName": {"x": 1}}"#).expect_err("nested refused");
        assert!(matches!(err, TransferError::Metadata { .. }));
    }
}
