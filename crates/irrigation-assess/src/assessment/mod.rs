//! Question catalog, answer validation and the weighted scoring engine.

pub mod answers;
pub mod catalog;
pub mod domain;
pub mod export;
pub mod metadata;
pub mod report;
pub mod router;
pub mod scoring;
mod standard;
pub mod transfer;

pub use answers::{validate_answers, AnswerValue, ValidationError};
pub use catalog::{CatalogError, QuestionCatalog};
pub use domain::{AnswerOption, AnswerScale, CategoryDefinition, Polarity, QuestionDefinition};
pub use export::{write_question_csv, ExportDocument, ExportError};
pub use metadata::{MetadataError, RespondentMetadata};
pub use report::{round_pct, CategoryScore, QuestionScore, ScoreReport, ValueCount};
pub use router::{assessment_router, AssessmentState};
pub use scoring::{score, ScoringEngine};
pub use transfer::{
    decode_answers, decode_metadata, encode_answers, results_url, ResultsQuery, TransferError,
    RESULTS_PATH,
};
