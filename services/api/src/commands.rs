use crate::infra::{load_engine, summary_service};
use chrono::Utc;
use clap::{ArgGroup, Args};
use irrigation_assess::assessment::{
    decode_answers, decode_metadata, results_url, write_question_csv, ExportDocument,
    QuestionCatalog, RespondentMetadata, ScoreReport, ScoringEngine, TransferError,
};
use irrigation_assess::config::{AppConfig, ServerConfig};
use irrigation_assess::error::AppError;
use irrigation_assess::summary::SummaryRequest;
use irrigation_assess::telemetry;
use std::fs::File;
use std::path::PathBuf;
use tracing::warn;

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["answers", "answers_file"])))]
pub(crate) struct ScoreArgs {
    /// Answers as a JSON array, one entry per question in catalog order
    #[arg(long)]
    pub(crate) answers: Option<String>,
    /// Read the answers JSON array from a file
    #[arg(long)]
    pub(crate) answers_file: Option<PathBuf>,
    /// Respondent details as a flat JSON object
    #[arg(long)]
    pub(crate) meta: Option<String>,
    /// Write the results.json export document to this path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
    /// Write a per-question CSV to this path
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Ask the configured chat model for a prose summary
    #[arg(long)]
    pub(crate) summarize: bool,
}

fn prepare() -> Result<(AppConfig, ScoringEngine), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    let engine = load_engine(&config.catalog)?;
    Ok((config, engine))
}

pub(crate) fn run_catalog() -> Result<(), AppError> {
    let (_, engine) = prepare()?;
    for line in catalog_lines(engine.catalog()) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let (config, engine) = prepare()?;

    let raw_answers = match (&args.answers, &args.answers_file) {
        (Some(inline), _) => inline.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err(AppError::Request("no answers supplied".to_string())),
    };
    let answers = decode_answers(&raw_answers)?;
    let meta = args.meta.as_deref().map(decode_metadata).transpose()?;
    if let Some(meta) = &meta {
        meta.validate()?;
    }

    let report = engine.score(&answers)?;
    for line in report_lines(&report, engine.catalog(), meta.as_ref()) {
        println!("{line}");
    }
    match results_link(&config.server, &report, meta.as_ref()) {
        Ok(link) => println!("\nResults link: {link}"),
        Err(err) => warn!(error = %err, "unable to build results link"),
    }

    if let Some(path) = &args.export {
        ExportDocument::new(&report, meta, Utc::now()).write_json(path)?;
        println!("\nExport written to {}", path.display());
    }

    if let Some(path) = &args.csv {
        let file = File::create(path)?;
        write_question_csv(&report, file)?;
        println!("Question CSV written to {}", path.display());
    }

    if args.summarize {
        let request = SummaryRequest::from_report(&report)?;
        let summary = summary_service(&config.summary)?
            .summarize(&request)
            .await?;
        println!("\nSummary\n{}", summary.text);
    }

    Ok(())
}

/// Link to `GET /api/v1/assessments/results` on the configured server.
pub(crate) fn results_link(
    server: &ServerConfig,
    report: &ScoreReport,
    meta: Option<&RespondentMetadata>,
) -> Result<String, TransferError> {
    let host = match server.host.as_str() {
        "0.0.0.0" => "localhost",
        host => host,
    };
    let base = format!("http://{host}:{}", server.port);
    results_url(&base, &report.answers(), meta).map(String::from)
}

pub(crate) fn catalog_lines(catalog: &QuestionCatalog) -> Vec<String> {
    let scale = catalog.scale();
    let mut lines = vec![format!(
        "Question catalog: {} questions, answers {}..={}",
        catalog.len(),
        scale.min,
        scale.max
    )];

    for category in catalog.categories() {
        let questions = catalog.questions_in(&category.key);
        lines.push(String::new());
        lines.push(format!("{} ({} questions)", category.label, questions.len()));
        for question in questions {
            lines.push(format!(
                "  {:>2}. {} [weight {}, {}]",
                question.id,
                question.text,
                question.weight,
                question.polarity.label().to_lowercase()
            ));
        }
    }
    lines
}

pub(crate) fn report_lines(
    report: &ScoreReport,
    catalog: &QuestionCatalog,
    meta: Option<&RespondentMetadata>,
) -> Vec<String> {
    let report = report.rounded();
    let mut lines = vec!["Irrigation network assessment".to_string()];

    if let Some(name) = meta.and_then(RespondentMetadata::network_name) {
        lines.push(format!("Network: {name}"));
    }
    lines.push(format!("Overall performance: {:.2}%", report.overall_pct));
    lines.push(format!(
        "Raw mean: {:.2} (sum {} over {} answers)",
        report.raw_mean, report.raw_sum, report.answered_count
    ));

    lines.push("\nCategories (strongest first)".to_string());
    for category in &report.per_category {
        lines.push(format!(
            "- {}: {:.2}% ({} questions, weight {})",
            category.label,
            category.weighted_pct,
            category.question_count,
            category.total_weight
        ));
    }

    if let (Some(strongest), Some(weakest)) =
        (report.strongest_category(), report.weakest_category())
    {
        lines.push(format!(
            "Strongest: {} ({:.2}%)",
            strongest.label, strongest.weighted_pct
        ));
        lines.push(format!("Weakest: {} ({:.2}%)", weakest.label, weakest.weighted_pct));
    }

    lines.push("\nAnswers".to_string());
    for score in &report.per_question {
        let definition = catalog.question(score.id);
        let text = definition.map_or("", |question| question.text.as_str());
        let answer = match definition.and_then(|question| question.option_label(score.answer)) {
            Some(label) => format!("{} ({label})", score.answer),
            None => score.answer.to_string(),
        };
        let category = report
            .category(&score.category)
            .map_or(score.category.as_str(), |category| category.label.as_str());
        lines.push(format!("  {:>2}. [{category}] {text}: {answer}", score.id));
    }

    lines.push("\nAnswer distribution".to_string());
    for entry in &report.distribution {
        lines.push(format!("- {}: {}", entry.value, entry.count));
    }

    lines
}
