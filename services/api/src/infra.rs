use irrigation_assess::assessment::{QuestionCatalog, ScoringEngine};
use irrigation_assess::config::{CatalogSource, SummaryConfig};
use irrigation_assess::error::AppError;
use irrigation_assess::summary::{CohereChatClient, SummaryService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn load_engine(source: &CatalogSource) -> Result<ScoringEngine, AppError> {
    let catalog = match source {
        CatalogSource::Standard => QuestionCatalog::standard(),
        CatalogSource::File(path) => {
            let catalog = QuestionCatalog::from_path(path).inspect_err(|err| {
                for issue in err.issues() {
                    warn!(path = %path.display(), %issue, "catalog rejected");
                }
            })?;
            info!(path = %path.display(), questions = catalog.len(), "using external catalog");
            catalog
        }
    };
    Ok(ScoringEngine::new(Arc::new(catalog)))
}

pub(crate) fn summary_service(
    config: &SummaryConfig,
) -> Result<SummaryService<CohereChatClient>, AppError> {
    let client = CohereChatClient::from_config(config)?;
    if client.is_none() {
        warn!("COHERE_API_KEY not set; summary requests will fail");
    }
    Ok(SummaryService::new(
        client.map(Arc::new),
        config.language.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn standard_source_loads_builtin_catalog() {
        let engine = load_engine(&CatalogSource::Standard).expect("engine builds");
        assert_eq!(engine.catalog().len(), 32);
    }

    #[test]
    fn missing_catalog_file_fails_startup() {
        let source = CatalogSource::File(PathBuf::from("/nonexistent/catalog.json"));
        let err = load_engine(&source).expect_err("missing file");
        assert!(matches!(err, AppError::Catalog(_)));
    }

    #[test]
    fn invalid_catalog_file_reports_every_issue() {
        let path = std::env::temp_dir().join("irrigation-assess-invalid-catalog.json");
        std::fs::write(
            &path,
            r#"{"scale": {"min": 5, "max": 1}, "categories": [], "questions": []}"#,
        )
        .expect("catalog written");

        let err = load_engine(&CatalogSource::File(path.clone())).expect_err("invalid catalog");
        let _ = std::fs::remove_file(&path);
        match err {
            AppError::Catalog(inner) => assert!(inner.issues().len() >= 2, "{inner}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn summary_service_without_key_is_unconfigured() {
        let service = summary_service(&SummaryConfig::default()).expect("service builds");
        assert!(!service.is_configured());
    }
}
