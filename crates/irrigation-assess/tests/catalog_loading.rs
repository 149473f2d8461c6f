use std::path::PathBuf;

use irrigation_assess::assessment::{score, AnswerValue, CatalogError, QuestionCatalog};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "irrigation-assess-{}-{name}.json",
        std::process::id()
    ));
    std::fs::write(&path, contents).expect("write temp catalog");
    path
}

#[test]
fn loads_and_scores_external_catalog() {
    let path = write_temp(
        "valid",
        r#"{
            "scale": {"min": 0, "max": 4},
            "categories": [{"key": "canals", "label": "Canals"}],
            "questions": [
                {"id": 10, "text": "Lining condition", "category": "canals", "weight": 2.0},
                {"id": 11, "text": "Seepage losses", "category": "canals", "weight": 1.0,
                 "polarity": "lower_is_better"}
            ]
        }"#,
    );

    let catalog = QuestionCatalog::from_path(&path).expect("catalog loads");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.category_label("canals"), "Canals");

    let answers = [AnswerValue::Number(4.0), AnswerValue::Number(1.0)];
    let report = score(&catalog, &answers).expect("valid answers");
    assert_eq!(report.per_question[0].normalized_pct, 100.0);
    assert_eq!(report.per_question[1].normalized_pct, 75.0);
    // (2*100 + 1*75) / 3
    assert!((report.overall_pct - 91.666_666_666).abs() < 1e-6);

    std::fs::remove_file(path).ok();
}

#[test]
fn lists_every_catalog_problem() {
    let path = write_temp(
        "invalid",
        r#"{
            "categories": [{"key": "a", "label": "A"}],
            "questions": [
                {"id": 1, "text": "One", "category": "a", "weight": -1.0},
                {"id": 1, "text": "Dup", "category": "z", "weight": 1.0}
            ]
        }"#,
    );

    let err = QuestionCatalog::from_path(&path).expect_err("invalid catalog");
    assert!(matches!(err, CatalogError::Invalid(_)));
    assert!(err.issues().len() >= 3, "issues: {:?}", err.issues());

    std::fs::remove_file(path).ok();
}

#[test]
fn missing_file_names_path() {
    let err = QuestionCatalog::from_path("/nonexistent/catalog.json").expect_err("missing");
    assert!(err.to_string().contains("/nonexistent/catalog.json"));
}
