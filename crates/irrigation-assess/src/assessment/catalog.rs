use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{AnswerScale, CategoryDefinition, QuestionDefinition};
use super::standard;

/// Ordered, immutable set of questions the engine scores against.
///
/// Question order is the canonical numbering: answer sets are indexed by it.
/// Category declaration order breaks ties when categories score equally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionCatalog {
    #[serde(default)]
    scale: AnswerScale,
    categories: Vec<CategoryDefinition>,
    questions: Vec<QuestionDefinition>,
}

impl QuestionCatalog {
    /// Builds a catalog without validating it; see [`QuestionCatalog::validate`].
    pub fn new(
        scale: AnswerScale,
        categories: Vec<CategoryDefinition>,
        questions: Vec<QuestionDefinition>,
    ) -> Self {
        Self {
            scale,
            categories,
            questions,
        }
    }

    /// The irrigation network operations instrument: 32 questions in 5 categories.
    pub fn standard() -> Self {
        Self::new(
            AnswerScale::STANDARD,
            standard::categories(),
            standard::questions(),
        )
    }

    pub fn from_json_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.validate()?;
        debug!(
            questions = catalog.len(),
            categories = catalog.categories.len(),
            "loaded question catalog"
        );
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn scale(&self) -> AnswerScale {
        self.scale
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn questions(&self) -> &[QuestionDefinition] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: u32) -> Option<&QuestionDefinition> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn questions_in(&self, category: &str) -> Vec<&QuestionDefinition> {
        self.questions
            .iter()
            .filter(|question| question.category == category)
            .collect()
    }

    /// Display label for a category key, falling back to the key itself.
    pub fn category_label<'a>(&'a self, key: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|category| category.key == key)
            .map(|category| category.label.as_str())
            .unwrap_or(key)
    }

    /// Checks every structural rule and reports all violations together.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut errors = Vec::new();

        let AnswerScale { min, max } = self.scale;
        if min >= max {
            errors.push(format!("scale: min ({min}) must be lower than max ({max})"));
        } else {
            match self.scale.value_count() {
                Some(count) if count <= AnswerScale::MAX_VALUES => {}
                Some(count) => errors.push(format!(
                    "scale: {count} answer values exceed the limit of {}",
                    AnswerScale::MAX_VALUES
                )),
                None => errors.push(format!("scale: range {min}..={max} is too wide to score")),
            }
        }

        let mut category_keys = HashSet::new();
        for (i, category) in self.categories.iter().enumerate() {
            if category.key.trim().is_empty() {
                errors.push(format!("categories[{i}].key: must not be empty"));
            } else if !category_keys.insert(category.key.as_str()) {
                errors.push(format!(
                    "categories[{i}].key: duplicate category '{}'",
                    category.key
                ));
            }
            if category.label.trim().is_empty() {
                errors.push(format!("categories[{i}].label: must not be empty"));
            }
        }

        if self.questions.is_empty() {
            errors.push("questions: catalog must contain at least one question".to_string());
        }

        let mut question_ids = HashSet::new();
        for (i, question) in self.questions.iter().enumerate() {
            if question.id == 0 {
                errors.push(format!("questions[{i}].id: must be a positive integer"));
            } else if !question_ids.insert(question.id) {
                errors.push(format!(
                    "questions[{i}].id: duplicate question id {}",
                    question.id
                ));
            }

            if !question.weight.is_finite() || question.weight < 0.0 {
                errors.push(format!(
                    "questions[{i}].weight: must be a non-negative number (got {})",
                    question.weight
                ));
            }

            if question.category.trim().is_empty() {
                errors.push(format!("questions[{i}].category: must not be empty"));
            } else if !category_keys.contains(question.category.as_str()) {
                errors.push(format!(
                    "questions[{i}].category: unknown category '{}'",
                    question.category
                ));
            }

            let mut option_values = HashSet::new();
            for (j, option) in question.options.iter().enumerate() {
                if !self.scale.contains(option.value) {
                    errors.push(format!(
                        "questions[{i}].options[{j}].value: {} outside scale {}..={}",
                        option.value, self.scale.min, self.scale.max
                    ));
                }
                if !option_values.insert(option.value) {
                    errors.push(format!(
                        "questions[{i}].options[{j}].value: duplicate option value {}",
                        option.value
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Invalid(errors))
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalog failed validation: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl CatalogError {
    pub fn issues(&self) -> &[String] {
        match self {
            CatalogError::Invalid(issues) => issues,
            _ => &[],
        }
    }
}
