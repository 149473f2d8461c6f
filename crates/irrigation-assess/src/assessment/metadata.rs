use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NETWORK_NAME: &str = "networkName";
pub const NETWORK_LOCATION: &str = "networkLocation";
pub const RESPONDENT_NAME: &str = "fillerName";
pub const EMAIL: &str = "email";
pub const PHONE: &str = "phone";

const REQUIRED_FIELDS: [&str; 3] = [NETWORK_NAME, NETWORK_LOCATION, RESPONDENT_NAME];
const MIN_PHONE_DIGITS: usize = 7;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

/// Free-form respondent details carried alongside an answer set.
///
/// Never influences scoring. Unknown keys are kept so exports round-trip them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RespondentMetadata(BTreeMap<String, String>);

impl RespondentMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn network_name(&self) -> Option<&str> {
        self.get(NETWORK_NAME)
    }

    /// Applies the intake form checks, reporting every failing field.
    pub fn validate(&self) -> Result<(), MetadataError> {
        let mut problems = Vec::new();

        for field in REQUIRED_FIELDS {
            if self.trimmed(field).is_none() {
                problems.push(format!("{field}: required"));
            }
        }

        match self.trimmed(EMAIL) {
            Some(email) if !EMAIL_SHAPE.is_match(email) => {
                problems.push(format!("{EMAIL}: '{email}' is not a valid address"))
            }
            Some(_) => {}
            None => problems.push(format!("{EMAIL}: required")),
        }

        match self.trimmed(PHONE) {
            Some(phone) => {
                let digits = phone.chars().filter(char::is_ascii_digit).count();
                if digits < MIN_PHONE_DIGITS {
                    problems.push(format!(
                        "{PHONE}: expected at least {MIN_PHONE_DIGITS} digits, found {digits}"
                    ));
                }
            }
            None => problems.push(format!("{PHONE}: required")),
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(MetadataError(problems))
        }
    }

    fn trimmed(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("respondent details are incomplete: {}", .0.join("; "))]
pub struct MetadataError(pub Vec<String>);
