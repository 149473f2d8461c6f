use serde::{Deserialize, Serialize};

/// Closed integer range every answer option is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerScale {
    pub min: i64,
    pub max: i64,
}

impl AnswerScale {
    pub const STANDARD: Self = Self { min: 1, max: 5 };

    /// Upper bound on the number of distinct answers a scale may offer.
    pub const MAX_VALUES: i64 = 101;

    pub const fn contains(self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    pub const fn span(self) -> i64 {
        self.max.saturating_sub(self.min)
    }

    /// Distinct answers on the scale; `None` when `max - min` does not fit in an `i64`.
    pub const fn value_count(self) -> Option<i64> {
        match self.max.checked_sub(self.min) {
            Some(span) => span.checked_add(1),
            None => None,
        }
    }

    /// At least two values and no more than [`AnswerScale::MAX_VALUES`].
    pub fn is_usable(self) -> bool {
        matches!(self.value_count(), Some(count) if (2..=Self::MAX_VALUES).contains(&count))
    }

    pub fn values(self) -> impl Iterator<Item = i64> {
        self.min..=self.max
    }
}

impl Default for AnswerScale {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Which end of the scale counts as the better outcome for a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    #[default]
    HigherIsBetter,
    LowerIsBetter,
}

impl Polarity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HigherIsBetter => "Higher is better",
            Self::LowerIsBetter => "Lower is better",
        }
    }

    /// Maps a raw answer onto the higher-is-better orientation of `scale`.
    /// `answer` must already lie on the scale.
    pub const fn orient(self, answer: i64, scale: AnswerScale) -> i64 {
        match self {
            Self::HigherIsBetter => answer,
            Self::LowerIsBetter => scale.max - (answer - scale.min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryDefinition {
    pub key: String,
    pub label: String,
}

impl CategoryDefinition {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnswerOption {
    pub value: i64,
    pub label: String,
}

/// One question of the instrument. Only `category`, `weight`, and `polarity`
/// influence scoring; the text and option labels are passed through for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuestionDefinition {
    pub id: u32,
    pub text: String,
    pub category: String,
    pub weight: f64,
    #[serde(default)]
    pub polarity: Polarity,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
}

impl QuestionDefinition {
    pub fn option_label(&self, value: i64) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_is_better_mirrors_the_scale() {
        let scale = AnswerScale::STANDARD;
        assert_eq!(Polarity::LowerIsBetter.orient(1, scale), 5);
        assert_eq!(Polarity::LowerIsBetter.orient(3, scale), 3);
        assert_eq!(Polarity::LowerIsBetter.orient(5, scale), 1);
        assert_eq!(Polarity::HigherIsBetter.orient(4, scale), 4);
    }

    #[test]
    fn value_count_guards_against_overflow() {
        assert_eq!(AnswerScale::STANDARD.value_count(), Some(5));
        let full = AnswerScale {
            min: i64::MIN,
            max: i64::MAX,
        };
        assert_eq!(full.value_count(), None);
        assert!(!full.is_usable());
        assert_eq!(full.span(), i64::MAX);
        assert!(!AnswerScale { min: 1, max: 1 }.is_usable());
        assert!(!AnswerScale { min: 0, max: 101 }.is_usable());
        assert!(AnswerScale { min: 0, max: 100 }.is_usable());
    }

    #[test]
    fn orient_stays_in_range_near_integer_limits() {
        let scale = AnswerScale {
            min: i64::MAX - 4,
            max: i64::MAX,
        };
        assert_eq!(Polarity::LowerIsBetter.orient(i64::MAX, scale), i64::MAX - 4);
        assert_eq!(Polarity::LowerIsBetter.orient(i64::MAX - 4, scale), i64::MAX);
    }

    #[test]
    fn polarity_defaults_to_higher_is_better_when_omitted() {
        let question: QuestionDefinition = serde_json::from_str(
            r#"{"id": 7, "text": "Gate condition", "category": "maintenance", "weight": 1.0}"#,
        )
        .expect("question parses");
        assert_eq!(question.polarity, Polarity::HigherIsBetter);
        assert!(question.options.is_empty());
    }
}
