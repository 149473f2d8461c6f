use super::domain::{AnswerOption, CategoryDefinition, Polarity, QuestionDefinition};

pub(crate) const DELIVERY_EFFICIENCY: &str = "delivery_efficiency";
pub(crate) const DISTRIBUTION_EQUITY: &str = "distribution_equity";
pub(crate) const MAINTENANCE: &str = "maintenance";
pub(crate) const FINANCIAL_SUSTAINABILITY: &str = "financial_sustainability";
pub(crate) const USER_SATISFACTION: &str = "user_satisfaction";

pub(crate) fn categories() -> Vec<CategoryDefinition> {
    vec![
        CategoryDefinition::new(DELIVERY_EFFICIENCY, "Water Delivery Efficiency"),
        CategoryDefinition::new(DISTRIBUTION_EQUITY, "Distribution Equity"),
        CategoryDefinition::new(MAINTENANCE, "Maintenance & Infrastructure"),
        CategoryDefinition::new(FINANCIAL_SUSTAINABILITY, "Financial Sustainability"),
        CategoryDefinition::new(USER_SATISFACTION, "Water User Satisfaction"),
    ]
}

#[derive(Clone, Copy)]
enum OptionSet {
    Rating,
    Agreement,
    Frequency,
    Coverage,
}

impl OptionSet {
    const fn labels(self) -> [&'static str; 5] {
        match self {
            Self::Rating => ["Very poor", "Poor", "Fair", "Good", "Excellent"],
            Self::Agreement => [
                "Strongly disagree",
                "Disagree",
                "Neutral",
                "Agree",
                "Strongly agree",
            ],
            Self::Frequency => ["Never", "Rarely", "Sometimes", "Often", "Always"],
            Self::Coverage => ["Under 20%", "20-40%", "40-60%", "60-80%", "Over 80%"],
        }
    }

    fn options(self) -> Vec<AnswerOption> {
        self.labels()
            .into_iter()
            .zip(1..)
            .map(|(label, value)| AnswerOption {
                value,
                label: label.to_string(),
            })
            .collect()
    }
}

fn question(
    id: u32,
    category: &str,
    weight: f64,
    polarity: Polarity,
    options: OptionSet,
    text: &str,
) -> QuestionDefinition {
    QuestionDefinition {
        id,
        text: text.to_string(),
        category: category.to_string(),
        weight,
        polarity,
        options: options.options(),
    }
}

#[rustfmt::skip]
pub(crate) fn questions() -> Vec<QuestionDefinition> {
    use OptionSet::{Agreement, Coverage, Frequency, Rating};
    use Polarity::{HigherIsBetter as Higher, LowerIsBetter as Lower};

    vec![
        question(1, DELIVERY_EFFICIENCY, 2.0, Higher, Rating,
            "How would you rate the overall conveyance efficiency of the main canals?"),
        question(2, DELIVERY_EFFICIENCY, 1.5, Higher, Coverage,
            "What share of the diverted water reaches farm turnouts?"),
        question(3, DELIVERY_EFFICIENCY, 1.5, Lower, Frequency,
            "How often are scheduled water deliveries interrupted or delayed?"),
        question(4, DELIVERY_EFFICIENCY, 1.0, Higher, Frequency,
            "How often are flows measured at the main control structures?"),
        question(5, DELIVERY_EFFICIENCY, 1.0, Higher, Rating,
            "How well do gates and regulators hold their target water levels?"),
        question(6, DELIVERY_EFFICIENCY, 1.0, Lower, Frequency,
            "How often do canal reaches overflow or breach during the irrigation season?"),
        question(7, DELIVERY_EFFICIENCY, 1.0, Higher, Agreement,
            "Delivery schedules are matched to crop water requirements."),
        question(8, DISTRIBUTION_EQUITY, 2.0, Higher, Agreement,
            "Head-end and tail-end users receive comparable water supply."),
        question(9, DISTRIBUTION_EQUITY, 1.5, Higher, Frequency,
            "How often is the seasonal allocation plan published to all water users?"),
        question(10, DISTRIBUTION_EQUITY, 1.5, Lower, Frequency,
            "How often do tail-end users report water shortages?"),
        question(11, DISTRIBUTION_EQUITY, 1.0, Higher, Agreement,
            "Water rights and shares are applied consistently across user groups."),
        question(12, DISTRIBUTION_EQUITY, 1.0, Lower, Frequency,
            "How often do unauthorized withdrawals occur along the network?"),
        question(13, DISTRIBUTION_EQUITY, 1.0, Higher, Rating,
            "How effective is the mechanism for resolving allocation disputes?"),
        question(14, MAINTENANCE, 2.0, Higher, Rating,
            "What is the overall physical condition of canal linings and structures?"),
        question(15, MAINTENANCE, 1.5, Higher, Frequency,
            "How often is preventive maintenance carried out according to plan?"),
        question(16, MAINTENANCE, 1.5, Higher, Coverage,
            "What share of the network was desilted and cleared during the past year?"),
        question(17, MAINTENANCE, 1.0, Higher, Rating,
            "How quickly are reported structural failures repaired?"),
        question(18, MAINTENANCE, 1.0, Lower, Frequency,
            "How often do equipment breakdowns halt deliveries?"),
        question(19, MAINTENANCE, 1.0, Higher, Agreement,
            "Maintenance records are kept up to date and available for review."),
        question(20, MAINTENANCE, 1.0, Higher, Rating,
            "How adequate are the staff and equipment available for maintenance work?"),
        question(21, FINANCIAL_SUSTAINABILITY, 2.0, Higher, Coverage,
            "What share of assessed water charges is actually collected?"),
        question(22, FINANCIAL_SUSTAINABILITY, 1.5, Higher, Agreement,
            "Operating revenue covers routine operation and maintenance costs."),
        question(23, FINANCIAL_SUSTAINABILITY, 1.0, Higher, Frequency,
            "How often are financial statements prepared and shared with water users?"),
        question(24, FINANCIAL_SUSTAINABILITY, 1.0, Higher, Agreement,
            "Water tariffs reflect the actual cost of service."),
        question(25, FINANCIAL_SUSTAINABILITY, 1.0, Lower, Frequency,
            "How often are maintenance works postponed for lack of funds?"),
        question(26, FINANCIAL_SUSTAINABILITY, 1.0, Higher, Rating,
            "How transparent is the budgeting process to water user associations?"),
        question(27, USER_SATISFACTION, 2.0, Higher, Rating,
            "How satisfied are water users with the reliability of supply?"),
        question(28, USER_SATISFACTION, 1.5, Higher, Rating,
            "How satisfied are water users with the responsiveness of operating staff?"),
        question(29, USER_SATISFACTION, 1.0, Higher, Frequency,
            "How often are water users consulted before operational decisions?"),
        question(30, USER_SATISFACTION, 1.0, Higher, Agreement,
            "Water users trust the information they receive about delivery schedules."),
        question(31, USER_SATISFACTION, 1.0, Lower, Frequency,
            "How often do water users file formal complaints?"),
        question(32, USER_SATISFACTION, 1.0, Higher, Agreement,
            "Water users would support continued management under the current arrangement."),
    ]
}
