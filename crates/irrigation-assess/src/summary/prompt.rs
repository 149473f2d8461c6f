use std::fmt::Write;

use super::request::SummaryRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub preamble: String,
    pub message: String,
}

/// Builds the system preamble and user message for an already rounded request.
pub fn build_prompt(request: &SummaryRequest, language: &str) -> ChatPrompt {
    let preamble = format!(
        "You are a decision-support assistant for irrigation network assessments.\n\
         Base your analysis only on the summarized data: the overall performance \
         percentage and the averages of the five categories.\n\
         Reply in {language}, in three short sections:\n\
         1) An interpretation of the overall performance level (one sentence).\n\
         2) Strengths and weaknesses per category (at most 5 points, highest score first).\n\
         3) Three short, concrete recommendations that can be acted on within the next 3 months.\n\
         Quote the input percentages and make no claims beyond the data."
    );

    let mut message = format!(
        "Summary data:\n- Overall performance: {}%\n- Categories:",
        request.overall_pct
    );
    for (index, category) in request.categories.iter().enumerate() {
        let _ = write!(
            message,
            "\n  {}) {}: {}%",
            index + 1,
            category.label,
            category.score_pct
        );
    }

    ChatPrompt { preamble, message }
}
