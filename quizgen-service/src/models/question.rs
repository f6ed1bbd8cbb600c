//! Multiple-choice question records returned to clients.

use serde::{Deserialize, Deserializer, Serialize};

/// Every question carries exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

/// One answer choice of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub text: String,
    #[serde(default)]
    pub is_correct: bool,
}

/// A multiple-choice question with exactly one correct option.
///
/// Unknown fields emitted by the model are ignored when deserializing, so
/// only `question`, `options` and `explanation` ever reach the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<AnswerOption>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub explanation: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Question {
    /// Number of options flagged as correct.
    pub fn correct_count(&self) -> usize {
        self.options.iter().filter(|o| o.is_correct).count()
    }

    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}

/// Questions produced for a single request, in model order.
pub type QuestionSet = Vec<Question>;
