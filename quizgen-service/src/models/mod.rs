pub mod question;

pub use question::{AnswerOption, Question, QuestionSet, OPTIONS_PER_QUESTION};
