use crate::models::QuestionSet;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Rejects empty and whitespace-only titles.
fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Body of `POST /generate-mcq`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateMcqRequest {
    #[validate(custom(function = "non_blank", message = "course_title must not be blank"))]
    pub course_title: String,
    #[validate(custom(function = "non_blank", message = "quiz_title must not be blank"))]
    pub quiz_title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct McqResponse {
    pub questions: QuestionSet,
}

/// Body of `POST /generate-material`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateMaterialRequest {
    #[validate(custom(function = "non_blank", message = "course_title must not be blank"))]
    pub course_title: String,
    #[validate(custom(function = "non_blank", message = "material_title must not be blank"))]
    pub material_title: String,
    #[validate(custom(function = "non_blank", message = "lesson_title must not be blank"))]
    pub lesson_title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MaterialResponse {
    pub content: String,
}
