//! Prompt construction for the generation endpoints.

use crate::dtos::{GenerateMaterialRequest, GenerateMcqRequest};
use crate::services::providers::ChatMessage;

/// Questions requested per quiz.
pub const QUESTIONS_PER_QUIZ: usize = 5;

const MCQ_SYSTEM_PROMPT: &str = "You are an expert educator creating high-quality multiple choice \
questions. Each question MUST have exactly 4 options and one correct answer. Always return ONLY \
valid JSON. Do NOT include markdown, code blocks, or comments.";

const MATERIAL_SYSTEM_PROMPT: &str =
    "You are an expert educator creating high-quality educational content.";

const MCQ_RECORD_SHAPE: &str = r#"{
    "question": "The question text",
    "options": [
        { "text": "Option A text", "is_correct": false },
        { "text": "Option B text", "is_correct": false },
        { "text": "Option C text", "is_correct": false },
        { "text": "Option D text", "is_correct": false }
    ],
    "explanation": "Brief explanation of the correct answer"
}"#;

pub fn mcq_messages(req: &GenerateMcqRequest) -> Vec<ChatMessage> {
    let prompt = format!(
        "Generate {count} multiple-choice questions (MCQs) for a quiz.
Course Title: {course}
Quiz Title: {quiz}
Description: {description}

IMPORTANT: Each question MUST have EXACTLY 4 options (A, B, C, D) and ONE correct answer.

For each question:
1. Write a clear and concise question
2. Provide EXACTLY 4 options labeled A, B, C, and D
3. Specify which option is correct (A, B, C, or D)
4. Include a brief explanation for why the correct answer is right

Format each question as a JSON object with this EXACT structure (NO comments, NO markdown, NO trailing commas):
{shape}

Return ONLY a JSON array of these objects. Do NOT include any markdown, code blocks, or comments.",
        count = QUESTIONS_PER_QUIZ,
        course = req.course_title,
        quiz = req.quiz_title,
        description = req.description,
        shape = MCQ_RECORD_SHAPE,
    );

    vec![ChatMessage::system(MCQ_SYSTEM_PROMPT), ChatMessage::user(prompt)]
}

pub fn material_messages(req: &GenerateMaterialRequest) -> Vec<ChatMessage> {
    let prompt = format!(
        "As an expert educator, create comprehensive educational material for the following:
Course: {course}
Lesson: {lesson}
Material Topic: {topic}

Please provide:
1. A detailed explanation of the topic
2. Key concepts and definitions
3. Examples and applications
4. Practice questions or exercises
5. Additional resources or references

Format the content in a clear, structured way that's easy for students to understand.",
        course = req.course_title,
        lesson = req.lesson_title,
        topic = req.material_title,
    );

    vec![
        ChatMessage::system(MATERIAL_SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ]
}
