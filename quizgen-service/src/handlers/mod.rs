//! HTTP handlers for the quizgen service.

pub mod generation;
pub mod health;
