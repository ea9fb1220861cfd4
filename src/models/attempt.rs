// src/models/attempt.rs

use serde::{Deserialize, Serialize};

use crate::models::quiz::Question;

/// One answer slot. `None` is the "unanswered" sentinel, serialized as `null`,
/// so it can never be confused with option 0.
pub type AnswerSlot = Option<usize>;

/// Represents one entry of the 'quiz_attempts' collection.
/// Created once per submission and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub id: u64,
    pub quiz_id: u64,
    pub student_reg: String,
    pub answers: Vec<AnswerSlot>,
    pub score: usize,
    pub total: usize,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Counts the slots whose answer equals the question's correct index.
/// Unanswered slots and slots beyond the answer buffer never count.
pub fn score_answers(questions: &[Question], answers: &[AnswerSlot]) -> usize {
    questions
        .iter()
        .zip(answers)
        .filter(|(q, answer)| **answer == Some(q.correct_index))
        .count()
}

/// DTO for selecting an answer during an exam.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectAnswerRequest {
    pub question_index: usize,
    pub option_index: usize,
}

/// DTO for starting an exam.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartExamRequest {
    pub quiz_id: u64,
}

/// Query parameters for listing one student's attempts on a quiz.
#[derive(Debug, Deserialize)]
pub struct AttemptListParams {
    pub student: String,
}
