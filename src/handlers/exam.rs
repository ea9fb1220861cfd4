// src/handlers/exam.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};

use crate::{
    error::AppError,
    models::{
        attempt::{SelectAnswerRequest, StartExamRequest},
        user::Student,
    },
    services::exam::ExamController,
};

/// Starts a timed exam on a live quiz.
pub async fn start_exam(
    State(exam): State<ExamController>,
    Extension(student): Extension<Student>,
    Json(req): Json<StartExamRequest>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(exam.start(&student, req.quiz_id).await?))
}

/// Current phase, clock and answers.
pub async fn exam_status(State(exam): State<ExamController>) -> impl IntoResponse {
    Json(exam.status().await)
}

/// Selects (or changes) the answer to one question.
pub async fn select_answer(
    State(exam): State<ExamController>,
    Extension(student): Extension<Student>,
    Json(req): Json<SelectAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let status = exam
        .select_answer(&student, req.question_index, req.option_index)
        .await?;
    Ok(Json(status))
}

/// Submits the running exam and returns the scored result.
pub async fn submit_exam(
    State(exam): State<ExamController>,
    Extension(student): Extension<Student>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(exam.submit(&student).await?))
}

/// The last result, including one produced by the clock running out.
pub async fn last_result(State(exam): State<ExamController>) -> Result<impl IntoResponse, AppError> {
    let outcome = exam
        .last_result()
        .await
        .ok_or_else(|| AppError::NotFound("No exam has been submitted yet.".to_string()))?;
    Ok(Json(outcome))
}
