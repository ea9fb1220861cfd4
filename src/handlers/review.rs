// src/handlers/review.rs

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::{
    error::AppError,
    models::{
        attempt::AttemptListParams,
        user::{Student, Teacher},
    },
    services::review,
    storage::Store,
};

pub async fn student_dashboard(
    State(store): State<Store>,
    Extension(student): Extension<Student>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(review::student_dashboard(&store, &student).await?))
}

pub async fn teacher_dashboard(
    State(store): State<Store>,
    Extension(teacher): Extension<Teacher>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(review::teacher_dashboard(&store, &teacher).await?))
}

/// Scores of every student who attempted the quiz.
pub async fn quiz_performance(
    State(store): State<Store>,
    Path(quiz_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(review::quiz_performance(&store, quiz_id).await?))
}

/// One student's attempts on one quiz.
pub async fn list_attempts(
    State(store): State<Store>,
    Path(quiz_id): Path<u64>,
    Query(params): Query<AttemptListParams>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(review::attempts_for(&store, quiz_id, &params.student).await?))
}

/// Full review of a past attempt; tolerates a deleted quiz.
pub async fn get_attempt(
    State(store): State<Store>,
    Path(attempt_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(review::attempt_review(&store, attempt_id).await?))
}
