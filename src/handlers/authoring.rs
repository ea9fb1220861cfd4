// src/handlers/authoring.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    config::Config,
    error::AppError,
    models::{
        quiz::{AddQuestionRequest, SaveQuizRequest},
        user::Teacher,
        view::Section,
    },
    services::catalog::{self, DraftBoard},
    storage::Store,
};

/// Lists the questions of the quiz being composed.
pub async fn list_draft(State(drafts): State<DraftBoard>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(drafts.questions()?))
}

/// Appends a question to the draft. Returns the whole draft.
pub async fn add_question(
    State(drafts): State<DraftBoard>,
    Json(payload): Json<AddQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let questions = drafts.add_question(payload)?;
    Ok((StatusCode::CREATED, Json(questions)))
}

/// Discards every draft question.
pub async fn clear_draft(State(drafts): State<DraftBoard>) -> Result<impl IntoResponse, AppError> {
    drafts.clear()?;
    Ok(StatusCode::NO_CONTENT)
}

/// Saves the draft as a new (not yet live) quiz owned by the current teacher.
pub async fn save_quiz(
    State(store): State<Store>,
    State(drafts): State<DraftBoard>,
    State(config): State<Config>,
    Extension(teacher): Extension<Teacher>,
    Json(payload): Json<SaveQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = catalog::save_quiz(
        &store,
        &drafts,
        &teacher,
        payload,
        config.default_quiz_duration,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "quiz": quiz,
            "message": "Quiz saved as draft. You can publish it from Dashboard.",
            "section": Section::TeacherDashboard,
        })),
    ))
}

/// Makes a quiz live, or closes it.
pub async fn toggle_publish(
    State(store): State<Store>,
    Extension(teacher): Extension<Teacher>,
    Path(quiz_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = catalog::toggle_publish(&store, &teacher, quiz_id).await?;
    Ok(Json(quiz))
}
