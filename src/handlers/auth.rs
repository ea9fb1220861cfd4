// src/handlers/auth.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        user::{Account, LoginResponse, Student, StudentLoginRequest, Teacher, TeacherLoginRequest},
        view::Section,
    },
    services::identity,
    storage::Store,
};

/// Logs a student in by registration number, creating the record on first use.
pub async fn student_login(
    State(store): State<Store>,
    Json(payload): Json<StudentLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.validate().is_err() {
        return Err(AppError::BadRequest(Student::MISSING_FIELDS.to_string()));
    }

    let student = identity::login::<Student>(&store, &payload.reg_no, &payload.name).await?;

    Ok(Json(LoginResponse {
        account: student,
        section: Student::DASHBOARD,
    }))
}

/// Logs a teacher in by teacher ID, creating the record on first use.
pub async fn teacher_login(
    State(store): State<Store>,
    Json(payload): Json<TeacherLoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.validate().is_err() {
        return Err(AppError::BadRequest(Teacher::MISSING_FIELDS.to_string()));
    }

    let teacher = identity::login::<Teacher>(&store, &payload.teacher_id, &payload.name).await?;

    Ok(Json(LoginResponse {
        account: teacher,
        section: Teacher::DASHBOARD,
    }))
}

pub async fn student_logout(State(store): State<Store>) -> Result<impl IntoResponse, AppError> {
    identity::logout::<Student>(&store).await?;
    Ok(Json(json!({ "section": Section::Home })))
}

pub async fn teacher_logout(State(store): State<Store>) -> Result<impl IntoResponse, AppError> {
    identity::logout::<Teacher>(&store).await?;
    Ok(Json(json!({ "section": Section::Home })))
}

/// Current student (route is behind `student_middleware`).
pub async fn current_student(Extension(student): Extension<Student>) -> impl IntoResponse {
    Json(student)
}

/// Current teacher (route is behind `teacher_middleware`).
pub async fn current_teacher(Extension(teacher): Extension<Teacher>) -> impl IntoResponse {
    Json(teacher)
}

/// Who is logged in and which section to open on load.
pub async fn session(State(store): State<Store>) -> Result<impl IntoResponse, AppError> {
    Ok(Json(identity::session_view(&store).await?))
}
