// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, authoring, exam, review},
    state::AppState,
    utils::session::{student_middleware, teacher_middleware},
};

/// Assembles the main application router.
///
/// * Student and teacher routes sit behind middleware that loads the current
///   session from the store.
/// * Applies global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        HeaderValue::from_static("http://localhost:3000"),
        HeaderValue::from_static("http://127.0.0.1:3000"),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let student_routes = Router::new()
        .route("/login", post(auth::student_login))
        .route("/logout", post(auth::student_logout))
        .merge(
            Router::new()
                .route("/me", get(auth::current_student))
                .layer(middleware::from_fn_with_state(state.clone(), student_middleware)),
        );

    let teacher_routes = Router::new()
        .route("/login", post(auth::teacher_login))
        .route("/logout", post(auth::teacher_logout))
        .merge(
            Router::new()
                .route("/me", get(auth::current_teacher))
                .layer(middleware::from_fn_with_state(state.clone(), teacher_middleware)),
        );

    let authoring_routes = Router::new()
        .route(
            "/questions",
            get(authoring::list_draft)
                .post(authoring::add_question)
                .delete(authoring::clear_draft),
        )
        .merge(
            Router::new()
                .route("/quizzes", post(authoring::save_quiz))
                .layer(middleware::from_fn_with_state(state.clone(), teacher_middleware)),
        );

    let quiz_routes = Router::new()
        .route("/{id}/attempts", get(review::list_attempts))
        .merge(
            Router::new()
                .route("/{id}/toggle", post(authoring::toggle_publish))
                .route("/{id}/performance", get(review::quiz_performance))
                .layer(middleware::from_fn_with_state(state.clone(), teacher_middleware)),
        );

    let dashboard_routes = Router::new()
        .route(
            "/student",
            get(review::student_dashboard)
                .layer(middleware::from_fn_with_state(state.clone(), student_middleware)),
        )
        .route(
            "/teacher",
            get(review::teacher_dashboard)
                .layer(middleware::from_fn_with_state(state.clone(), teacher_middleware)),
        );

    let exam_routes = Router::new()
        .route("/status", get(exam::exam_status))
        .route("/result", get(exam::last_result))
        .merge(
            Router::new()
                .route("/start", post(exam::start_exam))
                .route("/answers", put(exam::select_answer))
                .route("/submit", post(exam::submit_exam))
                .layer(middleware::from_fn_with_state(state.clone(), student_middleware)),
        );

    let attempt_routes = Router::new().route("/{id}", get(review::get_attempt));

    Router::new()
        .route("/api/session", get(auth::session))
        .nest("/api/students", student_routes)
        .nest("/api/teachers", teacher_routes)
        .nest("/api/authoring", authoring_routes)
        .nest("/api/quizzes", quiz_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/exam", exam_routes)
        .nest("/api/attempts", attempt_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
