// src/utils/session.rs

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError,
    models::user::{Account, Student, Teacher},
    services::identity,
    storage::Store,
};

/// Axum Middleware: current student.
///
/// Loads the current-student pointer and injects the `Student` into the request
/// extensions. Without one the request ends with 401, the login notice and the
/// student login section.
pub async fn student_middleware(
    State(store): State<Store>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    require_account::<Student>(&store, req, next).await
}

/// Axum Middleware: current teacher. Same contract as `student_middleware`.
pub async fn teacher_middleware(
    State(store): State<Store>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    require_account::<Teacher>(&store, req, next).await
}

async fn require_account<A: Account>(
    store: &Store,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let account = identity::current::<A>(store)
        .await?
        .ok_or_else(|| AppError::LoginRequired(A::NOT_LOGGED_IN.to_string(), A::LOGIN))?;

    req.extensions_mut().insert(account);
    Ok(next.run(req).await)
}
