// src/services/identity.rs

use crate::{
    error::AppError,
    models::{
        user::{Account, Student, Teacher},
        view::{Section, SessionView},
    },
    storage::Store,
};

/// Logs in by natural key.
///
/// Creates the record when the key is new, otherwise overwrites the display
/// name. The stored record becomes the current session for its role.
/// Blank input is rejected before anything is written.
pub async fn login<A: Account>(store: &Store, key: &str, name: &str) -> Result<A, AppError> {
    let key = key.trim();
    let name = name.trim();

    if key.is_empty() || name.is_empty() {
        return Err(AppError::BadRequest(A::MISSING_FIELDS.to_string()));
    }

    let account = store
        .update_json(A::COLLECTION, Vec::<A>::new(), |accounts| {
            match accounts.iter_mut().find(|a| a.key() == key) {
                Some(existing) => {
                    existing.rename(name.to_string());
                    existing.clone()
                }
                None => {
                    let created = A::new(key.to_string(), name.to_string());
                    accounts.push(created.clone());
                    created
                }
            }
        })
        .await?;

    store.save_json(A::CURRENT, &account).await?;
    tracing::info!(role = ?A::ROLE, key = %account.key(), name = %account.name(), "Logged in");

    Ok(account)
}

/// Clears the current-session pointer. The account record stays.
pub async fn logout<A: Account>(store: &Store) -> Result<(), AppError> {
    store.remove(A::CURRENT).await?;
    tracing::info!(role = ?A::ROLE, "Logged out");
    Ok(())
}

pub async fn current<A: Account>(store: &Store) -> Result<Option<A>, AppError> {
    store.load_json(A::CURRENT, None).await
}

/// Student dashboard if a student is logged in, else teacher dashboard, else home.
pub async fn session_view(store: &Store) -> Result<SessionView, AppError> {
    let student = current::<Student>(store).await?;
    let teacher = current::<Teacher>(store).await?;

    let section = if student.is_some() {
        Section::StudentDashboard
    } else if teacher.is_some() {
        Section::TeacherDashboard
    } else {
        Section::Home
    };

    Ok(SessionView {
        student,
        teacher,
        section,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn repeat_login_updates_name_and_keeps_key() {
        let store = Store::in_memory();

        let first: Student = login(&store, "S1", "Bob").await.unwrap();
        let second: Student = login(&store, " S1 ", "Robert").await.unwrap();

        assert_eq!(first.reg_no, second.reg_no);
        assert_eq!(second.name, "Robert");

        let students = store.students().await.unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "Robert");
        assert_eq!(current::<Student>(&store).await.unwrap(), Some(second));
    }

    #[tokio::test]
    async fn blank_fields_are_rejected_without_writes() {
        let store = Store::in_memory();

        let err = login::<Teacher>(&store, "T1", "   ").await.unwrap_err();
        assert_eq!(err.notice(), "Please enter teacher ID and name.");

        assert!(store.teachers().await.unwrap().is_empty());
        assert!(current::<Teacher>(&store).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_clears_only_the_pointer() {
        let store = Store::in_memory();
        login::<Teacher>(&store, "T1", "Alice").await.unwrap();
        login::<Student>(&store, "S1", "Bob").await.unwrap();

        logout::<Student>(&store).await.unwrap();

        assert!(current::<Student>(&store).await.unwrap().is_none());
        assert_eq!(store.students().await.unwrap().len(), 1);

        let view = session_view(&store).await.unwrap();
        assert_eq!(view.section, Section::TeacherDashboard);
    }

    #[tokio::test]
    async fn landing_prefers_student_then_teacher_then_home() {
        let store = Store::in_memory();
        assert_eq!(session_view(&store).await.unwrap().section, Section::Home);

        login::<Student>(&store, "S1", "Bob").await.unwrap();
        login::<Teacher>(&store, "T1", "Alice").await.unwrap();
        assert_eq!(
            session_view(&store).await.unwrap().section,
            Section::StudentDashboard
        );
    }
}
