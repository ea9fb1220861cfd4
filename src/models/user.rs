// src/models/user.rs

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use validator::Validate;

use crate::{
    models::view::Section,
    storage::keys,
    utils::text::not_blank,
};

/// The two kinds of actor that can hold a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
}

/// Represents one entry of the 'quiz_students' collection.
/// Keyed by registration number; the name is overwritten on every login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub reg_no: String,
    pub name: String,
}

/// Represents one entry of the 'quiz_teachers' collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub teacher_id: String,
    pub name: String,
}

/// A record that can log in by natural key.
///
/// Each implementor names the collection it lives in and the pointer key that
/// holds the current session for its role.
pub trait Account: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const ROLE: Role;
    const COLLECTION: &'static str;
    const CURRENT: &'static str;
    /// Notice shown when either login field is blank.
    const MISSING_FIELDS: &'static str;
    /// Notice shown when a role-only action runs without a session.
    const NOT_LOGGED_IN: &'static str;
    const DASHBOARD: Section;
    const LOGIN: Section;

    fn new(key: String, name: String) -> Self;
    fn key(&self) -> &str;
    fn name(&self) -> &str;
    fn rename(&mut self, name: String);
}

impl Account for Student {
    const ROLE: Role = Role::Student;
    const COLLECTION: &'static str = keys::STUDENTS;
    const CURRENT: &'static str = keys::CURRENT_STUDENT;
    const MISSING_FIELDS: &'static str = "Please enter registration number and name.";
    const NOT_LOGGED_IN: &'static str = "Please login as student first.";
    const DASHBOARD: Section = Section::StudentDashboard;
    const LOGIN: Section = Section::StudentLogin;

    fn new(key: String, name: String) -> Self {
        Self { reg_no: key, name }
    }

    fn key(&self) -> &str {
        &self.reg_no
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn rename(&mut self, name: String) {
        self.name = name;
    }
}

impl Account for Teacher {
    const ROLE: Role = Role::Teacher;
    const COLLECTION: &'static str = keys::TEACHERS;
    const CURRENT: &'static str = keys::CURRENT_TEACHER;
    const MISSING_FIELDS: &'static str = "Please enter teacher ID and name.";
    const NOT_LOGGED_IN: &'static str = "No teacher logged in.";
    const DASHBOARD: Section = Section::TeacherDashboard;
    const LOGIN: Section = Section::TeacherLogin;

    fn new(key: String, name: String) -> Self {
        Self {
            teacher_id: key,
            name,
        }
    }

    fn key(&self) -> &str {
        &self.teacher_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn rename(&mut self, name: String) {
        self.name = name;
    }
}

/// DTO for student login. Missing fields deserialize as blank so they get the
/// same notice as whitespace-only input.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentLoginRequest {
    #[serde(default)]
    #[validate(custom(function = not_blank))]
    pub reg_no: String,
    #[serde(default)]
    #[validate(custom(function = not_blank))]
    pub name: String,
}

/// DTO for teacher login.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeacherLoginRequest {
    #[serde(default)]
    #[validate(custom(function = not_blank))]
    pub teacher_id: String,
    #[serde(default)]
    #[validate(custom(function = not_blank))]
    pub name: String,
}

/// Response for a login: the stored record and where to go next.
#[derive(Debug, Serialize)]
pub struct LoginResponse<A> {
    pub account: A,
    pub section: Section,
}
