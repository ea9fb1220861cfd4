// src/models/view.rs

//! View-models returned by the operations. Any client renders these; nothing
//! here touches storage.

use serde::Serialize;

use crate::models::{
    attempt::AnswerSlot,
    quiz::PublicQuestion,
    user::{Student, Teacher},
};

/// Named screens of the client. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    Home,
    StudentLogin,
    StudentDashboard,
    StudentExam,
    StudentResult,
    StudentPast,
    TeacherLogin,
    TeacherDashboard,
}

/// Who is logged in, and which section to open first.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub student: Option<Student>,
    pub teacher: Option<Teacher>,
    pub section: Section,
}

/// Per-question row of a result or past-attempt review.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReview {
    pub number: u32,
    pub text: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// Scored attempt joined with its quiz.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptReview {
    pub attempt_id: u64,
    pub quiz_id: u64,
    /// "Unknown quiz" when the quiz no longer exists.
    pub quiz_title: String,
    pub quiz_found: bool,
    pub student_reg: String,
    pub score: usize,
    pub total: usize,
    pub summary: String,
    pub answers: Vec<AnswerSlot>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub questions: Vec<QuestionReview>,
    /// `student-result` right after submitting, `student-past` when reopened later.
    pub section: Section,
}

/// What ended an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitTrigger {
    Manual,
    TimeExpired,
}

/// Result of a submission, handed to the result screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamOutcome {
    pub trigger: SubmitTrigger,
    pub notice: Option<String>,
    pub section: Section,
    pub review: AttemptReview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamPhase {
    Idle,
    InProgress,
}

/// The exam screen right after start.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamView {
    pub quiz_id: u64,
    pub title: String,
    pub topic: String,
    pub questions: Vec<PublicQuestion>,
    pub remaining_seconds: u64,
    pub clock: String,
    pub section: Section,
}

/// Live state of the exam slot.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamStatus {
    pub phase: ExamPhase,
    pub quiz_id: Option<u64>,
    pub title: Option<String>,
    pub student_reg: Option<String>,
    pub remaining_seconds: u64,
    pub clock: String,
    pub answers: Vec<AnswerSlot>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveQuizCard {
    pub id: u64,
    pub title: String,
    pub topic: String,
    pub duration_minutes: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PastAttemptCard {
    pub attempt_id: u64,
    pub quiz_title: String,
    pub score: usize,
    pub total: usize,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub title: String,
    pub student: Student,
    pub live_quizzes: Vec<LiveQuizCard>,
    /// Newest first.
    pub past_attempts: Vec<PastAttemptCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherQuizCard {
    pub id: u64,
    pub title: String,
    pub topic: String,
    pub duration_minutes: u32,
    pub question_count: usize,
    pub is_live: bool,
    /// "Live" or "Draft".
    pub badge: String,
    /// "Close Quiz" or "Make Live".
    pub toggle_label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDashboard {
    pub title: String,
    pub teacher: Teacher,
    pub quizzes: Vec<TeacherQuizCard>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRow {
    pub student_name: String,
    pub student_reg: String,
    pub score: usize,
    pub total: usize,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub quiz_id: u64,
    pub title: String,
    pub rows: Vec<PerformanceRow>,
}
