// src/services/review.rs

//! Read-only views over quizzes and attempts. Nothing here writes to the store.

use crate::{
    error::AppError,
    models::{
        attempt::Attempt,
        quiz::Quiz,
        user::{Student, Teacher},
        view::{
            AttemptReview, LiveQuizCard, PastAttemptCard, PerformanceReport, PerformanceRow,
            QuestionReview, Section, StudentDashboard, TeacherDashboard, TeacherQuizCard,
        },
    },
    storage::Store,
};

const UNKNOWN_QUIZ: &str = "Unknown quiz";
const NOT_ANSWERED: &str = "Not answered";

/// Joins an attempt with its quiz.
///
/// When the quiz is gone the review still renders: the title reads
/// "Unknown quiz" and there are no per-question rows.
pub fn result_view(quiz: Option<&Quiz>, attempt: &Attempt, section: Section) -> AttemptReview {
    let questions = quiz
        .map(|quiz| {
            quiz.questions
                .iter()
                .enumerate()
                .map(|(idx, q)| {
                    let chosen = attempt.answers.get(idx).copied().flatten();
                    QuestionReview {
                        number: idx as u32 + 1,
                        text: q.text.clone(),
                        your_answer: chosen
                            .and_then(|i| q.option_label(i))
                            .unwrap_or_else(|| NOT_ANSWERED.to_string()),
                        correct_answer: q
                            .option_label(q.correct_index)
                            .unwrap_or_else(|| "Unknown".to_string()),
                        is_correct: chosen == Some(q.correct_index),
                        explanation: q.explanation_label().to_string(),
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    AttemptReview {
        attempt_id: attempt.id,
        quiz_id: attempt.quiz_id,
        quiz_title: quiz
            .map(|q| q.title.clone())
            .unwrap_or_else(|| UNKNOWN_QUIZ.to_string()),
        quiz_found: quiz.is_some(),
        student_reg: attempt.student_reg.clone(),
        score: attempt.score,
        total: attempt.total,
        summary: format!("You scored {} out of {}.", attempt.score, attempt.total),
        answers: attempt.answers.clone(),
        submitted_at: attempt.submitted_at,
        questions,
        section,
    }
}

/// Reviews one past attempt by ID.
pub async fn attempt_review(store: &Store, attempt_id: u64) -> Result<AttemptReview, AppError> {
    let attempt = store
        .attempts()
        .await?
        .into_iter()
        .find(|a| a.id == attempt_id)
        .ok_or_else(|| AppError::NotFound("Attempt not found.".to_string()))?;

    let quiz = store.find_quiz(attempt.quiz_id).await?;
    if quiz.is_none() {
        tracing::warn!(attempt_id, quiz_id = attempt.quiz_id, "Attempt refers to a missing quiz");
    }

    Ok(result_view(quiz.as_ref(), &attempt, Section::StudentPast))
}

/// All attempts of one student on one quiz, oldest first.
pub async fn attempts_for(store: &Store, quiz_id: u64, student_reg: &str) -> Result<Vec<Attempt>, AppError> {
    let student_reg = student_reg.trim();
    Ok(store
        .attempts()
        .await?
        .into_iter()
        .filter(|a| a.quiz_id == quiz_id && a.student_reg == student_reg)
        .collect())
}

pub async fn student_dashboard(store: &Store, student: &Student) -> Result<StudentDashboard, AppError> {
    let quizzes = store.quizzes().await?;

    let live_quizzes = quizzes
        .iter()
        .filter(|q| q.is_live)
        .map(|q| LiveQuizCard {
            id: q.id,
            title: q.title.clone(),
            topic: q.topic_label().to_string(),
            duration_minutes: q.duration_minutes,
        })
        .collect();

    let mut mine: Vec<Attempt> = store
        .attempts()
        .await?
        .into_iter()
        .filter(|a| a.student_reg == student.reg_no)
        .collect();
    mine.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at).then(b.id.cmp(&a.id)));

    let past_attempts = mine
        .into_iter()
        .map(|a| PastAttemptCard {
            attempt_id: a.id,
            quiz_title: quizzes
                .iter()
                .find(|q| q.id == a.quiz_id)
                .map(|q| q.title.clone())
                .unwrap_or_else(|| UNKNOWN_QUIZ.to_string()),
            score: a.score,
            total: a.total,
            submitted_at: a.submitted_at,
        })
        .collect();

    Ok(StudentDashboard {
        title: format!("Student Dashboard - {}", student.name),
        student: student.clone(),
        live_quizzes,
        past_attempts,
    })
}

pub async fn teacher_dashboard(store: &Store, teacher: &Teacher) -> Result<TeacherDashboard, AppError> {
    let quizzes = store
        .quizzes()
        .await?
        .into_iter()
        .filter(|q| q.created_by == teacher.teacher_id)
        .map(|q| TeacherQuizCard {
            id: q.id,
            topic: q.topic_label().to_string(),
            title: q.title,
            duration_minutes: q.duration_minutes,
            question_count: q.questions.len(),
            is_live: q.is_live,
            badge: if q.is_live { "Live" } else { "Draft" }.to_string(),
            toggle_label: if q.is_live { "Close Quiz" } else { "Make Live" }.to_string(),
        })
        .collect();

    Ok(TeacherDashboard {
        title: format!("Teacher Dashboard - {}", teacher.name),
        teacher: teacher.clone(),
        quizzes,
    })
}

/// Every attempt on a quiz, labelled with the student's current display name.
pub async fn quiz_performance(store: &Store, quiz_id: u64) -> Result<PerformanceReport, AppError> {
    let quiz = store
        .find_quiz(quiz_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Quiz not found.".to_string()))?;

    let students = store.students().await?;
    let rows = store
        .attempts()
        .await?
        .into_iter()
        .filter(|a| a.quiz_id == quiz_id)
        .map(|a| PerformanceRow {
            student_name: students
                .iter()
                .find(|s| s.reg_no == a.student_reg)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| a.student_reg.clone()),
            student_reg: a.student_reg,
            score: a.score,
            total: a.total,
            submitted_at: a.submitted_at,
        })
        .collect();

    Ok(PerformanceReport {
        quiz_id,
        title: quiz.title,
        rows,
    })
}
