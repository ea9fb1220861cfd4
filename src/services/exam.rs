// src/services/exam.rs

//! The timed exam session.
//!
//! One `ExamController` owns at most one running exam. The slot moves
//! `Idle -> InProgress -> Submitted -> Idle`; the submitted state only exists
//! inside `finish`, which takes the exam out of the slot, scores it, persists
//! the attempt and leaves the slot idle again.
//!
//! Two paths reach `finish`: the student's submit and the clock task hitting
//! zero. Both run under the slot mutex and the first one takes the exam, so the
//! second sees `Idle` and does nothing.

use std::sync::Arc;
use std::time::Duration;

use tokio::{sync::Mutex, task::JoinHandle, time::MissedTickBehavior};

use crate::{
    error::AppError,
    models::{
        attempt::{AnswerSlot, Attempt, score_answers},
        quiz::{OPTION_COUNT, PublicQuestion, Quiz},
        user::Student,
        view::{ExamOutcome, ExamPhase, ExamStatus, ExamView, Section, SubmitTrigger},
    },
    services::review,
    storage::{Store, keys},
    utils::text::format_clock,
};

pub const TIME_UP_NOTICE: &str = "Time is up. Auto-submitting your exam.";
const NO_EXAM: &str = "No exam in progress.";

/// A running exam. Dropped as soon as it is submitted.
struct ActiveExam {
    generation: u64,
    /// Frozen copy taken at start; later edits to the stored quiz do not reach it.
    quiz: Quiz,
    student: Student,
    answers: Vec<AnswerSlot>,
    remaining_seconds: u64,
    clock: Option<JoinHandle<()>>,
}

enum ExamState {
    Idle,
    InProgress(ActiveExam),
}

struct ExamSlot {
    state: ExamState,
    /// Bumped on every start so a stale clock task can recognize itself.
    generation: u64,
    last_result: Option<ExamOutcome>,
}

/// Owner of the single exam session.
#[derive(Clone)]
pub struct ExamController {
    slot: Arc<Mutex<ExamSlot>>,
    store: Store,
    tick: Duration,
}

impl ExamController {
    /// `tick` is the wall-clock length of one countdown second.
    pub fn new(store: Store, tick: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(ExamSlot {
                state: ExamState::Idle,
                generation: 0,
                last_result: None,
            })),
            store,
            tick,
        }
    }

    /// Starts an exam on a live quiz for `student`.
    ///
    /// Rejected (and nothing allocated) when the quiz is missing or not live,
    /// or when another exam is still running.
    pub async fn start(&self, student: &Student, quiz_id: u64) -> Result<ExamView, AppError> {
        let mut slot = self.slot.lock().await;

        if let ExamState::InProgress(active) = &slot.state {
            return Err(AppError::Conflict(format!(
                "An exam is already in progress: {}.",
                active.quiz.title
            )));
        }

        let quiz = self
            .store
            .find_quiz(quiz_id)
            .await?
            .filter(|q| q.is_live)
            .ok_or_else(|| AppError::BadRequest("Quiz not available.".to_string()))?;

        slot.generation += 1;
        let generation = slot.generation;
        let remaining_seconds = quiz.duration_seconds();

        let view = ExamView {
            quiz_id: quiz.id,
            title: quiz.title.clone(),
            topic: quiz.topic_label().to_string(),
            questions: quiz
                .questions
                .iter()
                .enumerate()
                .map(|(i, q)| PublicQuestion::from_question(i, q))
                .collect(),
            remaining_seconds,
            clock: format_clock(remaining_seconds),
            section: Section::StudentExam,
        };

        slot.state = ExamState::InProgress(ActiveExam {
            generation,
            answers: vec![None; quiz.questions.len()],
            quiz,
            student: student.clone(),
            remaining_seconds,
            clock: None,
        });

        let clock = self.spawn_clock(generation);
        if let ExamState::InProgress(active) = &mut slot.state {
            active.clock = Some(clock);
        }

        tracing::info!(
            quiz_id,
            student = %student.reg_no,
            seconds = remaining_seconds,
            "Exam started"
        );

        Ok(view)
    }

    /// Records (or replaces) the answer for one question.
    pub async fn select_answer(
        &self,
        student: &Student,
        question_index: usize,
        option_index: usize,
    ) -> Result<ExamStatus, AppError> {
        let mut slot = self.slot.lock().await;

        let active = match &mut slot.state {
            ExamState::InProgress(active) => active,
            ExamState::Idle => return Err(AppError::BadRequest(NO_EXAM.to_string())),
        };
        ensure_owner(active, student)?;

        if question_index >= active.answers.len() {
            return Err(AppError::BadRequest(format!(
                "Question {} does not exist.",
                question_index + 1
            )));
        }
        if option_index >= OPTION_COUNT {
            return Err(AppError::BadRequest(
                "Option must be between A and D.".to_string(),
            ));
        }

        active.answers[question_index] = Some(option_index);
        tracing::debug!(question_index, option_index, "Answer selected");

        Ok(status_of(&slot.state))
    }

    /// Manual submission by the student who started the exam.
    pub async fn submit(&self, student: &Student) -> Result<ExamOutcome, AppError> {
        let mut slot = self.slot.lock().await;

        match &slot.state {
            ExamState::InProgress(active) => ensure_owner(active, student)?,
            ExamState::Idle => return Err(AppError::BadRequest(NO_EXAM.to_string())),
        }

        finish(&mut slot, &self.store, SubmitTrigger::Manual).await
    }

    pub async fn status(&self) -> ExamStatus {
        status_of(&self.slot.lock().await.state)
    }

    /// The most recent outcome, whichever path produced it.
    pub async fn last_result(&self) -> Option<ExamOutcome> {
        self.slot.lock().await.last_result.clone()
    }

    fn spawn_clock(&self, generation: u64) -> JoinHandle<()> {
        let slot = Arc::clone(&self.slot);
        let store = self.store.clone();
        let tick = self.tick;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + tick, tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Burst);

            loop {
                interval.tick().await;
                let mut guard = slot.lock().await;

                let expired = match &mut guard.state {
                    ExamState::InProgress(active) if active.generation == generation => {
                        active.remaining_seconds = active.remaining_seconds.saturating_sub(1);
                        tracing::trace!(clock = %format_clock(active.remaining_seconds), "tick");
                        active.remaining_seconds == 0
                    }
                    // Submitted or replaced while this tick was pending.
                    _ => return,
                };

                if expired {
                    tracing::info!(generation, "{}", TIME_UP_NOTICE);
                    match finish(&mut guard, &store, SubmitTrigger::TimeExpired).await {
                        Ok(_) => return,
                        // The exam is still in the slot at 00:00; retry on the next tick.
                        Err(e) => tracing::error!("Auto-submit failed: {:?}", e),
                    }
                }
            }
        })
    }
}

fn ensure_owner(active: &ActiveExam, student: &Student) -> Result<(), AppError> {
    if active.student.reg_no != student.reg_no {
        return Err(AppError::Conflict(
            "Another student's exam is in progress.".to_string(),
        ));
    }
    Ok(())
}

fn status_of(state: &ExamState) -> ExamStatus {
    match state {
        ExamState::Idle => ExamStatus {
            phase: ExamPhase::Idle,
            quiz_id: None,
            title: None,
            student_reg: None,
            remaining_seconds: 0,
            clock: format_clock(0),
            answers: Vec::new(),
        },
        ExamState::InProgress(active) => ExamStatus {
            phase: ExamPhase::InProgress,
            quiz_id: Some(active.quiz.id),
            title: Some(active.quiz.title.clone()),
            student_reg: Some(active.student.reg_no.clone()),
            remaining_seconds: active.remaining_seconds,
            clock: format_clock(active.remaining_seconds),
            answers: active.answers.clone(),
        },
    }
}

/// The shared submission path. Must be called with the slot locked.
///
/// The attempt is written before the exam leaves the slot: if the store fails
/// (or the caller goes away mid-write) the exam stays in progress with its
/// answers and can be submitted again.
async fn finish(
    slot: &mut ExamSlot,
    store: &Store,
    trigger: SubmitTrigger,
) -> Result<ExamOutcome, AppError> {
    let attempt = {
        let active = match &slot.state {
            ExamState::InProgress(active) => active,
            ExamState::Idle => return Err(AppError::BadRequest(NO_EXAM.to_string())),
        };

        Attempt {
            id: store.next_attempt_id().await?,
            quiz_id: active.quiz.id,
            student_reg: active.student.reg_no.clone(),
            answers: active.answers.clone(),
            score: score_answers(&active.quiz.questions, &active.answers),
            total: active.quiz.questions.len(),
            submitted_at: chrono::Utc::now(),
        }
    };

    let stored = attempt.clone();
    store
        .update_json(keys::ATTEMPTS, Vec::<Attempt>::new(), move |attempts| {
            attempts.push(stored)
        })
        .await?;

    let mut active = match std::mem::replace(&mut slot.state, ExamState::Idle) {
        ExamState::InProgress(active) => active,
        ExamState::Idle => return Err(AppError::BadRequest(NO_EXAM.to_string())),
    };

    // The expiry path runs inside the clock task itself; aborting it there would
    // cancel the task before it returns the outcome.
    if let Some(clock) = active.clock.take() {
        if trigger == SubmitTrigger::Manual {
            clock.abort();
        }
    }

    tracing::info!(
        attempt_id = attempt.id,
        quiz_id = attempt.quiz_id,
        student = %attempt.student_reg,
        score = attempt.score,
        total = attempt.total,
        trigger = ?trigger,
        "Exam submitted"
    );

    let outcome = ExamOutcome {
        trigger,
        notice: match trigger {
            SubmitTrigger::TimeExpired => Some(TIME_UP_NOTICE.to_string()),
            SubmitTrigger::Manual => None,
        },
        section: Section::StudentResult,
        review: review::result_view(Some(&active.quiz), &attempt, Section::StudentResult),
    };
    slot.last_result = Some(outcome.clone());

    Ok(outcome)
}
