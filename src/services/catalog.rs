// src/services/catalog.rs

use std::sync::{Arc, Mutex, MutexGuard};

use validator::Validate;

use crate::{
    error::AppError,
    models::{
        quiz::{AddQuestionRequest, DraftQuestion, OPTION_COUNT, Question, Quiz, SaveQuizRequest},
        user::Teacher,
    },
    storage::{Store, keys},
};

const MISSING_QUESTION_FIELDS: &str = "Please fill question and all four options.";
const CORRECT_OUT_OF_RANGE: &str = "Correct option must be between A and D.";
const MISSING_TITLE: &str = "Please enter a quiz title.";
const EMPTY_DRAFT: &str = "Please add at least one question.";
const EXPLANATION_TOO_LONG: &str = "Explanation must be at most 2000 characters.";
const TITLE_TOO_LONG: &str = "Quiz title must be at most 200 characters.";
const TOPIC_TOO_LONG: &str = "Topic must be at most 200 characters.";
const DURATION_OUT_OF_RANGE: &str = "Duration must be between 1 and 1440 minutes.";

/// The question list a teacher is composing. Lives only in memory.
#[derive(Clone, Default)]
pub struct DraftBoard {
    questions: Arc<Mutex<Vec<Question>>>,
}

impl DraftBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Question>>, AppError> {
        self.questions
            .lock()
            .map_err(|_| AppError::InternalServerError("draft board poisoned".to_string()))
    }

    /// Validates and appends a question; returns the whole draft.
    ///
    /// Fields are stored trimmed and otherwise exactly as typed. Escaping for
    /// display is up to whoever renders them.
    pub fn add_question(&self, req: AddQuestionRequest) -> Result<Vec<DraftQuestion>, AppError> {
        if let Err(errors) = req.validate() {
            let fields = errors.field_errors();
            let notice = if fields.contains_key("text") || fields.contains_key("options") {
                MISSING_QUESTION_FIELDS
            } else if fields.contains_key("correct_index") {
                CORRECT_OUT_OF_RANGE
            } else {
                EXPLANATION_TOO_LONG
            };
            return Err(AppError::BadRequest(notice.to_string()));
        }

        let options: [String; OPTION_COUNT] = req
            .options
            .iter()
            .map(|o| o.trim().to_string())
            .collect::<Vec<_>>()
            .try_into()
            .map_err(|_| AppError::BadRequest(MISSING_QUESTION_FIELDS.to_string()))?;

        let mut draft = self.lock()?;
        let question = Question {
            id: draft.len() as u32 + 1,
            text: req.text.trim().to_string(),
            options,
            correct_index: req.correct_index,
            explanation: req.explanation.trim().to_string(),
        };
        draft.push(question);

        Ok(draft.iter().map(DraftQuestion::from).collect())
    }

    pub fn questions(&self) -> Result<Vec<DraftQuestion>, AppError> {
        Ok(self.lock()?.iter().map(DraftQuestion::from).collect())
    }

    pub fn len(&self) -> usize {
        self.lock().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.lock()?.clear();
        Ok(())
    }

    fn snapshot(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.lock()?.clone())
    }

    /// Drops the first `count` questions (the ones just saved) and renumbers the rest.
    fn consume(&self, count: usize) -> Result<(), AppError> {
        let mut draft = self.lock()?;
        let count = count.min(draft.len());
        draft.drain(..count);
        for (i, q) in draft.iter_mut().enumerate() {
            q.id = i as u32 + 1;
        }
        Ok(())
    }
}

/// Saves the draft as a new quiz owned by `teacher`.
///
/// The quiz starts as a draft (not live). On success the saved questions leave
/// the draft board.
pub async fn save_quiz(
    store: &Store,
    draft: &DraftBoard,
    teacher: &Teacher,
    req: SaveQuizRequest,
    default_duration: u32,
) -> Result<Quiz, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest(MISSING_TITLE.to_string()));
    }
    if let Err(errors) = req.validate() {
        let fields = errors.field_errors();
        let notice = if fields.contains_key("title") {
            TITLE_TOO_LONG
        } else if fields.contains_key("topic") {
            TOPIC_TOO_LONG
        } else {
            DURATION_OUT_OF_RANGE
        };
        return Err(AppError::BadRequest(notice.to_string()));
    }

    let questions = draft.snapshot()?;
    if questions.is_empty() {
        return Err(AppError::BadRequest(EMPTY_DRAFT.to_string()));
    }

    let saved_count = questions.len();
    let quiz = Quiz {
        id: store.next_quiz_id().await?,
        title: req.title.trim().to_string(),
        topic: req.topic.trim().to_string(),
        duration_minutes: req.duration_minutes.unwrap_or(default_duration),
        is_live: false,
        created_by: teacher.teacher_id.clone(),
        created_at: chrono::Utc::now(),
        questions,
    };

    let stored = quiz.clone();
    store
        .update_json(keys::QUIZZES, Vec::<Quiz>::new(), move |quizzes| {
            quizzes.push(stored)
        })
        .await?;

    draft.consume(saved_count)?;

    tracing::info!(
        quiz_id = quiz.id,
        teacher = %teacher.teacher_id,
        questions = saved_count,
        "Quiz saved as draft"
    );

    Ok(quiz)
}

/// Flips the live flag of a quiz owned by `teacher`.
pub async fn toggle_publish(store: &Store, teacher: &Teacher, quiz_id: u64) -> Result<Quiz, AppError> {
    let outcome = store
        .update_json(keys::QUIZZES, Vec::<Quiz>::new(), |quizzes| {
            let quiz = quizzes
                .iter_mut()
                .find(|q| q.id == quiz_id)
                .ok_or_else(|| AppError::NotFound("Quiz not found.".to_string()))?;

            if quiz.created_by != teacher.teacher_id {
                return Err(AppError::Forbidden(
                    "You can only publish your own quizzes.".to_string(),
                ));
            }

            quiz.is_live = !quiz.is_live;
            Ok(quiz.clone())
        })
        .await?;

    let quiz = outcome?;
    tracing::info!(quiz_id, live = quiz.is_live, "Quiz publication toggled");
    Ok(quiz)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_req(text: &str, correct_index: usize) -> AddQuestionRequest {
        AddQuestionRequest {
            text: text.to_string(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_index,
            explanation: String::new(),
        }
    }

    fn save_req(title: &str) -> SaveQuizRequest {
        SaveQuizRequest {
            title: title.to_string(),
            topic: String::new(),
            duration_minutes: None,
        }
    }

    fn alice() -> Teacher {
        Teacher {
            teacher_id: "T1".to_string(),
            name: "Alice".to_string(),
        }
    }

    #[test]
    fn blank_option_is_rejected() {
        let draft = DraftBoard::new();
        let mut req = question_req("Q", 0);
        req.options[2] = "  ".to_string();

        let err = draft.add_question(req).unwrap_err();
        assert_eq!(err.notice(), MISSING_QUESTION_FIELDS);
        assert!(draft.is_empty());
    }

    #[test]
    fn correct_index_must_name_an_option() {
        let draft = DraftBoard::new();
        let err = draft.add_question(question_req("Q", 4)).unwrap_err();
        assert_eq!(err.notice(), CORRECT_OUT_OF_RANGE);
    }

    #[test]
    fn markup_and_symbols_are_stored_as_typed() {
        let draft = DraftBoard::new();
        let listed = draft
            .add_question(AddQuestionRequest {
                text: "  Is 2 < 3 && 5 > 4?  ".to_string(),
                options: vec!["Yes".into(), "No".into(), "A & B".into(), "x<y".into()],
                correct_index: 0,
                explanation: "<b> is bold".to_string(),
            })
            .unwrap();

        assert_eq!(listed[0].text, "Is 2 < 3 && 5 > 4?");
        assert_eq!(listed[0].options, ["Yes", "No", "A & B", "x<y"]);
        assert_eq!(listed[0].explanation, "<b> is bold");

        let listed = draft
            .add_question(AddQuestionRequest {
                text: "Which tag is a block element?".to_string(),
                options: vec!["<div>".into(), "<span>".into(), "<a>".into(), "<em>".into()],
                correct_index: 0,
                explanation: String::new(),
            })
            .unwrap();
        assert_eq!(listed[1].options, ["<div>", "<span>", "<a>", "<em>"]);
    }

    #[test]
    fn overlong_explanation_gets_its_own_notice() {
        let draft = DraftBoard::new();
        let mut req = question_req("Q", 0);
        req.explanation = "x".repeat(2001);

        let err = draft.add_question(req).unwrap_err();
        assert_eq!(err.notice(), EXPLANATION_TOO_LONG);
    }

    #[test]
    fn questions_are_numbered_in_order() {
        let draft = DraftBoard::new();
        draft.add_question(question_req("first", 1)).unwrap();
        let listed = draft.add_question(question_req("second", 3)).unwrap();

        assert_eq!(listed.len(), 2);
        assert_eq!(listed[1].number, 2);
        assert_eq!(listed[1].correct, 'D');

        draft.clear().unwrap();
        assert!(draft.questions().unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_requires_title_and_questions() {
        let store = Store::in_memory();
        let draft = DraftBoard::new();

        let err = save_quiz(&store, &draft, &alice(), save_req("Basics"), 17)
            .await
            .unwrap_err();
        assert_eq!(err.notice(), EMPTY_DRAFT);

        draft.add_question(question_req("Q", 2)).unwrap();
        let err = save_quiz(&store, &draft, &alice(), save_req("  "), 17)
            .await
            .unwrap_err();
        assert_eq!(err.notice(), MISSING_TITLE);

        // Nothing stored, no ID consumed.
        assert!(store.quizzes().await.unwrap().is_empty());
        assert_eq!(draft.len(), 1);
    }

    #[tokio::test]
    async fn save_validation_uses_plain_notices() {
        let store = Store::in_memory();
        let draft = DraftBoard::new();
        draft.add_question(question_req("Q", 2)).unwrap();

        let mut req = save_req("Basics");
        req.duration_minutes = Some(0);
        let err = save_quiz(&store, &draft, &alice(), req, 17).await.unwrap_err();
        assert_eq!(err.notice(), DURATION_OUT_OF_RANGE);

        let err = save_quiz(&store, &draft, &alice(), save_req(&"t".repeat(201)), 17)
            .await
            .unwrap_err();
        assert_eq!(err.notice(), TITLE_TOO_LONG);

        let mut req = save_req("Basics");
        req.topic = "t".repeat(201);
        let err = save_quiz(&store, &draft, &alice(), req, 17).await.unwrap_err();
        assert_eq!(err.notice(), TOPIC_TOO_LONG);

        let quiz = save_quiz(&store, &draft, &alice(), save_req("  C++ & <Rust>  "), 17)
            .await
            .unwrap();
        assert_eq!(quiz.title, "C++ & <Rust>");
    }

    #[tokio::test]
    async fn saved_quiz_is_a_draft_and_clears_the_board() {
        let store = Store::in_memory();
        let draft = DraftBoard::new();
        draft.add_question(question_req("Q", 2)).unwrap();

        let quiz = save_quiz(&store, &draft, &alice(), save_req("Basics"), 17)
            .await
            .unwrap();

        assert_eq!(quiz.id, 1);
        assert!(!quiz.is_live);
        assert_eq!(quiz.duration_minutes, 17);
        assert_eq!(quiz.created_by, "T1");
        assert!(draft.is_empty());
        assert_eq!(store.quizzes().await.unwrap(), vec![quiz]);
    }

    #[tokio::test]
    async fn quiz_ids_keep_increasing() {
        let store = Store::in_memory();
        let draft = DraftBoard::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            draft.add_question(question_req(&format!("Q{}", i), 0)).unwrap();
            ids.push(
                save_quiz(&store, &draft, &alice(), save_req("Quiz"), 5)
                    .await
                    .unwrap()
                    .id,
            );
        }
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn toggle_checks_ownership() {
        let store = Store::in_memory();
        let draft = DraftBoard::new();
        draft.add_question(question_req("Q", 2)).unwrap();
        let quiz = save_quiz(&store, &draft, &alice(), save_req("Basics"), 17)
            .await
            .unwrap();

        let live = toggle_publish(&store, &alice(), quiz.id).await.unwrap();
        assert!(live.is_live);

        let mallory = Teacher {
            teacher_id: "T2".to_string(),
            name: "Mallory".to_string(),
        };
        let err = toggle_publish(&store, &mallory, quiz.id).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(store.find_quiz(quiz.id).await.unwrap().unwrap().is_live);

        let closed = toggle_publish(&store, &alice(), quiz.id).await.unwrap();
        assert!(!closed.is_live);

        let err = toggle_publish(&store, &alice(), 99).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
