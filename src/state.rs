use axum::extract::FromRef;

use crate::{
    config::Config,
    services::{catalog::DraftBoard, exam::ExamController},
    storage::Store,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Config,
    pub drafts: DraftBoard,
    pub exam: ExamController,
}

impl AppState {
    /// Wires the draft board and the exam controller around one store.
    pub fn new(store: Store, config: Config) -> Self {
        let exam = ExamController::new(store.clone(), config.exam_tick);
        Self {
            store,
            config,
            drafts: DraftBoard::new(),
            exam,
        }
    }
}

impl FromRef<AppState> for Store {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for DraftBoard {
    fn from_ref(state: &AppState) -> Self {
        state.drafts.clone()
    }
}

impl FromRef<AppState> for ExamController {
    fn from_ref(state: &AppState) -> Self {
        state.exam.clone()
    }
}
