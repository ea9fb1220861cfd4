// src/storage/mod.rs

pub mod kv;

use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::{
    error::AppError,
    models::{
        attempt::Attempt,
        quiz::Quiz,
        user::{Student, Teacher},
    },
};

pub use kv::{KeyValueStore, MemoryStore, SqliteStore};

/// Storage keys. Kept identical to the historical layout so existing data loads.
pub mod keys {
    pub const STUDENTS: &str = "quiz_students";
    pub const TEACHERS: &str = "quiz_teachers";
    pub const QUIZZES: &str = "quiz_quizzes";
    pub const ATTEMPTS: &str = "quiz_attempts";
    pub const CURRENT_STUDENT: &str = "quiz_current_student";
    pub const CURRENT_TEACHER: &str = "quiz_current_teacher";
    pub const QUIZ_ID_COUNTER: &str = "quiz_id_counter";
    pub const ATTEMPT_ID_COUNTER: &str = "quiz_attempt_id_counter";
}

/// Typed JSON view over a `KeyValueStore`.
///
/// Reads never fail on bad data: a missing, empty or malformed value yields the
/// caller's fallback. Read-modify-write sequences (`update_json`, `next_id`) are
/// serialized by a store-wide write lock.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
}

impl Store {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub async fn load_json<T: DeserializeOwned>(&self, key: &str, fallback: T) -> Result<T, AppError> {
        let raw = match self.backend.get(key).await? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(fallback),
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!("Malformed value under {}, using default: {}", key, e);
                Ok(fallback)
            }
        }
    }

    pub async fn save_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let raw = serde_json::to_string(value)?;
        self.backend.set(key, &raw).await
    }

    pub async fn remove(&self, key: &str) -> Result<(), AppError> {
        self.backend.remove(key).await
    }

    /// Loads `key`, applies `f`, and writes the result back under the write lock.
    pub async fn update_json<T, R, F>(&self, key: &str, fallback: T, f: F) -> Result<R, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T) -> R,
    {
        let _guard = self.write_lock.lock().await;
        let mut value = self.load_json(key, fallback).await?;
        let result = f(&mut value);
        self.save_json(key, &value).await?;
        Ok(result)
    }

    /// Returns the counter's current value and advances it.
    ///
    /// An unset or unreadable counter restarts at `floor` (at least 1), so a
    /// corrupted counter never hands out an ID that is already taken.
    pub async fn next_id(&self, counter_key: &str, floor: u64) -> Result<u64, AppError> {
        let _guard = self.write_lock.lock().await;
        let floor = floor.max(1);
        let current = match self.backend.get(counter_key).await? {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!("Unreadable counter {}={:?}, restarting at {}", counter_key, raw, floor);
                floor
            }),
            None => floor,
        }
        .max(floor);
        self.backend
            .set(counter_key, &(current + 1).to_string())
            .await?;
        Ok(current)
    }

    pub async fn next_quiz_id(&self) -> Result<u64, AppError> {
        let floor = self.quizzes().await?.iter().map(|q| q.id + 1).max().unwrap_or(1);
        self.next_id(keys::QUIZ_ID_COUNTER, floor).await
    }

    pub async fn next_attempt_id(&self) -> Result<u64, AppError> {
        let floor = self.attempts().await?.iter().map(|a| a.id + 1).max().unwrap_or(1);
        self.next_id(keys::ATTEMPT_ID_COUNTER, floor).await
    }

    pub async fn students(&self) -> Result<Vec<Student>, AppError> {
        self.load_json(keys::STUDENTS, Vec::new()).await
    }

    pub async fn teachers(&self) -> Result<Vec<Teacher>, AppError> {
        self.load_json(keys::TEACHERS, Vec::new()).await
    }

    pub async fn quizzes(&self) -> Result<Vec<Quiz>, AppError> {
        self.load_json(keys::QUIZZES, Vec::new()).await
    }

    pub async fn attempts(&self) -> Result<Vec<Attempt>, AppError> {
        self.load_json(keys::ATTEMPTS, Vec::new()).await
    }

    pub async fn find_quiz(&self, quiz_id: u64) -> Result<Option<Quiz>, AppError> {
        Ok(self.quizzes().await?.into_iter().find(|q| q.id == quiz_id))
    }
}
