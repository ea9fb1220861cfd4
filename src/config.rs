// src/config.rs

use std::env;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;

/// Quiz duration used when the teacher leaves the field empty.
pub const DEFAULT_QUIZ_DURATION_MINUTES: u32 = 17;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: String,
    pub log_dir: String,
    pub default_quiz_duration: u32,
    /// Wall-clock length of one countdown second.
    pub exam_tick: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://quizroom.db".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let default_quiz_duration = parse_var("DEFAULT_QUIZ_DURATION", DEFAULT_QUIZ_DURATION_MINUTES)
            .max(1);

        let exam_tick = Duration::from_millis(parse_var("EXAM_TICK_MS", 1000u64).max(1));

        Self {
            database_url,
            rust_log,
            bind_addr,
            log_dir,
            default_quiz_duration,
            exam_tick,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            rust_log: "info".to_string(),
            bind_addr: "127.0.0.1:3000".to_string(),
            log_dir: "logs".to_string(),
            default_quiz_duration: DEFAULT_QUIZ_DURATION_MINUTES,
            exam_tick: Duration::from_secs(1),
        }
    }
}

/// Reads an env var, keeping `default` when it is unset or unparsable.
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unparsable {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}
