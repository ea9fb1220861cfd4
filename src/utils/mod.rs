// src/utils/mod.rs

pub mod session;
pub mod text;
