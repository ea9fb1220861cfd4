// src/models/mod.rs

pub mod attempt;
pub mod quiz;
pub mod user;
pub mod view;
