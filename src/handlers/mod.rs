// src/handlers/mod.rs

pub mod auth;
pub mod authoring;
pub mod exam;
pub mod review;
