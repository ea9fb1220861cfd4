// src/services/mod.rs

pub mod catalog;
pub mod exam;
pub mod identity;
pub mod review;
