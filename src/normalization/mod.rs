// src/normalization/mod.rs

pub mod enhance;

pub use enhance::enhance_job;
