// src/clustering/mod.rs

pub mod dedup;
