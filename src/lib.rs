// src/lib.rs
pub mod checks;
pub mod config;
pub mod report;
pub mod runner;
