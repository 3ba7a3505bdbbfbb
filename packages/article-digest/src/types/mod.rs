//! Domain types for tasks, extracted content, and configuration.

pub mod config;
pub mod content;
pub mod task;
