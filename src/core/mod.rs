//! Core types: errors, configuration, shared mode enum.

pub mod config;
pub mod errors;
pub mod mode;
