//! Data models for statement extraction and rate calculation.

pub mod calc;
pub mod config;
pub mod statement;
