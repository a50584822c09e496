//! sansu-core: arithmetic drill engine.
//!
//! This crate generates single-operation addition and subtraction questions,
//! finds weak spots in a learner's answer history, and turns the weakest
//! spot into an encouraging message and a targeted practice set.

pub mod analyzer;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod pattern;
pub mod practice;
pub mod report;
pub mod scoring;
pub mod statistics;
pub mod suggestion;
