//! cssgrade-core — Rubric model, CSS rule matching, and scoring.
//!
//! This crate defines the rubric data model, the comment-aware rule
//! extractor and the grading engine that the cssgrade tools build on.

pub mod config;
pub mod css;
pub mod engine;
pub mod error;
pub mod html;
pub mod loader;
pub mod model;
pub mod parser;
pub mod report;
pub mod results;
pub mod sanitize;
pub mod timing;
