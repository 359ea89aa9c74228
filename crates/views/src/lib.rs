//! # `surveyboard-views`: Page Models for the Survey App
//!
//! This crate composes the core `surveyboard` pipeline into the two pages of
//! the survey application. It decides what each page shows (choices, charts,
//! empty states) but leaves drawing to whatever UI hosts it. Every model is
//! `Serialize` so a front end can consume it as JSON.

pub mod survey;
pub mod visuals;

pub use survey::{DataPanel, Submission, SurveyPage};
pub use visuals::{ChartPanel, TopKBounds, VisualsPage};
