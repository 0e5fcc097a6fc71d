//! Core library: file metadata heuristics for tagging, importance, grouping and insights.

pub mod config;
pub mod error;
pub mod groups;
pub mod insights;
pub mod models;
pub mod naming;
pub mod pipeline;
pub mod rules;
pub mod scoring;
pub mod store;
pub mod tags;
pub mod views;
