//! Heart disease dashboard: per-attribute charts tabbed by attribute and a
//! before/after class-balancing comparison of the outcome.

pub mod app;
pub mod chart;
pub mod cli;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod distribution;
pub mod error;
pub mod render;
pub mod state;
pub mod ui;
