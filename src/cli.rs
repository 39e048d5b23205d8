//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Heart disease dashboard - per-attribute charts and outcome balance
#[derive(Parser, Debug)]
#[command(name = "heart-dashboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dataset file (CSV, JSON or Parquet).
    /// Defaults to the configured dataset path (heart_disease.csv).
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// JSON configuration file. Built-in heart disease layout when omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write every chart request as JSON to this path and exit without
    /// opening a window.
    #[arg(short, long)]
    pub export: Option<PathBuf>,
}
