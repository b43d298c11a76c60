//! `credit-wizard` library crate.
//!
//! The binary is a thin wrapper around this library so that:
//!
//! - the wizard state, payload rules, and scorecard are testable without a terminal
//! - the TUI and the one-shot `predict` command share one code path

pub mod app;
pub mod assessment;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod telemetry;
pub mod tui;
pub mod wizard;
