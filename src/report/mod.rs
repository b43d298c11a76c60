//! Terminal reports for the non-interactive `predict` command.

pub mod format;

pub use format::*;
