//! Command-line parsing for the credit-risk wizard.
//!
//! Parsing lives here; dispatch lives in `crate::app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "credit-wizard",
    version,
    about = "Credit-risk assessment wizard for an external prediction API"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive step-by-step wizard (default).
    Tui(TuiArgs),
    /// Submit answers non-interactively and print the assessment.
    Predict(PredictArgs),
    /// List the form fields, grouped by wizard step.
    Fields,
}

/// Options shared by every command that talks to the endpoint.
#[derive(Debug, Args, Clone, Default)]
pub struct EndpointArgs {
    /// Prediction API base URL (overrides CREDIT_API_BASE_URL).
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
}

#[derive(Debug, Args, Clone, Default)]
pub struct TuiArgs {
    #[command(flatten)]
    pub endpoint: EndpointArgs,
}

#[derive(Debug, Args, Clone, Default)]
pub struct PredictArgs {
    #[command(flatten)]
    pub endpoint: EndpointArgs,

    /// Set a field, e.g. `--set annual_income=80000`. Repeatable; applied after --input.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// JSON object of answers (strings, numbers, or booleans).
    #[arg(long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    /// Print the normalized payload and exit without calling the endpoint.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the result and assessment as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// Write the payload, result, and assessment to a JSON file.
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_predict_flags() {
        let cli = Cli::parse_from([
            "credit-wizard",
            "predict",
            "--set",
            "age=30",
            "--set",
            "util_50_plus=yes",
            "--base-url",
            "http://localhost:9000",
            "--dry-run",
        ]);
        let Command::Predict(args) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(args.set, vec!["age=30", "util_50_plus=yes"]);
        assert_eq!(args.endpoint.base_url.as_deref(), Some("http://localhost:9000"));
        assert!(args.dry_run);
        assert!(!args.json);
    }

    #[test]
    fn parses_fields() {
        let cli = Cli::parse_from(["credit-wizard", "fields"]);
        assert!(matches!(cli.command, Command::Fields));
    }
}
