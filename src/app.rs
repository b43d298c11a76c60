//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads configuration and sets up logging
//! - dispatches to the TUI or the one-shot `predict` / `fields` commands

use clap::Parser;

use crate::cli::{Command, PredictArgs, TuiArgs};
use crate::config::AppConfig;
use crate::data::PredictionClient;
use crate::domain::{FIELDS, WizardStep, fields_for_step};
use crate::error::AppError;
use crate::io::{
    AssessmentRecord, apply_answers, parse_assignment, read_answers_json, write_assessment_json,
};
use crate::telemetry::{self, LogSink};
use crate::wizard::{FormSession, SubmitOutcome};

/// Entry point for the `credit-wizard` binary.
pub fn run() -> Result<(), AppError> {
    // A bare `credit-wizard` (or one that starts with a flag) means the TUI.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let config = AppConfig::from_env()?;

    match cli.command {
        Command::Tui(args) => handle_tui(args, config),
        Command::Predict(args) => handle_predict(args, config),
        Command::Fields => {
            print!("{}", format_fields());
            Ok(())
        }
    }
}

fn handle_tui(args: TuiArgs, config: AppConfig) -> Result<(), AppError> {
    let config = config.with_base_url(args.endpoint.base_url.as_deref())?;
    telemetry::init(&config.log, LogSink::FileOnly)?;
    tracing::info!(base_url = %config.api_base_url, "starting wizard");
    crate::tui::run(&config)
}

fn handle_predict(args: PredictArgs, config: AppConfig) -> Result<(), AppError> {
    let config = config.with_base_url(args.endpoint.base_url.as_deref())?;
    telemetry::init(&config.log, LogSink::Stderr)?;

    let mut session = FormSession::new();
    collect_answers(&args, &mut session)?;

    if args.dry_run {
        let payload = crate::domain::normalize(session.form());
        if args.json {
            let json = serde_json::to_string_pretty(&payload)
                .map_err(|e| AppError::new(4, format!("Failed to serialize payload: {e}")))?;
            println!("{json}");
        } else {
            print!("{}", crate::report::format_review(session.form()));
            println!();
            print!("{}", crate::report::format_payload(&payload));
        }
        return Ok(());
    }

    let client = PredictionClient::from_config(&config)?;
    if session.submit(&client)? != SubmitOutcome::Succeeded {
        let message = session.error().unwrap_or("Request failed").to_string();
        return Err(AppError::new(4, format!("Prediction request failed: {message}")));
    }

    let Some(record) = AssessmentRecord::from_session(&config.api_base_url, &session) else {
        return Err(AppError::new(4, "Prediction finished without a result."));
    };

    if args.json {
        let json = serde_json::to_string_pretty(&record)
            .map_err(|e| AppError::new(4, format!("Failed to serialize assessment: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_assessment(record.result, record.assessment, session.form()));
    }

    if let Some(path) = &args.export {
        write_assessment_json(path, &record)?;
    }

    Ok(())
}

/// `--input` first, then each `--set` in order.
fn collect_answers(args: &PredictArgs, session: &mut FormSession) -> Result<(), AppError> {
    let mut answers = Vec::new();
    if let Some(path) = &args.input {
        answers.extend(read_answers_json(path)?);
    }
    for arg in &args.set {
        answers.push(parse_assignment(arg)?);
    }

    apply_answers(session, &answers)
}

/// Field catalog grouped by step.
pub fn format_fields() -> String {
    let key_width = FIELDS.iter().map(|f| f.key.len()).max().unwrap_or(0);
    let mut out = String::new();
    for step in WizardStep::ALL {
        out.push_str(&format!("Step {}: {}\n", step.number(), step.title()));
        let mut any = false;
        for field in fields_for_step(step) {
            any = true;
            let kind = match field.value_type {
                crate::domain::ValueType::Number => "number",
                crate::domain::ValueType::Boolean => "yes/no",
            };
            out.push_str(&format!(
                "  {:<key_width$}  {:<6}  {} ({})\n",
                field.key, kind, field.label, field.help
            ));
        }
        if !any {
            out.push_str("  (review and submit)\n");
        }
    }
    out
}

/// Insert the implicit `tui` subcommand.
///
/// `predict --set age=40` and `fields` pass through, as do top-level help and
/// version flags. An empty argv or one led by another flag (`--base-url URL`)
/// is treated as a TUI launch.
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "predict" | "fields");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_tui() {
        assert_eq!(rewrite_args(args(&["cw"])), args(&["cw", "tui"]));
    }

    #[test]
    fn leading_flag_is_a_tui_flag() {
        assert_eq!(
            rewrite_args(args(&["cw", "--base-url", "http://x"])),
            args(&["cw", "tui", "--base-url", "http://x"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(
            rewrite_args(args(&["cw", "predict", "--set", "age=40"])),
            args(&["cw", "predict", "--set", "age=40"])
        );
        assert_eq!(rewrite_args(args(&["cw", "fields"])), args(&["cw", "fields"]));
        assert_eq!(rewrite_args(args(&["cw", "--help"])), args(&["cw", "--help"]));
    }

    #[test]
    fn field_listing_covers_every_step() {
        let text = format_fields();
        for step in WizardStep::ALL {
            assert!(text.contains(step.title()));
        }
        assert!(text.contains("high_credit_util_75"));
        assert!(text.contains("(review and submit)"));
    }

    #[test]
    fn answers_flow_into_session() {
        let predict = PredictArgs {
            set: vec!["age=33".to_string(), "util_50_plus=no".to_string()],
            ..PredictArgs::default()
        };
        let mut session = FormSession::new();
        collect_answers(&predict, &mut session).unwrap();
        assert_eq!(session.form().value("age"), "33");
        assert_eq!(session.form().value("util_50_plus"), "no");

        let bad = PredictArgs {
            set: vec!["colour=red".to_string()],
            ..PredictArgs::default()
        };
        assert_eq!(collect_answers(&bad, &mut FormSession::new()).unwrap_err().exit_code(), 2);
    }
}
