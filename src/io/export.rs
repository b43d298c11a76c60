//! Export one assessment run to JSON.
//!
//! The record keeps the normalized payload, the endpoint's body as received,
//! and the derived scorecard so a run can be inspected or replayed later.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::assessment::AssessmentView;
use crate::domain::{PredictionResult, RequestPayload};
use crate::error::AppError;
use crate::wizard::FormSession;

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentRecord<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Utc>,
    pub base_url: &'a str,
    pub payload: &'a RequestPayload,
    pub result: &'a PredictionResult,
    pub assessment: &'a AssessmentView,
}

impl<'a> AssessmentRecord<'a> {
    pub fn new(
        base_url: &'a str,
        payload: &'a RequestPayload,
        result: &'a PredictionResult,
        assessment: &'a AssessmentView,
    ) -> Self {
        Self {
            tool: "credit-wizard",
            generated_at: Utc::now(),
            base_url,
            payload,
            result,
            assessment,
        }
    }

    /// Record for the session's last successful submit, pairing the result
    /// with the payload that was actually sent. `None` before any result.
    pub fn from_session(base_url: &'a str, session: &'a FormSession) -> Option<Self> {
        Some(Self::new(
            base_url,
            session.sent_payload()?,
            session.result()?,
            session.assessment()?,
        ))
    }
}

/// Write the record as pretty JSON.
pub fn write_assessment_json(path: &Path, record: &AssessmentRecord<'_>) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, record)
        .map_err(|e| AppError::new(4, format!("Failed to write export JSON: {e}")))?;

    tracing::info!(path = %path.display(), "wrote assessment export");
    Ok(())
}

/// Default export file name in the working directory, stamped with the time.
pub fn default_export_path(now: DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!("assessment_{}.json", now.format("%Y%m%d_%H%M%S")))
}
