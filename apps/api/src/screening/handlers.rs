//! Axum route handlers for the Screening API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::AppError;
use crate::screening::batch::{screen_batch, ResumeSubmission};
use crate::screening::state::ScreeningResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub screening_id: Uuid,
    pub screened_at: DateTime<Utc>,
    pub candidate_count: usize,
    /// In submission order; clients re-sort by score as they see fit.
    pub results: Vec<ScreeningResult>,
}

/// POST /api/v1/screenings
///
/// Multipart form: one `jd` part — plain text, or a PDF upload (detected by
/// filename) extracted through the same document reader — and one or more
/// `resume` parts whose upload filename becomes the candidate name.
pub async fn handle_screen(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningResponse>, AppError> {
    let mut jd_text: Option<String> = None;
    let mut jd_pdf: Option<Bytes> = None;
    let mut resumes: Vec<ResumeSubmission> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        // Copied out up front: reading the field body consumes it.
        let name = field.name().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);

        match name.as_deref() {
            Some("jd") => {
                if file_name.is_some() {
                    jd_pdf = Some(field.bytes().await?);
                } else {
                    jd_text = Some(field.text().await?);
                }
            }
            Some("resume") => {
                let candidate_name =
                    file_name.unwrap_or_else(|| format!("resume-{}", resumes.len() + 1));
                resumes.push(ResumeSubmission {
                    candidate_name,
                    content: field.bytes().await?,
                });
            }
            _ => {} // unknown parts are ignored
        }
    }

    let jd = match (jd_text, jd_pdf) {
        (Some(text), _) => text,
        (None, Some(pdf)) => state
            .reader
            .extract_text(pdf)
            .await
            .map_err(|e| AppError::UnprocessableEntity(format!("Could not read JD PDF: {e}")))?,
        (None, None) => {
            return Err(AppError::Validation("A 'jd' part is required".to_string()));
        }
    };

    validate_batch(&jd, &resumes, &state.config)?;

    info!("Screening {} resume(s)", resumes.len());

    let results = screen_batch(&jd, resumes, state.reader.as_ref(), state.oracle.as_ref()).await;

    Ok(Json(ScreeningResponse {
        screening_id: Uuid::new_v4(),
        screened_at: Utc::now(),
        candidate_count: results.len(),
        results,
    }))
}

/// Admission control — API-layer policy, deliberately outside the pipeline.
fn validate_batch(
    jd: &str,
    resumes: &[ResumeSubmission],
    config: &Config,
) -> Result<(), AppError> {
    if jd.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }

    if resumes.is_empty() {
        return Err(AppError::Validation(
            "At least one resume is required".to_string(),
        ));
    }

    if resumes.len() > config.max_resumes_per_batch {
        return Err(AppError::Validation(format!(
            "At most {} resumes are allowed per screening",
            config.max_resumes_per_batch
        )));
    }

    if let Some(oversize) = resumes
        .iter()
        .find(|r| r.content.len() > config.max_resume_bytes)
    {
        return Err(AppError::Validation(format!(
            "Resume '{}' exceeds the {} byte limit",
            oversize.candidate_name, config.max_resume_bytes
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            anthropic_api_key: "test-key".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
            max_resumes_per_batch: 10,
            max_resume_bytes: 5 * 1024 * 1024,
        }
    }

    fn submission(name: &str, size: usize) -> ResumeSubmission {
        ResumeSubmission {
            candidate_name: name.to_string(),
            content: Bytes::from(vec![0u8; size]),
        }
    }

    #[test]
    fn test_validate_batch_accepts_a_normal_request() {
        let resumes = vec![submission("jane.pdf", 1024)];
        assert!(validate_batch("Needs Python", &resumes, &test_config()).is_ok());
    }

    #[test]
    fn test_validate_batch_rejects_blank_jd() {
        let resumes = vec![submission("jane.pdf", 1024)];
        let err = validate_batch("   \n", &resumes, &test_config()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_batch_rejects_no_resumes() {
        let err = validate_batch("Needs Python", &[], &test_config()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_validate_batch_rejects_too_many_resumes() {
        let resumes: Vec<ResumeSubmission> =
            (0..11).map(|i| submission(&format!("r{i}.pdf"), 16)).collect();
        let err = validate_batch("Needs Python", &resumes, &test_config()).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("At most 10")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_batch_rejects_oversize_resume_by_name() {
        let resumes = vec![
            submission("small.pdf", 16),
            submission("huge.pdf", 5 * 1024 * 1024 + 1),
        ];
        let err = validate_batch("Needs Python", &resumes, &test_config()).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("huge.pdf")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
