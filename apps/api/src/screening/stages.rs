//! Pipeline stages — each consumes the current state and returns the next.
//!
//! Fallible stages return a tagged result instead of mutating a shared
//! record: `Ok` carries the updated state forward, `Err` carries the state
//! with its sticky error stamped so the engine can jump to the scoring
//! failure branch. Scoring itself never fails outward; every resume must end
//! with a well-formed score.

use tracing::warn;

use crate::document::{DocumentReader, ReadError};
use crate::screening::oracle::{OracleError, ScreeningOracle};
use crate::screening::state::ScreeningState;

/// Which collaborator failed; recorded alongside the sticky error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Read,
    OracleTransport,
    OracleParse,
}

/// A failed stage. Carries the state onward so the scoring failure branch
/// can still produce a zero-score result for this resume.
#[derive(Debug)]
pub struct StageFailure {
    pub state: ScreeningState,
    pub kind: ErrorKind,
}

impl StageFailure {
    fn new(mut state: ScreeningState, kind: ErrorKind, message: String) -> Self {
        warn!(candidate = %state.candidate_name, %message, "screening stage failed");
        state.record_error(message);
        Self { state, kind }
    }
}

pub type StageResult = Result<ScreeningState, StageFailure>;

/// Stage 1: extract text from the resume document.
///
/// Whitespace-only output is reported with a fixed message so callers can
/// tell an empty document from a hard read failure.
pub async fn load_resume(mut state: ScreeningState, reader: &dyn DocumentReader) -> StageResult {
    match reader.extract_text(state.resume_source.clone()).await {
        Ok(text) => {
            state.resume_text = text;
            Ok(state)
        }
        Err(ReadError::Empty) => Err(StageFailure::new(
            state,
            ErrorKind::Read,
            "Empty PDF or failed to extract text".to_string(),
        )),
        Err(e) => Err(StageFailure::new(
            state,
            ErrorKind::Read,
            format!("PDF loading error: {e}"),
        )),
    }
}

/// Stage 2: extract a structured profile from the resume text.
pub async fn extract_data(mut state: ScreeningState, oracle: &dyn ScreeningOracle) -> StageResult {
    match oracle.extract_profile(&state.resume_text).await {
        Ok(profile) => {
            state.profile = profile;
            Ok(state)
        }
        Err(e @ OracleError::Parse(_)) => Err(StageFailure::new(
            state,
            ErrorKind::OracleParse,
            format!("Extraction error: {e}"),
        )),
        Err(e) => Err(StageFailure::new(
            state,
            ErrorKind::OracleTransport,
            format!("Data extraction error: {e}"),
        )),
    }
}

/// Stage 3: compare the profile to the job description.
pub async fn match_jd(mut state: ScreeningState, oracle: &dyn ScreeningOracle) -> StageResult {
    match oracle
        .match_profile(&state.job_description, &state.profile)
        .await
    {
        Ok(matched) => {
            state.match_result = matched;
            Ok(state)
        }
        Err(e @ OracleError::Parse(_)) => Err(StageFailure::new(
            state,
            ErrorKind::OracleParse,
            format!("Matching error: {e}"),
        )),
        Err(e) => Err(StageFailure::new(
            state,
            ErrorKind::OracleTransport,
            format!("JD matching error: {e}"),
        )),
    }
}

/// Stage 4: score the candidate.
///
/// This stage never fails outward. An oracle failure here is absorbed into a
/// zero score with a reason naming the failure, so the batch always renders
/// one well-formed result per resume.
pub async fn score_candidate(
    mut state: ScreeningState,
    oracle: &dyn ScreeningOracle,
) -> ScreeningState {
    match oracle
        .score_fit(&state.job_description, &state.profile, &state.match_result)
        .await
    {
        Ok(report) => {
            state.score = report.normalized_score();
            state.reasons = report.reasons;
            state.suggestions = report.suggestions;
        }
        Err(e) => {
            let message = match &e {
                OracleError::Parse(_) => format!("Scoring error: {e}"),
                OracleError::Transport(_) => format!("Candidate scoring error: {e}"),
            };
            warn!(candidate = %state.candidate_name, %message, "scoring stage failed");
            state.record_error(message);
            state.score = 0;
            state.reasons = vec![format!("Scoring failed: {e}")];
            state.suggestions = Vec::new();
        }
    }
    state
}

/// Scoring failure branch: reached when an earlier stage already failed.
/// Produces the uniform zero-score shape instead of dropping the resume.
pub fn score_failed(mut state: ScreeningState) -> ScreeningState {
    state.score = 0;
    state.reasons = vec![format!("Processing failed: {}", state.error)];
    state.suggestions = Vec::new();
    state
}

/// Stage 5 (conditional): fill in improvement suggestions for weak fits.
///
/// Only acts while `suggestions` is empty, which makes it idempotent. Takes
/// at most three gaps; with no gaps recorded it falls back to one generic
/// suggestion.
pub fn suggest_improvements(mut state: ScreeningState) -> ScreeningState {
    if !state.suggestions.is_empty() {
        return state;
    }

    state.suggestions = if state.match_result.gaps.is_empty() {
        vec!["Consider gaining more relevant experience".to_string()]
    } else {
        state
            .match_result
            .gaps
            .iter()
            .take(3)
            .map(|gap| format!("Develop skills/experience in: {gap}"))
            .collect()
    };

    state
}
