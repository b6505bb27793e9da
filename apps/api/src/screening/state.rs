//! Screening state — the record threaded through the pipeline for one resume.
//!
//! One instance is created per resume at batch entry, flows through the
//! stages by value, and is projected into a [`ScreeningResult`] at the end.
//! Nothing is shared between resumes except the read-only job description.

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::screening::oracle::{CandidateProfile, MatchResult};

#[derive(Debug, Clone)]
pub struct ScreeningState {
    /// Immutable once set; shared read-only across the whole batch.
    pub job_description: Arc<str>,
    /// Raw uploaded document bytes, set once at creation.
    pub resume_source: Bytes,
    pub candidate_name: String,
    /// Empty until the load stage succeeds.
    pub resume_text: String,
    /// Default until the extraction stage succeeds.
    pub profile: CandidateProfile,
    /// Default until the matching stage succeeds.
    pub match_result: MatchResult,
    /// 0 until the scoring stage runs; the authoritative fitness value.
    pub score: u32,
    pub reasons: Vec<String>,
    pub suggestions: Vec<String>,
    /// First error encountered; empty means no error. Sticky — later stages
    /// can never erase it.
    pub error: String,
}

impl ScreeningState {
    pub fn new(
        job_description: Arc<str>,
        resume_source: Bytes,
        candidate_name: impl Into<String>,
    ) -> Self {
        Self {
            job_description,
            resume_source,
            candidate_name: candidate_name.into(),
            resume_text: String::new(),
            profile: CandidateProfile::default(),
            match_result: MatchResult::default(),
            score: 0,
            reasons: Vec::new(),
            suggestions: Vec::new(),
            error: String::new(),
        }
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Records a failure message unless an earlier stage already set one.
    pub fn record_error(&mut self, message: impl Into<String>) {
        if self.error.is_empty() {
            self.error = message.into();
        }
    }

    /// Projects the final state into the outward result record.
    pub fn into_result(self) -> ScreeningResult {
        ScreeningResult {
            candidate: self.candidate_name,
            score: self.score,
            reasons: self.reasons,
            suggestions: self.suggestions,
            matches: self.match_result.matches,
            gaps: self.match_result.gaps,
            error: self.error,
        }
    }
}

/// One screened resume as reported to callers. Serializes with exactly the
/// keys `candidate, score, reasons, suggestions, matches, gaps, error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub candidate: String,
    pub score: u32,
    pub reasons: Vec<String>,
    pub suggestions: Vec<String>,
    pub matches: Vec<String>,
    pub gaps: Vec<String>,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_state() -> ScreeningState {
        ScreeningState::new(
            Arc::from("Needs Python, 3+ years"),
            Bytes::from_static(b"%PDF-1.4"),
            "Jane Doe",
        )
    }

    #[test]
    fn test_new_state_has_empty_derived_fields() {
        let state = fresh_state();
        assert_eq!(state.candidate_name, "Jane Doe");
        assert!(state.resume_text.is_empty());
        assert_eq!(state.profile, CandidateProfile::default());
        assert_eq!(state.match_result, MatchResult::default());
        assert_eq!(state.score, 0);
        assert!(state.reasons.is_empty());
        assert!(state.suggestions.is_empty());
        assert!(!state.has_error());
    }

    #[test]
    fn test_record_error_is_sticky() {
        let mut state = fresh_state();
        state.record_error("first failure");
        state.record_error("second failure");
        assert_eq!(state.error, "first failure");
    }

    #[test]
    fn test_into_result_projects_match_fields() {
        let mut state = fresh_state();
        state.score = 82;
        state.reasons = vec!["strong skill match".to_string()];
        state.match_result = MatchResult {
            matches: vec!["Python".to_string()],
            gaps: vec!["Kubernetes".to_string()],
        };

        let result = state.into_result();
        assert_eq!(result.candidate, "Jane Doe");
        assert_eq!(result.score, 82);
        assert_eq!(result.matches, vec!["Python"]);
        assert_eq!(result.gaps, vec!["Kubernetes"]);
        assert_eq!(result.error, "");
    }

    #[test]
    fn test_result_serializes_with_exact_keys() {
        let result = ScreeningResult {
            candidate: "Jane Doe".to_string(),
            score: 82,
            reasons: vec!["strong skill match".to_string()],
            suggestions: vec![],
            matches: vec!["Python".to_string()],
            gaps: vec![],
            error: String::new(),
        };

        let value = serde_json::to_value(&result).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["candidate", "error", "gaps", "matches", "reasons", "score", "suggestions"]
        );

        let roundtrip: ScreeningResult = serde_json::from_value(value).unwrap();
        assert_eq!(roundtrip, result);
    }
}
