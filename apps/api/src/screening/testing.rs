//! Shared test doubles for the screening pipeline. Compiled only for tests.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::document::{DocumentReader, ReadError};
use crate::screening::oracle::{
    CandidateProfile, MatchResult, OracleError, ScoreReport, ScreeningOracle,
};
use crate::screening::state::ScreeningState;

/// Canned behavior for one oracle operation.
#[derive(Debug, Clone)]
pub enum StubCall<T> {
    Ok(T),
    ParseFail(&'static str),
    TransportFail(&'static str),
}

impl<T: Clone> StubCall<T> {
    fn resolve(&self) -> Result<T, OracleError> {
        match self {
            StubCall::Ok(value) => Ok(value.clone()),
            StubCall::ParseFail(msg) => Err(OracleError::Parse((*msg).to_string())),
            StubCall::TransportFail(msg) => Err(OracleError::Transport((*msg).to_string())),
        }
    }
}

/// Oracle double with one canned response per operation.
pub struct StubOracle {
    pub profile: StubCall<CandidateProfile>,
    pub matched: StubCall<MatchResult>,
    pub score: StubCall<ScoreReport>,
}

impl Default for StubOracle {
    fn default() -> Self {
        Self {
            profile: StubCall::Ok(CandidateProfile::default()),
            matched: StubCall::Ok(MatchResult::default()),
            score: StubCall::Ok(ScoreReport::default()),
        }
    }
}

#[async_trait]
impl ScreeningOracle for StubOracle {
    async fn extract_profile(&self, _resume_text: &str) -> Result<CandidateProfile, OracleError> {
        self.profile.resolve()
    }

    async fn match_profile(
        &self,
        _job_description: &str,
        _profile: &CandidateProfile,
    ) -> Result<MatchResult, OracleError> {
        self.matched.resolve()
    }

    async fn score_fit(
        &self,
        _job_description: &str,
        _profile: &CandidateProfile,
        _match_result: &MatchResult,
    ) -> Result<ScoreReport, OracleError> {
        self.score.resolve()
    }
}

/// Document reader double.
pub enum StubRead {
    Text(&'static str),
    Empty,
    Fail(&'static str),
}

pub struct StubReader(pub StubRead);

#[async_trait]
impl DocumentReader for StubReader {
    async fn extract_text(&self, _source: Bytes) -> Result<String, ReadError> {
        match &self.0 {
            StubRead::Text(text) => Ok((*text).to_string()),
            StubRead::Empty => Err(ReadError::Empty),
            StubRead::Fail(msg) => Err(ReadError::Extract((*msg).to_string())),
        }
    }
}

pub fn fresh_state(job_description: &str, candidate_name: &str) -> ScreeningState {
    ScreeningState::new(
        Arc::from(job_description),
        Bytes::from_static(b"%PDF-1.4 stub"),
        candidate_name,
    )
}

pub fn profile_with_skills(skills: &[&str]) -> CandidateProfile {
    CandidateProfile {
        skills: skills.iter().map(|s| (*s).to_string()).collect(),
        ..Default::default()
    }
}

pub fn match_result(matches: &[&str], gaps: &[&str]) -> MatchResult {
    MatchResult {
        matches: matches.iter().map(|s| (*s).to_string()).collect(),
        gaps: gaps.iter().map(|s| (*s).to_string()).collect(),
    }
}

pub fn score_report(score: f64, reasons: &[&str], suggestions: &[&str]) -> ScoreReport {
    ScoreReport {
        score,
        reasons: reasons.iter().map(|s| (*s).to_string()).collect(),
        suggestions: suggestions.iter().map(|s| (*s).to_string()).collect(),
    }
}
