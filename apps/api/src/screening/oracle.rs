//! Reasoning oracle — the seam between pipeline stages and the LLM.
//!
//! Stages only ever see this trait and its typed response shapes; prompt
//! construction and transport live behind it. Every response shape carries
//! field-level defaults so a model reply missing a section still
//! deserializes, while a reply of the wrong shape fails as a parse error
//! instead of being coerced.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::{LlmClient, LlmError};
use crate::screening::prompts;

/// Two-tier oracle failure taxonomy: the call failed, or the call returned
/// content that does not match the expected shape. Stages tag their sticky
/// error message differently for each tier.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle call failed: {0}")]
    Transport(String),

    #[error("oracle response malformed: {0}")]
    Parse(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Response shapes
// ────────────────────────────────────────────────────────────────────────────

/// Structured data extracted from one resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
}

/// Qualifications that align with the JD, and JD requirements the candidate
/// does not cover.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default)]
    pub matches: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
}

/// Raw scoring response. `score` arrives as a JSON number and is normalized
/// to an integer in [0, 100] via [`ScoreReport::normalized_score`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreReport {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub reasons: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl ScoreReport {
    /// Rounds to the nearest integer and clamps into [0, 100].
    pub fn normalized_score(&self) -> u32 {
        self.score.round().clamp(0.0, 100.0) as u32
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The three semantic judgments the pipeline delegates to the model.
///
/// Carried in `AppState` as `Arc<dyn ScreeningOracle>`.
#[async_trait]
pub trait ScreeningOracle: Send + Sync {
    async fn extract_profile(&self, resume_text: &str) -> Result<CandidateProfile, OracleError>;

    async fn match_profile(
        &self,
        job_description: &str,
        profile: &CandidateProfile,
    ) -> Result<MatchResult, OracleError>;

    async fn score_fit(
        &self,
        job_description: &str,
        profile: &CandidateProfile,
        match_result: &MatchResult,
    ) -> Result<ScoreReport, OracleError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmOracle — production implementation
// ────────────────────────────────────────────────────────────────────────────

/// Production oracle backed by the shared [`LlmClient`].
pub struct LlmOracle {
    llm: LlmClient,
}

impl LlmOracle {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

fn map_llm_error(e: LlmError) -> OracleError {
    if e.is_transport() {
        OracleError::Transport(e.to_string())
    } else {
        OracleError::Parse(e.to_string())
    }
}

#[async_trait]
impl ScreeningOracle for LlmOracle {
    async fn extract_profile(&self, resume_text: &str) -> Result<CandidateProfile, OracleError> {
        let prompt = prompts::extraction_prompt(resume_text);
        self.llm
            .call_json::<CandidateProfile>(&prompt, prompts::EXTRACTION_SYSTEM)
            .await
            .map_err(map_llm_error)
    }

    async fn match_profile(
        &self,
        job_description: &str,
        profile: &CandidateProfile,
    ) -> Result<MatchResult, OracleError> {
        let prompt = prompts::matching_prompt(job_description, profile);
        self.llm
            .call_json::<MatchResult>(&prompt, prompts::MATCHING_SYSTEM)
            .await
            .map_err(map_llm_error)
    }

    async fn score_fit(
        &self,
        job_description: &str,
        profile: &CandidateProfile,
        match_result: &MatchResult,
    ) -> Result<ScoreReport, OracleError> {
        let prompt = prompts::scoring_prompt(job_description, match_result, &profile.experience);
        self.llm
            .call_json::<ScoreReport>(&prompt, prompts::SCORING_SYSTEM)
            .await
            .map_err(map_llm_error)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
