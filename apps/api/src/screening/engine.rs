//! Workflow engine — sequences the screening stages for a single resume.
//!
//! Stage order: LoadResume → ExtractData → MatchJD → ScoreCandidate →
//! (SuggestImprovements | End). The only branch in the whole pipeline is the
//! weak-fit check after scoring; everything else is a straight line. The
//! engine does no I/O of its own — it only calls stages and evaluates that
//! one predicate.

use crate::document::DocumentReader;
use crate::screening::oracle::ScreeningOracle;
use crate::screening::stages::{self, StageResult};
use crate::screening::state::ScreeningState;

/// Scores below this get improvement suggestions appended.
pub const SUGGESTION_THRESHOLD: u32 = 50;

/// Drives one resume through the full pipeline.
///
/// Never fails outward: every collaborator failure ends up in the returned
/// state's `error` field with a zero score, so one bad resume can never
/// abort a batch. Scoring runs even after an upstream failure so every
/// resume yields a uniform, renderable result.
pub async fn run_screening(
    state: ScreeningState,
    reader: &dyn DocumentReader,
    oracle: &dyn ScreeningOracle,
) -> ScreeningState {
    let state = match run_fallible_stages(state, reader, oracle).await {
        Ok(state) => stages::score_candidate(state, oracle).await,
        // An upstream failure jumps straight to the scoring failure branch.
        Err(failure) => {
            tracing::debug!(kind = ?failure.kind, "pipeline short-circuited to scoring");
            stages::score_failed(failure.state)
        }
    };

    if state.score < SUGGESTION_THRESHOLD {
        stages::suggest_improvements(state)
    } else {
        state
    }
}

/// The linear prefix of the pipeline: the stages that can short-circuit.
async fn run_fallible_stages(
    state: ScreeningState,
    reader: &dyn DocumentReader,
    oracle: &dyn ScreeningOracle,
) -> StageResult {
    let state = stages::load_resume(state, reader).await?;
    let state = stages::extract_data(state, oracle).await?;
    stages::match_jd(state, oracle).await
}
