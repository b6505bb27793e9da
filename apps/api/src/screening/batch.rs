//! Batch runner — screens each uploaded resume independently, in order.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use crate::document::DocumentReader;
use crate::screening::engine::run_screening;
use crate::screening::oracle::ScreeningOracle;
use crate::screening::state::{ScreeningResult, ScreeningState};

/// One uploaded resume awaiting screening.
#[derive(Debug, Clone)]
pub struct ResumeSubmission {
    pub candidate_name: String,
    pub content: Bytes,
}

/// Screens every resume against the job description, one at a time.
///
/// Results come back in submission order, exactly one per resume. A resume
/// whose pipeline failed is still present — zero score, explanatory reason,
/// non-empty error — and never aborts the rest of the batch. The JD is
/// shared read-only across all runs; nothing else is.
pub async fn screen_batch(
    job_description: &str,
    resumes: Vec<ResumeSubmission>,
    reader: &dyn DocumentReader,
    oracle: &dyn ScreeningOracle,
) -> Vec<ScreeningResult> {
    let job_description: Arc<str> = Arc::from(job_description);
    let mut results = Vec::with_capacity(resumes.len());

    for submission in resumes {
        let state = ScreeningState::new(
            job_description.clone(),
            submission.content,
            submission.candidate_name,
        );
        let state = run_screening(state, reader, oracle).await;
        info!(
            candidate = %state.candidate_name,
            score = state.score,
            failed = state.has_error(),
            "candidate screened"
        );
        results.push(state.into_result());
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::testing::{
        match_result, profile_with_skills, score_report, StubCall, StubOracle, StubRead,
        StubReader,
    };

    fn submissions(names: &[&str]) -> Vec<ResumeSubmission> {
        names
            .iter()
            .map(|name| ResumeSubmission {
                candidate_name: (*name).to_string(),
                content: Bytes::from_static(b"%PDF-1.4 stub"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let reader = StubReader(StubRead::Text("some resume text"));
        let oracle = StubOracle {
            profile: StubCall::Ok(profile_with_skills(&["Python"])),
            matched: StubCall::Ok(match_result(&["Python"], &[])),
            score: StubCall::Ok(score_report(70.0, &["solid"], &[])),
        };

        let results = screen_batch(
            "Needs Python",
            submissions(&["alice.pdf", "bob.pdf", "carol.pdf"]),
            &reader,
            &oracle,
        )
        .await;

        let names: Vec<&str> = results.iter().map(|r| r.candidate.as_str()).collect();
        assert_eq!(names, ["alice.pdf", "bob.pdf", "carol.pdf"]);
    }

    #[tokio::test]
    async fn test_failed_resume_does_not_abort_the_batch() {
        // Every document fails to read, but every submission still yields a
        // well-formed record.
        let reader = StubReader(StubRead::Fail("corrupt document"));
        let oracle = StubOracle::default();

        let results = screen_batch(
            "Needs Python",
            submissions(&["a.pdf", "b.pdf"]),
            &reader,
            &oracle,
        )
        .await;

        assert_eq!(results.len(), 2);
        for result in &results {
            assert_eq!(result.score, 0);
            assert!(result.error.starts_with("PDF loading error:"));
            assert!(result.reasons[0].contains(&result.error));
        }
    }

    #[tokio::test]
    async fn test_empty_batch_yields_empty_results() {
        let reader = StubReader(StubRead::Text("text"));
        let oracle = StubOracle::default();

        let results = screen_batch("Needs Python", Vec::new(), &reader, &oracle).await;
        assert!(results.is_empty());
    }
}
