use std::sync::Arc;

use crate::config::Config;
use crate::document::DocumentReader;
use crate::screening::oracle::ScreeningOracle;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Both collaborators sit behind trait objects so handlers and the pipeline
/// can be exercised in tests without a PDF parser or a live model.
#[derive(Clone)]
pub struct AppState {
    pub reader: Arc<dyn DocumentReader>,
    pub oracle: Arc<dyn ScreeningOracle>,
    pub config: Config,
}
