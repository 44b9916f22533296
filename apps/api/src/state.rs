use std::sync::Arc;

use crate::config::Config;
use crate::portfolio::generator::PortfolioGenerator;
use crate::portfolio::workspace::Workspace;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Constructed once in `main`; enforces one generation in flight.
    pub generator: Arc<PortfolioGenerator>,
    /// Current profile and artifact, replaced wholesale per generation.
    pub workspace: Arc<Workspace>,
    pub config: Config,
}
