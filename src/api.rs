//! HTTP API for the crisis service
//!
//! Chat, resource lookup, survival tips and health, mounted at the root and
//! again under `/api`.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::triage::CrisisOrchestrator;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<CrisisOrchestrator>,
    pub service_name: Arc<str>,
}

impl AppState {
    pub fn new(orchestrator: CrisisOrchestrator, service_name: &str) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
            service_name: Arc::from(service_name),
        }
    }
}
