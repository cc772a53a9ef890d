use std::sync::Arc;

use crate::classifier::IntentClassifier;
use crate::error::AppError;
use crate::models::query::QueryResponse;
use crate::orchestration::pipeline::run_pipeline;
use crate::orchestration::state::RequestState;
use crate::store::Catalog;
use crate::tools::executor::ToolExecutor;

/// The query agent: a classifier plus a tool executor bound to a catalog.
/// Holds no per-query state, so one instance serves concurrent requests.
pub struct ProductAgent {
    classifier: IntentClassifier,
    executor: ToolExecutor,
}

impl ProductAgent {
    pub fn new(catalog: Arc<dyn Catalog>) -> Result<Self, AppError> {
        Ok(Self {
            classifier: IntentClassifier::new()?,
            executor: ToolExecutor::new(catalog),
        })
    }

    /// Runs one query through the pipeline. Never fails: every failure mode
    /// ends up inside `response` as a structured error value.
    pub fn process(&self, query: &str) -> QueryResponse {
        let mut state = RequestState::new(query);
        run_pipeline(&self.classifier, &self.executor, &mut state);

        QueryResponse {
            response: state.response,
            tools_used: state.tools_used,
        }
    }
}
