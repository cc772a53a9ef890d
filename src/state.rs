use std::sync::Arc;

use crate::agents::instance::ProductAgent;
use crate::error::AppError;
use crate::seed;
use crate::store::sqlite::SqliteStore;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<ProductAgent>,
}

impl AppState {
    pub fn init() -> Result<Self, AppError> {
        let store = SqliteStore::new("product-agent")?;
        if seed::seed_if_empty(&store)? {
            tracing::info!("seeded catalog with default products");
        }
        let agent = ProductAgent::new(Arc::new(store))?;
        Ok(Self {
            agent: Arc::new(agent),
        })
    }
}
