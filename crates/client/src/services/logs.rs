use std::sync::Arc;

use smp_core::{ListFilter, Log, LogFilter, Page, PageRequest};

use crate::error::ApiError;
use crate::gateway::ApiClient;

/// Read-only access to production logs.
#[derive(Debug, Clone)]
pub struct LogService {
    api: Arc<ApiClient>,
}

impl LogService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(&self, req: &PageRequest, filter: &LogFilter) -> Result<Page<Log>, ApiError> {
        let mut query = req.to_query_params();
        query.extend(filter.to_query_params()?);
        self.api.get("/logs", &query).await
    }
}
