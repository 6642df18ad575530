//! Order lookups by business code and import from the external ERP.

use reqwest::Method;
use serde_json::json;
use smp_core::{Order, OrderCode};

use crate::error::ApiError;
use crate::gateway::RequestOptions;
use crate::resource::ResourceService;

impl ResourceService<Order> {
    /// Exact match on the order code, via the search endpoint.
    pub async fn find_by_code(&self, code: &OrderCode) -> Result<Option<Order>, ApiError> {
        let hits = self.search(code.as_str()).await?;
        Ok(hits.into_iter().find(|o| o.code == *code))
    }

    /// Ask the backend to import `code` from the external system.
    ///
    /// Returns the imported order; the server's success message is toasted.
    pub async fn sync_external(&self, code: &OrderCode) -> Result<Order, ApiError> {
        tracing::info!(code = %code, "syncing order from external system");
        self.api()
            .send(
                Method::POST,
                &format!("/orders/sync/{code}"),
                &json!({}),
                RequestOptions::default(),
            )
            .await
    }
}
