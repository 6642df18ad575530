//! Typed list filters and their query-parameter mapping.

use crate::error::DomainResult;

/// A per-entity filter that can be sent to a list endpoint.
///
/// `to_query_params` validates at the boundary: an inconsistent filter (e.g.
/// a date range whose start is after its end) never reaches the network.
pub trait ListFilter: Clone + Default + PartialEq + core::fmt::Debug + Send + Sync + 'static {
    fn to_query_params(&self) -> DomainResult<Vec<(String, String)>>;
}

/// Filter for screens that have no filter inputs.
impl ListFilter for () {
    fn to_query_params(&self) -> DomainResult<Vec<(String, String)>> {
        Ok(Vec::new())
    }
}

/// Accumulates query parameters, skipping absent and blank values.
#[derive(Debug, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a trimmed text value; blank text is treated as "no filter".
    pub fn text(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.0.push((key.to_string(), v.to_string()));
        }
        self
    }

    pub fn opt<V: core::fmt::Display>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.0.push((key.to_string(), v.to_string()));
        }
        self
    }

    pub fn finish(self) -> Vec<(String, String)> {
        self.0
    }
}
