use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::filter::{ListFilter, QueryParams};
use crate::id::{DeviceId, LogId};
use crate::model::order::OrderCode;

/// Append-only production event reported by a device. Never mutated here.
///
/// Durations are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub id: LogId,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub cycle_time: f64,
    #[serde(default)]
    pub quantity_produced: i64,
    #[serde(default)]
    pub paused_time: f64,
    #[serde(default)]
    pub total_time: f64,
    #[serde(default)]
    pub device_id: Option<DeviceId>,
    #[serde(default)]
    pub order_code: Option<OrderCode>,
}

impl Log {
    /// Share of the total time the device was running, in `[0, 100]`.
    pub fn efficiency_percent(&self) -> f64 {
        if self.total_time <= 0.0 {
            return 0.0;
        }
        let running = (self.total_time - self.paused_time).max(0.0);
        (running / self.total_time * 100.0).min(100.0)
    }
}

impl Entity for Log {
    type Id = LogId;

    fn id(&self) -> LogId {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogFilter {
    pub device_id: Option<DeviceId>,
    pub order_code: Option<OrderCode>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ListFilter for LogFilter {
    fn to_query_params(&self) -> DomainResult<Vec<(String, String)>> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(DomainError::validation("from", "date range start is after its end"));
            }
        }
        Ok(QueryParams::new()
            .opt("deviceId", self.device_id)
            .opt("orderCode", self.order_code.as_ref())
            .opt("from", self.from)
            .opt("to", self.to)
            .finish())
    }
}
