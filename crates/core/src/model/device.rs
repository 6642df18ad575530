use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::error::{DomainError, DomainResult};
use crate::filter::{ListFilter, QueryParams};
use crate::id::{BindingId, DeviceId};
use crate::model::order::OrderCode;
use crate::value_object::ValueObject;

/// Raw hardware, independent of where it is placed on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: DeviceId,
    pub mac_address: String,
    #[serde(default)]
    pub ip_address: Option<String>,
    pub status: DeviceStatus,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
}

impl Entity for Device {
    type Id = DeviceId;

    fn id(&self) -> DeviceId {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceStatus {
    Online,
    Offline,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Online => "ONLINE",
            DeviceStatus::Offline => "OFFLINE",
        }
    }
}

impl core::fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Production stage a bound device reports for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessStage {
    Preparation,
    Cutting,
    Assembly,
    Finishing,
    QualityControl,
    Packaging,
}

impl ProcessStage {
    pub const ALL: [ProcessStage; 6] = [
        ProcessStage::Preparation,
        ProcessStage::Cutting,
        ProcessStage::Assembly,
        ProcessStage::Finishing,
        ProcessStage::QualityControl,
        ProcessStage::Packaging,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProcessStage::Preparation => "Preparation",
            ProcessStage::Cutting => "Cutting",
            ProcessStage::Assembly => "Assembly",
            ProcessStage::Finishing => "Finishing",
            ProcessStage::QualityControl => "Quality control",
            ProcessStage::Packaging => "Packaging",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProcessStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

// ─────────────────────────────────────────────────────────────────────────────
// Floor-map position
// ─────────────────────────────────────────────────────────────────────────────

/// Position on the floor-plan image, as percentages of its width/height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    x: f64,
    y: f64,
}

impl ValueObject for MapPosition {}

impl MapPosition {
    pub fn new(x: f64, y: f64) -> DomainResult<Self> {
        for (field, v) in [("coordinateX", x), ("coordinateY", y)] {
            if !v.is_finite() || !(0.0..=100.0).contains(&v) {
                return Err(DomainError::validation(
                    field,
                    "map position must be between 0 and 100 percent",
                ));
            }
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Binding
// ─────────────────────────────────────────────────────────────────────────────

/// A device placed on the floor map and optionally linked to an order.
///
/// Unbinding deletes this record; production logs of the device survive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDevice {
    pub id: BindingId,
    pub device_id: DeviceId,
    pub name: String,
    pub coordinate_x: f64,
    pub coordinate_y: f64,
    pub process_stage: ProcessStage,
    #[serde(default)]
    pub process_status: ProcessStatus,
    #[serde(default)]
    pub order_code: Option<OrderCode>,
}

impl UserDevice {
    pub fn position(&self) -> DomainResult<MapPosition> {
        MapPosition::new(self.coordinate_x, self.coordinate_y)
    }
}

impl Entity for UserDevice {
    type Id = BindingId;

    fn id(&self) -> BindingId {
        self.id
    }
}

/// Bind/update payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingDraft {
    pub device_id: DeviceId,
    pub name: String,
    pub coordinate_x: f64,
    pub coordinate_y: f64,
    pub process_stage: ProcessStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_code: Option<OrderCode>,
}

impl BindingDraft {
    pub fn new(
        device_id: DeviceId,
        name: impl Into<String>,
        position: MapPosition,
        process_stage: ProcessStage,
        order_code: Option<OrderCode>,
    ) -> Self {
        Self {
            device_id,
            name: name.into(),
            coordinate_x: position.x(),
            coordinate_y: position.y(),
            process_stage,
            order_code,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceFilter {
    /// Matched against MAC and IP address.
    pub search: Option<String>,
    pub status: Option<DeviceStatus>,
}

impl ListFilter for DeviceFilter {
    fn to_query_params(&self) -> DomainResult<Vec<(String, String)>> {
        Ok(QueryParams::new()
            .text("search", self.search.as_deref())
            .opt("status", self.status)
            .finish())
    }
}
