use smp_client::{ApiError, DeviceService};
use smp_core::{
    BindingDraft, BindingId, Device, DeviceId, DomainError, MapPosition, OrderCode, ProcessStage,
    UserDevice,
};

use super::required;

/// Places a device on the floor map.
///
/// Not a plain CRUD form: the device comes from the "available" list and
/// the save goes to the bindings endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingForm {
    pub device: Option<DeviceId>,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub stage: ProcessStage,
    pub order_code: String,
    editing: Option<BindingId>,
}

impl Default for BindingForm {
    fn default() -> Self {
        Self {
            device: None,
            name: String::new(),
            x: 50.0,
            y: 50.0,
            stage: ProcessStage::Preparation,
            order_code: String::new(),
            editing: None,
        }
    }
}

impl BindingForm {
    /// New binding for `device` at a clicked map position.
    pub fn place(device: &Device, x: f64, y: f64) -> Self {
        Self {
            device: Some(device.id),
            name: device.mac_address.clone(),
            x,
            y,
            ..Self::default()
        }
    }

    pub fn seed_from(binding: &UserDevice) -> Self {
        Self {
            device: Some(binding.device_id),
            name: binding.name.clone(),
            x: binding.coordinate_x,
            y: binding.coordinate_y,
            stage: binding.process_stage,
            order_code: binding
                .order_code
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            editing: Some(binding.id),
        }
    }

    pub fn validate(&self) -> Result<BindingDraft, DomainError> {
        let device = self
            .device
            .ok_or_else(|| DomainError::validation("deviceId", "Device is required"))?;
        let name = required("name", &self.name, "Name")?;
        let position = MapPosition::new(self.x, self.y)?;
        let order_code = if self.order_code.trim().is_empty() {
            None
        } else {
            Some(OrderCode::normalize(&self.order_code)?)
        };
        Ok(BindingDraft::new(device, name, position, self.stage, order_code))
    }

    /// Create or update the binding.
    pub async fn submit(&self, devices: &DeviceService) -> Result<UserDevice, ApiError> {
        let draft = self.validate()?;
        match self.editing {
            None => devices.bind(&draft).await,
            Some(id) => devices.update_binding(id, &draft).await,
        }
    }
}
