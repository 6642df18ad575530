//! Devices and their floor-map bindings.

use std::sync::Arc;

use reqwest::Method;
use smp_core::{
    BindingDraft, BindingId, Device, DeviceFilter, ListFilter, MapPosition, Page, PageRequest,
    UserDevice,
};

use crate::error::ApiError;
use crate::gateway::{ApiClient, RequestOptions};

#[derive(Debug, Clone)]
pub struct DeviceService {
    api: Arc<ApiClient>,
}

impl DeviceService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn list(
        &self,
        req: &PageRequest,
        filter: &DeviceFilter,
    ) -> Result<Page<Device>, ApiError> {
        let mut query = req.to_query_params();
        query.extend(filter.to_query_params()?);
        self.api.get("/devices", &query).await
    }

    /// Devices that are not bound to a map position yet.
    pub async fn available(&self) -> Result<Vec<Device>, ApiError> {
        self.api.get("/devices/available", &[]).await
    }

    /// Every binding on the floor map.
    pub async fn bindings(&self) -> Result<Vec<UserDevice>, ApiError> {
        self.api.get("/user-devices", &[]).await
    }

    pub async fn bind(&self, draft: &BindingDraft) -> Result<UserDevice, ApiError> {
        check_position(draft)?;
        self.api
            .send(Method::POST, "/user-devices", draft, RequestOptions::default())
            .await
    }

    pub async fn update_binding(
        &self,
        id: BindingId,
        draft: &BindingDraft,
    ) -> Result<UserDevice, ApiError> {
        check_position(draft)?;
        self.api
            .send(
                Method::PUT,
                &format!("/user-devices/{id}"),
                draft,
                RequestOptions::default(),
            )
            .await
    }

    /// Remove the binding. The device's production logs are kept.
    pub async fn unbind(&self, id: BindingId) -> Result<(), ApiError> {
        self.api.delete(&format!("/user-devices/{id}"), None).await
    }
}

fn check_position(draft: &BindingDraft) -> Result<(), ApiError> {
    MapPosition::new(draft.coordinate_x, draft.coordinate_y)?;
    if draft.name.trim().is_empty() {
        return Err(smp_core::DomainError::validation("name", "Device name is required").into());
    }
    Ok(())
}
