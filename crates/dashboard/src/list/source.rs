//! Where a list controller gets its pages from.

use async_trait::async_trait;
use smp_client::{ApiError, DeviceService, LogService, Resource, ResourceService};
use smp_core::{Device, DeviceFilter, ListFilter, Log, LogFilter, Page, PageRequest};

/// A paged, filterable endpoint.
#[async_trait]
pub trait PageSource<T>: Send + Sync {
    type Filter: ListFilter;

    async fn fetch_page(&self, req: &PageRequest, filter: &Self::Filter)
    -> Result<Page<T>, ApiError>;
}

/// Endpoints that accept a bulk delete.
#[async_trait]
pub trait BulkDelete<Id>: Send + Sync {
    async fn delete_many(&self, ids: &[Id]) -> Result<(), ApiError>;
}

#[async_trait]
impl<R: Resource> PageSource<R> for ResourceService<R> {
    type Filter = R::Filter;

    async fn fetch_page(&self, req: &PageRequest, filter: &R::Filter) -> Result<Page<R>, ApiError> {
        self.list(req, filter).await
    }
}

#[async_trait]
impl<R: Resource> BulkDelete<R::Id> for ResourceService<R> {
    async fn delete_many(&self, ids: &[R::Id]) -> Result<(), ApiError> {
        ResourceService::delete_many(self, ids).await
    }
}

#[async_trait]
impl PageSource<Log> for LogService {
    type Filter = LogFilter;

    async fn fetch_page(&self, req: &PageRequest, filter: &LogFilter) -> Result<Page<Log>, ApiError> {
        self.list(req, filter).await
    }
}

#[async_trait]
impl PageSource<Device> for DeviceService {
    type Filter = DeviceFilter;

    async fn fetch_page(
        &self,
        req: &PageRequest,
        filter: &DeviceFilter,
    ) -> Result<Page<Device>, ApiError> {
        self.list(req, filter).await
    }
}
