//! Typed CRUD access to a backend resource.
//!
//! Paths follow the backend layout `{base}/{PATH}` and `{base}/{PATH}/{id}`.

use std::marker::PhantomData;
use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use smp_core::{
    Client, ClientDraft, ClientFilter, Entity, ListFilter, Order, OrderDraft, OrderFilter, Page,
    PageRequest, Product, ProductDraft, ProductFilter, User, UserDraft, UserFilter,
};

use crate::error::ApiError;
use crate::gateway::{ApiClient, RequestOptions};

/// A record with standard list/get/create/update/delete endpoints.
pub trait Resource: Entity<Id: Serialize> + DeserializeOwned + Send + Sync + 'static {
    /// Collection path, e.g. `/orders`.
    const PATH: &'static str;
    /// Human name used in logs.
    const NAME: &'static str;

    type Draft: Serialize + Send + Sync;
    type Filter: ListFilter;
}

impl Resource for Order {
    const PATH: &'static str = "/orders";
    const NAME: &'static str = "order";
    type Draft = OrderDraft;
    type Filter = OrderFilter;
}

impl Resource for Product {
    const PATH: &'static str = "/products";
    const NAME: &'static str = "product";
    type Draft = ProductDraft;
    type Filter = ProductFilter;
}

impl Resource for Client {
    const PATH: &'static str = "/clients";
    const NAME: &'static str = "client";
    type Draft = ClientDraft;
    type Filter = ClientFilter;
}

impl Resource for User {
    const PATH: &'static str = "/users";
    const NAME: &'static str = "user";
    type Draft = UserDraft;
    type Filter = UserFilter;
}

/// Type-safe CRUD service for one [`Resource`].
pub struct ResourceService<T: Resource> {
    api: Arc<ApiClient>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: Resource> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: Resource> ResourceService<T> {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            _phantom: PhantomData,
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    fn item_path(id: T::Id) -> String {
        format!("{}/{}", T::PATH, id)
    }

    /// One page, filtered and sorted.
    pub async fn list(&self, req: &PageRequest, filter: &T::Filter) -> Result<Page<T>, ApiError> {
        let mut query = req.to_query_params();
        query.extend(filter.to_query_params()?);
        tracing::debug!(resource = T::NAME, page = req.page, "list");
        self.api.get(T::PATH, &query).await
    }

    pub async fn get(&self, id: T::Id) -> Result<T, ApiError> {
        self.api.get(&Self::item_path(id), &[]).await
    }

    /// Free-text lookup used by search widgets.
    pub async fn search(&self, text: &str) -> Result<Vec<T>, ApiError> {
        let query = [("query".to_string(), text.trim().to_string())];
        self.api
            .get(&format!("{}/search", T::PATH), &query)
            .await
    }

    pub async fn create(&self, draft: &T::Draft) -> Result<T, ApiError> {
        self.api
            .send(Method::POST, T::PATH, draft, RequestOptions::default())
            .await
    }

    /// Create, with the server's success message staged for the next page.
    pub async fn create_then_navigate(&self, draft: &T::Draft) -> Result<T, ApiError> {
        self.api
            .send(Method::POST, T::PATH, draft, RequestOptions::flash())
            .await
    }

    pub async fn update(&self, id: T::Id, draft: &T::Draft) -> Result<T, ApiError> {
        self.api
            .send(Method::PUT, &Self::item_path(id), draft, RequestOptions::default())
            .await
    }

    pub async fn update_then_navigate(&self, id: T::Id, draft: &T::Draft) -> Result<T, ApiError> {
        self.api
            .send(Method::PUT, &Self::item_path(id), draft, RequestOptions::flash())
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), ApiError> {
        self.api.delete(&Self::item_path(id), None).await
    }

    /// Bulk delete: `DELETE {PATH}` with `{"ids": [...]}`.
    pub async fn delete_many(&self, ids: &[T::Id]) -> Result<(), ApiError> {
        if ids.is_empty() {
            return Ok(());
        }
        let body = json!({ "ids": ids });
        tracing::info!(resource = T::NAME, count = ids.len(), "bulk delete");
        self.api.delete(T::PATH, Some(&body)).await
    }
}

pub type OrderService = ResourceService<Order>;
pub type ProductService = ResourceService<Product>;
pub type ClientService = ResourceService<Client>;
pub type UserService = ResourceService<User>;
