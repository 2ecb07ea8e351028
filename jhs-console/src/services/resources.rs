//! Cached CRUD over any backend resource.

use crate::middleware::AccessToken;
use crate::models::Resource;
use crate::services::{ApiClient, ApiError, QueryCache};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Reads go through the query cache, partitioned per caller; every mutation
/// invalidates the resource it touched.
#[derive(Clone)]
pub struct ResourceService {
    api: Arc<ApiClient>,
    cache: Arc<QueryCache>,
}

impl ResourceService {
    pub fn new(api: Arc<ApiClient>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub async fn list(&self, token: &AccessToken, resource: Resource) -> Result<Vec<Value>, ApiError> {
        let path = resource.collection_path();
        let value = self
            .cache
            .get_or_fetch(&token.cache_scope(), &path, || async {
                let rows: Vec<Value> = self.api.get_list(token, &path).await?;
                Ok(Value::Array(rows))
            })
            .await?;

        match value {
            Value::Array(rows) => Ok(rows),
            other => Err(ApiError::Decode(format!(
                "{} list is not an array: {}",
                resource, other
            ))),
        }
    }

    /// Typed variant of [`list`](Self::list) for reference collections.
    pub async fn list_as<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        resource: Resource,
    ) -> Result<Vec<T>, ApiError> {
        let rows = self.list(token, resource).await?;
        serde_json::from_value(Value::Array(rows))
            .map_err(|e| ApiError::Decode(format!("{}: {}", resource, e)))
    }

    pub async fn get(&self, token: &AccessToken, resource: Resource, id: &str) -> Result<Value, ApiError> {
        let path = resource.item_path(id);
        self.cache
            .get_or_fetch(&token.cache_scope(), &path, || self.api.get(token, &path))
            .await
    }

    pub async fn create(
        &self,
        token: &AccessToken,
        resource: Resource,
        body: &Value,
    ) -> Result<Value, ApiError> {
        let result = self
            .api
            .post(token, &resource.collection_path(), body)
            .await;
        self.cache.invalidate(resource);
        let created = result?;

        tracing::info!(resource = %resource, "Record created");
        Ok(created)
    }

    pub async fn update(
        &self,
        token: &AccessToken,
        resource: Resource,
        id: &str,
        body: &Value,
    ) -> Result<Value, ApiError> {
        let result = self.api.put(token, &resource.item_path(id), body).await;
        self.cache.invalidate(resource);
        let updated = result?;

        tracing::info!(resource = %resource, id, "Record updated");
        Ok(updated)
    }

    pub async fn delete(&self, token: &AccessToken, resource: Resource, id: &str) -> Result<(), ApiError> {
        let result = self.api.delete(token, &resource.item_path(id)).await;
        self.cache.invalidate(resource);
        result?;

        tracing::info!(resource = %resource, id, "Record deleted");
        Ok(())
    }
}
