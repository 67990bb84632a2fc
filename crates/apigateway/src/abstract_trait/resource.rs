use crate::{
    client::Download,
    domain::{ExportFormat, Resource},
};
use async_trait::async_trait;
use serde_json::Value;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynResourceService = Arc<dyn ResourceServiceTrait + Send + Sync>;

#[async_trait]
pub trait ResourceServiceTrait {
    async fn list(
        &self,
        resource: Resource,
        query: &[(String, String)],
    ) -> Result<Value, ServiceError>;
    async fn get(&self, resource: Resource, id: &str) -> Result<Value, ServiceError>;
    async fn create(&self, resource: Resource, body: &Value) -> Result<Value, ServiceError>;
    async fn update(
        &self,
        resource: Resource,
        id: &str,
        body: &Value,
    ) -> Result<Value, ServiceError>;
    async fn delete(&self, resource: Resource, id: &str) -> Result<(), ServiceError>;
    async fn export(
        &self,
        resource: Resource,
        format: ExportFormat,
    ) -> Result<Download, ServiceError>;
    async fn upload(
        &self,
        resource: Resource,
        id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ServiceError>;
}
