use crate::{
    abstract_trait::{client::DynApiClient, resource::ResourceServiceTrait},
    client::{Download, RequestBody, RequestOptions, append_query_param},
    domain::{ExportFormat, Resource},
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use shared::errors::ServiceError;
use tracing::info;

#[derive(Clone)]
pub struct ResourceService {
    client: DynApiClient,
}

impl ResourceService {
    pub fn new(client: DynApiClient) -> Self {
        Self { client }
    }
}

fn with_query(path: &str, query: &[(String, String)]) -> String {
    query.iter().fold(path.to_string(), |acc, (key, value)| {
        append_query_param(
            &acc,
            &urlencoding::encode(key),
            &urlencoding::encode(value),
        )
    })
}

#[async_trait]
impl ResourceServiceTrait for ResourceService {
    async fn list(
        &self,
        resource: Resource,
        query: &[(String, String)],
    ) -> Result<Value, ServiceError> {
        info!("Listing {resource}");
        let path = with_query(resource.path(), query);
        let payload = self.client.get(&path, RequestOptions::default()).await?;
        Ok(payload.into_value())
    }

    async fn get(&self, resource: Resource, id: &str) -> Result<Value, ServiceError> {
        let payload = self
            .client
            .get(&resource.item_path(id), RequestOptions::default())
            .await?;
        Ok(payload.into_value())
    }

    async fn create(&self, resource: Resource, body: &Value) -> Result<Value, ServiceError> {
        info!("Creating {resource}");
        let payload = self
            .client
            .post(
                resource.path(),
                RequestBody::Json(body.clone()),
                RequestOptions::default(),
            )
            .await?;
        Ok(payload.into_value())
    }

    async fn update(
        &self,
        resource: Resource,
        id: &str,
        body: &Value,
    ) -> Result<Value, ServiceError> {
        info!("Updating {resource} {id}");
        let payload = self
            .client
            .put(
                &resource.item_path(id),
                RequestBody::Json(body.clone()),
                RequestOptions::default(),
            )
            .await?;
        Ok(payload.into_value())
    }

    async fn delete(&self, resource: Resource, id: &str) -> Result<(), ServiceError> {
        info!("Deleting {resource} {id}");
        self.client
            .delete(&resource.item_path(id), RequestOptions::default())
            .await?;
        Ok(())
    }

    async fn export(
        &self,
        resource: Resource,
        format: ExportFormat,
    ) -> Result<Download, ServiceError> {
        let path = append_query_param(
            &format!("{}/export", resource.path()),
            "format",
            format.as_str(),
        );
        let download = self.client.download(&path, RequestOptions::default()).await?;
        info!("Exported {resource} as {} ({} bytes)", format.as_str(), download.len());
        Ok(download)
    }

    async fn upload(
        &self,
        resource: Resource,
        id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Value, ServiceError> {
        info!("Uploading {file_name} to {resource} {id}");
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        let payload = self
            .client
            .post(
                &format!("{}/anexos", resource.item_path(id)),
                RequestBody::Multipart(form),
                RequestOptions::default(),
            )
            .await?;
        Ok(payload.into_value())
    }
}
