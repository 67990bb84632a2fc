use crate::{
    client::{ApiMethod, ApiPayload, Download, RequestBody, RequestOptions},
    events::SessionEvent,
};
use async_trait::async_trait;
use shared::errors::ClientError;
use std::sync::Arc;
use tokio::sync::broadcast;

pub type DynApiClient = Arc<dyn ApiClientTrait + Send + Sync>;

#[async_trait]
pub trait ApiClientTrait: Send + Sync {
    async fn request(
        &self,
        method: ApiMethod,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<ApiPayload, ClientError>;

    async fn download(&self, path: &str, options: RequestOptions)
    -> Result<Download, ClientError>;

    fn subscribe(&self) -> broadcast::Receiver<SessionEvent>;

    async fn get(&self, path: &str, options: RequestOptions) -> Result<ApiPayload, ClientError> {
        self.request(ApiMethod::Get, path, RequestBody::None, options)
            .await
    }

    async fn post(
        &self,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<ApiPayload, ClientError> {
        self.request(ApiMethod::Post, path, body, options).await
    }

    async fn put(
        &self,
        path: &str,
        body: RequestBody,
        options: RequestOptions,
    ) -> Result<ApiPayload, ClientError> {
        self.request(ApiMethod::Put, path, body, options).await
    }

    async fn delete(&self, path: &str, options: RequestOptions) -> Result<ApiPayload, ClientError> {
        self.request(ApiMethod::Delete, path, RequestBody::None, options)
            .await
    }
}
