//! HTTP implementation of [`PostsApi`] on top of reqwest

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::PostsApi;
use crate::config::RemoteConfig;
use crate::error::{BlogError, RemoteError, Result};
use crate::types::{Post, PostId, PostInput};

/// Client preconfigured with the store's base address
#[derive(Clone)]
pub struct HttpPostsClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPostsClient {
    /// Build a client from remote configuration
    ///
    /// # Errors
    ///
    /// Returns `BlogError::InvalidInput` if the base URL is not http(s) and
    /// `RemoteError::Network` if the underlying client cannot be built.
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(BlogError::InvalidInput(format!(
                "Base URL must start with http:// or https://: '{}'",
                config.base_url
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(RemoteError::from)?;

        Ok(Self::with_client(client, &config.base_url))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    fn item_url(&self, id: PostId) -> String {
        format!("{}/posts/{}", self.base_url, id)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let resp = request.send().await.map_err(RemoteError::from)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RemoteError::Api {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let resp = self.send(request).await?;
        let body = resp.bytes().await.map_err(RemoteError::from)?;
        let value = serde_json::from_slice(&body).map_err(RemoteError::from)?;
        Ok(value)
    }
}

#[async_trait]
impl PostsApi for HttpPostsClient {
    async fn list(&self) -> Result<Vec<Post>> {
        let url = self.collection_url();
        tracing::debug!(%url, "GET posts");
        self.send_json(self.client.get(&url)).await
    }

    async fn get(&self, id: PostId) -> Result<Post> {
        let url = self.item_url(id);
        tracing::debug!(%url, "GET post");
        self.send_json(self.client.get(&url)).await
    }

    async fn create(&self, input: &PostInput) -> Result<Post> {
        let url = self.collection_url();
        tracing::debug!(%url, title = %input.title, "POST post");
        self.send_json(self.client.post(&url).json(input)).await
    }

    async fn update(&self, id: PostId, input: &PostInput) -> Result<Post> {
        let url = self.item_url(id);
        tracing::debug!(%url, "PUT post");
        self.send_json(self.client.put(&url).json(input)).await
    }

    async fn delete(&self, id: PostId) -> Result<()> {
        let url = self.item_url(id);
        tracing::debug!(%url, "DELETE post");
        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}
