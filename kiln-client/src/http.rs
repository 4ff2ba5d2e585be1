//! HTTP client for the album API
//!
//! Every endpoint answers with the [`ApiResponse`] envelope. The client
//! unwraps it: success yields the payload, anything else becomes
//! [`ClientError::Api`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::ApiResponse;

use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP 客户端 trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    fn token(&self) -> Option<&str>;
}

/// 网络 HTTP 客户端
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // 尝试解析为 API 错误响应
            match serde_json::from_str::<ApiResponse<serde_json::Value>>(&text) {
                Ok(envelope) if !envelope.is_success() => {
                    return Err(ClientError::Api {
                        code: envelope.code.unwrap_or_default(),
                        message: envelope.message,
                        details: envelope.details,
                    });
                }
                _ => {}
            }
            // 降级到原来的处理方式
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(format!("{status}: {text}"))),
            };
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&text)?;
        envelope
            .into_result()?
            .ok_or_else(|| ClientError::InvalidResponse("Missing response data".into()))
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let req = self.authorize(self.client.get(self.url(path)));
        tracing::debug!(path, "GET");
        let response = req.send().await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.authorize(self.client.put(self.url(path)).json(body));
        tracing::debug!(path, "PUT");
        let response = req.send().await?;
        self.handle_response(response).await
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = NetworkHttpClient::new(&ClientConfig::new("http://localhost:9625/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9625");
        assert_eq!(client.url("/api/albums"), "http://localhost:9625/api/albums");
        assert_eq!(client.url("api/health"), "http://localhost:9625/api/health");
        assert!(client.token().is_none());
        assert_eq!(client.with_token("t").token(), Some("t"));
    }
}
