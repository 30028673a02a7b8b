//! Dedalus HTTP 客户端模块
use crate::{
    config::Config,
    error::{DedalusError, Result},
    runner::CompletionBackend,
    types::{ChatCompletionRequest, CompletionResponse},
};
use async_trait::async_trait;
use log::{debug, error};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use std::sync::Arc;

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

// ================================================================================================
// 核心客户端模块
// ================================================================================================

/// Dedalus 客户端
///
/// 绑定一个 API 密钥。创建时不发起任何网络请求
#[derive(Debug, Clone)]
pub struct DedalusClient {
    client: Arc<Client>,
    config: Arc<Config>,
}

impl DedalusClient {
    /// 创建一个新的 `DedalusClient` 实例
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}{}", self.config.api_base, COMPLETIONS_PATH)
    }

    /// 构建 API 请求所需的 HTTP 标头
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.config.api_key))
            .map_err(|e| DedalusError::InvalidRequest(format!("Invalid API key: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// 发送一次 chat/completions 请求，不做重试
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<CompletionResponse> {
        let endpoint = self.endpoint();
        let headers = self.build_headers()?;
        debug!("POST {} model={}", endpoint, request.model);

        let response = self
            .client
            .post(&endpoint)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!("Failed to read error body from {}: {}", endpoint, e);
                String::new()
            });
            error!("Request to {} failed with status {}", endpoint, status);
            return Err(DedalusError::from_status(status, body.trim()));
        }

        let body = response.text().await?;
        let completion = serde_json::from_str::<CompletionResponse>(&body)?;
        Ok(completion)
    }
}

#[async_trait]
impl CompletionBackend for DedalusClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<CompletionResponse> {
        self.chat_completion(request).await
    }
}
