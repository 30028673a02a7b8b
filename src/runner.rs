//! 运行器模块
//!
//! 把一次 `(input, model)` 调用转换成 chat/completions 请求，并取出最终输出文本
use crate::{
    error::{DedalusError, Result},
    types::{ChatCompletionRequest, CompletionResponse, Message, RunParams, RunResult},
};
use async_trait::async_trait;
use log::debug;

/// 能完成一次 chat/completions 调用的后端
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<CompletionResponse>;
}

/// Dedalus 运行器
#[derive(Debug, Clone)]
pub struct DedalusRunner<B> {
    backend: B,
}

impl<B: CompletionBackend> DedalusRunner<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// 发送一次请求并返回最终输出
    pub async fn run(&self, params: RunParams) -> Result<RunResult> {
        let request = ChatCompletionRequest {
            model: params.model,
            messages: vec![Message::user(params.input)],
            stream: false,
        };

        let response = self.backend.complete(&request).await?;
        let result = into_run_result(response, request.model)?;
        debug!(
            "run finished: model={} prompt_tokens={} completion_tokens={}",
            result.model, result.usage.prompt_tokens, result.usage.completion_tokens
        );
        Ok(result)
    }
}

fn into_run_result(response: CompletionResponse, requested_model: String) -> Result<RunResult> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or(DedalusError::NoContent)?;

    let model = if response.model.is_empty() {
        requested_model
    } else {
        response.model
    };

    Ok(RunResult {
        final_output: choice.message.content.unwrap_or_default(),
        model,
        usage: response.usage,
    })
}
