//! API 数据结构模块

use serde::{Deserialize, Serialize};

// ================================================================================================
// API 请求结构
// ================================================================================================

/// 对话消息
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Message {
    /// 角色
    pub role: Role,
    /// 内容
    pub content: String,
}

/// 角色枚举
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// 用户
    #[default]
    User,
    /// 机器人
    Assistant,
}

impl Message {
    /// 创建一条用户消息
    pub fn user(content: impl Into<String>) -> Self {
        Message {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// chat/completions 请求体
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChatCompletionRequest {
    /// 路由目标模型，形如 `vendor/model`
    pub model: String,
    /// 消息列表
    pub messages: Vec<Message>,
    /// 是否流式返回，这里始终为 `false`
    pub stream: bool,
}

// ================================================================================================
// API 响应结构
// ================================================================================================

/// API 响应体
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct CompletionResponse {
    /// 响应 ID
    #[serde(default)]
    pub id: String,
    /// 对话选择
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// 创建时间
    #[serde(default)]
    pub created: u64,
    /// 实际使用的模型
    #[serde(default)]
    pub model: String,
    /// token 使用情况
    #[serde(default)]
    pub usage: Usage,
}

/// 对话选择
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct Choice {
    /// 结束原因
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// 索引
    #[serde(default)]
    pub index: u32,
    /// 消息内容
    #[serde(default)]
    pub message: ResponseMessage,
}

/// 响应中的消息，`content` 可能为 `null`
#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct ResponseMessage {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
}

/// token 使用情况
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    /// 完成 token 数量
    #[serde(default)]
    pub completion_tokens: u32,
    /// 提示 token 数量
    #[serde(default)]
    pub prompt_tokens: u32,
    /// 总 token 数量
    #[serde(default)]
    pub total_tokens: u32,
}

// ================================================================================================
// 应用内部数据模型
// ================================================================================================

/// 一次运行的参数：输入文本和目标模型
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunParams {
    pub input: String,
    pub model: String,
}

impl RunParams {
    pub fn new(input: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            model: model.into(),
        }
    }
}

/// 一次运行的结果
#[derive(Debug, Clone)]
pub struct RunResult {
    /// 最终输出文本
    pub final_output: String,
    /// 服务端报告的模型名称
    pub model: String,
    /// token 使用情况
    pub usage: Usage,
}
