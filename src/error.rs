//! 错误处理模块

use thiserror::Error;

/// dedalus-runner 的统一错误类型
///
/// 配置缺失在任何网络请求之前报告，其余变体都来自远端调用
#[derive(Debug, Error)]
pub enum DedalusError {
    /// HTTP 请求相关错误（连接失败、超时等）
    #[error("HTTP请求失败: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON处理错误: {0}")]
    Json(String),

    /// API 服务端错误
    #[error("API错误: {0}")]
    Api(String),

    /// 身份验证失败
    #[error("身份验证失败: {0}")]
    Auth(String),

    /// API 请求频率限制
    #[error("请求频率超限: {0}")]
    RateLimit(String),

    /// 指定的模型不存在
    #[error("模型不存在: {0}")]
    ModelNotFound(String),

    /// 请求参数无效
    #[error("请求参数无效: {0}")]
    InvalidRequest(String),

    /// 响应中没有任何输出
    #[error("响应内容为空")]
    NoContent,

    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(String),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// dedalus-runner 的 Result 类型别名
pub type Result<T> = std::result::Result<T, DedalusError>;

impl From<serde_json::Error> for DedalusError {
    fn from(e: serde_json::Error) -> Self {
        DedalusError::Json(e.to_string())
    }
}

impl From<dotenvy::Error> for DedalusError {
    fn from(e: dotenvy::Error) -> Self {
        DedalusError::Config(format!(".env 文件读取失败: {}", e))
    }
}

impl DedalusError {
    /// 根据 HTTP 状态码和响应正文构造对应的错误
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = if body.is_empty() {
            format!("status {}", status)
        } else {
            format!("status {}: {}", status, body)
        };
        match status.as_u16() {
            401 | 403 => DedalusError::Auth(detail),
            404 => DedalusError::ModelNotFound(detail),
            429 => DedalusError::RateLimit(detail),
            _ => DedalusError::Api(detail),
        }
    }
}
