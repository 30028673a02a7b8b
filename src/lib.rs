//! # dedalus-runner - Dedalus 模型路由服务的最小客户端
//!
//! 读取 `DEDALUS_API_KEY`，创建客户端，向指定模型发送一次提示，并输出最终结果。
//!
//! ## 主要特性
//!
//! - **快速失败**：缺少密钥时在任何网络请求之前返回配置错误。
//! - **`.env` 支持**：基于 `dotenvy` 读取本地 `.env` 文件，环境变量优先。
//! - **可替换后端**：[`runner::CompletionBackend`] 让运行器可以脱离网络测试。
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use dedalus_runner::{Config, DedalusClient, DedalusRunner, RunParams};
//! use dedalus_runner::error::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // 从环境变量加载配置 (需要设置 DEDALUS_API_KEY)
//!     let config = Config::from_env()?;
//!     let runner = DedalusRunner::new(DedalusClient::new(config)?);
//!
//!     let result = runner
//!         .run(RunParams::new("你好，世界！", "anthropic/claude-opus-4-6"))
//!         .await?;
//!     println!("{}", result.final_output);
//!
//!     Ok(())
//! }
//! ```

// 模块定义
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod runner;
pub mod types;

pub use client::DedalusClient;
pub use config::Config;
pub use error::{DedalusError, Result};
pub use runner::{CompletionBackend, DedalusRunner};
pub use types::{RunParams, RunResult};
