//! 启动并调用一次的主流程
use crate::{
    error::Result,
    runner::{CompletionBackend, DedalusRunner},
    types::{RunParams, RunResult},
};
use log::info;
use std::io::Write;

/// 固定的提示文本
pub const PROMPT: &str = "What are the key factors that influence weather patterns?";
/// 固定的目标模型
pub const MODEL: &str = "anthropic/claude-opus-4-6";

/// 发送固定提示，并把最终输出加换行写入 `out`
///
/// 远端调用失败时直接返回错误，`out` 不会被写入
pub async fn run<B, W>(runner: &DedalusRunner<B>, out: &mut W) -> Result<RunResult>
where
    B: CompletionBackend,
    W: Write,
{
    info!("sending prompt to {}", MODEL);
    let result = runner.run(RunParams::new(PROMPT, MODEL)).await?;

    writeln!(out, "{}", result.final_output)?;
    out.flush()?;
    Ok(result)
}
