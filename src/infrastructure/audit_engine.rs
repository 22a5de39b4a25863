//! 审计引擎 - 基础设施层
//!
//! 对单个 URL 运行一次审计，只暴露"审计"能力

use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::models::AuditResult;

/// 传给审计引擎的选项
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditOptions {
    /// 只运行这些类别
    pub only_categories: Vec<String>,
    /// Chrome 启动参数
    pub chrome_flags: Vec<String>,
}

impl AuditOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            only_categories: config.categories.clone(),
            chrome_flags: config.chrome_flags.clone(),
        }
    }
}

/// 审计引擎
///
/// 职责：
/// - 对一个 URL 运行一次完整审计
/// - 自己负责浏览器进程的生命周期和超时
/// - 不认识运行次数、累加器或报告
///
/// 返回 `Err` 表示引擎层面的失败（URL 为空、浏览器崩溃等）；
/// 审计跑完但无法打分时返回带 `runtime_error` 的结果。
#[async_trait]
pub trait AuditEngine: Send + Sync {
    async fn audit(&self, url: &str, options: &AuditOptions) -> Result<AuditResult>;
}
