//! Lighthouse 审计引擎
//!
//! 每次审计：启动 Chrome → 运行 lighthouse CLI 连接到该 Chrome → 关闭 Chrome

use std::process::Stdio;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::browser::launch_chrome;
use crate::config::Config;
use crate::error::EngineError;
use crate::infrastructure::audit_engine::{AuditEngine, AuditOptions};
use crate::models::AuditResult;

/// 通过 lighthouse 命令行运行审计
#[derive(Debug, Clone)]
pub struct LighthouseEngine {
    lighthouse_bin: String,
    chrome_executable: Option<String>,
    timeout: Duration,
}

impl LighthouseEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            lighthouse_bin: config.lighthouse_bin.clone(),
            chrome_executable: config.chrome_executable.clone(),
            timeout: Duration::from_secs(config.audit_timeout_secs),
        }
    }

    async fn run_lighthouse(
        &self,
        url: &str,
        port: u16,
        options: &AuditOptions,
    ) -> Result<AuditResult> {
        let args = lighthouse_args(url, port, options);
        debug!("{} {}", self.lighthouse_bin, args.join(" "));

        let mut command = Command::new(&self.lighthouse_bin);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| EngineError::Timeout {
                url: url.to_string(),
                secs: self.timeout.as_secs(),
            })?
            .map_err(|source| EngineError::SpawnFailed {
                program: self.lighthouse_bin.clone(),
                source,
            })?;

        if output.status.success() {
            return parse_lighthouse_output(&output.stdout);
        }

        // 页面加载失败时 lighthouse 仍会输出带 runtimeError 的结果，但以状态 1 退出
        match parse_lighthouse_output(&output.stdout) {
            Ok(result) if result.runtime_error_message().is_some() => {
                debug!("lighthouse 以 {} 退出，结果中带 runtimeError", output.status);
                Ok(result)
            }
            _ => Err(EngineError::NonZeroExit {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl AuditEngine for LighthouseEngine {
    async fn audit(&self, url: &str, options: &AuditOptions) -> Result<AuditResult> {
        if url.trim().is_empty() {
            return Err(EngineError::EmptyUrl.into());
        }

        let chrome = launch_chrome(&options.chrome_flags, self.chrome_executable.as_deref()).await?;
        let result = self.run_lighthouse(url, chrome.port(), options).await;
        chrome.shutdown().await;
        result
    }
}

/// lighthouse 命令行参数
fn lighthouse_args(url: &str, port: u16, options: &AuditOptions) -> Vec<String> {
    let mut args = vec![
        url.to_string(),
        format!("--port={}", port),
        "--output=json".to_string(),
        "--output-path=stdout".to_string(),
        "--quiet".to_string(),
    ];
    if !options.only_categories.is_empty() {
        args.push(format!(
            "--only-categories={}",
            options.only_categories.join(",")
        ));
    }
    args
}

fn parse_lighthouse_output(stdout: &[u8]) -> Result<AuditResult> {
    let result =
        serde_json::from_slice(stdout).map_err(|source| EngineError::InvalidOutput { source })?;
    Ok(result)
}
