//! 批量审计入口 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责资源准备和收尾。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、重建错误日志文件
//! 2. **加载页面**：读取输入文件（`Vec<PageSpec>`）
//! 3. **运行审计**：委托 `Orchestrator` 逐个页面、逐轮审计
//! 4. **写出报告**：覆盖或追加到输出文件
//! 5. **全局统计**：输出运行次数、页面数和错误数

use crate::config::Config;
use crate::infrastructure::{AuditEngine, LighthouseEngine};
use crate::models::{load_pages, PageSpec};
use crate::orchestrator::audit_orchestrator::{AuditSummary, Orchestrator};
use crate::services::{write_report, ErrorLog};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置无效")?;

        ErrorLog::with_path(&config.error_log_file)
            .init_file()
            .with_context(|| format!("无法创建错误日志: {}", config.error_log_file))?;

        log_startup(&config);

        Ok(Self { config })
    }

    /// 使用 Lighthouse 引擎运行
    pub async fn run(&self) -> Result<Option<AuditSummary>> {
        let engine = LighthouseEngine::new(&self.config);
        self.run_with(&engine).await
    }

    /// 使用指定的审计引擎运行；没有页面时返回 None
    pub async fn run_with<E: AuditEngine + ?Sized>(
        &self,
        engine: &E,
    ) -> Result<Option<AuditSummary>> {
        let pages = self.load_pages().await?;

        if pages.is_empty() {
            warn!("⚠️ 输入文件中没有待审计的页面，程序结束");
            return Ok(None);
        }

        log_pages_loaded(pages.len(), self.config.num_runs);

        let summary = Orchestrator::new(pages, self.config.num_runs, &self.config)
            .with_error_log(ErrorLog::with_path(&self.config.error_log_file))
            .run(engine)
            .await;

        write_report(
            Path::new(&self.config.output_file),
            &summary.report,
            self.config.append_output,
        )?;

        print_final_stats(&summary, &self.config);

        Ok(Some(summary))
    }

    /// 加载页面
    async fn load_pages(&self) -> Result<Vec<PageSpec>> {
        info!("📁 正在读取输入文件 {}", self.config.input_file);
        load_pages(Path::new(&self.config.input_file), self.config.url_column).await
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - Lighthouse 批量审计");
    info!("🔁 每个 URL 审计 {} 次, 聚合方式: {}", config.num_runs, config.score_method);
    info!("📋 审计类别: {}", config.categories.join(","));
    if !config.audits.is_empty() {
        info!("⏱️ 单项审计: {}", config.audits.join(","));
    }
    info!("{}", "=".repeat(60));
}

fn log_pages_loaded(total: usize, num_runs: usize) {
    info!("✓ 找到 {} 个待审计的页面", total);
    info!("💡 共需 {} 次审计，一次只审计一个页面\n", total * num_runs);
}

fn print_final_stats(summary: &AuditSummary, config: &Config) {
    let audited = summary.page_results.iter().filter(|r| r.has_data()).count();

    info!("\n{}", "=".repeat(60));
    info!("📊 全部审计完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!(
        "Completed {} run(s) for {} URL(s): {} error(s)",
        config.num_runs,
        summary.page_results.len(),
        summary.error_log.len()
    );
    info!("✅ 有数据的页面: {}/{}", audited, summary.page_results.len());
    info!("{}", "=".repeat(60));
    info!("\nView output: {}", config.output_file);
    if !summary.error_log.is_empty() {
        info!("错误日志: {}", config.error_log_file);
    }
}
