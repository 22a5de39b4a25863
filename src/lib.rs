//! # Lighthouse Batch
//!
//! 对一批 URL 重复运行 Lighthouse 审计，把每次的分数聚合为稳定的统计值并输出 CSV
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 启动和关闭 Chrome（chromiumoxide）
//! - `infrastructure/` - `AuditEngine` 能力：对一个 URL 运行一次审计
//! - `LighthouseEngine` - 启动 Chrome 并运行 lighthouse 命令行
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯粹的数据处理能力
//! - `ScoreAccumulator` - 每个页面按运行顺序收集样本，丢弃为 0 的分数
//! - `MetricRegistry` - 按首次出现顺序登记指标
//! - `aggregator` - 中位数 / 平均值
//! - `report_builder` - 生成并写出 CSV 报告
//! - `ErrorLog` - 只追加的错误日志
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次审计"的处理流程
//! - `AuditCtx` - 上下文（第几轮、第几个页面）
//! - `PageAuditFlow` - 调用引擎并把结果整理成样本
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/audit_orchestrator` - 按 (轮次 × 页面) 顺序驱动全部审计
//! - `orchestrator/batch_processor` - 应用入口：配置、输入、输出、统计
//!
//! ## 模块结构

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use cli::Cli;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{AuditEngine, AuditOptions, LighthouseEngine};
pub use models::{AuditResult, PageSpec};
pub use orchestrator::{App, AuditSummary, Orchestrator};
pub use services::{average, median, Report, ScoreMethod};
pub use workflow::{AuditCtx, AuditOutcome, PageAuditFlow};
