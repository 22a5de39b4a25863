//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量审计的调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用入口
//! - 校验配置、重建错误日志
//! - 加载页面列表（Vec<PageSpec>）
//! - 写出报告、输出全局统计
//!
//! ### `audit_orchestrator` - 审计编排器
//! - 按 (轮次 × 页面) 顺序逐个审计，一次只有一个审计在进行
//! - 持有每个页面的累加器、指标注册表和错误日志
//! - 全部审计结束后生成报告
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (配置、输入、输出)
//!     ↓
//! audit_orchestrator (处理 页面 × 轮次)
//!     ↓
//! workflow::PageAuditFlow (处理单次审计)
//!     ↓
//! services (能力层：累加 / 聚合 / 报告 / 错误日志)
//!     ↓
//! infrastructure (基础设施：AuditEngine)
//! ```

pub mod audit_orchestrator;
pub mod batch_processor;

// 重新导出主要类型
pub use audit_orchestrator::{AuditSummary, Orchestrator};
pub use batch_processor::App;
