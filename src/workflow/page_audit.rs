//! 单页审计流程 - 流程层
//!
//! 核心职责：对一个页面运行一次审计，并把结果整理成可记录的样本
//!
//! 结果分三种：
//! 1. 有类别分数 → 逐个指标给出原始值
//! 2. 审计跑完但带 runtimeError → 本轮没有样本
//! 3. 引擎失败（URL 为空、浏览器崩溃等）→ 本轮没有样本

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::infrastructure::{AuditEngine, AuditOptions};
use crate::models::{AuditResult, PageSpec};
use crate::services::RawScore;
use crate::workflow::audit_ctx::AuditCtx;

/// 一个指标的本轮原始值
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSample {
    pub key: String,
    pub title: String,
    pub raw: RawScore,
}

/// 单次审计的结果
#[derive(Debug, Clone, PartialEq)]
pub enum AuditOutcome {
    /// 审计成功，按结果中的顺序给出各指标的原始值
    Scored(Vec<MetricSample>),
    /// 审计运行了但无法打分
    RuntimeError(String),
    /// 引擎层面的失败
    EngineFailure(String),
}

/// 单页审计流程
///
/// - 调用审计引擎（一次只有一个审计在进行）
/// - 把审计结果转换成指标样本
/// - 不持有累加器，不决定下一步审计哪个页面
pub struct PageAuditFlow {
    options: AuditOptions,
    numeric_audits: Vec<String>,
}

impl PageAuditFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            options: AuditOptions::from_config(config),
            numeric_audits: config.audits.clone(),
        }
    }

    pub async fn run<E: AuditEngine + ?Sized>(
        &self,
        engine: &E,
        page: &PageSpec,
        ctx: &AuditCtx,
    ) -> AuditOutcome {
        info!("{}", ctx);
        debug!("[{}] 开始审计", page.label());

        match engine.audit(&page.url, &self.options).await {
            Ok(result) => self.classify(result),
            Err(e) => AuditOutcome::EngineFailure(format!("{:#}", e)),
        }
    }

    /// 把审计结果分类并提取样本
    pub fn classify(&self, result: AuditResult) -> AuditOutcome {
        if let Some(message) = result.runtime_error_message() {
            return AuditOutcome::RuntimeError(message.to_string());
        }
        if result.categories.is_empty() {
            return AuditOutcome::RuntimeError("审计结果中没有任何类别分数".to_string());
        }

        let mut samples: Vec<MetricSample> = result
            .categories
            .iter()
            .map(|(id, category)| MetricSample {
                key: id.to_string(),
                title: category.title.clone(),
                raw: RawScore::Fraction(category.score.unwrap_or(0.0)),
            })
            .collect();

        for id in &self.numeric_audits {
            match result.audits.get(id) {
                Some(audit) => samples.push(MetricSample {
                    key: id.clone(),
                    title: audit.title.clone(),
                    raw: RawScore::Measurement(audit.numeric_value.unwrap_or(0.0)),
                }),
                None => warn!("⚠️ 审计结果中没有 {}", id),
            }
        }

        AuditOutcome::Scored(samples)
    }
}
