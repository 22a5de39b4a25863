//! 审计编排器 - 编排层
//!
//! ## 职责
//!
//! 按 (轮次 × 页面) 顺序驱动全部审计，把结果送入各页面的累加器，
//! 全部结束后生成一次报告。
//!
//! ## 顺序
//!
//! ```text
//! 第 1 轮: 页面 1 → 页面 2 → … → 页面 M
//! 第 2 轮: 页面 1 → 页面 2 → … → 页面 M
//! …
//! 第 N 轮结束 → 生成报告
//! ```
//!
//! 任意时刻只有一个审计在进行。单次审计失败只记录错误，不中断编排，也不重试。

use tracing::{debug, info};

use crate::config::Config;
use crate::infrastructure::AuditEngine;
use crate::models::PageSpec;
use crate::services::{
    build_report, ErrorLog, MetricRegistry, PageResult, Report, SampleOutcome, ScoreAccumulator,
    ScoreMethod,
};
use crate::workflow::{AuditCtx, AuditOutcome, MetricSample, PageAuditFlow};

/// 编排结束后的全部结果
#[derive(Debug)]
pub struct AuditSummary {
    pub report: Report,
    pub page_results: Vec<PageResult>,
    pub registry: MetricRegistry,
    pub error_log: ErrorLog,
    /// 审计引擎被调用的次数
    pub invocations: usize,
}

/// 审计编排器
pub struct Orchestrator {
    pages: Vec<PageSpec>,
    num_runs: usize,
    flow: PageAuditFlow,
    accumulators: Vec<ScoreAccumulator>,
    registry: MetricRegistry,
    error_log: ErrorLog,
    method: ScoreMethod,
    metadata_columns: Vec<String>,
    invocations: usize,
}

impl Orchestrator {
    pub fn new(pages: Vec<PageSpec>, num_runs: usize, config: &Config) -> Self {
        let accumulators = pages
            .iter()
            .map(|_| ScoreAccumulator::new(config.discard_zero_scores))
            .collect();
        Self {
            pages,
            num_runs,
            flow: PageAuditFlow::new(config),
            accumulators,
            registry: MetricRegistry::new(),
            error_log: ErrorLog::new(),
            method: config.score_method,
            metadata_columns: config.metadata_columns(),
            invocations: 0,
        }
    }

    /// 使用指定的错误日志（例如同步写入文件）
    pub fn with_error_log(mut self, error_log: ErrorLog) -> Self {
        self.error_log = error_log;
        self
    }

    /// 运行全部审计并生成报告
    pub async fn run<E: AuditEngine + ?Sized>(mut self, engine: &E) -> AuditSummary {
        let page_count = self.pages.len();

        for run_index in 0..self.num_runs {
            info!("▶ Start run {} of {}", run_index + 1, self.num_runs);

            for page_index in 0..page_count {
                let ctx = AuditCtx::new(page_index, page_count, run_index, self.num_runs);
                let outcome = self
                    .flow
                    .run(engine, &self.pages[page_index], &ctx)
                    .await;
                self.invocations += 1;
                self.apply(page_index, outcome);
            }
        }

        self.finish()
    }

    /// 把一次审计的结果记入对应页面
    ///
    /// 错误日志以输入行为 context，同一 URL 的不同输入行分开计数
    fn apply(&mut self, page_index: usize, outcome: AuditOutcome) {
        let page = &self.pages[page_index];
        let context = page.raw_line.clone();
        let label = page.label().to_string();

        match outcome {
            AuditOutcome::Scored(samples) => {
                self.record_samples(page_index, &context, &label, samples)
            }
            AuditOutcome::RuntimeError(message) => {
                self.error_log
                    .record(context, format!("Runtime error for {}: {}", label, message));
            }
            AuditOutcome::EngineFailure(message) => {
                self.error_log
                    .record(context, format!("Caught error for {}: {}", label, message));
            }
        }
    }

    fn record_samples(
        &mut self,
        page_index: usize,
        context: &str,
        label: &str,
        samples: Vec<MetricSample>,
    ) {
        for sample in samples {
            if self.registry.register(&sample.key, &sample.title) {
                debug!("发现新指标: {} ({})", sample.key, sample.title);
            }

            match self.accumulators[page_index].record(&sample.key, sample.raw) {
                SampleOutcome::Recorded(value) => {
                    info!("{}: {} {}", label, sample.title, value);
                }
                SampleOutcome::DiscardedZero => {
                    self.error_log.record(
                        context,
                        format!(
                            "Zero {} score for {}. This data will be discarded.",
                            sample.title, label
                        ),
                    );
                }
            }
        }
    }

    fn finish(self) -> AuditSummary {
        let page_results: Vec<PageResult> = self
            .pages
            .into_iter()
            .zip(self.accumulators)
            .map(|(page, accumulator)| PageResult::new(page, accumulator))
            .collect();

        let report = build_report(
            &page_results,
            &self.registry,
            &self.metadata_columns,
            self.method,
        );

        AuditSummary {
            report,
            page_results,
            registry: self.registry,
            error_log: self.error_log,
            invocations: self.invocations,
        }
    }
}
