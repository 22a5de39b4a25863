//! 分数累加器 - 业务能力层
//!
//! 每个页面一个，按运行顺序收集每个指标的样本

use std::collections::HashMap;

use crate::models::PageSpec;
use crate::services::metric_registry::MetricKey;

/// 审计结果中的原始值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawScore {
    /// [0, 1] 之间的类别分数，换算为百分制
    Fraction(f64),
    /// 直接测量值（例如毫秒），不做换算
    Measurement(f64),
}

impl RawScore {
    /// 换算为样本值：类别分数换算为百分制整数，测量值原样保留
    pub fn to_sample(self) -> f64 {
        match self {
            RawScore::Fraction(score) => (score * 100.0).round(),
            RawScore::Measurement(value) => value,
        }
    }
}

/// 记录一个样本的结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// 已记录
    Recorded(f64),
    /// 为 0，视为无效并丢弃
    DiscardedZero,
}

/// 单个页面的分数累加器
#[derive(Debug, Clone, Default)]
pub struct ScoreAccumulator {
    samples: HashMap<MetricKey, Vec<f64>>,
    discard_zero: bool,
}

impl ScoreAccumulator {
    /// `discard_zero` 为 true 时，换算后为 0 的样本会被丢弃
    pub fn new(discard_zero: bool) -> Self {
        Self {
            samples: HashMap::new(),
            discard_zero,
        }
    }

    /// 记录一个样本
    pub fn record(&mut self, key: &str, raw: RawScore) -> SampleOutcome {
        let sample = raw.to_sample();
        if self.discard_zero && sample == 0.0 {
            return SampleOutcome::DiscardedZero;
        }
        self.samples.entry(key.to_string()).or_default().push(sample);
        SampleOutcome::Recorded(sample)
    }

    /// 某个指标的样本（按运行顺序）
    pub fn samples(&self, key: &str) -> &[f64] {
        self.samples.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.samples.contains_key(key)
    }

    /// 有样本的指标数量
    pub fn metric_count(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// 单个页面的最终结果；没有任何有效样本时 accumulator 为 None
#[derive(Debug, Clone)]
pub struct PageResult {
    pub page: PageSpec,
    pub accumulator: Option<ScoreAccumulator>,
}

impl PageResult {
    pub fn new(page: PageSpec, accumulator: ScoreAccumulator) -> Self {
        let accumulator = if accumulator.is_empty() {
            None
        } else {
            Some(accumulator)
        };
        Self { page, accumulator }
    }

    pub fn has_data(&self) -> bool {
        self.accumulator.is_some()
    }
}
