//! 分数聚合 - 业务能力层
//!
//! 把多次运行得到的样本归约为一个代表值

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// 分数聚合方式，在审计开始前全局选定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMethod {
    #[default]
    Median,
    Average,
}

impl ScoreMethod {
    /// 按当前方式聚合样本；没有可用值时返回 None
    pub fn aggregate(self, samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        match self {
            ScoreMethod::Median => Some(median(samples)),
            ScoreMethod::Average => average(samples),
        }
    }
}

impl FromStr for ScoreMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "median" => Ok(ScoreMethod::Median),
            "average" => Ok(ScoreMethod::Average),
            other => Err(ConfigError::UnknownScoreMethod(other.to_string())),
        }
    }
}

impl fmt::Display for ScoreMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreMethod::Median => write!(f, "median"),
            ScoreMethod::Average => write!(f, "average"),
        }
    }
}

/// 中位数：偶数个样本取中间两个的平均值，空序列返回 0
pub fn median(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);
    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[middle]
    } else {
        (sorted[middle - 1] + sorted[middle]) / 2.0
    }
}

/// 算术平均值，四舍五入到整数；空序列没有平均值
pub fn average(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().sum();
    Some((sum / samples.len() as f64).round())
}
