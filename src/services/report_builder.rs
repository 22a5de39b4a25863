//! 报告生成 - 业务能力层
//!
//! 把所有页面累计的样本整理成 CSV 表格

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::models::page::DELIMITER;
use crate::services::aggregator::ScoreMethod;
use crate::services::metric_registry::MetricRegistry;
use crate::services::score_accumulator::PageResult;

/// 报告中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    /// 原始输入行
    pub metadata: String,
    /// 每个指标的聚合值，与表头顺序一致；该页面没有样本时为 None
    pub values: Vec<Option<f64>>,
}

/// 最终报告：表头 + 每个成功审计页面一行
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub header: Vec<String>,
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// 生成 CSV 文本
    pub fn to_csv(&self) -> String {
        let delimiter = DELIMITER.to_string();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.header.join(&delimiter));
        for row in &self.rows {
            let mut fields = vec![row.metadata.clone()];
            fields.extend(row.values.iter().map(|v| format_value(*v)));
            lines.push(fields.join(&delimiter));
        }
        let mut csv = lines.join("\n");
        csv.push('\n');
        csv
    }
}

/// 整数直接输出，偶数个样本的中位数可能带 .5
fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

/// 生成报告
///
/// 没有任何有效样本的页面不会出现在报告中（错误已记录在错误日志里）
pub fn build_report(
    page_results: &[PageResult],
    registry: &MetricRegistry,
    metadata_columns: &[String],
    method: ScoreMethod,
) -> Report {
    let mut header = metadata_columns.to_vec();
    header.extend(registry.titles());

    let rows = page_results
        .iter()
        .filter_map(|result| {
            let accumulator = result.accumulator.as_ref()?;
            let values = registry
                .iter()
                .map(|metric| method.aggregate(accumulator.samples(&metric.key)))
                .collect();
            Some(ReportRow {
                metadata: result.page.raw_line.clone(),
                values,
            })
        })
        .collect();

    Report { header, rows }
}

/// 写出报告；append 为 true 时追加到已有文件末尾
pub fn write_report(path: &Path, report: &Report, append: bool) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .with_context(|| format!("无法打开输出文件: {}", path.display()))?;

    file.write_all(report.to_csv().as_bytes())
        .with_context(|| format!("无法写入输出文件: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PageSpec;
    use crate::services::score_accumulator::{RawScore, ScoreAccumulator};

    fn registry() -> MetricRegistry {
        let mut registry = MetricRegistry::new();
        registry.register("performance", "Performance");
        registry.register("seo", "SEO");
        registry
    }

    fn page_with(line: &str, scores: &[(&str, Vec<f64>)]) -> PageResult {
        let mut acc = ScoreAccumulator::new(true);
        for (key, values) in scores {
            for v in values.iter() {
                acc.record(key, RawScore::Fraction(*v));
            }
        }
        PageResult::new(PageSpec::parse(line, None), acc)
    }

    #[test]
    fn test_build_report_skips_pages_without_data() {
        let results = vec![
            page_with(
                "A,home,https://a.example",
                &[("performance", vec![0.8, 0.6, 0.7]), ("seo", vec![0.9, 0.9, 1.0])],
            ),
            page_with("B,home,https://b.example", &[]),
        ];
        let columns = vec!["Name".to_string(), "Page type".into(), "URL".into()];
        let report = build_report(&results, &registry(), &columns, ScoreMethod::Median);

        assert_eq!(
            report.header,
            vec!["Name", "Page type", "URL", "Performance", "SEO"]
        );
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].metadata, "A,home,https://a.example");
        assert_eq!(report.rows[0].values, vec![Some(70.0), Some(90.0)]);
    }

    #[test]
    fn test_missing_metric_gives_empty_cell() {
        let results = vec![page_with("A,https://a.example", &[("seo", vec![0.5, 0.6])])];
        let columns = vec!["Name".to_string(), "URL".into()];
        let report = build_report(&results, &registry(), &columns, ScoreMethod::Median);

        assert_eq!(report.rows[0].values.len(), registry().len());
        assert_eq!(
            report.to_csv(),
            "Name,URL,Performance,SEO\nA,https://a.example,,55\n"
        );
    }

    #[test]
    fn test_to_csv_keeps_half_values() {
        let results = vec![page_with("A,https://a.example", &[("performance", vec![0.5, 0.6]), ("seo", vec![0.9])])];
        let columns = vec!["Name".to_string(), "URL".into()];
        let report = build_report(&results, &registry(), &columns, ScoreMethod::Median);
        assert_eq!(report.rows[0].values, vec![Some(55.0), Some(90.0)]);

        let results = vec![page_with("A,https://a.example", &[("performance", vec![0.5, 0.61])])];
        let report = build_report(&results, &registry(), &columns, ScoreMethod::Median);
        assert!(report.to_csv().contains("A,https://a.example,55.5,"));
    }

    #[test]
    fn test_write_report_truncates_or_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");
        let report = Report {
            header: vec!["URL".into(), "SEO".into()],
            rows: vec![ReportRow {
                metadata: "https://a.example".into(),
                values: vec![Some(90.0)],
            }],
        };

        std::fs::write(&path, "stale\n").unwrap();
        write_report(&path, &report, false).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "URL,SEO\nhttps://a.example,90\n"
        );

        write_report(&path, &report, true).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "URL,SEO\nhttps://a.example,90\nURL,SEO\nhttps://a.example,90\n"
        );
    }
}
