use std::path::Path;

use serde::Deserialize;

use crate::error::{AppResult, ConfigError, FileError};
use crate::services::ScoreMethod;

/// Lighthouse 支持的审计类别
pub const KNOWN_CATEGORIES: [&str; 5] =
    ["performance", "pwa", "best-practices", "accessibility", "seo"];

/// 程序配置
///
/// 加载顺序：默认值 → TOML 文件 → 环境变量 → 命令行参数
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 输入文件（每行一个页面）
    pub input_file: String,
    /// 输出 CSV 文件
    pub output_file: String,
    /// 错误日志文件
    pub error_log_file: String,
    /// 是否追加到已有输出
    pub append_output: bool,
    /// 每个 URL 的审计次数
    pub num_runs: usize,
    /// 分数聚合方式
    pub score_method: ScoreMethod,
    /// 要运行的审计类别
    pub categories: Vec<String>,
    /// 额外记录数值的单项审计（例如 first-contentful-paint）
    pub audits: Vec<String>,
    /// Chrome 启动参数（带 `--` 前缀）
    pub chrome_flags: Vec<String>,
    /// 输出表头中的元数据列名
    pub metadata_headings: String,
    /// URL 所在列（None 表示最后一列）
    pub url_column: Option<usize>,
    /// 是否丢弃为 0 的分数
    pub discard_zero_scores: bool,
    /// lighthouse 可执行文件
    pub lighthouse_bin: String,
    /// Chrome 可执行文件路径（None 时由 chromiumoxide 自动查找）
    pub chrome_executable: Option<String>,
    /// 单次审计超时（秒）
    pub audit_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_file: "input.csv".to_string(),
            output_file: "output.csv".to_string(),
            error_log_file: "error-log.txt".to_string(),
            append_output: false,
            num_runs: 3,
            score_method: ScoreMethod::Median,
            categories: KNOWN_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            audits: Vec::new(),
            chrome_flags: vec!["--headless".to_string()],
            metadata_headings: "Name,Page type,URL".to_string(),
            url_column: None,
            discard_zero_scores: true,
            lighthouse_bin: "lighthouse".to_string(),
            chrome_executable: None,
            audit_timeout_secs: 120,
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 默认值 + `LHB_*` 环境变量
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// 从 TOML 文件加载，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::AppError::file_read_failed(&display, e))?;
        let config = toml::from_str(&content).map_err(|source| FileError::TomlParseFailed {
            path: display,
            source,
        })?;
        Ok(config)
    }

    /// 用 `LHB_*` 环境变量覆盖已有配置
    pub fn overlay_env(self) -> Self {
        Self {
            input_file: env_string("LHB_INPUT").unwrap_or(self.input_file),
            output_file: env_string("LHB_OUTPUT").unwrap_or(self.output_file),
            error_log_file: env_string("LHB_ERROR_LOG").unwrap_or(self.error_log_file),
            append_output: env_parse("LHB_APPEND").unwrap_or(self.append_output),
            num_runs: env_parse("LHB_RUNS").unwrap_or(self.num_runs),
            score_method: env_parse("LHB_SCORE_METHOD").unwrap_or(self.score_method),
            categories: env_list("LHB_CATEGORIES").unwrap_or(self.categories),
            audits: env_list("LHB_AUDITS").unwrap_or(self.audits),
            chrome_flags: env_list("LHB_CHROME_FLAGS")
                .map(|flags| prefix_flags(&flags))
                .unwrap_or(self.chrome_flags),
            metadata_headings: env_string("LHB_METADATA").unwrap_or(self.metadata_headings),
            url_column: env_parse("LHB_URL_COLUMN").or(self.url_column),
            discard_zero_scores: env_parse("LHB_DISCARD_ZERO_SCORES")
                .unwrap_or(self.discard_zero_scores),
            lighthouse_bin: env_string("LHB_LIGHTHOUSE_BIN").unwrap_or(self.lighthouse_bin),
            chrome_executable: env_string("LHB_CHROME_EXECUTABLE").or(self.chrome_executable),
            audit_timeout_secs: env_parse("LHB_AUDIT_TIMEOUT_SECS")
                .unwrap_or(self.audit_timeout_secs),
            verbose_logging: env_parse("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
        }
    }

    /// 检查配置是否可以开始审计
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_runs == 0 {
            return Err(ConfigError::ZeroRuns);
        }
        if self.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }
        if let Some(unknown) = self
            .categories
            .iter()
            .find(|c| !KNOWN_CATEGORIES.contains(&c.as_str()))
        {
            return Err(ConfigError::UnknownCategory(unknown.clone()));
        }
        Ok(())
    }

    /// 元数据列名
    pub fn metadata_columns(&self) -> Vec<String> {
        split_list(&self.metadata_headings)
    }
}

/// 给不带短横线的 Chrome 参数加上 `--` 前缀
pub fn prefix_flags(flags: &[String]) -> Vec<String> {
    flags
        .iter()
        .map(|flag| format!("--{}", flag.trim_start_matches('-')))
        .collect()
}

/// 拆分逗号分隔的列表，忽略空项
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

fn env_list(name: &str) -> Option<Vec<String>> {
    std::env::var(name).ok().map(|v| split_list(&v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.num_runs, 3);
        assert_eq!(config.score_method, ScoreMethod::Median);
        assert_eq!(config.metadata_columns(), vec!["Name", "Page type", "URL"]);
    }

    #[test]
    fn test_validate_rejects_zero_runs() {
        let config = Config {
            num_runs: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroRuns)));
    }

    #[test]
    fn test_validate_rejects_unknown_category() {
        let config = Config {
            categories: vec!["performance".into(), "speed".into()],
            ..Config::default()
        };
        match config.validate() {
            Err(ConfigError::UnknownCategory(c)) => assert_eq!(c, "speed"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_prefix_flags() {
        let flags = vec!["headless".to_string(), "--no-sandbox".to_string()];
        assert_eq!(prefix_flags(&flags), vec!["--headless", "--no-sandbox"]);
    }

    #[test]
    fn test_split_list_skips_blanks() {
        assert_eq!(split_list("seo, ,pwa,"), vec!["seo", "pwa"]);
    }

    #[test]
    fn test_from_toml_file_uses_defaults_for_missing_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "num_runs = 5\nscore_method = \"average\"").unwrap();
        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.num_runs, 5);
        assert_eq!(config.score_method, ScoreMethod::Average);
        assert_eq!(config.output_file, "output.csv");
    }
}
