//! 命令行参数

use std::path::PathBuf;

use clap::Parser;

use crate::config::{prefix_flags, Config};
use crate::error::AppResult;
use crate::services::ScoreMethod;

#[derive(Parser, Debug)]
#[command(name = "lighthouse-batch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run Lighthouse audits repeatedly for a list of URLs and report aggregated scores", long_about = None)]
pub struct Cli {
    /// Append output to existing data in output file
    #[arg(short = 'a', long)]
    pub append: bool,

    /// Categories to audit, comma-separated (performance,pwa,best-practices,accessibility,seo)
    #[arg(short = 'c', long, value_delimiter = ',')]
    pub categories: Option<Vec<String>>,

    /// Chrome flags *without* dashes, comma-separated (default: headless)
    #[arg(short = 'f', long, value_delimiter = ',')]
    pub flags: Option<Vec<String>>,

    /// Input file (default: input.csv)
    #[arg(short = 'i', long)]
    pub input: Option<String>,

    /// Headings for page metadata, comma-separated (default: Name,Page type,URL)
    #[arg(short = 'm', long)]
    pub metadata: Option<String>,

    /// Output file (default: output.csv)
    #[arg(short = 'o', long)]
    pub output: Option<String>,

    /// Number of times each URL is audited (default: 3)
    #[arg(short = 'r', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub runs: Option<u64>,

    /// Method of score aggregation: median or average (default: median)
    #[arg(short = 's', long)]
    pub score_method: Option<ScoreMethod>,

    /// Extra audits whose numeric value is reported, comma-separated (e.g. first-contentful-paint)
    #[arg(long, value_delimiter = ',')]
    pub audits: Option<Vec<String>>,

    /// Zero-based column where the URL starts (default: last column)
    #[arg(long)]
    pub url_column: Option<usize>,

    /// Record zero scores instead of discarding them
    #[arg(long)]
    pub keep_zero_scores: bool,

    /// Error log file (default: error-log.txt)
    #[arg(long)]
    pub error_log: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// 合并配置：默认值 / TOML 文件 → 环境变量 → 命令行参数
    pub fn into_config(self) -> AppResult<Config> {
        let config = match &self.config {
            Some(path) => Config::from_toml_file(path)?.overlay_env(),
            None => Config::from_env(),
        };
        Ok(self.apply(config))
    }

    /// 用命令行参数覆盖配置
    pub fn apply(self, mut config: Config) -> Config {
        if self.append {
            config.append_output = true;
        }
        if let Some(categories) = self.categories {
            config.categories = categories;
        }
        if let Some(flags) = self.flags {
            config.chrome_flags = prefix_flags(&flags);
        }
        if let Some(input) = self.input {
            config.input_file = input;
        }
        if let Some(metadata) = self.metadata {
            config.metadata_headings = metadata;
        }
        if let Some(output) = self.output {
            config.output_file = output;
        }
        if let Some(runs) = self.runs {
            config.num_runs = runs as usize;
        }
        if let Some(method) = self.score_method {
            config.score_method = method;
        }
        if let Some(audits) = self.audits {
            config.audits = audits;
        }
        if self.url_column.is_some() {
            config.url_column = self.url_column;
        }
        if self.keep_zero_scores {
            config.discard_zero_scores = false;
        }
        if let Some(error_log) = self.error_log {
            config.error_log_file = error_log;
        }
        if self.verbose {
            config.verbose_logging = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_flags() {
        let cli = Cli::try_parse_from([
            "lighthouse-batch",
            "-a",
            "-c",
            "performance,seo",
            "-f",
            "headless,no-sandbox",
            "-r",
            "5",
            "-s",
            "average",
        ])
        .unwrap();

        let config = cli.apply(Config::default());
        assert!(config.append_output);
        assert_eq!(config.categories, vec!["performance", "seo"]);
        assert_eq!(config.chrome_flags, vec!["--headless", "--no-sandbox"]);
        assert_eq!(config.num_runs, 5);
        assert_eq!(config.score_method, ScoreMethod::Average);
    }

    #[test]
    fn test_defaults_are_kept_without_flags() {
        let cli = Cli::try_parse_from(["lighthouse-batch"]).unwrap();
        let config = cli.apply(Config::default());
        assert_eq!(config.num_runs, 3);
        assert!(config.discard_zero_scores);
        assert_eq!(config.input_file, "input.csv");
    }

    #[test]
    fn test_rejects_zero_runs_and_unknown_method() {
        assert!(Cli::try_parse_from(["lighthouse-batch", "-r", "0"]).is_err());
        assert!(Cli::try_parse_from(["lighthouse-batch", "-r", "two"]).is_err());
        assert!(Cli::try_parse_from(["lighthouse-batch", "-s", "mode"]).is_err());
    }

    #[test]
    fn test_keep_zero_scores_and_audits() {
        let cli = Cli::try_parse_from([
            "lighthouse-batch",
            "--keep-zero-scores",
            "--audits",
            "first-contentful-paint,speed-index",
            "--url-column",
            "2",
        ])
        .unwrap();
        let config = cli.apply(Config::default());
        assert!(!config.discard_zero_scores);
        assert_eq!(config.audits, vec!["first-contentful-paint", "speed-index"]);
        assert_eq!(config.url_column, Some(2));
    }

    #[test]
    fn test_into_config_flags_win_over_env_defaults() {
        let cli = Cli::try_parse_from(["lighthouse-batch", "-r", "4", "-o", "report.csv"]).unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.num_runs, 4);
        assert_eq!(config.output_file, "report.csv");
    }

    #[test]
    fn test_into_config_reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lighthouse-batch.toml");
        std::fs::write(&path, "num_runs = 7\nscore_method = \"average\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "lighthouse-batch",
            "--config",
            path.to_str().unwrap(),
            "-s",
            "median",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.num_runs, 7);
        assert_eq!(config.score_method, ScoreMethod::Median);
    }
}
