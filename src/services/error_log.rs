//! 错误日志服务 - 业务能力层
//!
//! 只负责"记录错误"能力：内存中按顺序追加，可选同步写入文件

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// 一条错误记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    /// 出错的页面（通常是 URL）
    pub context: String,
    /// 错误信息
    pub message: String,
}

/// 只追加的错误日志
///
/// 职责：
/// - 按发生顺序保存错误
/// - 每条错误输出一行 error! 日志
/// - 配置了文件路径时同步追加到错误日志文件
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Vec<ErrorEntry>,
    file_path: Option<PathBuf>,
}

impl ErrorLog {
    /// 只保存在内存中的错误日志
    pub fn new() -> Self {
        Self::default()
    }

    /// 同时写入指定文件
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            entries: Vec::new(),
            file_path: Some(path.into()),
        }
    }

    /// 重建错误日志文件并写入带时间的标题
    pub fn init_file(&self) -> Result<()> {
        let Some(path) = &self.file_path else {
            return Ok(());
        };
        let header = format!(
            "{}\nLighthouse 审计错误日志 - {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        fs::write(path, header)?;
        Ok(())
    }

    /// 追加一条错误
    pub fn record(&mut self, context: impl Into<String>, message: impl Into<String>) {
        let entry = ErrorEntry {
            context: context.into(),
            message: message.into(),
        };
        error!(">>> {}: {}", entry.context, entry.message);

        if let Some(path) = &self.file_path {
            if let Err(e) = append_line(path, &entry) {
                warn!("⚠️ 无法写入错误日志 {}: {}", path.display(), e);
            }
        }

        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ErrorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 某个页面的错误条数
    pub fn count_for(&self, context: &str) -> usize {
        self.entries.iter().filter(|e| e.context == context).count()
    }
}

fn append_line(path: &Path, entry: &ErrorEntry) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}: {}\n", entry.context, entry.message)
}
