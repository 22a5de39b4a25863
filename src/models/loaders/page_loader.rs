use crate::models::page::PageSpec;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 注释行前缀
pub const COMMENT_MARKER: char = '#';

/// 把输入文本解析为页面列表，跳过空行和注释行
pub fn parse_pages(text: &str, url_column: Option<usize>) -> Vec<PageSpec> {
    text.lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with(COMMENT_MARKER)
        })
        .map(|line| PageSpec::parse(line, url_column))
        .collect()
}

/// 从输入文件加载页面列表
pub async fn load_pages(input_file: &Path, url_column: Option<usize>) -> Result<Vec<PageSpec>> {
    let content = fs::read_to_string(input_file)
        .await
        .with_context(|| format!("无法读取输入文件: {}", input_file.display()))?;

    let pages = parse_pages(&content, url_column);
    tracing::info!(
        "从 {} 加载了 {} 个页面",
        input_file.display(),
        pages.len()
    );

    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_pages_skips_blank_and_comment_lines() {
        let text = "# name,type,url\nA,home,https://a.example\n\n   \nB,shop,https://b.example\n";
        let pages = parse_pages(text, None);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].url, "https://a.example");
        assert_eq!(pages[1].url, "https://b.example");
    }

    #[tokio::test]
    async fn test_load_pages_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "A,home,https://a.example\r\nB,shop,https://b.example").unwrap();

        let pages = load_pages(file.path(), Some(2)).await.unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].url, "https://a.example");
    }

    #[tokio::test]
    async fn test_load_pages_missing_file() {
        let result = load_pages(Path::new("/nonexistent/input.csv"), None).await;
        assert!(result.is_err());
    }
}
