/// 字段分隔符
pub const DELIMITER: char = ',';

/// 待审计的页面，对应输入文件中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    /// 原始输入行（原样写入报告）
    pub raw_line: String,
    /// 按分隔符拆分后的字段
    pub metadata_fields: Vec<String>,
    /// 审计目标 URL
    pub url: String,
}

impl PageSpec {
    /// 解析一行输入
    ///
    /// URL 中只允许在末尾位置出现分隔符：指定 `url_column` 时，
    /// 从该列开始的所有字段重新拼接成 URL；否则取最后一个字段。
    pub fn parse(line: &str, url_column: Option<usize>) -> Self {
        let raw_line = line.trim_end_matches(&['\r', '\n'][..]).to_string();
        let metadata_fields: Vec<String> = raw_line
            .split(DELIMITER)
            .map(str::to_string)
            .collect();

        let url = match url_column {
            Some(column) if column < metadata_fields.len() => {
                metadata_fields[column..].join(&DELIMITER.to_string())
            }
            Some(_) => String::new(),
            None => metadata_fields.last().cloned().unwrap_or_default(),
        };

        Self {
            raw_line,
            metadata_fields,
            url: url.trim().to_string(),
        }
    }

    /// 用于日志的页面标识：优先使用 URL
    pub fn label(&self) -> &str {
        if self.url.is_empty() {
            &self.raw_line
        } else {
            &self.url
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_takes_last_field_by_default() {
        let page = PageSpec::parse("John Lewis,homepage,https://johnlewis.com", None);
        assert_eq!(page.url, "https://johnlewis.com");
        assert_eq!(page.metadata_fields.len(), 3);
        assert_eq!(page.raw_line, "John Lewis,homepage,https://johnlewis.com");
    }

    #[test]
    fn test_parse_rejoins_trailing_fields_from_url_column() {
        let page = PageSpec::parse("Shop,search,https://example.com/?q=a,b", Some(2));
        assert_eq!(page.url, "https://example.com/?q=a,b");
    }

    #[test]
    fn test_parse_url_column_out_of_range_gives_empty_url() {
        let page = PageSpec::parse("only-a-name", Some(2));
        assert_eq!(page.url, "");
        assert_eq!(page.label(), "only-a-name");
    }

    #[test]
    fn test_parse_strips_carriage_return() {
        let page = PageSpec::parse("A,https://a.example\r", None);
        assert_eq!(page.url, "https://a.example");
        assert_eq!(page.raw_line, "A,https://a.example");
    }
}
