//! 指标注册表
//!
//! 审计过程中首次出现的指标按顺序登记，报告表头由此生成

/// 指标标识（类别 id 或单项审计 id）
pub type MetricKey = String;

/// 已登记的指标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricInfo {
    pub key: MetricKey,
    /// 表头中显示的名称
    pub title: String,
}

/// 只追加、保持首次出现顺序的指标注册表
#[derive(Debug, Clone, Default)]
pub struct MetricRegistry {
    metrics: Vec<MetricInfo>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记指标；已存在时保留第一次的名称，返回是否为新指标
    pub fn register(&mut self, key: &str, title: &str) -> bool {
        if self.contains(key) {
            return false;
        }
        self.metrics.push(MetricInfo {
            key: key.to_string(),
            title: title.to_string(),
        });
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.metrics.iter().any(|m| m.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MetricInfo> {
        self.metrics.iter()
    }

    pub fn titles(&self) -> Vec<String> {
        self.metrics.iter().map(|m| m.title.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_keeps_first_seen_order() {
        let mut registry = MetricRegistry::new();
        assert!(registry.register("seo", "SEO"));
        assert!(registry.register("performance", "Performance"));
        assert!(!registry.register("seo", "Search"));

        let keys: Vec<&str> = registry.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["seo", "performance"]);
        assert_eq!(registry.titles(), vec!["SEO", "Performance"]);
    }
}
