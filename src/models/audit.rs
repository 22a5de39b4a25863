//! Lighthouse 审计结果（LHR）中本程序关心的部分

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// 旧版 Lighthouse 在成功时也会带上 runtimeError，code 为 NO_ERROR
const NO_ERROR_CODE: &str = "NO_ERROR";

/// 单次审计结果
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    #[serde(default)]
    pub runtime_error: Option<RuntimeError>,
    #[serde(default)]
    pub categories: OrderedMap<CategoryResult>,
    #[serde(default)]
    pub audits: OrderedMap<AuditItem>,
}

/// 审计工具运行了但无法给页面打分
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// 类别分数，score 在 [0, 1] 之间
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryResult {
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// 单项审计，numericValue 通常是毫秒
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditItem {
    pub title: String,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
}

impl AuditResult {
    /// 只包含类别分数的结果
    pub fn scored<'a>(categories: impl IntoIterator<Item = (&'a str, &'a str, f64)>) -> Self {
        let categories = categories
            .into_iter()
            .map(|(id, title, score)| {
                (
                    id.to_string(),
                    CategoryResult {
                        title: title.to_string(),
                        score: Some(score),
                    },
                )
            })
            .collect();
        Self {
            runtime_error: None,
            categories: OrderedMap(categories),
            audits: OrderedMap::default(),
        }
    }

    /// 带运行时错误的结果
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            runtime_error: Some(RuntimeError {
                code: None,
                message: message.into(),
            }),
            ..Self::default()
        }
    }

    /// 追加一个单项审计
    pub fn with_audit(mut self, id: &str, title: &str, numeric_value: f64) -> Self {
        self.audits.0.push((
            id.to_string(),
            AuditItem {
                title: title.to_string(),
                score: None,
                numeric_value: Some(numeric_value),
            },
        ));
        self
    }

    /// 真正的运行时错误信息（忽略 NO_ERROR）
    pub fn runtime_error_message(&self) -> Option<&str> {
        let err = self.runtime_error.as_ref()?;
        if err.code.as_deref() == Some(NO_ERROR_CODE) {
            return None;
        }
        if err.message.is_empty() {
            return Some(err.code.as_deref().unwrap_or("unknown runtime error"));
        }
        Some(&err.message)
    }
}

/// 保持 JSON 中键顺序的映射
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<T>(pub Vec<(String, T)>);

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> OrderedMap<T> {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedMap<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<T> {
            type Value = OrderedMap<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_LHR: &str = r#"{
        "lighthouseVersion": "12.0.0",
        "categories": {
            "seo": { "id": "seo", "title": "SEO", "score": 0.9 },
            "performance": { "id": "performance", "title": "Performance", "score": 0.42 },
            "accessibility": { "id": "accessibility", "title": "Accessibility", "score": null }
        },
        "audits": {
            "first-contentful-paint": {
                "title": "First Contentful Paint",
                "score": 0.8,
                "numericValue": 1234.5
            }
        }
    }"#;

    #[test]
    fn test_deserialize_keeps_category_order() {
        let result: AuditResult = serde_json::from_str(SAMPLE_LHR).unwrap();
        let ids: Vec<&str> = result.categories.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["seo", "performance", "accessibility"]);
        assert_eq!(result.categories.get("performance").unwrap().score, Some(0.42));
        assert_eq!(result.categories.get("accessibility").unwrap().score, None);
        assert!(result.runtime_error_message().is_none());
    }

    #[test]
    fn test_deserialize_audit_numeric_value() {
        let result: AuditResult = serde_json::from_str(SAMPLE_LHR).unwrap();
        let fcp = result.audits.get("first-contentful-paint").unwrap();
        assert_eq!(fcp.numeric_value, Some(1234.5));
        assert_eq!(fcp.title, "First Contentful Paint");
    }

    #[test]
    fn test_runtime_error_message() {
        let json = r#"{
            "runtimeError": { "code": "FAILED_DOCUMENT_REQUEST", "message": "net::ERR_NAME_NOT_RESOLVED" },
            "categories": {}
        }"#;
        let result: AuditResult = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.runtime_error_message(),
            Some("net::ERR_NAME_NOT_RESOLVED")
        );
    }

    #[test]
    fn test_no_error_code_is_not_a_runtime_error() {
        let json = r#"{ "runtimeError": { "code": "NO_ERROR", "message": "" }, "categories": {} }"#;
        let result: AuditResult = serde_json::from_str(json).unwrap();
        assert!(result.runtime_error_message().is_none());
    }
}
