//! 审计上下文
//!
//! 封装"正在第几轮审计第几个页面"这一信息

use std::fmt::Display;

/// 单次审计的上下文
#[derive(Debug, Clone)]
pub struct AuditCtx {
    /// 页面索引（从 0 开始）
    pub page_index: usize,
    /// 页面总数
    pub page_count: usize,
    /// 运行轮次（从 0 开始）
    pub run_index: usize,
    /// 总轮次
    pub run_count: usize,
}

impl AuditCtx {
    pub fn new(page_index: usize, page_count: usize, run_index: usize, run_count: usize) -> Self {
        Self {
            page_index,
            page_count,
            run_index,
            run_count,
        }
    }
}

impl Display for AuditCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Run {} of {}: URL {} of {}",
            self.run_index + 1,
            self.run_count,
            self.page_index + 1,
            self.page_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_one_based() {
        let ctx = AuditCtx::new(0, 2, 2, 3);
        assert_eq!(ctx.to_string(), "Run 3 of 3: URL 1 of 2");
    }
}
