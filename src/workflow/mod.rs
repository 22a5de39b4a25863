pub mod audit_ctx;
pub mod page_audit;

pub use audit_ctx::AuditCtx;
pub use page_audit::{AuditOutcome, MetricSample, PageAuditFlow};
