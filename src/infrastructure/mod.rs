pub mod audit_engine;
pub mod lighthouse;

pub use audit_engine::{AuditEngine, AuditOptions};
pub use lighthouse::LighthouseEngine;
