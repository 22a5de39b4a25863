pub mod audit;
pub mod loaders;
pub mod page;

pub use audit::{AuditItem, AuditResult, CategoryResult, OrderedMap, RuntimeError};
pub use loaders::{load_pages, parse_pages};
pub use page::PageSpec;
