pub mod aggregator;
pub mod error_log;
pub mod metric_registry;
pub mod report_builder;
pub mod score_accumulator;

pub use aggregator::{average, median, ScoreMethod};
pub use error_log::{ErrorEntry, ErrorLog};
pub use metric_registry::{MetricInfo, MetricKey, MetricRegistry};
pub use report_builder::{build_report, write_report, Report, ReportRow};
pub use score_accumulator::{PageResult, RawScore, SampleOutcome, ScoreAccumulator};
