// Library exports for insightboard

pub mod aggregate;
pub mod filter;
pub mod model;
pub mod report;
pub mod source;

pub use aggregate::{group_average, group_count, unique_values};
pub use filter::apply_filters;
pub use model::{Field, Filters, Insight, Measure, SeriesPoint};
pub use report::{build_report, summarize, DashboardReport, Summary};
pub use source::{DataSource, FileSource, Format};
