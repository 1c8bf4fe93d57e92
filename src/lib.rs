pub mod config;
pub mod logging;
pub mod models;
pub mod pipeline;

pub use config::ExtractorConfig;
pub use models::{Category, LabReport, Parameter, ReportSummary};
pub use pipeline::extraction::{is_out_of_range, ExtractionError, LabExtractor};
pub use pipeline::source::{join_pages, PagedTextSource, PlainTextSource, TextSource};
