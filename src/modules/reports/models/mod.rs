mod closing_report;
mod sales_summary;

pub use closing_report::{ClosingReport, ClosingReportRow, ClosingSummary};
pub use sales_summary::{SalesSummary, TopProduct};
