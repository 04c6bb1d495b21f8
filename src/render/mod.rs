//! Output rendering (terminal previews, JSON reports)

pub mod preview;
pub mod report;

pub use preview::render_preview;
pub use report::{build_report, write_report, ReportInputs};
