//! Report model and output formatters

pub mod formatter;
pub mod report;
pub mod tier;

pub use formatter::{resolve_save_path, save_report_to_file, suggest_filename, ReportGenerator};
pub use report::ReportView;
pub use tier::{classification_tier, score_tier, Tier};
