//! Report assembly and rendering

pub mod formatter;
pub mod report;

pub use formatter::{render, render_profile, render_tips};
pub use report::MatchReport;
