//! Data side of the ESG report generator.
//!
//! This crate owns the canonical report data model, the boundary
//! normalization that maps inconsistently-shaped upstream payloads into
//! that model, and the pure content derivers (score status labels, trend
//! estimation, framework-keyed report wording). The pagination engine in
//! `esg-report-render` consumes these types and never repeats any
//! fallback logic itself.

pub mod config;
pub mod content;
pub mod data;

pub use config::{Framework, RawReportConfig, ReportConfig};
pub use content::{
    compliance_statement, derive_trend, executive_narrative, framework_standards,
    methodology_text, score_status, ScoreStatus, StandardStatus,
};
pub use data::{
    ComplianceRecord, Metric, RawComplianceRecord, RawMetric, RawReportData, RawScores,
    ReportData, ReportType, Scores, Trend,
};
