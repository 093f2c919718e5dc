//! Canonical report data model and upstream-shape normalization.
//!
//! Upstream dashboard payloads are not consistently shaped: the same metric
//! may carry `name` or `metricName`, `value` or `currentValue`, and so on.
//! All of that variance is absorbed here, once, at the boundary. The `Raw*`
//! types accept every known spelling via serde aliases; `normalize`/`from_raw`
//! produce canonical records with every fallback already resolved, so the
//! render side never sees an `Option` it has to re-interpret.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Report type drawn from a closed set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    Environmental,
    Social,
    Governance,
    #[default]
    Comprehensive,
}

impl ReportType {
    /// Parse a wire label, case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "environmental" => Some(Self::Environmental),
            "social" => Some(Self::Social),
            "governance" => Some(Self::Governance),
            "comprehensive" => Some(Self::Comprehensive),
            _ => None,
        }
    }

    /// Human-readable label used in report prose.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Environmental => "environmental",
            Self::Social => "social",
            Self::Governance => "governance",
            Self::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directional trend label for a metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl Trend {
    /// Parse an upstream trend label, case-insensitively.
    pub fn parse(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "improving" | "up" => Some(Self::Improving),
            "stable" | "flat" => Some(Self::Stable),
            "declining" | "down" => Some(Self::Declining),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "Improving",
            Self::Stable => "Stable",
            Self::Declining => "Declining",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical metric record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Display name.
    pub name: String,
    /// Current value.
    pub value: f64,
    /// Unit label (may be empty).
    pub unit: String,
    /// Optional target value; rendered as `TBD` when absent.
    pub target: Option<f64>,
    /// Optional prior-period value used for trend derivation.
    pub previous_value: Option<f64>,
    /// Upstream-supplied trend, preferred over derivation when present.
    pub trend: Option<Trend>,
}

/// Boundary shape for one metric as supplied by upstream payloads.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawMetric {
    #[serde(alias = "metricName")]
    pub name: Option<String>,
    #[serde(alias = "currentValue")]
    pub value: Option<f64>,
    pub unit: Option<String>,
    #[serde(alias = "targetValue")]
    pub target: Option<f64>,
    #[serde(rename = "previousValue")]
    pub previous_value: Option<f64>,
    pub trend: Option<String>,
}

impl RawMetric {
    /// Resolve this raw shape into a canonical [`Metric`].
    ///
    /// A metric with no usable name in any known field is dropped (with a
    /// log line); a missing value defaults to zero with a warning so the
    /// row still renders instead of failing the whole report.
    pub fn normalize(self) -> Option<Metric> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                log::debug!("dropping metric with no name field");
                return None;
            }
        };
        let value = match self.value {
            Some(value) => value,
            None => {
                log::warn!("metric {name:?} has no value field, defaulting to 0");
                0.0
            }
        };
        Some(Metric {
            name,
            value,
            unit: self.unit.unwrap_or_default(),
            target: self.target,
            previous_value: self.previous_value,
            trend: self.trend.as_deref().and_then(Trend::parse),
        })
    }
}

/// Four ESG sub-scores, each expected in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub overall: f64,
    pub environmental: f64,
    pub social: f64,
    pub governance: f64,
}

impl Scores {
    /// Enforce the `[0, 100]` range invariant at the boundary.
    pub fn clamped(self) -> Self {
        Self {
            overall: self.overall.clamp(0.0, 100.0),
            environmental: self.environmental.clamp(0.0, 100.0),
            social: self.social.clamp(0.0, 100.0),
            governance: self.governance.clamp(0.0, 100.0),
        }
    }
}

/// Boundary shape for the scores object.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawScores {
    #[serde(rename = "overallScore")]
    pub overall: Option<f64>,
    #[serde(rename = "environmentalScore")]
    pub environmental: Option<f64>,
    #[serde(rename = "socialScore")]
    pub social: Option<f64>,
    #[serde(rename = "governanceScore")]
    pub governance: Option<f64>,
}

impl RawScores {
    /// Resolve into canonical [`Scores`], clamping into range.
    ///
    /// Returns `None` when no sub-score is present at all, so an empty
    /// object degrades the same way as an absent one.
    pub fn normalize(self) -> Option<Scores> {
        if self.overall.is_none()
            && self.environmental.is_none()
            && self.social.is_none()
            && self.governance.is_none()
        {
            return None;
        }
        Some(
            Scores {
                overall: self.overall.unwrap_or(0.0),
                environmental: self.environmental.unwrap_or(0.0),
                social: self.social.unwrap_or(0.0),
                governance: self.governance.unwrap_or(0.0),
            }
            .clamped(),
        )
    }
}

/// Canonical compliance-framework record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRecord {
    /// Framework display name.
    pub framework_name: String,
    /// Review status label.
    pub status: String,
    /// Completion percentage; rendered as `N/A` when absent.
    pub completion: Option<f64>,
    /// Next deadline label; rendered as `Ongoing` when absent.
    pub deadline: Option<String>,
    /// Optional free-text description.
    pub description: Option<String>,
}

/// Default status label for compliance records that arrive without one.
pub const DEFAULT_COMPLIANCE_STATUS: &str = "Under Review";

/// Boundary shape for one compliance record.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawComplianceRecord {
    #[serde(rename = "frameworkName", alias = "name")]
    pub framework_name: Option<String>,
    pub status: Option<String>,
    #[serde(alias = "completionPercentage")]
    pub completion: Option<f64>,
    #[serde(alias = "nextDeadline")]
    pub deadline: Option<String>,
    pub description: Option<String>,
}

impl RawComplianceRecord {
    /// Resolve into a canonical [`ComplianceRecord`].
    pub fn normalize(self) -> ComplianceRecord {
        ComplianceRecord {
            framework_name: self
                .framework_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "Unnamed Framework".to_string()),
            status: self
                .status
                .filter(|status| !status.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COMPLIANCE_STATUS.to_string()),
            completion: self.completion,
            deadline: self.deadline.filter(|deadline| !deadline.trim().is_empty()),
            description: self.description,
        }
    }
}

/// Fully materialized report input.
///
/// Constructed fresh per generation call; nothing here persists across
/// calls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    pub organization_name: String,
    pub report_type: ReportType,
    /// Reporting period label, e.g. `FY2024`.
    pub period: String,
    /// Named source module, when the payload identifies one.
    pub module: Option<String>,
    pub metrics: Vec<Metric>,
    pub scores: Option<Scores>,
    pub compliance: Option<Vec<ComplianceRecord>>,
}

impl ReportData {
    /// Normalize an upstream payload into canonical form.
    pub fn from_raw(raw: RawReportData) -> Self {
        let report_type = raw
            .report_type
            .as_deref()
            .and_then(ReportType::parse)
            .unwrap_or_default();
        Self {
            organization_name: raw
                .organization_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "Organization".to_string()),
            report_type,
            period: raw
                .period
                .filter(|period| !period.trim().is_empty())
                .unwrap_or_else(|| "Current Period".to_string()),
            module: raw.module,
            metrics: raw
                .metrics
                .into_iter()
                .filter_map(RawMetric::normalize)
                .collect(),
            scores: raw.scores.and_then(RawScores::normalize),
            compliance: raw
                .compliance
                .map(|records| records.into_iter().map(RawComplianceRecord::normalize).collect()),
        }
    }
}

/// Boundary shape for the whole upstream payload.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawReportData {
    #[serde(rename = "organizationName")]
    pub organization_name: Option<String>,
    #[serde(rename = "reportType")]
    pub report_type: Option<String>,
    pub period: Option<String>,
    pub module: Option<String>,
    pub metrics: Vec<RawMetric>,
    pub scores: Option<RawScores>,
    #[serde(alias = "complianceFrameworks")]
    pub compliance: Option<Vec<RawComplianceRecord>>,
}
