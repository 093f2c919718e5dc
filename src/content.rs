//! Pure content derivers: score labels, trend estimation, and the
//! framework-keyed wording tables.
//!
//! Every function here is total over its inputs. Framework lookups carry an
//! explicit fallback arm so an unrecognized identifier degrades to generic
//! wording instead of failing the report.

use core::fmt;

use crate::config::Framework;
use crate::data::{ReportType, Trend};

/// Qualitative label for a 0-100 score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreStatus {
    Excellent,
    Good,
    Satisfactory,
    NeedsImprovement,
}

impl ScoreStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Satisfactory => "Satisfactory",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }
}

impl fmt::Display for ScoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a score to its qualitative status.
///
/// Boundary values belong to the higher bucket: exactly 80 is Excellent,
/// 70 is Good, 60 is Satisfactory.
pub fn score_status(score: f64) -> ScoreStatus {
    if score >= 80.0 {
        ScoreStatus::Excellent
    } else if score >= 70.0 {
        ScoreStatus::Good
    } else if score >= 60.0 {
        ScoreStatus::Satisfactory
    } else {
        ScoreStatus::NeedsImprovement
    }
}

/// Relative change beyond which a metric counts as moving.
const TREND_THRESHOLD: f64 = 0.05;

/// Derive a directional trend from current and prior-period values.
///
/// A missing, zero, or non-finite prior value means there is not enough
/// data to judge direction; that case is Stable, never a division error.
pub fn derive_trend(value: f64, previous: Option<f64>) -> Trend {
    let Some(previous) = previous else {
        return Trend::Stable;
    };
    if previous == 0.0 || !previous.is_finite() || !value.is_finite() {
        return Trend::Stable;
    }
    let delta = (value - previous) / previous;
    if delta > TREND_THRESHOLD {
        Trend::Improving
    } else if delta < -TREND_THRESHOLD {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Compliance status of one framework sub-standard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StandardStatus {
    Compliant,
    Partial,
}

impl StandardStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compliant => "Compliant",
            Self::Partial => "Partial",
        }
    }
}

impl fmt::Display for StandardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cover-page compliance statement for a framework.
pub fn compliance_statement(framework: Option<Framework>) -> &'static str {
    match framework {
        Some(Framework::Gri) => {
            "This report has been prepared in accordance with the GRI Standards, \
             covering material topics identified through structured stakeholder \
             engagement and a double materiality assessment."
        }
        Some(Framework::Sasb) => {
            "This report applies the SASB Standards for the organization's primary \
             industry, disclosing the financially material sustainability metrics \
             defined for that sector."
        }
        Some(Framework::Tcfd) => {
            "This report follows the recommendations of the Task Force on \
             Climate-related Financial Disclosures across governance, strategy, \
             risk management, and metrics and targets."
        }
        Some(Framework::EuCsrd) => {
            "This report has been prepared to meet the requirements of the EU \
             Corporate Sustainability Reporting Directive and the European \
             Sustainability Reporting Standards."
        }
        Some(Framework::Sec) => {
            "This report aligns with the SEC climate-related disclosure rules, \
             including Scope 1 and Scope 2 greenhouse gas emissions and material \
             climate risk information."
        }
        Some(Framework::Issb) => {
            "This report applies IFRS S1 and IFRS S2 as issued by the \
             International Sustainability Standards Board."
        }
        None => {
            "This report has been prepared in accordance with recognized \
             sustainability reporting practices and reflects the organization's \
             current measurement capabilities."
        }
    }
}

/// Methodology-section opening paragraph for a framework.
pub fn methodology_text(framework: Option<Framework>) -> &'static str {
    match framework {
        Some(Framework::Gri) => {
            "Disclosures were compiled following the GRI reporting principles of \
             accuracy, balance, clarity, comparability, completeness, and \
             verifiability. Material topics were selected through a double \
             materiality assessment and mapped to topic-specific GRI Standards."
        }
        Some(Framework::Sasb) => {
            "Metrics were compiled using the industry-specific SASB Standards, \
             applying the technical protocols defined for each accounting metric \
             and the activity metrics for normalization."
        }
        Some(Framework::Tcfd) => {
            "Climate-related disclosures are organized around the four TCFD \
             pillars. Scenario analysis covers a below-2°C pathway and a \
             current-policies pathway over short, medium, and long time horizons."
        }
        Some(Framework::EuCsrd) => {
            "Reporting follows the European Sustainability Reporting Standards, \
             with data points prepared for the digital taxonomy and subject to \
             limited assurance as required by the directive."
        }
        Some(Framework::Sec) => {
            "Emissions figures follow the GHG Protocol Corporate Standard as \
             referenced by the SEC climate disclosure rules, with financial \
             impacts assessed against existing Regulation S-X thresholds."
        }
        Some(Framework::Issb) => {
            "Disclosures apply IFRS S1 general requirements and IFRS S2 \
             climate-specific requirements, using the industry-based guidance \
             carried over from the SASB Standards."
        }
        None => {
            "Metrics were compiled from internal management systems and \
             third-party data providers, using consistent measurement \
             methodologies applied across all reporting periods."
        }
    }
}

/// Per-framework sub-standard compliance table.
///
/// Frameworks without a defined table return `None`; the methodology
/// section then degrades to prose only.
pub fn framework_standards(
    framework: Option<Framework>,
) -> Option<&'static [(&'static str, StandardStatus)]> {
    use StandardStatus::{Compliant, Partial};
    const GRI: &[(&str, StandardStatus)] = &[
        ("GRI 102: General Disclosures", Compliant),
        ("GRI 302: Energy", Compliant),
        ("GRI 305: Emissions", Partial),
        ("GRI 401: Employment", Compliant),
        ("GRI 405: Diversity and Equal Opportunity", Partial),
    ];
    const SASB: &[(&str, StandardStatus)] = &[
        ("Environment", Compliant),
        ("Social Capital", Compliant),
        ("Human Capital", Partial),
        ("Business Model & Innovation", Partial),
        ("Leadership & Governance", Compliant),
    ];
    const TCFD: &[(&str, StandardStatus)] = &[
        ("Governance", Compliant),
        ("Strategy", Partial),
        ("Risk Management", Compliant),
        ("Metrics and Targets", Partial),
    ];
    const EU_CSRD: &[(&str, StandardStatus)] = &[
        ("ESRS 2: General Disclosures", Compliant),
        ("ESRS E1: Climate Change", Compliant),
        ("ESRS S1: Own Workforce", Partial),
        ("ESRS G1: Business Conduct", Compliant),
    ];
    match framework {
        Some(Framework::Gri) => Some(GRI),
        Some(Framework::Sasb) => Some(SASB),
        Some(Framework::Tcfd) => Some(TCFD),
        Some(Framework::EuCsrd) => Some(EU_CSRD),
        Some(Framework::Sec) | Some(Framework::Issb) | None => None,
    }
}

/// Executive-summary narrative paragraph.
pub fn executive_narrative(report_type: ReportType, organization: &str, period: &str) -> String {
    let focus = match report_type {
        ReportType::Environmental => {
            "environmental performance, covering emissions, energy, water, and waste"
        }
        ReportType::Social => {
            "social performance, covering workforce, community, and human rights topics"
        }
        ReportType::Governance => {
            "governance performance, covering board composition, ethics, and oversight"
        }
        ReportType::Comprehensive => {
            "environmental, social, and governance performance across all material topics"
        }
    };
    format!(
        "This report presents {organization}'s {focus} for the {period} reporting \
         period. It summarizes progress against stated targets, highlights areas \
         requiring continued attention, and describes the methodology behind each \
         reported figure."
    )
}

/// Format a metric value for table display.
///
/// Integral values print without a decimal point, matching how upstream
/// dashboards display them.
pub fn format_metric_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// Format a sub-score as `NN/100`.
pub fn format_score(score: f64) -> String {
    format!("{}/100", format_metric_value(score))
}

/// Format a completion percentage, or `N/A` when absent.
pub fn format_completion(completion: Option<f64>) -> String {
    match completion {
        Some(completion) => format!("{}%", format_metric_value(completion)),
        None => "N/A".to_string(),
    }
}
