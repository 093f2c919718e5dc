//! Report configuration and the regulatory framework enumeration.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Regulatory/standards framework governing report wording and structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Framework {
    Gri,
    Sasb,
    Tcfd,
    EuCsrd,
    Sec,
    Issb,
}

impl Framework {
    /// All known frameworks, in display order.
    pub const ALL: [Framework; 6] = [
        Framework::Gri,
        Framework::Sasb,
        Framework::Tcfd,
        Framework::EuCsrd,
        Framework::Sec,
        Framework::Issb,
    ];

    /// Parse a wire identifier.
    ///
    /// Accepts the canonical spellings case-insensitively, with or without
    /// the hyphen in `EU-CSRD`. Unrecognized identifiers return `None`;
    /// downstream lookups then take their explicit fallback arm instead of
    /// failing.
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_uppercase().as_str() {
            "GRI" => Some(Self::Gri),
            "SASB" => Some(Self::Sasb),
            "TCFD" => Some(Self::Tcfd),
            "EU-CSRD" | "EUCSRD" | "CSRD" => Some(Self::EuCsrd),
            "SEC" => Some(Self::Sec),
            "ISSB" => Some(Self::Issb),
            _ => None,
        }
    }

    /// Canonical display identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gri => "GRI",
            Self::Sasb => "SASB",
            Self::Tcfd => "TCFD",
            Self::EuCsrd => "EU-CSRD",
            Self::Sec => "SEC",
            Self::Issb => "ISSB",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one report generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Report title shown on the cover.
    pub title: String,
    /// Optional subtitle shown under the title.
    pub subtitle: Option<String>,
    /// Parsed framework, when the supplied label is recognized.
    pub framework: Option<Framework>,
    /// Raw framework label as supplied by the caller.
    ///
    /// Preserved separately so an unrecognized identifier still renders on
    /// the cover badge while every text lookup degrades to its fallback.
    pub framework_label: String,
    /// Accepted but not acted on by this engine; reserved for a chart
    /// capability it does not implement.
    pub include_charts: bool,
    /// Emit the metrics section.
    pub include_metrics: bool,
    /// Emit the compliance section.
    pub include_compliance: bool,
    /// Accepted but not yet wired to behavior; reserved extension point.
    pub custom_sections: Vec<String>,
}

impl ReportConfig {
    /// Build a config with default inclusion flags (metrics and compliance
    /// on, charts off).
    pub fn new(title: impl Into<String>, framework_label: impl Into<String>) -> Self {
        let framework_label = framework_label.into();
        Self {
            title: title.into(),
            subtitle: None,
            framework: Framework::parse(&framework_label),
            framework_label,
            include_charts: false,
            include_metrics: true,
            include_compliance: true,
            custom_sections: Vec::new(),
        }
    }

    /// Normalize an upstream config payload.
    pub fn from_raw(raw: RawReportConfig) -> Self {
        let framework_label = raw
            .framework
            .filter(|label| !label.trim().is_empty())
            .unwrap_or_else(|| "GRI".to_string());
        let framework = Framework::parse(&framework_label);
        if framework.is_none() {
            log::warn!("unrecognized framework {framework_label:?}, using generic report wording");
        }
        Self {
            title: raw
                .title
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| "Sustainability Report".to_string()),
            subtitle: raw.subtitle,
            framework,
            framework_label,
            include_charts: raw.include_charts,
            include_metrics: raw.include_metrics,
            include_compliance: raw.include_compliance,
            custom_sections: raw.custom_sections,
        }
    }
}

/// Boundary shape for the upstream config payload.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RawReportConfig {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub framework: Option<String>,
    #[serde(rename = "includeCharts")]
    pub include_charts: bool,
    #[serde(rename = "includeMetrics")]
    pub include_metrics: bool,
    #[serde(rename = "includeCompliance")]
    pub include_compliance: bool,
    #[serde(rename = "customSections")]
    pub custom_sections: Vec<String>,
}

impl Default for RawReportConfig {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            framework: None,
            include_charts: false,
            include_metrics: true,
            include_compliance: true,
            custom_sections: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framework_parse_accepts_known_spellings() {
        assert_eq!(Framework::parse("GRI"), Some(Framework::Gri));
        assert_eq!(Framework::parse("gri"), Some(Framework::Gri));
        assert_eq!(Framework::parse("EU-CSRD"), Some(Framework::EuCsrd));
        assert_eq!(Framework::parse("eucsrd"), Some(Framework::EuCsrd));
        assert_eq!(Framework::parse(" issb "), Some(Framework::Issb));
    }

    #[test]
    fn framework_parse_rejects_unknown_identifiers() {
        assert_eq!(Framework::parse("ISO-14001"), None);
        assert_eq!(Framework::parse(""), None);
    }

    #[test]
    fn config_preserves_unrecognized_label_for_badge() {
        let config = ReportConfig::new("Annual ESG Report", "ISO-14001");
        assert_eq!(config.framework, None);
        assert_eq!(config.framework_label, "ISO-14001");
    }

    #[test]
    fn config_from_raw_parses_wire_shape() {
        let raw: RawReportConfig = serde_json::from_str(
            r#"{"title":"Annual ESG Report","framework":"GRI",
                "includeCharts":true,"includeMetrics":true,"includeCompliance":false}"#,
        )
        .unwrap();
        let config = ReportConfig::from_raw(raw);
        assert_eq!(config.framework, Some(Framework::Gri));
        assert!(config.include_charts);
        assert!(!config.include_compliance);
    }
}
