//! The report engine: runs the section composer over a canvas and
//! serializes the result.
//!
//! Generation is synchronous and run-to-completion; there is no
//! cancellation mid-generation. The engine owns a fresh canvas per call
//! and is not reentrant over a shared canvas instance.

use chrono::Local;
use esg_report::{ReportConfig, ReportData};

use crate::canvas::{decode_pages, Canvas, CommandCanvas, PageGeometry, DEFAULT_MAX_PAGES};
use crate::error::RenderFailure;
use crate::ir::RenderPage;
use crate::sections;
use crate::writer::{FlowWriter, Theme};

/// Engine configuration.
#[derive(Clone, Debug)]
pub struct ReportEngineOptions {
    /// Page dimensions and margins.
    pub geometry: PageGeometry,
    /// Visual styling shared by all sections.
    pub theme: Theme,
    /// Guard against runaway pagination.
    pub max_pages: usize,
    /// Pinned generation-date label for the cover.
    ///
    /// `None` formats today's date. Pinning makes output byte-identical
    /// across runs, which batch generation and tests rely on.
    pub generated_on: Option<String>,
}

impl Default for ReportEngineOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            theme: Theme::default(),
            max_pages: DEFAULT_MAX_PAGES,
            generated_on: None,
        }
    }
}

/// Completed report: opaque bytes plus the page count.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportArtifact {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

impl ReportArtifact {
    /// Decode the artifact back into its page list.
    pub fn decode(&self) -> Result<Vec<RenderPage>, RenderFailure> {
        decode_pages(&self.bytes)
    }
}

/// Report composition and pagination engine.
#[derive(Clone, Debug, Default)]
pub struct ReportEngine {
    options: ReportEngineOptions,
}

impl ReportEngine {
    pub fn new(options: ReportEngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ReportEngineOptions {
        &self.options
    }

    /// Generate a complete report artifact.
    ///
    /// Everything is constructed fresh for this call and discarded after
    /// it returns; failures propagate as [`RenderFailure`] and are never
    /// retried.
    pub fn generate_report(
        &self,
        data: &ReportData,
        config: &ReportConfig,
    ) -> Result<ReportArtifact, RenderFailure> {
        let mut canvas =
            CommandCanvas::new(self.options.geometry).with_max_pages(self.options.max_pages);
        self.compose_into(&mut canvas, data, config)?;
        let bytes = canvas.serialize()?;
        log::debug!(
            "report generated: {} pages, {} bytes",
            canvas.page_count(),
            bytes.len()
        );
        Ok(ReportArtifact {
            bytes,
            page_count: canvas.page_count(),
        })
    }

    /// Run the section composer against any canvas backend.
    ///
    /// Sections execute strictly in sequence; each depends on the cursor
    /// position left by its predecessor.
    pub fn compose_into<C: Canvas>(
        &self,
        canvas: &mut C,
        data: &ReportData,
        config: &ReportConfig,
    ) -> Result<(), RenderFailure> {
        let generated_on = self
            .options
            .generated_on
            .clone()
            .unwrap_or_else(|| Local::now().format("%B %-d, %Y").to_string());

        if config.include_charts {
            log::debug!("include_charts is set but chart rendering is not implemented");
        }
        if !config.custom_sections.is_empty() {
            log::debug!(
                "custom_sections are accepted but not yet wired: {:?}",
                config.custom_sections
            );
        }

        let mut writer = FlowWriter::new(canvas, &self.options.geometry, &self.options.theme);
        sections::cover(&mut writer, data, config, &generated_on)?;
        sections::executive_summary(&mut writer, data)?;
        sections::methodology(&mut writer, config)?;
        if config.include_metrics {
            sections::metrics(&mut writer, data)?;
        }
        if config.include_compliance {
            sections::compliance(&mut writer, data)?;
        }
        sections::appendices(&mut writer)?;
        Ok(())
    }
}
