//! Report sections, composed in a fixed order.
//!
//! Each section is a function of the report data, the config, and the
//! shared flow writer; sections never touch any other state. The order is
//! not configurable: cover, executive summary, methodology, metrics,
//! compliance, appendices.

use esg_report::content::{
    compliance_statement, derive_trend, executive_narrative, format_completion,
    format_metric_value, format_score, framework_standards, methodology_text, score_status,
};
use esg_report::data::{ReportData, ReportType};
use esg_report::ReportConfig;

use crate::canvas::{estimate_text_width, Canvas};
use crate::error::RenderFailure;
use crate::ir::{ColumnAlign, FontWeight, TextStyle};
use crate::writer::FlowWriter;

/// Cover banner height.
const BANNER_HEIGHT: f32 = 40.0;

fn report_type_title(report_type: ReportType) -> &'static str {
    match report_type {
        ReportType::Environmental => "Environmental Report",
        ReportType::Social => "Social Report",
        ReportType::Governance => "Governance Report",
        ReportType::Comprehensive => "Comprehensive ESG Report",
    }
}

/// Cover page: banner, identity block, framework badge, compliance
/// statement. Always ends with a forced page break.
pub(crate) fn cover<C: Canvas>(
    writer: &mut FlowWriter<'_, C>,
    data: &ReportData,
    config: &ReportConfig,
    generated_on: &str,
) -> Result<(), RenderFailure> {
    let theme = writer.theme().clone();
    let cursor = *writer.cursor();
    let left = cursor.left_margin;

    let canvas = writer.canvas_mut();
    canvas.draw_filled_rect(0.0, 0.0, cursor.page_width, BANNER_HEIGHT, theme.accent)?;
    canvas.draw_text(&config.title, left, 25.0, &theme.banner_title)?;

    let mut y = BANNER_HEIGHT + 25.0;
    let org_style = TextStyle::new(8.0, FontWeight::Bold, theme.ink);
    canvas.draw_text(&data.organization_name, left, y, &org_style)?;
    y += 12.0;
    canvas.draw_text(report_type_title(data.report_type), left, y, &theme.subheading)?;
    y += 10.0;
    if let Some(subtitle) = &config.subtitle {
        canvas.draw_text(subtitle, left, y, &theme.body)?;
        y += 8.0;
    }

    // Framework badge pill. The raw label renders even when the
    // identifier was not recognized.
    let badge_style = TextStyle::new(4.0, FontWeight::Bold, theme.accent);
    let badge_label = format!("Framework: {}", config.framework_label);
    let badge_width = estimate_text_width(&badge_label, &badge_style) + 8.0;
    canvas.draw_rounded_rect(left, y, badge_width, 10.0, 3.0, theme.pill_fill)?;
    canvas.draw_text(&badge_label, left + 4.0, y + 7.0, &badge_style)?;
    y += 18.0;

    canvas.draw_text(
        &format!("Reporting Period: {}", data.period),
        left,
        y,
        &theme.body,
    )?;
    y += 8.0;
    canvas.draw_text(&format!("Generated on {generated_on}"), left, y, &theme.caption)?;
    y += 14.0;

    writer.cursor_mut().y = y;
    writer.write_paragraph(compliance_statement(config.framework))?;

    // The cover always owns a full page, regardless of remaining space.
    writer.page_break()
}

/// Executive summary: derived narrative plus the KPI score table when
/// scores are present.
pub(crate) fn executive_summary<C: Canvas>(
    writer: &mut FlowWriter<'_, C>,
    data: &ReportData,
) -> Result<(), RenderFailure> {
    writer.write_heading("Executive Summary")?;
    writer.write_paragraph(&executive_narrative(
        data.report_type,
        &data.organization_name,
        &data.period,
    ))?;

    if let Some(scores) = data.scores {
        writer.write_subheading("Key Performance Indicators")?;
        let rows: Vec<Vec<String>> = [
            ("Overall ESG Score", scores.overall),
            ("Environmental Score", scores.environmental),
            ("Social Score", scores.social),
            ("Governance Score", scores.governance),
        ]
        .into_iter()
        .map(|(label, score)| {
            vec![
                label.to_string(),
                format_score(score),
                score_status(score).to_string(),
            ]
        })
        .collect();
        writer.table(
            &["Indicator", "Score", "Status"],
            &rows,
            vec![ColumnAlign::Left, ColumnAlign::Right, ColumnAlign::Left],
        )?;
    }
    Ok(())
}

/// Methodology: framework prose, plus the sub-standards table for
/// frameworks that define one.
pub(crate) fn methodology<C: Canvas>(
    writer: &mut FlowWriter<'_, C>,
    config: &ReportConfig,
) -> Result<(), RenderFailure> {
    writer.write_heading("Methodology")?;
    writer.write_paragraph(methodology_text(config.framework))?;

    if let Some(standards) = framework_standards(config.framework) {
        let rows: Vec<Vec<String>> = standards
            .iter()
            .map(|(name, status)| vec![(*name).to_string(), status.to_string()])
            .collect();
        writer.table(&["Standard", "Status"], &rows, Vec::new())?;
    }
    Ok(())
}

/// Metrics table, one row per supplied metric.
pub(crate) fn metrics<C: Canvas>(
    writer: &mut FlowWriter<'_, C>,
    data: &ReportData,
) -> Result<(), RenderFailure> {
    writer.write_heading("Performance Metrics")?;
    if data.metrics.is_empty() {
        return writer.write_paragraph("No metrics were supplied for this reporting period.");
    }
    let rows: Vec<Vec<String>> = data
        .metrics
        .iter()
        .map(|metric| {
            let trend = metric
                .trend
                .unwrap_or_else(|| derive_trend(metric.value, metric.previous_value));
            vec![
                metric.name.clone(),
                format_metric_value(metric.value),
                metric.unit.clone(),
                trend.to_string(),
                metric
                    .target
                    .map(format_metric_value)
                    .unwrap_or_else(|| "TBD".to_string()),
            ]
        })
        .collect();
    writer.table(
        &["Metric", "Value", "Unit", "Trend", "Target"],
        &rows,
        vec![
            ColumnAlign::Left,
            ColumnAlign::Right,
            ColumnAlign::Left,
            ColumnAlign::Left,
            ColumnAlign::Right,
        ],
    )
}

/// Compliance table, one row per framework record.
pub(crate) fn compliance<C: Canvas>(
    writer: &mut FlowWriter<'_, C>,
    data: &ReportData,
) -> Result<(), RenderFailure> {
    writer.write_heading("Compliance Status")?;
    let records = data.compliance.as_deref().unwrap_or_default();
    if records.is_empty() {
        return writer
            .write_paragraph("No compliance framework records were supplied for this period.");
    }
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            vec![
                record.framework_name.clone(),
                record.status.clone(),
                format_completion(record.completion),
                record
                    .deadline
                    .clone()
                    .unwrap_or_else(|| "Ongoing".to_string()),
            ]
        })
        .collect();
    writer.table(
        &["Framework", "Status", "Completion", "Deadline"],
        &rows,
        vec![
            ColumnAlign::Left,
            ColumnAlign::Left,
            ColumnAlign::Right,
            ColumnAlign::Left,
        ],
    )
}

/// Appendices: fixed boilerplate, always on a fresh page.
pub(crate) fn appendices<C: Canvas>(
    writer: &mut FlowWriter<'_, C>,
) -> Result<(), RenderFailure> {
    writer.page_break()?;
    writer.write_heading("Appendices")?;

    writer.write_subheading("Appendix A: Data Sources")?;
    writer.write_paragraph(
        "Quantitative data in this report is drawn from internal management \
         systems, utility and supplier records, and third-party data providers. \
         Where measured data was unavailable, documented estimation methods \
         were applied and are flagged in the underlying data inventory.",
    )?;

    writer.write_subheading("Appendix B: Calculation Methodology")?;
    writer.write_paragraph(
        "Emissions are calculated using the GHG Protocol Corporate Standard \
         with location-based and market-based methods where applicable. \
         Intensity figures are normalized against revenue and full-time \
         equivalent headcount for the reporting period.",
    )?;

    writer.write_subheading("Appendix C: Assurance Statement")?;
    writer.write_paragraph(
        "Selected indicators in this report were subject to limited assurance \
         by an independent third party. The assurance scope, criteria, and \
         conclusions are available from the organization on request.",
    )
}
