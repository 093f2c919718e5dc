//! Canvas abstraction and the recording command canvas.
//!
//! The composition engine only ever talks to the [`Canvas`] trait; it never
//! manipulates output bytes directly. [`CommandCanvas`] is the default
//! implementation: it records a backend-agnostic draw-command stream per
//! page and serializes the page list into an opaque binary artifact.

use serde::{Deserialize, Serialize};

use crate::error::RenderFailure;
use crate::ir::{
    Color, ColumnAlign, DrawCommand, RectCommand, RenderPage, RuleCommand, TableStyle,
    TextCommand, TextStyle,
};

/// Page dimensions and safe printable bounds, in page units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    /// Safe margin above the physical bottom edge; nothing may draw below
    /// `height - margin_bottom`.
    pub margin_bottom: f32,
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        (self.width - self.margin_left - self.margin_right).max(1.0)
    }

    pub fn content_right(&self) -> f32 {
        self.width - self.margin_right
    }

    /// Lowest y any content may reach.
    pub fn content_bottom(&self) -> f32 {
        self.height - self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self {
            width: 210.0,
            height: 297.0,
            margin_left: 20.0,
            margin_right: 20.0,
            margin_top: 20.0,
            margin_bottom: 20.0,
        }
    }
}

/// Primitive drawing capability consumed by the composition engine.
///
/// Any concrete backend can stand behind this trait; the engine assumes
/// nothing about the output format. Fallible operations propagate
/// [`RenderFailure`] and are never retried by the engine.
pub trait Canvas {
    /// Draw a single text run with its baseline at `y`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle)
        -> Result<(), RenderFailure>;

    /// Wrap `text` to `max_width`.
    ///
    /// Must be pure and deterministic for identical input; pagination
    /// idempotence depends on it.
    fn wrap_text(&self, text: &str, max_width: f32, style: &TextStyle) -> Vec<String>;

    fn draw_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
    ) -> Result<(), RenderFailure>;

    fn draw_filled_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    ) -> Result<(), RenderFailure>;

    fn draw_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        corner_radius: f32,
        color: Color,
    ) -> Result<(), RenderFailure>;

    /// Append and switch to a fresh blank page.
    ///
    /// Cursor ownership stays with the caller; this resets no content.
    fn new_page(&mut self) -> Result<(), RenderFailure>;

    /// Draw a ruled/striped table starting at `start_y` and return the y
    /// offset immediately following it.
    ///
    /// The canvas paginates the table internally when it does not fit:
    /// the returned offset is on the final page the table touched, and the
    /// table never silently overlaps the safe bottom margin.
    fn render_table(
        &mut self,
        header: &[&str],
        rows: &[Vec<String>],
        start_y: f32,
        style: &TableStyle,
    ) -> Result<f32, RenderFailure>;

    fn page_width(&self) -> f32;

    fn page_height(&self) -> f32;

    /// Serialize the completed multi-page canvas into an opaque artifact.
    fn serialize(&self) -> Result<Vec<u8>, RenderFailure>;
}

/// Approximate advance width of one glyph in em units.
///
/// Heuristic proportional-font model; wrapping only needs a stable,
/// reasonable estimate, not glyph-exact metrics.
fn glyph_em_width(ch: char) -> f32 {
    match ch {
        ' ' | '\u{00A0}' => 0.32,
        'i' | 'l' | 'I' | '|' | '!' => 0.24,
        '.' | ',' | ':' | ';' | '\'' | '"' | '`' => 0.23,
        '-' | '\u{2013}' | '\u{2014}' => 0.34,
        '(' | ')' | '[' | ']' | '{' | '}' => 0.30,
        'f' | 't' | 'j' | 'r' => 0.34,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' | '#' => 0.74,
        c if c.is_ascii_digit() => 0.52,
        c if c.is_ascii_uppercase() => 0.62,
        c if c.is_ascii_lowercase() => 0.51,
        c if c.is_whitespace() => 0.32,
        c if c.is_ascii_punctuation() => 0.42,
        _ => 0.56,
    }
}

/// Estimate rendered text width for a style, in page units.
pub fn estimate_text_width(text: &str, style: &TextStyle) -> f32 {
    let em_sum: f32 = text.chars().map(glyph_em_width).sum();
    let scale = match style.weight {
        crate::ir::FontWeight::Bold => 1.04,
        crate::ir::FontWeight::Normal => 1.0,
    };
    em_sum * style.size * scale
}

/// Greedy word wrap against the width estimate.
fn wrap_to_width(text: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
    let max_width = max_width.max(style.size);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if estimate_text_width(&candidate, style) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(core::mem::take(&mut current));
        }
        if estimate_text_width(word, style) <= max_width {
            current = word.to_string();
        } else {
            // Word wider than the line: hard-split by glyphs.
            for ch in word.chars() {
                let mut widened = current.clone();
                widened.push(ch);
                if !current.is_empty() && estimate_text_width(&widened, style) > max_width {
                    lines.push(core::mem::take(&mut current));
                    current.push(ch);
                } else {
                    current = widened;
                }
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

const ARTIFACT_MAGIC: &[u8; 4] = b"ESGR";
const ARTIFACT_VERSION: u16 = 1;

/// Default guard against runaway pagination.
pub const DEFAULT_MAX_PAGES: usize = 500;

/// Recording canvas that captures draw commands per page.
#[derive(Clone, Debug)]
pub struct CommandCanvas {
    geometry: PageGeometry,
    pages: Vec<RenderPage>,
    max_pages: usize,
}

impl CommandCanvas {
    /// Create a canvas with one blank page.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![RenderPage::new(1)],
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Override the page-count guard.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Recorded pages, in order.
    pub fn pages(&self) -> &[RenderPage] {
        &self.pages
    }

    fn push(&mut self, cmd: DrawCommand) {
        // new() guarantees at least one page.
        if let Some(page) = self.pages.last_mut() {
            page.push_command(cmd);
        }
    }

    fn draw_table_header(&mut self, header: &[&str], y: f32, col_width: f32, style: &TableStyle) {
        let left = self.geometry.margin_left;
        let width = self.geometry.content_width();
        self.push(DrawCommand::Rect(RectCommand {
            x: left,
            y,
            width,
            height: style.header_height,
            color: style.header_fill,
            corner_radius: 0.0,
        }));
        let baseline = y + style.header_height - style.cell_padding;
        for (col, label) in header.iter().enumerate() {
            self.push(DrawCommand::Text(TextCommand {
                x: left + col as f32 * col_width + style.cell_padding,
                y: baseline,
                text: (*label).to_string(),
                style: style.header_text,
            }));
        }
    }
}

impl Canvas for CommandCanvas {
    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: &TextStyle,
    ) -> Result<(), RenderFailure> {
        self.push(DrawCommand::Text(TextCommand {
            x,
            y,
            text: text.to_string(),
            style: *style,
        }));
        Ok(())
    }

    fn wrap_text(&self, text: &str, max_width: f32, style: &TextStyle) -> Vec<String> {
        wrap_to_width(text, max_width, style)
    }

    fn draw_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
    ) -> Result<(), RenderFailure> {
        self.push(DrawCommand::Rule(RuleCommand { x1, y1, x2, y2, color }));
        Ok(())
    }

    fn draw_filled_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    ) -> Result<(), RenderFailure> {
        self.push(DrawCommand::Rect(RectCommand {
            x,
            y,
            width,
            height,
            color,
            corner_radius: 0.0,
        }));
        Ok(())
    }

    fn draw_rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        corner_radius: f32,
        color: Color,
    ) -> Result<(), RenderFailure> {
        self.push(DrawCommand::Rect(RectCommand {
            x,
            y,
            width,
            height,
            color,
            corner_radius,
        }));
        Ok(())
    }

    fn new_page(&mut self) -> Result<(), RenderFailure> {
        if self.pages.len() >= self.max_pages {
            return Err(RenderFailure::PageLimitExceeded {
                limit: self.max_pages,
            });
        }
        let next = self.pages.len() + 1;
        self.pages.push(RenderPage::new(next));
        log::debug!("canvas: started page {next}");
        Ok(())
    }

    fn render_table(
        &mut self,
        header: &[&str],
        rows: &[Vec<String>],
        start_y: f32,
        style: &TableStyle,
    ) -> Result<f32, RenderFailure> {
        let left = self.geometry.margin_left;
        let right = self.geometry.content_right();
        let col_count = header.len().max(1);
        let col_width = self.geometry.content_width() / col_count as f32;

        let mut y = start_y;
        // The header band plus one row must fit below start_y; otherwise
        // the whole table starts on a fresh page. Callers may pre-reserve
        // space, but the safe-bottom contract is this method's to keep.
        if y + style.header_height + style.row_height > self.geometry.content_bottom() {
            self.new_page()?;
            y = self.geometry.margin_top;
        }
        self.draw_table_header(header, y, col_width, style);
        y += style.header_height;

        for (row_index, row) in rows.iter().enumerate() {
            if y + style.row_height > self.geometry.content_bottom() {
                self.new_page()?;
                y = self.geometry.margin_top;
                // Repeat the header so continued pages stay readable.
                self.draw_table_header(header, y, col_width, style);
                y += style.header_height;
            }
            if row_index % 2 == 1 {
                self.push(DrawCommand::Rect(RectCommand {
                    x: left,
                    y,
                    width: self.geometry.content_width(),
                    height: style.row_height,
                    color: style.stripe_fill,
                    corner_radius: 0.0,
                }));
            }
            let baseline = y + style.row_height - style.cell_padding;
            for (col, cell) in row.iter().enumerate().take(col_count) {
                let align = style.aligns.get(col).copied().unwrap_or_default();
                let x = match align {
                    ColumnAlign::Left => left + col as f32 * col_width + style.cell_padding,
                    ColumnAlign::Right => {
                        let cell_right = left + (col + 1) as f32 * col_width;
                        cell_right
                            - style.cell_padding
                            - estimate_text_width(cell, &style.body_text)
                    }
                };
                self.push(DrawCommand::Text(TextCommand {
                    x,
                    y: baseline,
                    text: cell.clone(),
                    style: style.body_text,
                }));
            }
            y += style.row_height;
            self.push(DrawCommand::Rule(RuleCommand {
                x1: left,
                y1: y,
                x2: right,
                y2: y,
                color: style.rule_color,
            }));
        }
        Ok(y)
    }

    fn page_width(&self) -> f32 {
        self.geometry.width
    }

    fn page_height(&self) -> f32 {
        self.geometry.height
    }

    fn serialize(&self) -> Result<Vec<u8>, RenderFailure> {
        let payload = postcard::to_allocvec(&self.pages)
            .map_err(|err| RenderFailure::Serialize(err.to_string()))?;
        let mut bytes = Vec::with_capacity(payload.len() + 6);
        bytes.extend_from_slice(ARTIFACT_MAGIC);
        bytes.extend_from_slice(&ARTIFACT_VERSION.to_le_bytes());
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }
}

/// Decode an artifact produced by [`CommandCanvas::serialize`] back into
/// its page list.
pub fn decode_pages(bytes: &[u8]) -> Result<Vec<RenderPage>, RenderFailure> {
    if bytes.len() < 6 || &bytes[0..4] != ARTIFACT_MAGIC {
        return Err(RenderFailure::Decode("bad artifact magic".to_string()));
    }
    let version = u16::from_le_bytes([bytes[4], bytes[5]]);
    if version != ARTIFACT_VERSION {
        return Err(RenderFailure::Decode(format!(
            "unsupported artifact version {version}"
        )));
    }
    postcard::from_bytes(&bytes[6..]).map_err(|err| RenderFailure::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::FontWeight;

    fn body_style() -> TextStyle {
        TextStyle::new(4.0, FontWeight::Normal, Color::rgb(33, 33, 33))
    }

    fn table_style() -> TableStyle {
        TableStyle {
            header_fill: Color::rgb(27, 94, 32),
            header_text: TextStyle::new(3.5, FontWeight::Bold, Color::rgb(255, 255, 255)),
            stripe_fill: Color::rgb(245, 245, 245),
            body_text: body_style(),
            rule_color: Color::rgb(220, 220, 220),
            header_height: 9.0,
            row_height: 8.0,
            cell_padding: 2.0,
            aligns: Vec::new(),
        }
    }

    #[test]
    fn wrap_text_is_deterministic_and_respects_width() {
        let canvas = CommandCanvas::new(PageGeometry::default());
        let style = body_style();
        let text = "The quick brown fox jumps over the lazy dog and keeps going for a while";
        let first = canvas.wrap_text(text, 60.0, &style);
        let second = canvas.wrap_text(text, 60.0, &style);
        assert_eq!(first, second);
        assert!(first.len() > 1);
        for line in &first {
            assert!(estimate_text_width(line, &style) <= 60.0);
        }
        assert_eq!(first.join(" "), text);
    }

    #[test]
    fn wrap_text_hard_splits_oversized_words() {
        let canvas = CommandCanvas::new(PageGeometry::default());
        let style = body_style();
        let lines = canvas.wrap_text(&"x".repeat(400), 40.0, &style);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(estimate_text_width(line, &style) <= 40.0);
        }
    }

    #[test]
    fn wrap_text_of_empty_input_yields_no_lines() {
        let canvas = CommandCanvas::new(PageGeometry::default());
        assert!(canvas.wrap_text("", 60.0, &body_style()).is_empty());
        assert!(canvas.wrap_text("   ", 60.0, &body_style()).is_empty());
    }

    #[test]
    fn table_paginates_internally_and_reports_final_offset() {
        let geometry = PageGeometry::default();
        let mut canvas = CommandCanvas::new(geometry);
        let style = table_style();
        let rows: Vec<Vec<String>> = (0..60)
            .map(|i| vec![format!("Metric {i}"), format!("{i}")])
            .collect();
        let final_y = canvas
            .render_table(&["Metric", "Value"], &rows, geometry.margin_top, &style)
            .unwrap();
        assert!(canvas.page_count() > 1);
        assert!(final_y <= geometry.content_bottom());
        assert!(final_y >= geometry.margin_top);
        // Continued pages repeat the header band.
        assert!(canvas.pages()[1].contains_text("Metric"));
        // No text baseline may cross the safe bottom.
        for page in canvas.pages() {
            for cmd in &page.commands {
                if let DrawCommand::Text(text) = cmd {
                    assert!(text.y <= geometry.content_bottom());
                }
            }
        }
    }

    #[test]
    fn table_started_near_bottom_breaks_page_before_drawing_header() {
        let geometry = PageGeometry::default();
        let mut canvas = CommandCanvas::new(geometry);
        let style = table_style();
        let rows = vec![vec!["Overall ESG Score".to_string(), "74/100".to_string()]];
        let start_y = geometry.content_bottom() - 1.0;
        let final_y = canvas
            .render_table(&["Indicator", "Score"], &rows, start_y, &style)
            .unwrap();
        // The header moved to a fresh page instead of painting below the
        // safe bottom; the starting page stays blank.
        assert_eq!(canvas.page_count(), 2);
        assert!(canvas.pages()[0].commands.is_empty());
        assert!(canvas.pages()[1].contains_text("Indicator"));
        for page in canvas.pages() {
            for cmd in &page.commands {
                if let DrawCommand::Text(text) = cmd {
                    assert!(text.y <= geometry.content_bottom());
                }
            }
        }
        assert_eq!(
            final_y,
            geometry.margin_top + style.header_height + style.row_height
        );
    }

    #[test]
    fn page_limit_is_a_typed_failure() {
        let mut canvas = CommandCanvas::new(PageGeometry::default()).with_max_pages(2);
        assert!(canvas.new_page().is_ok());
        assert_eq!(
            canvas.new_page(),
            Err(RenderFailure::PageLimitExceeded { limit: 2 })
        );
    }

    #[test]
    fn artifact_round_trips_through_decode() {
        let mut canvas = CommandCanvas::new(PageGeometry::default());
        canvas
            .draw_text("Acme Corp", 20.0, 30.0, &body_style())
            .unwrap();
        canvas.new_page().unwrap();
        let bytes = canvas.serialize().unwrap();
        let pages = decode_pages(&bytes).unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].contains_text("Acme Corp"));
    }

    #[test]
    fn decode_rejects_foreign_bytes() {
        assert!(decode_pages(b"PK\x03\x04junk").is_err());
        assert!(decode_pages(b"").is_err());
    }
}
