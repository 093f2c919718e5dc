//! Cursor state and the flow writer.
//!
//! The cursor is an explicit value owned by the writer, never a module
//! global, so concurrent generations (one writer per canvas each) cannot
//! cross-contaminate. Every atomic write reserves its space *before*
//! drawing; nothing is ever painted partially below the safe bottom
//! margin.

use crate::canvas::{Canvas, PageGeometry};
use crate::error::RenderFailure;
use crate::ir::{Color, ColumnAlign, FontWeight, TableStyle, TextStyle};

/// Space reserved before a heading is drawn.
const HEADING_RESERVE: f32 = 30.0;
/// Cursor advance after a heading.
const HEADING_ADVANCE: f32 = 20.0;
const SUBHEADING_RESERVE: f32 = 20.0;
const SUBHEADING_ADVANCE: f32 = 15.0;
/// Up-front reservation before a paragraph starts.
const PARAGRAPH_RESERVE: f32 = 20.0;
/// Per-line reservation inside a paragraph.
const LINE_RESERVE: f32 = 8.0;
/// Per-line cursor advance.
const LINE_ADVANCE: f32 = 6.0;
/// Trailing gap after a paragraph.
const PARAGRAPH_GAP: f32 = 10.0;
/// Gap adopted after a rendered table.
const TABLE_GAP: f32 = 20.0;

/// Visual styling shared by all sections.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub accent: Color,
    pub ink: Color,
    pub muted: Color,
    pub pill_fill: Color,
    pub stripe: Color,
    pub rule: Color,
    pub heading: TextStyle,
    pub subheading: TextStyle,
    pub body: TextStyle,
    pub caption: TextStyle,
    pub banner_title: TextStyle,
    pub table_header_text: TextStyle,
}

impl Default for Theme {
    fn default() -> Self {
        let accent = Color::rgb(46, 125, 50);
        let ink = Color::rgb(33, 33, 33);
        let muted = Color::rgb(117, 117, 117);
        Self {
            accent,
            ink,
            muted,
            pill_fill: Color::rgb(232, 245, 233),
            stripe: Color::rgb(245, 245, 245),
            rule: Color::rgb(224, 224, 224),
            heading: TextStyle::new(7.0, FontWeight::Bold, accent),
            subheading: TextStyle::new(5.0, FontWeight::Bold, ink),
            body: TextStyle::new(4.0, FontWeight::Normal, ink),
            caption: TextStyle::new(3.5, FontWeight::Normal, muted),
            banner_title: TextStyle::new(11.0, FontWeight::Bold, Color::rgb(255, 255, 255)),
            table_header_text: TextStyle::new(3.5, FontWeight::Bold, Color::rgb(255, 255, 255)),
        }
    }
}

impl Theme {
    /// Build a table style with the given per-column alignments.
    pub fn table_style(&self, aligns: Vec<ColumnAlign>) -> TableStyle {
        TableStyle {
            header_fill: self.accent,
            header_text: self.table_header_text,
            stripe_fill: self.stripe,
            body_text: self.body,
            rule_color: self.rule,
            header_height: 9.0,
            row_height: 8.0,
            cell_padding: 2.0,
            aligns,
        }
    }
}

/// Current vertical write position and the page's safe printable bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorState {
    /// Current vertical offset on the current page.
    pub y: f32,
    pub top_margin: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    pub page_width: f32,
    pub page_height: f32,
    pub bottom_safe_margin: f32,
}

impl CursorState {
    pub fn new(geometry: &PageGeometry) -> Self {
        Self {
            y: geometry.margin_top,
            top_margin: geometry.margin_top,
            left_margin: geometry.margin_left,
            right_margin: geometry.margin_right,
            page_width: geometry.width,
            page_height: geometry.height,
            bottom_safe_margin: geometry.margin_bottom,
        }
    }

    pub fn printable_width(&self) -> f32 {
        (self.page_width - self.left_margin - self.right_margin).max(1.0)
    }

    /// Lowest y the cursor may reach.
    pub fn printable_bottom(&self) -> f32 {
        self.page_height - self.bottom_safe_margin
    }
}

/// Appends prose and tables to a canvas, advancing the cursor and
/// paginating when near the bottom margin.
pub struct FlowWriter<'a, C: Canvas> {
    canvas: &'a mut C,
    cursor: CursorState,
    theme: &'a Theme,
}

impl<'a, C: Canvas> FlowWriter<'a, C> {
    pub fn new(canvas: &'a mut C, geometry: &PageGeometry, theme: &'a Theme) -> Self {
        Self {
            canvas,
            cursor: CursorState::new(geometry),
            theme,
        }
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut CursorState {
        &mut self.cursor
    }

    pub fn theme(&self) -> &Theme {
        self.theme
    }

    /// Raw canvas access for sections that draw primitives directly
    /// (cover banner, badge pill).
    pub fn canvas_mut(&mut self) -> &mut C {
        self.canvas
    }

    /// Page-break if the next `required` units would cross the printable
    /// bottom.
    ///
    /// Called before every atomic write, never after, so no write can land
    /// partially off-page.
    pub fn ensure_space(&mut self, required: f32) -> Result<(), RenderFailure> {
        if self.cursor.y + required > self.cursor.printable_bottom() {
            self.page_break()?;
        }
        Ok(())
    }

    /// Start a fresh page and reset the cursor to the top margin.
    pub fn page_break(&mut self) -> Result<(), RenderFailure> {
        self.canvas.new_page()?;
        self.cursor.y = self.cursor.top_margin;
        Ok(())
    }

    /// Section heading with an underline rule across the printable width.
    pub fn write_heading(&mut self, text: &str) -> Result<(), RenderFailure> {
        self.ensure_space(HEADING_RESERVE)?;
        let left = self.cursor.left_margin;
        let baseline = self.cursor.y;
        self.canvas
            .draw_text(text, left, baseline, &self.theme.heading)?;
        let right = self.cursor.page_width - self.cursor.right_margin;
        self.canvas
            .draw_line(left, baseline + 2.0, right, baseline + 2.0, self.theme.accent)?;
        self.cursor.y += HEADING_ADVANCE;
        Ok(())
    }

    pub fn write_subheading(&mut self, text: &str) -> Result<(), RenderFailure> {
        self.ensure_space(SUBHEADING_RESERVE)?;
        let left = self.cursor.left_margin;
        self.canvas
            .draw_text(text, left, self.cursor.y, &self.theme.subheading)?;
        self.cursor.y += SUBHEADING_ADVANCE;
        Ok(())
    }

    /// Wrapped prose paragraph.
    ///
    /// Each line is checked independently for overflow; a long paragraph
    /// may legitimately straddle a page break.
    pub fn write_paragraph(&mut self, text: &str) -> Result<(), RenderFailure> {
        self.ensure_space(PARAGRAPH_RESERVE)?;
        let width = self.cursor.printable_width();
        let lines = self.canvas.wrap_text(text, width, &self.theme.body);
        let left = self.cursor.left_margin;
        for line in lines {
            self.ensure_space(LINE_RESERVE)?;
            self.canvas
                .draw_text(&line, left, self.cursor.y, &self.theme.body)?;
            self.cursor.y += LINE_ADVANCE;
        }
        self.cursor.y += PARAGRAPH_GAP;
        Ok(())
    }

    /// Small muted line, advanced like a paragraph line.
    pub fn write_caption(&mut self, text: &str) -> Result<(), RenderFailure> {
        self.ensure_space(LINE_RESERVE)?;
        let left = self.cursor.left_margin;
        self.canvas
            .draw_text(text, left, self.cursor.y, &self.theme.caption)?;
        self.cursor.y += LINE_ADVANCE;
        Ok(())
    }

    /// Render a table at the cursor and resume below it.
    ///
    /// All pixel-level table layout belongs to the canvas; this method's
    /// only contract is correct cursor bookkeeping before and after.
    pub fn table(
        &mut self,
        header: &[&str],
        rows: &[Vec<String>],
        aligns: Vec<ColumnAlign>,
    ) -> Result<(), RenderFailure> {
        let style = self.theme.table_style(aligns);
        // Reserve the header band plus one row so a table never starts
        // flush against the bottom margin.
        self.ensure_space(style.header_height + style.row_height)?;
        let final_y = self
            .canvas
            .render_table(header, rows, self.cursor.y, &style)?;
        self.cursor.y = final_y + TABLE_GAP;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CommandCanvas;
    use crate::ir::DrawCommand;

    fn setup() -> (CommandCanvas, PageGeometry, Theme) {
        let geometry = PageGeometry::default();
        (CommandCanvas::new(geometry), geometry, Theme::default())
    }

    #[test]
    fn heading_advances_cursor_by_fixed_amount() {
        let (mut canvas, geometry, theme) = setup();
        let mut writer = FlowWriter::new(&mut canvas, &geometry, &theme);
        let before = writer.cursor().y;
        writer.write_heading("Executive Summary").unwrap();
        assert_eq!(writer.cursor().y, before + 20.0);
        // Heading emits its underline rule.
        assert!(canvas.pages()[0]
            .commands
            .iter()
            .any(|cmd| matches!(cmd, DrawCommand::Rule(_))));
    }

    #[test]
    fn ensure_space_breaks_page_and_resets_to_top_margin() {
        let (mut canvas, geometry, theme) = setup();
        let mut writer = FlowWriter::new(&mut canvas, &geometry, &theme);
        writer.cursor_mut().y = geometry.content_bottom() - 5.0;
        writer.ensure_space(10.0).unwrap();
        assert_eq!(writer.cursor().y, geometry.margin_top);
        assert_eq!(canvas.page_count(), 2);
    }

    #[test]
    fn long_paragraph_straddles_page_break_within_bounds() {
        let (mut canvas, geometry, theme) = setup();
        let mut writer = FlowWriter::new(&mut canvas, &geometry, &theme);
        writer.cursor_mut().y = geometry.content_bottom() - 40.0;
        let text = "sustainability ".repeat(220);
        writer.write_paragraph(&text).unwrap();
        assert!(canvas.page_count() >= 2);
        for page in canvas.pages() {
            for cmd in &page.commands {
                if let DrawCommand::Text(text) = cmd {
                    assert!(text.y <= geometry.content_bottom());
                }
            }
        }
    }

    #[test]
    fn table_resumes_cursor_below_reported_extent() {
        let (mut canvas, geometry, theme) = setup();
        let mut writer = FlowWriter::new(&mut canvas, &geometry, &theme);
        let rows = vec![
            vec!["Overall ESG Score".to_string(), "74/100".to_string()],
            vec!["Environmental Score".to_string(), "78/100".to_string()],
        ];
        writer
            .table(&["Indicator", "Score"], &rows, Vec::new())
            .unwrap();
        let style = theme.table_style(Vec::new());
        let expected =
            geometry.margin_top + style.header_height + 2.0 * style.row_height + 20.0;
        assert_eq!(writer.cursor().y, expected);
    }
}
