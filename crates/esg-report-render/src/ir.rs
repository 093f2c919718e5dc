//! Backend-agnostic draw-command IR.
//!
//! A rendered report is a sequence of pages, each a flat list of
//! [`DrawCommand`]s in paint order. The IR carries no backend detail; any
//! concrete renderer (PDF writer, raster preview, test inspector) replays
//! the commands against its own primitives.

use serde::{Deserialize, Serialize};

/// RGB color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Font weight for text commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Resolved text style carried on each text command.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Glyph height in page units.
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(size: f32, weight: FontWeight, color: Color) -> Self {
        Self {
            size,
            weight,
            color,
        }
    }
}

/// Horizontal alignment of one table column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnAlign {
    #[default]
    Left,
    Right,
}

/// Visual configuration for one rendered table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableStyle {
    /// Header band fill.
    pub header_fill: Color,
    /// Header cell text style.
    pub header_text: TextStyle,
    /// Fill applied to every second body row.
    pub stripe_fill: Color,
    /// Body cell text style.
    pub body_text: TextStyle,
    /// Grid rule color.
    pub rule_color: Color,
    /// Header band height.
    pub header_height: f32,
    /// Body row height.
    pub row_height: f32,
    /// Horizontal inset applied inside each cell.
    pub cell_padding: f32,
    /// Per-column alignment overrides; columns past the end are Left.
    pub aligns: Vec<ColumnAlign>,
}

/// Text draw command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextCommand {
    /// Left x.
    pub x: f32,
    /// Baseline y.
    pub y: f32,
    /// Content.
    pub text: String,
    /// Resolved style.
    pub style: TextStyle,
}

/// Straight line command.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleCommand {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub color: Color,
}

/// Rectangle command.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectCommand {
    /// Left x.
    pub x: f32,
    /// Top y.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    /// Corner radius; zero draws square corners.
    pub corner_radius: f32,
}

/// Layout output commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw text.
    Text(TextCommand),
    /// Draw a line rule.
    Rule(RuleCommand),
    /// Draw a filled rectangle.
    Rect(RectCommand),
}

/// Page represented as backend-agnostic draw commands.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderPage {
    /// 1-based page number.
    pub page_number: usize,
    /// Draw commands in paint order.
    pub commands: Vec<DrawCommand>,
}

impl RenderPage {
    /// Create an empty page.
    pub fn new(page_number: usize) -> Self {
        Self {
            page_number,
            commands: Vec::new(),
        }
    }

    pub fn push_command(&mut self, cmd: DrawCommand) {
        self.commands.push(cmd);
    }

    /// Iterate the text payloads on this page, in paint order.
    pub fn text_runs(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text(text) => Some(text.text.as_str()),
            _ => None,
        })
    }

    /// True when any text run contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.text_runs().any(|run| run.contains(needle))
    }
}
