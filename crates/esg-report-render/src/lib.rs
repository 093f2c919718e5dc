//! Report composition and pagination engine for ESG reports.
//!
//! Lays out heterogeneous content (headings, wrapped prose, tables, a
//! cover page) onto a sequence of fixed-size pages: a flow writer tracks
//! the write cursor and auto-inserts page breaks, a table renderer
//! delegates cell layout to the canvas and keeps the cursor honest, and a
//! section composer runs the fixed report structure. The engine only ever
//! talks to the [`Canvas`] abstraction; the bundled [`CommandCanvas`]
//! records a backend-agnostic draw-command stream and serializes it into
//! an opaque artifact.

pub mod canvas;
pub mod delivery;
pub mod engine;
pub mod error;
pub mod ir;
mod sections;
pub mod writer;

pub use canvas::{decode_pages, estimate_text_width, Canvas, CommandCanvas, PageGeometry};
pub use delivery::{deliver_artifact, normalize_filename, DeliveryOutcome, ARTIFACT_EXTENSION};
pub use engine::{ReportArtifact, ReportEngine, ReportEngineOptions};
pub use error::RenderFailure;
pub use ir::{
    Color, ColumnAlign, DrawCommand, FontWeight, RectCommand, RenderPage, RuleCommand,
    TableStyle, TextCommand, TextStyle,
};
pub use writer::{CursorState, FlowWriter, Theme};
