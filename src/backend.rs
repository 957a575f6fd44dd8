//! Capability contract for the drawing backend.
//!
//! The layout engine owns every pagination decision; the backend only has to
//! paint primitives, measure strings, and serialize the finished pages. The
//! trait is object safe so a document can be driven by the bundled
//! [`PdfBackend`](crate::PdfBackend) or by a recording double in tests.

use crate::theme::{Color, FontStyle};

/// Named page formats understood by every backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    /// Portrait dimensions in millimetres.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Horizontal alignment of text within a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Whether a rectangle is painted solid or stroked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectStyle {
    Fill,
    Outline,
}

/// Encodings accepted for registered images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

/// Page margins in millimetres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Primitive drawing, measurement, and page-management operations.
///
/// All coordinates are millimetres with the origin at the top-left corner of
/// the page. Backends keep a cursor, an active font, and three active colors
/// (draw, fill, text); state sticks until replaced.
pub trait RenderBackend {
    /// Initialize the page canvas. Called exactly once, before any page
    /// exists.
    fn begin_document(&mut self, size: PageSize, orientation: Orientation, margins: Margins);

    /// Turn off any built-in pagination; the caller decides page breaks.
    fn disable_auto_page_break(&mut self, bottom_margin: f64);

    /// Register the placeholder replaced with the final page count when the
    /// document is serialized.
    fn alias_total_pages(&mut self, alias: &str);

    /// Start a new page and reset the cursor to the top-left content corner.
    fn add_page(&mut self);

    /// 1-based number of the current page.
    fn page_number(&self) -> usize;

    /// Current page dimensions in millimetres, orientation applied.
    fn page_size(&self) -> (f64, f64);

    fn set_xy(&mut self, x: f64, y: f64);
    fn set_x(&mut self, x: f64);
    fn set_y(&mut self, y: f64);
    fn y(&self) -> f64;

    /// Set the active font; the size is in points.
    fn set_font(&mut self, family: &str, style: FontStyle, size: f64);
    /// Color used for outlined rectangles and lines.
    fn set_draw_color(&mut self, color: Color);
    /// Color used for filled rectangles.
    fn set_fill_color(&mut self, color: Color);
    /// Color used for text.
    fn set_text_color(&mut self, color: Color);

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: RectStyle);
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    /// Paint one line of text inside a `w`×`h` box at the cursor, honoring
    /// the alignment, then advance the cursor right by `w`.
    fn cell(&mut self, w: f64, h: f64, text: &str, align: HAlign);

    /// Paint wrapped text of width `w` starting at the cursor; each line is
    /// `line_h` tall. Advances the cursor below the painted block.
    fn multi_cell(&mut self, w: f64, line_h: f64, text: &str, align: HAlign);

    /// Rendered width of `text` under the active font, in millimetres.
    fn string_width(&self, text: &str) -> f64;

    /// Split `text` into the minimum list of lines that fit `max_width`
    /// under the active font.
    fn split_lines(&self, text: &str, max_width: f64) -> Vec<String>;

    /// Register an image under a caller-chosen name. Registering the same
    /// name twice is a no-op.
    fn register_image(&mut self, name: &str, data: &[u8], kind: ImageKind) -> Result<(), String>;

    /// Paint a registered image at an absolute position. A zero height keeps
    /// the image's aspect ratio.
    fn image(&mut self, name: &str, x: f64, y: f64, w: f64, h: f64) -> Result<(), String>;

    /// First internal fault recorded by the backend, if any. Checked before
    /// output is attempted.
    fn error(&self) -> Option<String>;

    /// Serialize the finished multi-page document.
    fn output(&mut self) -> Result<Vec<u8>, String>;
}
