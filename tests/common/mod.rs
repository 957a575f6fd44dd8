//! Shared test scaffolding: a backend double that records every draw call so
//! tests can assert on layout geometry instead of rasterized output.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use flowpdf::{
    Color, FontStyle, HAlign, ImageKind, Margins, Orientation, PageSize, RectStyle, RenderBackend,
};

/// Deterministic width model: every character measures 2 mm regardless of
/// font, so wrapping and truncation points are exactly predictable.
pub const CHAR_W: f64 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    AddPage,
    SetFont {
        family: String,
        style: FontStyle,
        size: f64,
    },
    Rect {
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        style: RectStyle,
        color: Color,
    },
    Line {
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Cell {
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        text: String,
        align: HAlign,
        color: Color,
    },
    MultiCell {
        page: usize,
        x: f64,
        y: f64,
        w: f64,
        line_h: f64,
        lines: Vec<String>,
        align: HAlign,
    },
    RegisterImage {
        name: String,
        kind: ImageKind,
        bytes: usize,
    },
    Image {
        page: usize,
        name: String,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
    },
}

#[derive(Default)]
struct State {
    page_w: f64,
    page_h: f64,
    margins: Margins,
    x: f64,
    y: f64,
    pages: usize,
    font_family: String,
    font_style: FontStyle,
    font_size: f64,
    draw_color: Color,
    fill_color: Color,
    text_color: Color,
    alias: Option<String>,
    calls: Vec<Call>,
    fail_images: bool,
    sticky_error: Option<String>,
}

/// Backend double handed to the document.
pub struct RecordingBackend {
    state: Rc<RefCell<State>>,
}

/// Handle the test keeps; shares state with the backend moved into the
/// document.
#[derive(Clone)]
pub struct Recorder {
    state: Rc<RefCell<State>>,
}

/// Builds a backend/recorder pair sharing one call log.
pub fn recording_backend() -> (Box<RecordingBackend>, Recorder) {
    let _ = env_logger::builder().is_test(true).try_init();
    let state = Rc::new(RefCell::new(State::default()));
    (
        Box::new(RecordingBackend {
            state: state.clone(),
        }),
        Recorder { state },
    )
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn y(&self) -> f64 {
        self.state.borrow().y
    }

    pub fn pages(&self) -> usize {
        self.state.borrow().pages
    }

    pub fn page_size(&self) -> (f64, f64) {
        let s = self.state.borrow();
        (s.page_w, s.page_h)
    }

    /// Make every image registration fail, simulating undecodable data.
    pub fn fail_images(&self) {
        self.state.borrow_mut().fail_images = true;
    }

    /// Inject a sticky internal fault, like a backend that hit an encoding
    /// error mid-document.
    pub fn set_error(&self, msg: &str) {
        self.state.borrow_mut().sticky_error = Some(msg.to_string());
    }

    pub fn cell_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Cell { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn cell_texts_on_page(&self, page: usize) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Cell { page: p, text, .. } if p == page => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn fill_rects(&self) -> Vec<(usize, f64, f64, f64, f64, Color)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Rect {
                    page,
                    x,
                    y,
                    w,
                    h,
                    style: RectStyle::Fill,
                    color,
                } => Some((page, x, y, w, h, color)),
                _ => None,
            })
            .collect()
    }

    pub fn outline_rects(&self) -> Vec<(usize, f64, f64, f64, f64)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Rect {
                    page,
                    x,
                    y,
                    w,
                    h,
                    style: RectStyle::Outline,
                    ..
                } => Some((page, x, y, w, h)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(usize, f64, f64, f64, f64)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Line { page, x1, y1, x2, y2 } => Some((page, x1, y1, x2, y2)),
                _ => None,
            })
            .collect()
    }

    pub fn multi_cells(&self) -> Vec<(usize, f64, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::MultiCell { page, w, lines, .. } => Some((page, w, lines)),
                _ => None,
            })
            .collect()
    }
}

fn measure(text: &str) -> f64 {
    text.chars().count() as f64 * CHAR_W
}

fn wrap(text: &str, max_width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for para in text.split('\n') {
        let mut current = String::new();
        for word in para.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= max_width || current.is_empty() {
                current = candidate;
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

impl RenderBackend for RecordingBackend {
    fn begin_document(&mut self, size: PageSize, orientation: Orientation, margins: Margins) {
        let (w, h) = size.dimensions();
        let (page_w, page_h) = match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        };
        let mut s = self.state.borrow_mut();
        s.page_w = page_w;
        s.page_h = page_h;
        s.margins = margins;
        s.x = margins.left;
        s.y = margins.top;
    }

    fn disable_auto_page_break(&mut self, _bottom_margin: f64) {}

    fn alias_total_pages(&mut self, alias: &str) {
        self.state.borrow_mut().alias = Some(alias.to_string());
    }

    fn add_page(&mut self) {
        let mut s = self.state.borrow_mut();
        s.pages += 1;
        s.x = s.margins.left;
        s.y = s.margins.top;
        s.calls.push(Call::AddPage);
    }

    fn page_number(&self) -> usize {
        self.state.borrow().pages
    }

    fn page_size(&self) -> (f64, f64) {
        let s = self.state.borrow();
        (s.page_w, s.page_h)
    }

    fn set_xy(&mut self, x: f64, y: f64) {
        let mut s = self.state.borrow_mut();
        s.x = x;
        s.y = y;
    }

    fn set_x(&mut self, x: f64) {
        self.state.borrow_mut().x = x;
    }

    fn set_y(&mut self, y: f64) {
        self.state.borrow_mut().y = y;
    }

    fn y(&self) -> f64 {
        self.state.borrow().y
    }

    fn set_font(&mut self, family: &str, style: FontStyle, size: f64) {
        let mut s = self.state.borrow_mut();
        s.font_family = family.to_string();
        s.font_style = style;
        s.font_size = size;
        s.calls.push(Call::SetFont {
            family: family.to_string(),
            style,
            size,
        });
    }

    fn set_draw_color(&mut self, color: Color) {
        self.state.borrow_mut().draw_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.state.borrow_mut().fill_color = color;
    }

    fn set_text_color(&mut self, color: Color) {
        self.state.borrow_mut().text_color = color;
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: RectStyle) {
        let mut s = self.state.borrow_mut();
        let page = s.pages;
        let color = match style {
            RectStyle::Fill => s.fill_color,
            RectStyle::Outline => s.draw_color,
        };
        s.calls.push(Call::Rect {
            page,
            x,
            y,
            w,
            h,
            style,
            color,
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let mut s = self.state.borrow_mut();
        let page = s.pages;
        s.calls.push(Call::Line { page, x1, y1, x2, y2 });
    }

    fn cell(&mut self, w: f64, h: f64, text: &str, align: HAlign) {
        let mut s = self.state.borrow_mut();
        let (page, x, y, color) = (s.pages, s.x, s.y, s.text_color);
        s.calls.push(Call::Cell {
            page,
            x,
            y,
            w,
            h,
            text: text.to_string(),
            align,
            color,
        });
        s.x += w;
    }

    fn multi_cell(&mut self, w: f64, line_h: f64, text: &str, align: HAlign) {
        let lines = wrap(text, w);
        let mut s = self.state.borrow_mut();
        let (page, x, y) = (s.pages, s.x, s.y);
        s.y += lines.len() as f64 * line_h;
        s.x = s.margins.left;
        s.calls.push(Call::MultiCell {
            page,
            x,
            y,
            w,
            line_h,
            lines,
            align,
        });
    }

    fn string_width(&self, text: &str) -> f64 {
        measure(text)
    }

    fn split_lines(&self, text: &str, max_width: f64) -> Vec<String> {
        wrap(text, max_width)
    }

    fn register_image(&mut self, name: &str, data: &[u8], kind: ImageKind) -> Result<(), String> {
        let mut s = self.state.borrow_mut();
        if s.fail_images {
            return Err(format!("image {name}: unrenderable image data"));
        }
        s.calls.push(Call::RegisterImage {
            name: name.to_string(),
            kind,
            bytes: data.len(),
        });
        Ok(())
    }

    fn image(&mut self, name: &str, x: f64, y: f64, w: f64, h: f64) -> Result<(), String> {
        let mut s = self.state.borrow_mut();
        let page = s.pages;
        s.calls.push(Call::Image {
            page,
            name: name.to_string(),
            x,
            y,
            w,
            h,
        });
        Ok(())
    }

    fn error(&self) -> Option<String> {
        self.state.borrow().sticky_error.clone()
    }

    fn output(&mut self) -> Result<Vec<u8>, String> {
        let s = self.state.borrow();
        Ok(format!("recorded document, {} pages", s.pages).into_bytes())
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}
