//! Reference [`RenderBackend`] over `pdf-writer`.
//!
//! Works in millimetres with a top-left origin and converts to PDF points
//! (bottom-left origin) at draw time. Text uses the base-14 Helvetica family
//! as Type1 fonts with WinAnsi encoding; measurement runs against
//! approximate WinAnsi width tables, so no font files are read or embedded.

use std::collections::{HashMap, HashSet};
use std::io::{BufReader, Cursor};

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::backend::{HAlign, ImageKind, Margins, Orientation, PageSize, RectStyle, RenderBackend};
use crate::theme::{Color, FontStyle};

/// mm → PDF points.
const K: f64 = 72.0 / 25.4;

/// Stroke width for outlined rects and lines, in mm.
const LINE_WIDTH_MM: f64 = 0.2;

enum Pixels {
    /// Raw JPEG bytes, embedded as-is with `DCTDecode`.
    Jpeg(Vec<u8>),
    /// Decoded PNG: zlib RGB data plus an optional zlib alpha soft mask.
    Flate { rgb: Vec<u8>, smask: Option<Vec<u8>> },
}

struct PreparedImage {
    res_name: String,
    px_w: u32,
    px_h: u32,
    pixels: Pixels,
}

/// Backend that assembles a real PDF via `pdf-writer`.
pub struct PdfBackend {
    page_w: f64,
    page_h: f64,
    margins: Margins,
    x: f64,
    y: f64,
    font_style: FontStyle,
    font_size: f64,
    draw_color: Color,
    fill_color: Color,
    text_color: Color,
    contents: Vec<Content>,
    images: HashMap<String, PreparedImage>,
    image_order: Vec<String>,
    alias: Option<String>,
    error: Option<String>,
    warned_families: HashSet<String>,
}

impl PdfBackend {
    pub fn new() -> Self {
        PdfBackend {
            page_w: 0.0,
            page_h: 0.0,
            margins: Margins::default(),
            x: 0.0,
            y: 0.0,
            font_style: FontStyle::Regular,
            font_size: 10.0,
            draw_color: Color::default(),
            fill_color: Color::default(),
            text_color: Color::default(),
            contents: Vec::new(),
            images: HashMap::new(),
            image_order: Vec::new(),
            alias: None,
            error: None,
            warned_families: HashSet::new(),
        }
    }

    fn content(&mut self) -> &mut Content {
        self.contents.last_mut().expect("page open")
    }

    fn draw_text(&mut self, x_mm: f64, baseline_mm: f64, text: &str) {
        let bytes = to_winansi_bytes(text);
        if bytes.is_empty() {
            return;
        }
        let px = (x_mm * K) as f32;
        let py = ((self.page_h - baseline_mm) * K) as f32;
        let font = font_resource(self.font_style);
        let size = self.font_size as f32;
        let (r, g, b) = rgb(self.text_color);

        let content = self.content();
        content.set_fill_rgb(r, g, b);
        content.begin_text();
        content.set_font(font, size);
        content.next_line(px, py);
        content.show(Str(&bytes));
        content.end_text();
    }

    fn aligned_x(&self, w: f64, text: &str, align: HAlign) -> f64 {
        match align {
            HAlign::Left => self.x,
            HAlign::Center => self.x + (w - self.string_width(text)) / 2.0,
            HAlign::Right => self.x + w - self.string_width(text),
        }
    }

    /// Baseline that vertically centers the active font in a box of height
    /// `h` starting at `top_mm`.
    fn centered_baseline(&self, top_mm: f64, h: f64) -> f64 {
        top_mm + h / 2.0 + (self.font_size / K) * 0.35
    }

    /// Push full-width slices of an oversized word, returning the remainder.
    fn fit_word(&self, word: &str, max_width: f64, lines: &mut Vec<String>) -> String {
        if self.string_width(word) <= max_width {
            return word.to_string();
        }
        let mut piece = String::new();
        for ch in word.chars() {
            piece.push(ch);
            if self.string_width(&piece) > max_width && piece.chars().count() > 1 {
                piece.pop();
                lines.push(std::mem::take(&mut piece));
                piece.push(ch);
            }
        }
        piece
    }
}

impl Default for PdfBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for PdfBackend {
    fn begin_document(&mut self, size: PageSize, orientation: Orientation, margins: Margins) {
        let (w, h) = size.dimensions();
        let (page_w, page_h) = match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        };
        self.page_w = page_w;
        self.page_h = page_h;
        self.margins = margins;
        self.x = margins.left;
        self.y = margins.top;
    }

    fn disable_auto_page_break(&mut self, _bottom_margin: f64) {
        // This backend never breaks pages on its own.
    }

    fn alias_total_pages(&mut self, alias: &str) {
        self.alias = Some(alias.to_string());
    }

    fn add_page(&mut self) {
        self.contents.push(Content::new());
        self.x = self.margins.left;
        self.y = self.margins.top;
    }

    fn page_number(&self) -> usize {
        self.contents.len()
    }

    fn page_size(&self) -> (f64, f64) {
        (self.page_w, self.page_h)
    }

    fn set_xy(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    fn y(&self) -> f64 {
        self.y
    }

    fn set_font(&mut self, family: &str, style: FontStyle, size: f64) {
        let fam = family.to_ascii_lowercase();
        if !matches!(fam.as_str(), "" | "helvetica" | "arial") && self.warned_families.insert(fam) {
            log::warn!("font family {family:?} is not available — using Helvetica");
        }
        self.font_style = style;
        self.font_size = size;
    }

    fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_text_color(&mut self, color: Color) {
        self.text_color = color;
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: RectStyle) {
        let px = (x * K) as f32;
        let py = ((self.page_h - y - h) * K) as f32;
        let pw = (w * K) as f32;
        let ph = (h * K) as f32;
        match style {
            RectStyle::Fill => {
                let (r, g, b) = rgb(self.fill_color);
                let content = self.content();
                content.set_fill_rgb(r, g, b);
                content.rect(px, py, pw, ph);
                content.fill_nonzero();
            }
            RectStyle::Outline => {
                let (r, g, b) = rgb(self.draw_color);
                let content = self.content();
                content.set_stroke_rgb(r, g, b);
                content.set_line_width((LINE_WIDTH_MM * K) as f32);
                content.rect(px, py, pw, ph);
                content.stroke();
            }
        }
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let page_h = self.page_h;
        let (r, g, b) = rgb(self.draw_color);
        let content = self.content();
        content.set_stroke_rgb(r, g, b);
        content.set_line_width((LINE_WIDTH_MM * K) as f32);
        content.move_to((x1 * K) as f32, ((page_h - y1) * K) as f32);
        content.line_to((x2 * K) as f32, ((page_h - y2) * K) as f32);
        content.stroke();
    }

    fn cell(&mut self, w: f64, h: f64, text: &str, align: HAlign) {
        let tx = self.aligned_x(w, text, align);
        let baseline = self.centered_baseline(self.y, h);
        self.draw_text(tx, baseline, text);
        self.x += w;
    }

    fn multi_cell(&mut self, w: f64, line_h: f64, text: &str, align: HAlign) {
        let lines = self.split_lines(text, w);
        let x = self.x;
        let mut y = self.y;
        for line in &lines {
            let tw = self.string_width(line);
            let tx = match align {
                HAlign::Left => x,
                HAlign::Center => x + (w - tw) / 2.0,
                HAlign::Right => x + w - tw,
            };
            let baseline = self.centered_baseline(y, line_h);
            self.draw_text(tx, baseline, line);
            y += line_h;
        }
        self.y = y;
        self.x = self.margins.left;
    }

    fn string_width(&self, text: &str) -> f64 {
        let units: f64 = to_winansi_bytes(text)
            .iter()
            .filter(|&&b| b >= 32)
            .map(|&b| glyph_width_1000(self.font_style, b))
            .sum();
        units * self.font_size / 1000.0 / K
    }

    fn split_lines(&self, text: &str, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        for para in text.split('\n') {
            let mut current = String::new();
            for word in para.split_whitespace() {
                if current.is_empty() {
                    current = self.fit_word(word, max_width, &mut lines);
                    continue;
                }
                let candidate = format!("{current} {word}");
                if self.string_width(&candidate) <= max_width {
                    current = candidate;
                } else {
                    lines.push(std::mem::take(&mut current));
                    current = self.fit_word(word, max_width, &mut lines);
                }
            }
            lines.push(current);
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }

    fn register_image(&mut self, name: &str, data: &[u8], kind: ImageKind) -> Result<(), String> {
        if self.images.contains_key(name) {
            return Ok(());
        }
        let res_name = format!("Im{}", self.image_order.len() + 1);
        let prepared = match kind {
            ImageKind::Jpeg => {
                let reader = image::ImageReader::with_format(
                    BufReader::new(Cursor::new(data)),
                    image::ImageFormat::Jpeg,
                );
                let (w, h) = reader
                    .into_dimensions()
                    .map_err(|e| format!("image {name}: {e}"))?;
                PreparedImage {
                    res_name,
                    px_w: w,
                    px_h: h,
                    pixels: Pixels::Jpeg(data.to_vec()),
                }
            }
            ImageKind::Png => {
                let reader = image::ImageReader::with_format(
                    BufReader::new(Cursor::new(data)),
                    image::ImageFormat::Png,
                );
                let decoded = reader.decode().map_err(|e| format!("image {name}: {e}"))?;
                let rgba = decoded.to_rgba8();
                let (w, h) = (rgba.width(), rgba.height());
                let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

                let rgb_data: Vec<u8> = rgba
                    .pixels()
                    .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
                    .collect();
                let rgb = miniz_oxide::deflate::compress_to_vec_zlib(&rgb_data, 6);
                let smask = has_alpha.then(|| {
                    let alpha: Vec<u8> = rgba.pixels().map(|p| p.0[3]).collect();
                    miniz_oxide::deflate::compress_to_vec_zlib(&alpha, 6)
                });
                PreparedImage {
                    res_name,
                    px_w: w,
                    px_h: h,
                    pixels: Pixels::Flate { rgb, smask },
                }
            }
        };
        self.image_order.push(name.to_string());
        self.images.insert(name.to_string(), prepared);
        Ok(())
    }

    fn image(&mut self, name: &str, x: f64, y: f64, w: f64, h: f64) -> Result<(), String> {
        let img = self
            .images
            .get(name)
            .ok_or_else(|| format!("image {name} is not registered"))?;
        let h = if h == 0.0 {
            w * img.px_h as f64 / img.px_w as f64
        } else {
            h
        };
        let res = img.res_name.clone();
        let tx = (x * K) as f32;
        let ty = ((self.page_h - y - h) * K) as f32;
        let sw = (w * K) as f32;
        let sh = (h * K) as f32;

        let content = self.content();
        content.save_state();
        content.transform([sw, 0.0, 0.0, sh, tx, ty]);
        content.x_object(Name(res.as_bytes()));
        content.restore_state();
        Ok(())
    }

    fn error(&self) -> Option<String> {
        self.error.clone()
    }

    fn output(&mut self) -> Result<Vec<u8>, String> {
        let total = self.contents.len();
        let mut pdf = Pdf::new();
        let mut next_id = 1;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();

        // One Type1 font object per style; names F1..F4 match the content
        // streams written by draw_text.
        let styles = [
            FontStyle::Regular,
            FontStyle::Bold,
            FontStyle::Italic,
            FontStyle::BoldItalic,
        ];
        let mut font_pairs: Vec<(Name<'static>, Ref)> = Vec::new();
        for style in styles {
            let font_ref = alloc();
            pdf.type1_font(font_ref)
                .base_font(base_font(style))
                .encoding_predefined(Name(b"WinAnsiEncoding"));
            font_pairs.push((font_resource(style), font_ref));
        }

        let mut image_pairs: Vec<(String, Ref)> = Vec::new();
        for name in &self.image_order {
            let img = &self.images[name];
            let xobj_ref = alloc();
            match &img.pixels {
                Pixels::Jpeg(data) => {
                    let mut xobj = pdf.image_xobject(xobj_ref, data);
                    xobj.filter(Filter::DctDecode);
                    xobj.width(img.px_w as i32);
                    xobj.height(img.px_h as i32);
                    xobj.color_space().device_rgb();
                    xobj.bits_per_component(8);
                }
                Pixels::Flate { rgb, smask } => {
                    let smask_ref = smask.as_ref().map(|alpha| {
                        let mask_ref = alloc();
                        let mut mask = pdf.image_xobject(mask_ref, alpha);
                        mask.filter(Filter::FlateDecode);
                        mask.width(img.px_w as i32);
                        mask.height(img.px_h as i32);
                        mask.color_space().device_gray();
                        mask.bits_per_component(8);
                        mask_ref
                    });
                    let mut xobj = pdf.image_xobject(xobj_ref, rgb);
                    xobj.filter(Filter::FlateDecode);
                    xobj.width(img.px_w as i32);
                    xobj.height(img.px_h as i32);
                    xobj.color_space().device_rgb();
                    xobj.bits_per_component(8);
                    if let Some(mask_ref) = smask_ref {
                        xobj.s_mask(mask_ref);
                    }
                }
            }
            image_pairs.push((img.res_name.clone(), xobj_ref));
        }

        let page_ids: Vec<Ref> = (0..total).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..total).map(|_| alloc()).collect();

        // The page-total alias is substituted in the raw streams before
        // compression, once the final page count is known.
        let total_bytes = total.to_string().into_bytes();
        for (i, content) in std::mem::take(&mut self.contents).into_iter().enumerate() {
            let mut raw = content.finish().into_vec();
            if let Some(alias) = &self.alias {
                raw = replace_all(&raw, alias.as_bytes(), &total_bytes);
            }
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(total as i32);

        let media = Rect::new(0.0, 0.0, (self.page_w * K) as f32, (self.page_h * K) as f32);
        for i in 0..total {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(media)
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            {
                let mut fonts = resources.fonts();
                for (name, font_ref) in &font_pairs {
                    fonts.pair(*name, *font_ref);
                }
            }
            if !image_pairs.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &image_pairs {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }

        Ok(pdf.finish())
    }
}

fn rgb(c: Color) -> (f32, f32, f32) {
    (
        c.r as f32 / 255.0,
        c.g as f32 / 255.0,
        c.b as f32 / 255.0,
    )
}

fn font_resource(style: FontStyle) -> Name<'static> {
    match style {
        FontStyle::Regular => Name(b"F1"),
        FontStyle::Bold => Name(b"F2"),
        FontStyle::Italic => Name(b"F3"),
        FontStyle::BoldItalic => Name(b"F4"),
    }
}

fn base_font(style: FontStyle) -> Name<'static> {
    match style {
        FontStyle::Regular => Name(b"Helvetica"),
        FontStyle::Bold => Name(b"Helvetica-Bold"),
        FontStyle::Italic => Name(b"Helvetica-Oblique"),
        FontStyle::BoldItalic => Name(b"Helvetica-BoldOblique"),
    }
}

/// Approximate Helvetica advance widths at 1000 units/em for WinAnsi bytes.
fn glyph_width_1000(style: FontStyle, b: u8) -> f64 {
    let bold = matches!(style, FontStyle::Bold | FontStyle::BoldItalic);
    if bold {
        match b {
            32 => 278.0,                          // space
            33..=47 => 389.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 389.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 889.0,                          // M (wide)
            65..=90 => 722.0,                     // uppercase A-Z (average)
            91..=96 => 389.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 333.0, // narrow lowercase: f i j l t
            109 | 119 => 889.0,                   // m w (wide)
            97..=122 => 611.0,                    // lowercase a-z (average)
            _ => 556.0,
        }
    } else {
        match b {
            32 => 278.0,                          // space
            33..=47 => 333.0,                     // punctuation
            48..=57 => 556.0,                     // digits
            58..=64 => 333.0,                     // more punctuation
            73 | 74 => 278.0,                     // I J (narrow uppercase)
            77 => 833.0,                          // M (wide)
            65..=90 => 667.0,                     // uppercase A-Z (average)
            91..=96 => 333.0,                     // brackets etc.
            102 | 105 | 106 | 108 | 116 => 278.0, // narrow lowercase: f i j l t
            109 | 119 => 833.0,                   // m w (wide)
            97..=122 => 556.0,                    // lowercase a-z (average)
            _ => 556.0,
        }
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF `Str`
/// encoding and width lookup. Unmappable characters are dropped.
fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .filter_map(|c| match c as u32 {
            0x0000..=0x007F => Some(c as u8),
            0x00A0..=0x00FF => Some(c as u8), // Latin-1 supplement maps directly
            0x20AC => Some(0x80),
            0x201A => Some(0x82),
            0x0192 => Some(0x83),
            0x201E => Some(0x84),
            0x2026 => Some(0x85), // ellipsis
            0x2020 => Some(0x86),
            0x2021 => Some(0x87),
            0x02C6 => Some(0x88),
            0x2030 => Some(0x89),
            0x0160 => Some(0x8A),
            0x2039 => Some(0x8B),
            0x0152 => Some(0x8C),
            0x017D => Some(0x8E),
            0x2018 => Some(0x91),
            0x2019 => Some(0x92),
            0x201C => Some(0x93),
            0x201D => Some(0x94),
            0x2022 => Some(0x95), // bullet
            0x2013 => Some(0x96),
            0x2014 => Some(0x97),
            0x02DC => Some(0x98),
            0x2122 => Some(0x99),
            0x0161 => Some(0x9A),
            0x203A => Some(0x9B),
            0x0153 => Some(0x9C),
            0x017E => Some(0x9E),
            0x0178 => Some(0x9F),
            _ => None,
        })
        .collect()
}

fn replace_all(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    if needle.is_empty() {
        return haystack.to_vec();
    }
    let mut out = Vec::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}
