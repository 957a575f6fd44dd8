use std::path::Path;

use crate::backend::{Margins, Orientation, PageSize, RenderBackend};
use crate::blocks::{Block, Footer};
use crate::error::Error;
use crate::pdf::PdfBackend;
use crate::theme::{Color, FontSpec, Theme};

/// Placeholder resolved with the final page count when output is produced.
pub(crate) const TOTAL_PAGES_ALIAS: &str = "{total}";

/// Controls page layout and theme for a new document.
///
/// Zero margins resolve to the built-in defaults (11.3 mm top/left/right,
/// 15 mm bottom); a theme whose default font family is empty resolves to
/// [`Theme::default`].
#[derive(Clone, Debug, Default)]
pub struct DocumentConfig {
    pub page_size: PageSize,
    pub orientation: Orientation,
    /// mm; 0 → 11.3
    pub margin_top: f64,
    /// mm; 0 → 15
    pub margin_bottom: f64,
    /// mm; 0 → 11.3
    pub margin_left: f64,
    /// mm; 0 → 11.3
    pub margin_right: f64,
    pub theme: Theme,
}

/// The root object: owns the backend, the vertical cursor, the registered
/// footer, and the first-error latch. Blocks render against it in order.
pub struct Document {
    backend: Box<dyn RenderBackend>,
    theme: Theme,
    margins: Margins,
    footer: Option<Footer>,
    content_width: f64,
    err: Option<Error>,
    image_count: u32,
}

impl Document {
    /// Creates a document backed by the bundled [`PdfBackend`].
    pub fn new(config: DocumentConfig) -> Self {
        Self::with_backend(Box::new(PdfBackend::new()), config)
    }

    /// Creates a document over an injected backend. Page breaking is always
    /// decided here, never by the backend.
    pub fn with_backend(mut backend: Box<dyn RenderBackend>, config: DocumentConfig) -> Self {
        let or = |value: f64, fallback: f64| if value == 0.0 { fallback } else { value };
        let margins = Margins {
            top: or(config.margin_top, 11.3),
            bottom: or(config.margin_bottom, 15.0),
            left: or(config.margin_left, 11.3),
            right: or(config.margin_right, 11.3),
        };
        let theme = if config.theme.default_font.is_unset() {
            Theme::default()
        } else {
            config.theme
        };

        backend.begin_document(config.page_size, config.orientation, margins);
        backend.disable_auto_page_break(margins.bottom);
        backend.alias_total_pages(TOTAL_PAGES_ALIAS);
        backend.add_page();

        let (page_w, _) = backend.page_size();
        Document {
            backend,
            theme,
            margins,
            footer: None,
            content_width: page_w - margins.left - margins.right,
            err: None,
            image_count: 0,
        }
    }

    /// Renders one block at the current cursor.
    ///
    /// After the first failing block the error is latched and every later
    /// block is skipped entirely; the latch surfaces from [`Document::save`]
    /// or [`Document::into_bytes`].
    pub fn add(&mut self, block: &dyn Block) -> &mut Self {
        if self.err.is_some() {
            return self;
        }
        if let Err(err) = block.render(self) {
            self.err = Some(Error::Render {
                block: block.kind(),
                source: Box::new(err),
            });
        }
        self
    }

    /// Renders a list of blocks in order, with the same first-error latch as
    /// [`Document::add`].
    pub fn add_blocks(&mut self, blocks: &[&dyn Block]) -> &mut Self {
        for block in blocks {
            self.add(*block);
        }
        self
    }

    /// Registers the footer drawn once on every completed page. Register it
    /// before adding content so the first page is covered.
    pub fn set_footer(&mut self, footer: Footer) -> &mut Self {
        self.footer = Some(footer);
        self
    }

    /// Writes the finished document to `path`. If any block failed, or the
    /// backend latched an internal fault, that error is returned and no file
    /// is created.
    pub fn save(mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let bytes = self.finish()?;
        std::fs::write(path.as_ref(), &bytes)?;
        Ok(())
    }

    /// Serializes the finished document to memory, with the same error
    /// checks as [`Document::save`].
    pub fn into_bytes(mut self) -> Result<Vec<u8>, Error> {
        self.finish()
    }

    fn finish(&mut self) -> Result<Vec<u8>, Error> {
        if let Some(err) = self.err.take() {
            return Err(err);
        }
        if let Some(msg) = self.backend.error() {
            return Err(Error::Backend(msg));
        }
        // The last page never sees a page break, so its footer is drawn here.
        self.draw_footer();
        let pages = self.backend.page_number();
        let bytes = self.backend.output().map_err(Error::Backend)?;
        log::info!("document finished: {pages} pages, {} bytes", bytes.len());
        Ok(bytes)
    }

    // ── geometry and state helpers used by blocks ───────────────────────────

    /// Usable width between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    pub(crate) fn margins(&self) -> Margins {
        self.margins
    }

    pub(crate) fn theme(&self) -> &Theme {
        &self.theme
    }

    pub(crate) fn backend(&mut self) -> &mut dyn RenderBackend {
        &mut *self.backend
    }

    pub(crate) fn backend_ref(&self) -> &dyn RenderBackend {
        &*self.backend
    }

    pub(crate) fn y(&self) -> f64 {
        self.backend.y()
    }

    pub(crate) fn set_y(&mut self, y: f64) {
        self.backend.set_y(y);
    }

    pub(crate) fn set_xy(&mut self, x: f64, y: f64) {
        self.backend.set_xy(x, y);
    }

    /// Starts a new page when fewer than `required` millimetres remain above
    /// the bottom margin. Returns whether a break happened, so the table
    /// engine can reprint its header row.
    pub(crate) fn ensure_space(&mut self, required: f64) -> bool {
        let (_, page_h) = self.backend.page_size();
        let remaining = page_h - self.margins.bottom - self.backend.y();
        if remaining < required {
            self.break_page();
            return true;
        }
        false
    }

    fn break_page(&mut self) {
        self.draw_footer();
        self.backend.add_page();
    }

    fn draw_footer(&mut self) {
        // Taken out and put back so the footer can render against `self`.
        if let Some(footer) = self.footer.take() {
            footer.draw(self);
            self.footer = Some(footer);
        }
    }

    /// Unique name for an image registered from an in-memory buffer.
    pub(crate) fn next_image_name(&mut self) -> String {
        self.image_count += 1;
        format!("img{}", self.image_count)
    }

    /// Sets the active font, inheriting family and size from the theme
    /// default wherever the given font carries zero values.
    pub(crate) fn apply_font(&mut self, font: &FontSpec) {
        let family: &str = if font.family.is_empty() {
            &self.theme.default_font.family
        } else {
            &font.family
        };
        let size = if font.size == 0.0 {
            self.theme.default_font.size
        } else {
            font.size
        };
        self.backend.set_font(family, font.style, size);
    }

    /// Sets both the draw color (lines, outlined rects) and the fill color.
    pub(crate) fn apply_color(&mut self, color: Color) {
        self.backend.set_draw_color(color);
        self.backend.set_fill_color(color);
    }

    pub(crate) fn apply_text_color(&mut self, color: Color) {
        self.backend.set_text_color(color);
    }
}
