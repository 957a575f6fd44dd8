use crate::backend::HAlign;
use crate::blocks::Block;
use crate::document::Document;
use crate::error::Error;
use crate::theme::{Color, FontSpec, FontStyle};

/// Document title block rendered at the top-left of the page.
///
/// Uses 65 % of the usable width so a floating top-right [`Logo`] has room
/// next to it.
///
/// [`Logo`]: crate::Logo
#[derive(Clone, Debug, Default)]
pub struct Header {
    /// Large bold text, e.g. a report name.
    pub title: String,
    /// Medium bold line under the title.
    pub subtitle: String,
    /// Additional detail lines (address, date range, ...).
    pub lines: Vec<String>,
    /// Unset → 16 pt bold.
    pub title_font: FontSpec,
    /// Unset → 10 pt bold.
    pub subtitle_font: FontSpec,
    /// Unset → 8 pt regular.
    pub line_font: FontSpec,
    /// Unset → theme accent.
    pub subtitle_color: Color,
}

impl Block for Header {
    fn kind(&self) -> &'static str {
        "Header"
    }

    fn render(&self, doc: &mut Document) -> Result<(), Error> {
        let title_font = if self.title_font.is_unset() {
            FontSpec::new("", 16.0, FontStyle::Bold)
        } else {
            self.title_font.clone()
        };
        let subtitle_font = if self.subtitle_font.is_unset() {
            FontSpec::new("", 10.0, FontStyle::Bold)
        } else {
            self.subtitle_font.clone()
        };
        let line_font = if self.line_font.is_unset() {
            FontSpec::new("", 8.0, FontStyle::Regular)
        } else {
            self.line_font.clone()
        };

        let content_w = doc.content_width() * 0.65;
        let title_line_h = 8.5;
        let body_line_h = 4.9;

        let x = doc.margins().left;
        let mut y = doc.y();

        if !self.title.is_empty() {
            doc.apply_font(&title_font);
            doc.apply_text_color(doc.theme().primary_text);
            doc.set_xy(x, y);
            doc.backend().cell(content_w, title_line_h, &self.title, HAlign::Left);
            y += title_line_h;
        }

        if !self.subtitle.is_empty() {
            let color = if self.subtitle_color.is_unset() {
                doc.theme().accent
            } else {
                self.subtitle_color
            };
            doc.apply_font(&subtitle_font);
            doc.apply_text_color(color);
            doc.set_xy(x, y);
            doc.backend().cell(content_w, body_line_h, &self.subtitle, HAlign::Left);
            y += body_line_h;
        }

        if !self.lines.is_empty() {
            doc.apply_font(&line_font);
            doc.apply_text_color(doc.theme().secondary_text);
            for line in &self.lines {
                doc.set_xy(x, y);
                doc.backend().cell(content_w, body_line_h - 0.5, line, HAlign::Left);
                y += body_line_h - 0.5;
            }
        }

        // Small gap below the block.
        doc.set_y(y + 3.0);
        Ok(())
    }
}
