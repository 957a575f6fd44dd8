use crate::backend::HAlign;
use crate::blocks::Block;
use crate::document::Document;
use crate::error::Error;
use crate::theme::{Color, FontSpec};

/// One-line footer drawn automatically on every page.
///
/// Register it via [`Document::set_footer`] — do not pass it to
/// [`Document::add`]. Placeholders in the text fields: `{page}` is replaced
/// with the current page number, `{total}` is resolved by the backend when
/// the document is serialized.
///
/// [`Document::set_footer`]: crate::Document::set_footer
/// [`Document::add`]: crate::Document::add
#[derive(Clone, Debug, Default)]
pub struct Footer {
    /// Left-aligned text.
    pub left_text: String,
    /// Center-aligned text.
    pub center_text: String,
    /// Right-aligned text.
    pub right_text: String,
    /// Draw a thin separator line above the footer.
    pub show_border: bool,
    /// Unset → theme default at 8 pt.
    pub font: FontSpec,
    /// Unset → theme secondary text.
    pub text_color: Color,
}

impl Footer {
    /// Called by the document whenever a page completes.
    pub(crate) fn draw(&self, doc: &mut Document) {
        let (_, page_h) = doc.backend_ref().page_size();
        let margins = doc.margins();
        doc.set_y(page_h - margins.bottom);

        let font = if self.font.is_unset() {
            FontSpec::new("", 8.0, doc.theme().default_font.style)
        } else {
            self.font.clone()
        };
        doc.apply_font(&font);

        let color = if self.text_color.is_unset() {
            doc.theme().secondary_text
        } else {
            self.text_color
        };
        doc.apply_text_color(color);

        if self.show_border {
            let y = doc.y();
            let right = margins.left + doc.content_width();
            doc.apply_color(doc.theme().table_border);
            doc.backend().line(margins.left, y, right, y);
            doc.set_y(y + 1.0);
            doc.apply_text_color(color);
        }

        let page = doc.backend_ref().page_number().to_string();
        let left = self.left_text.replace("{page}", &page);
        let center = self.center_text.replace("{page}", &page);
        let right = self.right_text.replace("{page}", &page);

        let third = doc.content_width() / 3.0;
        let h = 5.0;

        doc.set_xy(margins.left, doc.y());
        doc.backend().cell(third, h, &left, HAlign::Left);
        doc.backend().cell(third, h, &center, HAlign::Center);
        doc.backend().cell(third, h, &right, HAlign::Right);
    }
}

impl Block for Footer {
    fn kind(&self) -> &'static str {
        "Footer"
    }

    /// Footers are normally drawn through the per-page hook, but rendering
    /// one standalone is allowed.
    fn render(&self, doc: &mut Document) -> Result<(), Error> {
        self.draw(doc);
        Ok(())
    }
}
