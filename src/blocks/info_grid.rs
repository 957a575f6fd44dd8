use crate::backend::{HAlign, RectStyle};
use crate::blocks::Block;
use crate::document::Document;
use crate::error::Error;
use crate::theme::{Color, FontSpec, FontStyle};

/// A single label+value pair in an [`InfoGrid`].
#[derive(Clone, Debug, Default)]
pub struct InfoItem {
    pub label: String,
    pub value: String,
}

impl InfoItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        InfoItem {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Grid of label+value cells, a fixed number of columns per row.
///
/// Typical use: summary boxes like "Total Vehicles: 3 | Total Distance:
/// 7,000 mi". Every cell is the same fixed height; the label renders above
/// the value.
#[derive(Clone, Debug, Default)]
pub struct InfoGrid {
    pub items: Vec<InfoItem>,
    /// Items per row; 0 → 2.
    pub columns: usize,
    /// Draw a border around each cell.
    pub show_border: bool,
    /// mm; 0 → full usable width.
    pub width: f64,
    /// Optional per-column widths in mm; used only when the count matches
    /// `columns`, otherwise columns share the width equally.
    pub column_widths: Vec<f64>,
    /// Unset → 10 pt regular.
    pub label_font: FontSpec,
    /// Unset → 10 pt bold.
    pub value_font: FontSpec,
}

// Cell geometry: 2.12 mm vertical padding around two 4.94 mm text lines.
const PADDING_H: f64 = 2.82;
const PADDING_V: f64 = 2.12;
const LINE_H: f64 = 4.94;

impl Block for InfoGrid {
    fn kind(&self) -> &'static str {
        "InfoGrid"
    }

    fn render(&self, doc: &mut Document) -> Result<(), Error> {
        if self.items.is_empty() {
            return Ok(());
        }

        let cols = if self.columns == 0 { 2 } else { self.columns };
        let total_width = if self.width == 0.0 {
            doc.content_width()
        } else {
            self.width
        };

        let col_widths: Vec<f64> = if self.column_widths.len() == cols {
            self.column_widths.clone()
        } else {
            vec![total_width / cols as f64; cols]
        };

        let label_font = if self.label_font.is_unset() {
            FontSpec::new("", 10.0, FontStyle::Regular)
        } else {
            self.label_font.clone()
        };
        let value_font = if self.value_font.is_unset() {
            FontSpec::new("", 10.0, FontStyle::Bold)
        } else {
            self.value_font.clone()
        };

        let cell_h = PADDING_V + LINE_H + LINE_H + PADDING_V;
        let num_rows = self.items.len().div_ceil(cols);
        let total_h = num_rows as f64 * cell_h;

        doc.ensure_space(total_h);
        let start_x = doc.margins().left;
        let start_y = doc.y();

        for (i, item) in self.items.iter().enumerate() {
            let col = i % cols;
            let row = i / cols;

            let x = start_x + col_widths[..col].iter().sum::<f64>();
            let y = start_y + row as f64 * cell_h;
            let w = col_widths[col];

            doc.apply_color(Color::new(255, 255, 255));
            doc.backend().rect(x, y, w, cell_h, RectStyle::Fill);

            if self.show_border {
                doc.apply_color(doc.theme().table_border);
                doc.backend().rect(x, y, w, cell_h, RectStyle::Outline);
            }

            doc.apply_font(&label_font);
            doc.apply_text_color(doc.theme().secondary_text);
            doc.set_xy(x + PADDING_H, y + PADDING_V);
            doc.backend()
                .cell(w - 2.0 * PADDING_H, LINE_H, &item.label, HAlign::Left);

            doc.apply_font(&value_font);
            doc.apply_text_color(doc.theme().primary_text);
            doc.set_xy(x + PADDING_H, y + PADDING_V + LINE_H);
            doc.backend()
                .cell(w - 2.0 * PADDING_H, LINE_H, &item.value, HAlign::Left);
        }

        doc.set_y(start_y + total_h);
        Ok(())
    }
}
