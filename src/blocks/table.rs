use crate::backend::{HAlign, RectStyle};
use crate::blocks::Block;
use crate::document::Document;
use crate::error::Error;
use crate::theme::{Color, FontSpec, FontStyle};

/// How cell text is handled when it exceeds the column width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Overflow {
    /// Wrap across multiple lines, making the row taller.
    #[default]
    Wrap,
    /// Clip the text and append "…".
    Truncate,
}

/// A single table column.
#[derive(Clone, Debug, Default)]
pub struct ColumnDef {
    pub header: String,
    /// mm; 0 = column shares the remaining width equally.
    pub width: f64,
    pub align: HAlign,
    pub overflow: Overflow,
    /// Defaults to `align` when unset.
    pub header_align: Option<HAlign>,
    /// Render cell content bold.
    pub bold: bool,
}

/// Which borders a table draws. Row backgrounds are always painted before
/// text and borders, so borders are never obscured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderStyle {
    /// Full grid: an outlined rect around every cell.
    #[default]
    All,
    /// An outlined rect around each row only.
    Outer,
    /// Outer rect per row + vertical column separators + one horizontal rule
    /// under the header row only.
    Columns,
    /// Fills only.
    None,
}

/// A structured data table with optional header row, striping, borders, and
/// per-column overflow control.
///
/// Rows shorter than the column list are padded with empty cells; excess
/// cells are ignored. When the cumulative row heights exceed the remaining
/// page space the table breaks and, if `show_header` is set, the header row
/// is re-rendered at the top of every page it spans. A single row is never
/// split across pages.
#[derive(Clone, Debug, Default)]
pub struct Table {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<String>>,
    /// Render the column header row.
    pub show_header: bool,
    /// Alternate row background tones.
    pub row_striping: bool,
    /// Horizontal cell padding in mm; 0 → 2.8.
    pub cell_padding_h: f64,
    /// Vertical cell padding in mm; 0 → 2.1.
    pub cell_padding_v: f64,
    pub border_style: BorderStyle,
    /// Unset → theme default, regular weight.
    pub header_font: FontSpec,
    /// Unset → theme default.
    pub row_font: FontSpec,
    /// mm; 0 → 9.
    pub min_row_height: f64,
}

/// Geometry and fonts resolved once per render pass.
struct Layout {
    widths: Vec<f64>,
    padding_h: f64,
    padding_v: f64,
    min_row_h: f64,
    line_h: f64,
    header_font: FontSpec,
    row_font: FontSpec,
}

impl Block for Table {
    fn kind(&self) -> &'static str {
        "Table"
    }

    fn render(&self, doc: &mut Document) -> Result<(), Error> {
        if self.columns.is_empty() {
            return Ok(());
        }

        let padding_h = if self.cell_padding_h == 0.0 {
            2.8
        } else {
            self.cell_padding_h
        };
        let padding_v = if self.cell_padding_v == 0.0 {
            2.1
        } else {
            self.cell_padding_v
        };
        let min_row_h = if self.min_row_height == 0.0 {
            9.0
        } else {
            self.min_row_height
        };
        let line_h = (min_row_h - 2.0 * padding_v).max(3.0);

        let header_font = if self.header_font.is_unset() {
            FontSpec::new("", 0.0, FontStyle::Regular)
        } else {
            self.header_font.clone()
        };
        let row_font = if self.row_font.is_unset() {
            doc.theme().default_font.clone()
        } else {
            self.row_font.clone()
        };

        let layout = Layout {
            widths: self.resolve_column_widths(doc.content_width()),
            padding_h,
            padding_v,
            min_row_h,
            line_h,
            header_font,
            row_font,
        };

        // "columns" borders draw per-row outer rects and separators plus a
        // rule under the header, so that style renders through its own path.
        if self.border_style == BorderStyle::Columns {
            return self.render_columns_style(doc, &layout);
        }

        if self.show_header {
            self.render_header_row(doc, &layout);
        }

        for (i, row) in self.rows.iter().enumerate() {
            let bg = self.row_bg(doc, i);
            let row_h = self.row_height(doc, row, &layout).max(layout.min_row_h);

            if doc.ensure_space(row_h) {
                log::debug!("table page break before row {i} (row_h={row_h:.2})");
                if self.show_header {
                    self.render_header_row(doc, &layout);
                }
            }

            self.render_data_row(doc, row, bg, row_h, &layout);
        }

        Ok(())
    }
}

impl Table {
    /// Distributes the usable width among columns: fixed widths are
    /// allocated first, the remainder is split equally among zero-width
    /// columns. Over-committed fixed widths yield negative shares on
    /// purpose — the caller is responsible for widths that fit the page.
    fn resolve_column_widths(&self, usable_width: f64) -> Vec<f64> {
        let mut widths = vec![0.0; self.columns.len()];
        let mut remaining = usable_width;
        let mut auto_count = 0usize;

        for (i, col) in self.columns.iter().enumerate() {
            if col.width > 0.0 {
                widths[i] = col.width;
                remaining -= col.width;
            } else {
                auto_count += 1;
            }
        }

        if auto_count > 0 {
            let auto_w = remaining / auto_count as f64;
            for (i, col) in self.columns.iter().enumerate() {
                if col.width == 0.0 {
                    widths[i] = auto_w;
                }
            }
        }

        widths
    }

    fn row_bg(&self, doc: &Document, index: usize) -> Color {
        if self.row_striping && index % 2 == 0 {
            doc.theme().table_row_even_bg
        } else {
            doc.theme().table_row_odd_bg
        }
    }

    /// Required row height in mm, accounting for wrapped cells. Returns 0
    /// when no cell needs more than a single line; truncate columns never
    /// contribute.
    fn row_height(&self, doc: &mut Document, row: &[String], layout: &Layout) -> f64 {
        let mut max_content_h = 0.0f64;
        doc.apply_font(&layout.row_font);

        for (i, col) in self.columns.iter().enumerate() {
            if i >= row.len() {
                break;
            }
            if col.overflow != Overflow::Wrap {
                continue;
            }
            let cell_w = layout.widths[i] - 2.0 * layout.padding_h;
            if cell_w <= 0.0 {
                continue;
            }
            let lines = doc.backend_ref().split_lines(&row[i], cell_w);
            max_content_h = max_content_h.max(lines.len() as f64 * layout.line_h);
        }

        if max_content_h == 0.0 {
            0.0
        } else {
            max_content_h + 2.0 * layout.padding_v
        }
    }

    fn render_header_row(&self, doc: &mut Document, layout: &Layout) {
        let start_y = doc.y();
        let start_x = doc.margins().left;
        let total_w = doc.content_width();
        let row_h = layout.min_row_h;

        doc.apply_color(doc.theme().table_header_bg);
        doc.backend().rect(start_x, start_y, total_w, row_h, RectStyle::Fill);

        doc.apply_font(&layout.header_font);
        doc.apply_text_color(doc.theme().header_text);

        let mut x = start_x;
        for (i, col) in self.columns.iter().enumerate() {
            let align = col.header_align.unwrap_or(col.align);
            doc.set_xy(x + layout.padding_h, start_y + layout.padding_v);
            doc.backend().cell(
                layout.widths[i] - 2.0 * layout.padding_h,
                row_h - 2.0 * layout.padding_v,
                &col.header,
                align,
            );
            x += layout.widths[i];
        }

        self.draw_borders(doc, start_x, start_y, row_h, &layout.widths);
        doc.set_y(start_y + row_h);
    }

    fn render_data_row(
        &self,
        doc: &mut Document,
        row: &[String],
        bg: Color,
        row_h: f64,
        layout: &Layout,
    ) {
        let start_y = doc.y();
        let start_x = doc.margins().left;
        let total_w = doc.content_width();

        doc.apply_color(bg);
        doc.backend().rect(start_x, start_y, total_w, row_h, RectStyle::Fill);

        let mut x = start_x;
        for (i, col) in self.columns.iter().enumerate() {
            let text = row.get(i).map(String::as_str).unwrap_or("");

            let mut cell_font = layout.row_font.clone();
            if col.bold {
                cell_font.style = FontStyle::Bold;
            }
            doc.apply_font(&cell_font);
            doc.apply_text_color(doc.theme().primary_text);

            let cell_w = layout.widths[i] - 2.0 * layout.padding_h;
            match col.overflow {
                Overflow::Wrap => {
                    doc.set_xy(x + layout.padding_h, start_y + layout.padding_v);
                    doc.backend().multi_cell(cell_w, layout.line_h, text, col.align);
                }
                Overflow::Truncate => {
                    let text = truncate_text(doc, text, cell_w);
                    doc.set_xy(x + layout.padding_h, start_y + layout.padding_v);
                    doc.backend().cell(
                        cell_w,
                        row_h - 2.0 * layout.padding_v,
                        &text,
                        col.align,
                    );
                }
            }
            x += layout.widths[i];
        }

        self.draw_borders(doc, start_x, start_y, row_h, &layout.widths);
        doc.set_y(start_y + row_h);
    }

    fn draw_borders(
        &self,
        doc: &mut Document,
        start_x: f64,
        start_y: f64,
        row_h: f64,
        widths: &[f64],
    ) {
        doc.apply_color(doc.theme().table_border);

        match self.border_style {
            BorderStyle::All => {
                let mut x = start_x;
                for &w in widths {
                    doc.backend().rect(x, start_y, w, row_h, RectStyle::Outline);
                    x += w;
                }
            }
            BorderStyle::Outer => {
                let total_w = doc.content_width();
                doc.backend()
                    .rect(start_x, start_y, total_w, row_h, RectStyle::Outline);
            }
            BorderStyle::Columns | BorderStyle::None => {}
        }
    }

    /// "columns" border mode: per-row outer rect and column separators, one
    /// horizontal rule below the header, and no rules between data rows.
    fn render_columns_style(&self, doc: &mut Document, layout: &Layout) -> Result<(), Error> {
        let header_bg = doc.theme().table_header_bg;

        if self.show_header {
            self.render_columns_row(doc, None, header_bg, layout.min_row_h, layout);
            self.draw_header_rule(doc);
        }

        for (i, row) in self.rows.iter().enumerate() {
            let bg = self.row_bg(doc, i);
            let row_h = self.row_height(doc, row, layout).max(layout.min_row_h);

            if doc.ensure_space(row_h) {
                log::debug!("table page break before row {i} (row_h={row_h:.2})");
                if self.show_header {
                    self.render_columns_row(doc, None, header_bg, layout.min_row_h, layout);
                    self.draw_header_rule(doc);
                }
            }

            self.render_columns_row(doc, Some(row), bg, row_h, layout);
        }

        Ok(())
    }

    fn draw_header_rule(&self, doc: &mut Document) {
        let start_x = doc.margins().left;
        let right = start_x + doc.content_width();
        let y = doc.y();
        doc.apply_color(doc.theme().table_border);
        doc.backend().line(start_x, y, right, y);
    }

    /// One row in the "columns" style: fill, text, then outer rect plus
    /// vertical separators at each internal column boundary. `None` renders
    /// the header row.
    fn render_columns_row(
        &self,
        doc: &mut Document,
        row: Option<&[String]>,
        bg: Color,
        row_h: f64,
        layout: &Layout,
    ) {
        let start_y = doc.y();
        let start_x = doc.margins().left;
        let total_w = doc.content_width();

        doc.apply_color(bg);
        doc.backend().rect(start_x, start_y, total_w, row_h, RectStyle::Fill);

        match row {
            None => {
                doc.apply_font(&layout.header_font);
                doc.apply_text_color(doc.theme().header_text);
                let mut x = start_x;
                for (i, col) in self.columns.iter().enumerate() {
                    let align = col.header_align.unwrap_or(col.align);
                    doc.set_xy(x + layout.padding_h, start_y + layout.padding_v);
                    doc.backend().cell(
                        layout.widths[i] - 2.0 * layout.padding_h,
                        row_h - 2.0 * layout.padding_v,
                        &col.header,
                        align,
                    );
                    x += layout.widths[i];
                }
            }
            Some(row) => {
                let mut x = start_x;
                for (i, col) in self.columns.iter().enumerate() {
                    let text = row.get(i).map(String::as_str).unwrap_or("");

                    let mut cell_font = layout.row_font.clone();
                    if col.bold {
                        cell_font.style = FontStyle::Bold;
                    }
                    doc.apply_font(&cell_font);
                    doc.apply_text_color(doc.theme().primary_text);

                    let cell_w = layout.widths[i] - 2.0 * layout.padding_h;
                    match col.overflow {
                        Overflow::Wrap => {
                            doc.set_xy(x + layout.padding_h, start_y + layout.padding_v);
                            doc.backend().multi_cell(cell_w, layout.line_h, text, col.align);
                        }
                        Overflow::Truncate => {
                            let text = truncate_text(doc, text, cell_w);
                            doc.set_xy(x + layout.padding_h, start_y + layout.padding_v);
                            doc.backend().cell(
                                cell_w,
                                row_h - 2.0 * layout.padding_v,
                                &text,
                                col.align,
                            );
                        }
                    }
                    x += layout.widths[i];
                }
            }
        }

        doc.apply_color(doc.theme().table_border);
        doc.backend()
            .rect(start_x, start_y, total_w, row_h, RectStyle::Outline);
        let mut x = start_x;
        for &w in &layout.widths[..layout.widths.len() - 1] {
            x += w;
            doc.backend().line(x, start_y, x, start_y + row_h);
        }

        doc.set_y(start_y + row_h);
    }
}

/// Clips `text` and appends "…" so it fits within `max_w` mm under the
/// currently active font. Falls back to the ellipsis alone.
fn truncate_text(doc: &Document, text: &str, max_w: f64) -> String {
    if doc.backend_ref().string_width(text) <= max_w {
        return text.to_string();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let mut candidate: String = chars.iter().collect();
        candidate.push('…');
        if doc.backend_ref().string_width(&candidate) <= max_w {
            return candidate;
        }
    }
    "…".to_string()
}
