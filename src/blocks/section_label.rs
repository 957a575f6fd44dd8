use crate::backend::HAlign;
use crate::blocks::Block;
use crate::document::Document;
use crate::error::Error;
use crate::theme::{Color, FontSpec, FontStyle};

/// One horizontal line with a left label and optional right text.
///
/// Colon splitting applies to both sides independently: a text value
/// containing ":" renders as a label part in one tone and a value part in a
/// second tone; without a colon the whole string renders in a single tone.
///
///   left  `"Vehicle number: 7981"` → `"Vehicle number:"` (secondary) +
///   `" 7981"` (accent)
///
///   right `"Total Distance: 7,000"` → label tone + value tone from the
///   theme's section-label colors
#[derive(Clone, Debug, Default)]
pub struct SectionLabel {
    pub left_text: String,
    /// Optional; split on ":" for two-tone rendering.
    pub right_text: String,
    /// Unset → theme default, bold.
    pub left_font: FontSpec,
    /// Unset → theme default.
    pub right_font: FontSpec,
    /// Tone for the label part of `right_text`; unset → theme
    /// `section_label_left`.
    pub right_label_color: Color,
    /// Tone for the value part of `right_text`; unset → theme
    /// `section_label_value`.
    pub right_color: Color,
    /// mm below the line; 0 → 2.
    pub gap_below: f64,
}

const LINE_H: f64 = 7.0;

impl Block for SectionLabel {
    fn kind(&self) -> &'static str {
        "SectionLabel"
    }

    fn render(&self, doc: &mut Document) -> Result<(), Error> {
        let left_font = if self.left_font.is_unset() {
            FontSpec::new("", 0.0, FontStyle::Bold)
        } else {
            self.left_font.clone()
        };
        let right_font = if self.right_font.is_unset() {
            doc.theme().default_font.clone()
        } else {
            self.right_font.clone()
        };

        let start_y = doc.y();
        let margin_left = doc.margins().left;

        if !self.left_text.is_empty() {
            if let Some((label, value)) = self.left_text.split_once(':') {
                let label_part = format!("{label}:");

                doc.apply_font(&left_font);
                let label_w = doc.backend_ref().string_width(&label_part) + 1.0;

                let mut accent_font = left_font.clone();
                accent_font.style = FontStyle::Bold;
                doc.apply_font(&accent_font);
                let value_w = doc.backend_ref().string_width(value) + 1.0;

                // Label part → secondary tone.
                doc.apply_font(&left_font);
                doc.apply_text_color(doc.theme().secondary_text);
                doc.set_xy(margin_left, start_y);
                doc.backend().cell(label_w, LINE_H, &label_part, HAlign::Left);

                // Value part → accent tone.
                doc.apply_font(&accent_font);
                doc.apply_text_color(doc.theme().accent);
                doc.set_xy(margin_left + label_w, start_y);
                doc.backend().cell(value_w + 2.0, LINE_H, value, HAlign::Left);
            } else {
                // No colon → plain bold primary text.
                let w = doc.content_width() * 0.5;
                doc.apply_font(&left_font);
                doc.apply_text_color(doc.theme().primary_text);
                doc.set_xy(margin_left, start_y);
                doc.backend().cell(w, LINE_H, &self.left_text, HAlign::Left);
            }
        }

        if !self.right_text.is_empty() {
            let right_edge = margin_left + doc.content_width();

            let label_color = if self.right_label_color.is_unset() {
                doc.theme().section_label_left
            } else {
                self.right_label_color
            };
            let value_color = if self.right_color.is_unset() {
                doc.theme().section_label_value
            } else {
                self.right_color
            };

            if let Some((label, value)) = self.right_text.split_once(':') {
                let label_part = format!("{label}:");

                doc.apply_font(&right_font);
                let label_w = doc.backend_ref().string_width(&label_part) + 1.0;
                let value_w = doc.backend_ref().string_width(value) + 2.0;
                let start_rx = right_edge - label_w - value_w;

                doc.apply_text_color(label_color);
                doc.set_xy(start_rx, start_y);
                doc.backend().cell(label_w, LINE_H, &label_part, HAlign::Left);

                doc.apply_text_color(value_color);
                doc.set_xy(start_rx + label_w, start_y);
                doc.backend().cell(value_w + 1.0, LINE_H, value, HAlign::Left);
            } else {
                // No colon → right-aligned across the full width.
                let w = doc.content_width();
                doc.apply_font(&right_font);
                doc.apply_text_color(label_color);
                doc.set_xy(margin_left, start_y);
                doc.backend().cell(w, LINE_H, &self.right_text, HAlign::Right);
            }
        }

        let gap = if self.gap_below == 0.0 { 2.0 } else { self.gap_below };
        doc.set_y(start_y + LINE_H + gap);
        Ok(())
    }
}
