//! Document-wide visual configuration: colors, fonts, and the theme that
//! every block resolves its defaults against.

/// RGB color with components in `0..=255`.
///
/// The all-zero value doubles as "unset": fallback resolution replaces it
/// with the matching theme color, so an explicit pure black is not
/// representable in block configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub(crate) fn is_unset(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

/// Font weight/slant selector for the base font family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

/// A font family, point size, and style.
///
/// An empty family or zero size inherits the corresponding part of the
/// theme's default font when the font is applied.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Point size; 0 inherits the theme default.
    pub size: f64,
    pub style: FontStyle,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f64, style: FontStyle) -> Self {
        FontSpec {
            family: family.into(),
            size,
            style,
        }
    }

    pub(crate) fn is_unset(&self) -> bool {
        self.family.is_empty()
    }
}

/// Named style roles shared by every block of one document.
///
/// Immutable after construction; the document keeps one copy and blocks read
/// it by reference during render.
#[derive(Clone, Debug)]
pub struct Theme {
    pub primary_text: Color,
    pub secondary_text: Color,
    pub accent: Color,
    pub table_header_bg: Color,
    pub table_row_even_bg: Color,
    pub table_row_odd_bg: Color,
    pub table_border: Color,
    pub header_text: Color,
    /// Tone for the label part before ":" in a section label's right text.
    pub section_label_left: Color,
    /// Tone for the value part after ":" in a section label's right text.
    pub section_label_value: Color,
    pub default_font: FontSpec,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            primary_text: Color::new(24, 29, 39),       // #181D27
            secondary_text: Color::new(83, 88, 98),     // #535862
            accent: Color::new(148, 163, 184),          // #94A3B8
            table_header_bg: Color::new(255, 255, 255), // no fill
            table_row_even_bg: Color::new(241, 245, 249), // #F1F5F9
            table_row_odd_bg: Color::new(255, 255, 255),
            table_border: Color::new(226, 232, 240), // #E2E8F0
            header_text: Color::new(83, 88, 98),     // same as secondary_text
            section_label_left: Color::new(51, 65, 85), // #334155
            section_label_value: Color::new(148, 163, 184), // #94A3B8
            default_font: FontSpec::new("Helvetica", 10.0, FontStyle::Regular),
        }
    }
}
