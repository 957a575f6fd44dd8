use crate::blocks::{Block, SectionLabel, Spacer, Table};
use crate::document::Document;
use crate::error::Error;

/// Convenience composite: a [`SectionLabel`], then a [`Table`], then a
/// trailing [`Spacer`]. No layout logic of its own.
#[derive(Clone, Debug, Default)]
pub struct GroupedTable {
    /// Left text of the section label.
    pub label: String,
    /// Right text of the section label (supports ":" two-tone splitting).
    pub badge_text: String,
    pub table: Table,
    /// mm of whitespace after the table; 0 → 8.
    pub spacer_after: f64,
}

impl Block for GroupedTable {
    fn kind(&self) -> &'static str {
        "GroupedTable"
    }

    fn render(&self, doc: &mut Document) -> Result<(), Error> {
        let label = SectionLabel {
            left_text: self.label.clone(),
            right_text: self.badge_text.clone(),
            ..SectionLabel::default()
        };
        label.render(doc)?;

        self.table.render(doc)?;

        let gap = if self.spacer_after == 0.0 {
            8.0
        } else {
            self.spacer_after
        };
        Spacer { height: gap }.render(doc)
    }
}
