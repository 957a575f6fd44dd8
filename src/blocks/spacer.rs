use crate::blocks::Block;
use crate::document::Document;
use crate::error::Error;

/// Advances the cursor by a fixed amount of vertical whitespace.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spacer {
    /// mm
    pub height: f64,
}

impl Block for Spacer {
    fn kind(&self) -> &'static str {
        "Spacer"
    }

    fn render(&self, doc: &mut Document) -> Result<(), Error> {
        doc.set_y(doc.y() + self.height);
        Ok(())
    }
}
