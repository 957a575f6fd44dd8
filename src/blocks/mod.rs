//! The renderable blocks that make up a document: flow blocks advance the
//! vertical cursor, [`Logo`] floats at an absolute position, and [`Footer`]
//! is drawn once per completed page instead of joining the flow.

mod footer;
mod grouped;
mod header;
mod info_grid;
mod logo;
mod section_label;
mod spacer;
mod table;

pub use footer::Footer;
pub use grouped::GroupedTable;
pub use header::Header;
pub use info_grid::{InfoGrid, InfoItem};
pub use logo::{Logo, LogoPosition};
pub use section_label::SectionLabel;
pub use spacer::Spacer;
pub use table::{BorderStyle, ColumnDef, Overflow, Table};

use crate::document::Document;
use crate::error::Error;

/// Implemented by every renderable element.
///
/// `render` draws the block starting at the document's current cursor and
/// advances the cursor by the vertical space consumed, unless documented
/// otherwise.
pub trait Block {
    /// Short name used to tag render failures.
    fn kind(&self) -> &'static str;

    fn render(&self, doc: &mut Document) -> Result<(), Error>;
}
