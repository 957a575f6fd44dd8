//! Programmatic layout engine for paginated PDF reports.
//!
//! Callers build an ordered list of [`Block`]s — headers, tables, labeled
//! sections, spacers, floating logos — and hand them to a [`Document`]. Each
//! block renders at the document's vertical cursor and may trigger a page
//! break; tables reprint their header row on every page they span. The first
//! failing block latches its error and everything after it is skipped, so
//! [`Document::save`] either writes a complete document or nothing.
//!
//! Drawing and text measurement go through the [`RenderBackend`] trait. The
//! bundled [`PdfBackend`] emits real PDFs; tests inject recording doubles.
//!
//! ```no_run
//! # fn main() -> Result<(), flowpdf::Error> {
//! use flowpdf::{ColumnDef, Document, DocumentConfig, Footer, Header, Table};
//!
//! let mut doc = Document::new(DocumentConfig::default());
//! doc.set_footer(Footer {
//!     right_text: "Page {page} of {total}".into(),
//!     ..Footer::default()
//! });
//! doc.add(&Header {
//!     title: "IFTA REPORT".into(),
//!     ..Header::default()
//! });
//! doc.add(&Table {
//!     columns: vec![
//!         ColumnDef { header: "No".into(), width: 15.0, ..ColumnDef::default() },
//!         ColumnDef { header: "State".into(), ..ColumnDef::default() },
//!     ],
//!     rows: vec![vec!["1".into(), "California".into()]],
//!     show_header: true,
//!     ..Table::default()
//! });
//! doc.save("report.pdf")?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod blocks;
mod document;
mod error;
mod pdf;
mod theme;

pub use backend::{HAlign, ImageKind, Margins, Orientation, PageSize, RectStyle, RenderBackend};
pub use blocks::{
    Block, BorderStyle, ColumnDef, Footer, GroupedTable, Header, InfoGrid, InfoItem, Logo,
    LogoPosition, Overflow, SectionLabel, Spacer, Table,
};
pub use document::{Document, DocumentConfig};
pub use error::Error;
pub use pdf::PdfBackend;
pub use theme::{Color, FontSpec, FontStyle, Theme};
