//! Reading the FooDB table dumps
//!
//! Food and Compound are loaded into keyed tables. Content is never kept
//! as a table: it is scanned once and reduced to measurement groups.

pub mod content;
pub mod loader;

pub use content::{collect_contents, is_blank, scan_contents, ContentGroups, ContentScan};
pub use loader::{collect_table, load_table, row_id, RowReader, Table};
