//! # Spreadsheet Data Model
//!
//! In-memory representation of a loaded worksheet: cell values, column types
//! inferred once per column, the table itself, and A1-reference helpers shared
//! by the loader and the report writer.
pub mod cell;
pub mod column;
pub mod reference;
pub mod table;

pub use cell::Value;
pub use column::Column;
pub use column::ColumnKind;
pub use table::Table;
