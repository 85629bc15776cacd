//! Database row structs.
//!
//! Rows are converted into core types at the repository boundary; nothing
//! above the db crate sees them.

pub mod entry;
