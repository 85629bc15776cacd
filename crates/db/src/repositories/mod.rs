//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. [`PgEntryStore`] adapts
//! [`EntryRepo`] to the core `EntryStore` trait.

pub mod entry_repo;

pub use entry_repo::{EntryRepo, PgEntryStore};
