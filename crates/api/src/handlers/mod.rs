pub mod batch;
pub mod entry;
pub mod index;
pub mod print;
