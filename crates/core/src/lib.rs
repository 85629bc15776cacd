pub mod accumulate;
pub mod datetime;
pub mod entry;
pub mod entry_service;
pub mod error;
pub mod field_map;
pub mod import;
pub mod mapper;
pub mod print;
pub mod provision;
pub mod spreadsheet;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_support;
