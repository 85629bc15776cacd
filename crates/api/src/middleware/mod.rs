//! Request guards implemented as extractors.
//!
//! - [`xhr::XhrRequest`] -- Requires an `X-Requested-With: XMLHttpRequest` header.

pub mod xhr;
