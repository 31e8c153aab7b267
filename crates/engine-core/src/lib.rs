//! Output writers for mapped pricebook rows.

pub mod error;
pub mod sink;
