pub mod crosswalk;
pub mod error;
pub mod inference;
pub mod manifest;
pub mod markup;
pub mod report;
pub mod templates;

mod table;
