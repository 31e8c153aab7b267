pub mod profile;
pub mod tier;
