pub mod enrich;
pub mod error;
pub mod transform;
