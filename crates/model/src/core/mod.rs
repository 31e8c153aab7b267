pub mod labels;
pub mod value;
