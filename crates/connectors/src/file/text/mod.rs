pub mod decode;
pub mod delimited;
pub mod fallback;
pub mod fixed_width;
pub mod strategy;
