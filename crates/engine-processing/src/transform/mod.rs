pub mod cost;
pub mod manufacturer;
pub mod mapper;
pub mod resolve;
