#![allow(dead_code)]

pub mod batch;
pub mod integration;
pub mod utils;
