pub mod common;
pub mod fixtures;
