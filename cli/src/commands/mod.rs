pub mod companies;
pub mod computers;
pub mod configuration;
