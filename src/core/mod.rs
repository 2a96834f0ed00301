pub mod bounds;
pub mod browser;
pub mod config;
pub mod constants;
pub mod geo;
pub mod viewport;
