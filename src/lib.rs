pub mod api;
pub mod collector;
pub mod config;
pub mod error;
pub mod output;
