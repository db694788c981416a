pub mod config;
pub mod present;
