pub mod config;
pub mod plotting;
pub mod server;
pub mod workflow;
