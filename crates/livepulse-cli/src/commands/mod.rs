pub mod config;
pub mod sentiment;
pub mod stats;
pub mod timeline;
