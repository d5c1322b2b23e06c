//! Library side of the `atlas_cache` command line tool.
//!
//! It only holds the YAML configuration, so that other front ends can open a cache the
//! same way the tool does.

pub mod config;

pub use config::AppConfig;
