//! This crate contains the code that makes the deployer observable: the
//! initialization of the logging stack and a panic hook that reports panics
//! through it.
mod config;
pub mod panic_hook;
pub mod tracing;

pub use config::Config;
