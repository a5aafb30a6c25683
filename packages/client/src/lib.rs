//! Terminal client for the shared countdown timer server.

pub mod error;
mod formatter;
mod input;
mod policy;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
