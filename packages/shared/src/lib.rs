//! Utilities shared by the sharetimer server and client.

pub mod logger;
pub mod time;
