//! recall-cli library: hook handlers exposed for tests.

pub mod commands;
pub mod utils;
