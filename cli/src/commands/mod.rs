pub mod cli;
pub mod hooks;
