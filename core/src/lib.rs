//! Session-scoped "search memory before acting" enforcement for agent tool hooks.

pub mod api;
pub mod capture;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod gatekeeper;
pub mod input;
pub mod policy;
pub mod prompt;
pub mod relay;
pub mod state;
