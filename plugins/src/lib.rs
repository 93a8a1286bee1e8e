pub mod capture;
pub mod factory;
pub mod relay;
pub mod services;
pub mod store;
