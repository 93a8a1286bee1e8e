pub mod command;
pub mod http;

pub use command::CommandRelayPlugin;
pub use http::HttpRelayPlugin;
