pub mod address;
pub mod config;
pub mod error;
pub mod fetch;
pub mod manifest;
pub mod resolve;
pub mod server;

pub use config::Config;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
