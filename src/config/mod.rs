#[cfg(feature = "cli")]
pub mod cli;
pub mod credentials;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use credentials::{EnvCredentials, StaticCredentials};
