use std::time::Duration;

pub mod cli;
pub mod client;
pub mod error;
pub mod path;
pub mod protocol;

pub use error::{Error, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8887;
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub fn configure_log() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init()?;
    Ok(())
}
