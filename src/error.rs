use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),
    /// Nothing accepted the connection on the target address.
    #[error("Connection to {addr} failed ({source}) - is the injection server running?")]
    ServerNotRunning { addr: String, source: io::Error },
    #[error("Cannot determine the home directory")]
    NoHomeDir,
    #[error("Path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    #[error("Payload too large: {0} bytes")]
    PayloadTooLarge(usize),
    #[error(transparent)]
    Transport(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
