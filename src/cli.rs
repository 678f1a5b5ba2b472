// Usage: notify-watch <project-path> [port]

use std::time::Duration;

use crate::client::ClientConfig;
use crate::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST, DEFAULT_PORT};

/// Tell a running injection server to start watching a project directory
#[derive(clap::Parser, Debug)]
#[command(version)]
pub struct Args {
    /// Path of the project to watch; `~` is expanded
    pub project_path: String,
    /// Port of the injection server
    #[arg(default_value_t = DEFAULT_PORT)]
    pub port: u16,
    /// Host of the injection server
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,
    /// Connect timeout, in seconds
    #[arg(long, default_value_t = DEFAULT_CONNECT_TIMEOUT.as_secs())]
    pub connect_timeout: u64,
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            host: self.host.clone(),
            port: self.port,
            connect_timeout: Duration::from_secs(self.connect_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Args;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["notify-watch", "/tmp/demo"]).unwrap();
        assert_eq!(args.project_path, "/tmp/demo");
        assert_eq!(args.port, 8887);
        assert_eq!(args.client_config().address(), "127.0.0.1:8887");
    }

    #[test]
    fn explicit_port() {
        let args = Args::try_parse_from(["notify-watch", "~/app", "9000"]).unwrap();
        assert_eq!(args.port, 9000);
    }

    #[test]
    fn wrong_arity() {
        assert!(Args::try_parse_from(["notify-watch"]).is_err());
        assert!(Args::try_parse_from(["notify-watch", "/tmp", "1", "2"]).is_err());
        assert!(Args::try_parse_from(["notify-watch", "/tmp", "port"]).is_err());
    }
}
