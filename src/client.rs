use std::io::{self, BufWriter, ErrorKind, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use log::{debug, info};

use crate::path::home_dir;
use crate::protocol::{CommandFrame, Handshake, WriteFrame};
use crate::{Error, Result, DEFAULT_CONNECT_TIMEOUT, DEFAULT_HOST, DEFAULT_PORT};

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_not_listening(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        ErrorKind::ConnectionRefused
            | ErrorKind::HostUnreachable
            | ErrorKind::NetworkUnreachable
            | ErrorKind::AddrNotAvailable
            | ErrorKind::TimedOut
    )
}

/// Tries every resolved address in order; the last failure is reported.
pub fn connect(config: &ClientConfig) -> Result<TcpStream> {
    let address = config.address();
    let socket_addrs = address
        .to_socket_addrs()
        .map_err(|e| Error::InvalidArguments(format!("Invalid address {}: {}", address, e)))?
        .collect::<Vec<SocketAddr>>();
    if socket_addrs.is_empty() {
        return Err(Error::InvalidArguments(format!(
            "Address resolves to nothing: {}",
            address
        )));
    }

    let mut last_error = None;
    for socket_addr in socket_addrs {
        debug!("Connecting to {}", socket_addr);
        match TcpStream::connect_timeout(&socket_addr, config.connect_timeout) {
            Ok(stream) => {
                info!("Connected to {}", socket_addr);
                return Ok(stream);
            }
            Err(e) => last_error = Some(e),
        }
    }

    // non-empty address list, so there's always an error here
    let e = last_error.unwrap_or_else(|| io::Error::from(ErrorKind::NotConnected));
    if is_not_listening(&e) {
        Err(Error::ServerNotRunning {
            addr: address,
            source: e,
        })
    } else {
        Err(Error::Transport(e))
    }
}

pub fn write_watch_command<W: Write>(
    writer: &mut W,
    handshake: &Handshake,
    project_path: &Path,
) -> Result<()> {
    let frame = CommandFrame::project_root(project_path)?;
    writer.write_handshake(handshake)?;
    writer.write_command(&frame)?;
    writer.flush()?;
    Ok(())
}

/// Connects, sends the handshake and a single `ProjectRoot` command, then
/// closes the connection. No response is read.
pub fn send_watch_command<P: AsRef<Path>>(config: &ClientConfig, project_path: P) -> Result<()> {
    let project_path = project_path.as_ref();
    let handshake = Handshake::for_home(home_dir()?);
    // fail on encoding problems before opening a socket
    CommandFrame::project_root(project_path)?;

    let stream = connect(config)?;
    let mut writer = BufWriter::new(&stream);
    write_watch_command(&mut writer, &handshake, project_path)?;
    drop(writer);
    drop(stream);

    debug!("Connection closed");
    Ok(())
}
