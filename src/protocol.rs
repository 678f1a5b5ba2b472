use std::io::Write;
use std::path::Path;

use byteorder::{WriteBytesExt, LE};
use log::debug;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

use crate::{Error, Result};

/// # Protocol
///
/// Write-only. Every integer is an `i32` in little-endian.
///
/// - Handshake: \[ Version (i32) | KeyLength (i32) | Key \]
/// - Command: \[ Opcode (i32) | PayloadLength (i32) | Payload \]
///
/// One handshake, then one command, then the connection is closed.
pub const PROTOCOL_VERSION: i32 = 4001;

/// The server only looks at the home directory prefix of the key.
pub const KEY_FILE_NAME: &str = "SimpleSocket.mm";

#[repr(i32)]
#[derive(FromPrimitive, ToPrimitive, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Opcode {
    /// Watch the payload path as a project root
    ProjectRoot = 5,
}

impl TryFrom<i32> for Opcode {
    type Error = i32;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        Opcode::from_i32(value).ok_or(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handshake {
    pub version: i32,
    pub key: String,
}

impl Handshake {
    pub fn new<S: Into<String>>(key: S) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            key: key.into(),
        }
    }

    pub fn for_home<P: AsRef<Path>>(home: P) -> Self {
        Self::new(format!("{}/{}", home.as_ref().display(), KEY_FILE_NAME))
    }

    pub fn encoded_len(&self) -> usize {
        4 + 4 + self.key.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    pub opcode: Opcode,
    pub payload: Vec<u8>,
}

impl CommandFrame {
    pub fn project_root<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| Error::NonUtf8Path(path.to_path_buf()))?;
        Ok(Self {
            opcode: Opcode::ProjectRoot,
            payload: path_str.as_bytes().to_vec(),
        })
    }

    pub fn encoded_len(&self) -> usize {
        4 + 4 + self.payload.len()
    }
}

pub trait WriteFrame<W: Write> {
    fn write_len_prefixed(&mut self, data: &[u8]) -> Result<()>;

    fn write_handshake(&mut self, handshake: &Handshake) -> Result<()>;

    fn write_command(&mut self, frame: &CommandFrame) -> Result<()>;
}

impl<W: Write> WriteFrame<W> for W {
    fn write_len_prefixed(&mut self, data: &[u8]) -> Result<()> {
        let len = i32::try_from(data.len()).map_err(|_| Error::PayloadTooLarge(data.len()))?;
        self.write_i32::<LE>(len)?;
        self.write_all(data)?;
        Ok(())
    }

    fn write_handshake(&mut self, handshake: &Handshake) -> Result<()> {
        debug!("Handshake: version {}, key {}", handshake.version, handshake.key);
        self.write_i32::<LE>(handshake.version)?;
        self.write_len_prefixed(handshake.key.as_bytes())
    }

    fn write_command(&mut self, frame: &CommandFrame) -> Result<()> {
        debug!(
            "Command: {:?}, {} bytes of payload",
            frame.opcode,
            frame.payload.len()
        );
        self.write_i32::<LE>(frame.opcode as i32)?;
        self.write_len_prefixed(&frame.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_root_payload() {
        let frame = CommandFrame::project_root("/tmp/demo").unwrap();
        let mut buf = Vec::new();
        buf.write_command(&frame).unwrap();

        let mut expected = vec![5, 0, 0, 0, 9, 0, 0, 0];
        expected.extend_from_slice(b"/tmp/demo");
        assert_eq!(buf, expected);
        assert_eq!(buf.len(), frame.encoded_len());
    }

    #[test]
    fn handshake_key() {
        let handshake = Handshake::for_home(Path::new("/home/alice"));
        assert_eq!(handshake.version, 4001);
        assert_eq!(handshake.key, "/home/alice/SimpleSocket.mm");

        let mut buf = Vec::new();
        buf.write_handshake(&handshake).unwrap();
        assert_eq!(&buf[..4], &4001_i32.to_le_bytes());
        assert_eq!(&buf[4..8], &(handshake.key.len() as i32).to_le_bytes());
        assert_eq!(&buf[8..], handshake.key.as_bytes());
        assert_eq!(buf.len(), handshake.encoded_len());
    }

    #[test]
    fn multibyte_length_counts_bytes() {
        let frame = CommandFrame::project_root("/tmp/プロジェクト").unwrap();
        let mut buf = Vec::new();
        buf.write_command(&frame).unwrap();
        let len = i32::from_le_bytes(buf[4..8].try_into().unwrap());
        assert_eq!(len as usize, "/tmp/プロジェクト".len());
        assert_eq!(len, 23);
    }

    #[test]
    fn opcode_from_wire() {
        assert_eq!(Opcode::try_from(5), Ok(Opcode::ProjectRoot));
        assert_eq!(Opcode::try_from(4), Err(4));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_path() {
        use std::ffi::OsStr;
        use std::os::unix::prelude::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/tmp/\xff"));
        assert!(matches!(
            CommandFrame::project_root(path),
            Err(Error::NonUtf8Path(_))
        ));
    }
}
