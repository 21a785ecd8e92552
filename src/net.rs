/// Roster download: the one inbound message from the peer.
///
/// The client sends nothing. It connects, performs a single read into a
/// fixed buffer and decodes whatever arrived as a JSON array of creatures.
/// There is no framing and no timeout; a silent peer blocks forever.

use std::io::{self, Read};
use std::net::TcpStream;

use thiserror::Error;

use crate::config::ServerConfig;
use crate::domain::creature::Creature;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("Failed to connect to server {addr}: {source}")]
    Connect { addr: String, source: io::Error },
    #[error("Failed to read Pokémon data: {0}")]
    Read(#[source] io::Error),
    #[error("Failed to read Pokémon data: connection closed before any data arrived")]
    Closed,
    #[error("Failed to parse Pokémon data: {0}")]
    Decode(#[source] serde_json::Error),
}

impl NetError {
    /// Only a failed connect is reported through the exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            NetError::Connect { .. } => 1,
            _ => 0,
        }
    }
}

/// Open the stream to the configured peer.
pub fn connect(server: &ServerConfig) -> Result<TcpStream, NetError> {
    let addr = server.addr();
    let stream = TcpStream::connect(addr.as_str())
        .map_err(|source| NetError::Connect { addr: addr.clone(), source })?;
    log::info!("connected to {addr}");
    Ok(stream)
}

/// One read of at most `buffer_size` bytes, decoded as the roster.
pub fn receive_roster<R: Read>(stream: &mut R, buffer_size: usize) -> Result<Vec<Creature>, NetError> {
    let mut buf = vec![0u8; buffer_size];
    let n = stream.read(&mut buf).map_err(NetError::Read)?;
    if n == 0 {
        return Err(NetError::Closed);
    }
    if n == buffer_size {
        log::warn!("roster filled the whole {buffer_size}-byte buffer; it may be truncated");
    }
    log::debug!("Received data: {}", String::from_utf8_lossy(&buf[..n]));
    decode_roster(&buf[..n])
}

pub fn decode_roster(bytes: &[u8]) -> Result<Vec<Creature>, NetError> {
    serde_json::from_slice(bytes).map_err(NetError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use std::net::TcpListener;
    use std::thread;

    const ROSTER: &str = r#"[
        {"id":"1","name":"Bulbasaur","types":["grass","poison"],"stats":{"hp":"45"},
         "exp":"64","when_attacked":{"tackle":"dodge"},"x":3,"y":4},
        {"id":"4","name":"Charmander","types":["fire"],"stats":{"hp":"39"},
         "exp":"62","when_attacked":{},"x":15,"y":0}
    ]"#;

    fn serve_once(payload: &'static [u8]) -> ServerConfig {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        thread::spawn(move || {
            let (mut sock, _) = listener.accept().unwrap();
            sock.write_all(payload).unwrap();
        });
        ServerConfig { host: "127.0.0.1".into(), port, buffer_size: 2048 }
    }

    #[test]
    fn downloads_roster_over_loopback() {
        let server = serve_once(ROSTER.as_bytes());
        let mut stream = connect(&server).unwrap();
        let roster = receive_roster(&mut stream, server.buffer_size).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1].name, "Charmander");
        assert_eq!((roster[0].x, roster[0].y), (3, 4));
    }

    #[test]
    fn empty_array_is_a_valid_roster() {
        let roster = receive_roster(&mut Cursor::new(b"[]".to_vec()), 64).unwrap();
        assert!(roster.is_empty());
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = receive_roster(&mut Cursor::new(b"[{\"id\": ".to_vec()), 64).unwrap_err();
        assert!(matches!(err, NetError::Decode(_)));
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn closed_stream_is_reported() {
        let err = receive_roster(&mut Cursor::new(Vec::new()), 64).unwrap_err();
        assert!(matches!(err, NetError::Closed));
    }

    #[test]
    fn oversized_payload_is_cut_at_the_buffer() {
        // Only the first 16 bytes are read, which is not valid JSON.
        let err = receive_roster(&mut Cursor::new(ROSTER.as_bytes().to_vec()), 16).unwrap_err();
        assert!(matches!(err, NetError::Decode(_)));
    }

    #[test]
    fn refused_connection_exits_with_failure() {
        // Bind then drop to get a port nobody listens on.
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let server = ServerConfig { host: "127.0.0.1".into(), port, buffer_size: 2048 };
        let err = connect(&server).unwrap_err();
        assert!(matches!(err, NetError::Connect { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
