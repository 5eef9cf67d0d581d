use anyhow::{bail, Context, Result};
use log::debug;
use ragemon_protocol::query::QueryPayload;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const MAX_PAYLOAD_BYTES: usize = 256 * 1024;

/// One-shot TCP client for the game server's local query endpoint.
///
/// The endpoint speaks a line protocol: the client sends `status\n`, the
/// server answers with a single JSON document terminated by a newline (or
/// by closing the connection). Every call opens a fresh connection so the
/// answer always reflects the server's state right now.
pub struct QueryClient {
    addr: SocketAddr,
    timeout: Duration,
}

impl QueryClient {
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        Self { addr, timeout }
    }

    /// Requests and parses one status payload. Any error, including the
    /// configured timeout, means the server is unreachable this cycle.
    pub async fn query(&self) -> Result<QueryPayload> {
        tokio::time::timeout(self.timeout, self.query_inner())
            .await
            .context("query timed out")?
    }

    async fn query_inner(&self) -> Result<QueryPayload> {
        let mut stream = TcpStream::connect(self.addr)
            .await
            .with_context(|| format!("failed to connect to {}", self.addr))?;

        stream.write_all(b"status\n").await?;
        stream.flush().await?;

        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = stream.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if raw.len() > MAX_PAYLOAD_BYTES {
                bail!("query payload exceeds {} bytes", MAX_PAYLOAD_BYTES);
            }
            if raw.ends_with(b"\n") {
                break;
            }
        }

        debug!("query returned {} bytes from {}", raw.len(), self.addr);
        serde_json::from_slice(&raw).context("failed to parse query payload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn serve_once(payload: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 64];
            let n = stream.read(&mut request).await.unwrap();
            assert_eq!(&request[..n], b"status\n");
            stream.write_all(payload.as_bytes()).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn query_parses_server_answer() {
        let addr = serve_once("{\"name\":\"Rage Server\",\"max_players\":100}\n").await;
        let client = QueryClient::new(addr, Duration::from_secs(1));

        let payload = client.query().await.unwrap();
        assert_eq!(payload.name, "Rage Server");
        assert_eq!(payload.max_players, 100);
    }

    #[tokio::test]
    async fn silent_server_hits_the_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept but never answer.
        tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = QueryClient::new(addr, Duration::from_millis(50));
        assert!(client.query().await.is_err());
    }

    #[tokio::test]
    async fn refused_connection_is_an_error() {
        // Bind and drop to get an address nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = QueryClient::new(addr, Duration::from_millis(200));
        assert!(client.query().await.is_err());
    }
}
