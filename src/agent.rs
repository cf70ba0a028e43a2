//! UDP client for the local iot agent
//!
//! Readings go out as one JSON datagram per sample,
//! `{"n":"<component>","v":"<value>"}`, to the agent listening on localhost.

use anyhow::Context;
use serde::Serialize;
use tokio::net::UdpSocket;

#[derive(Debug, Serialize)]
struct Reading<'a> {
    n: &'a str,
    v: &'a str,
}

/// A connected datagram socket to the agent.
pub struct AgentClient {
    socket: UdpSocket,
}

impl AgentClient {
    /// Bind an ephemeral port and connect to the agent at `addr`
    /// (host:port, e.g. "127.0.0.1:41234").
    pub async fn connect(addr: &str) -> anyhow::Result<Self> {
        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .context("bind agent socket")?;
        socket
            .connect(addr)
            .await
            .with_context(|| format!("connect to iot agent at {}", addr))?;
        Ok(Self { socket })
    }

    /// Publish one reading for `component`. The payload also goes to stdout,
    /// matching the original samples.
    pub async fn send(&self, component: &str, value: &str) -> anyhow::Result<()> {
        let payload = reading_payload(component, value);
        println!("{}", payload);
        self.socket
            .send(payload.as_bytes())
            .await
            .context("write to iot agent")?;
        Ok(())
    }
}

fn reading_payload(component: &str, value: &str) -> String {
    // Serializing a struct of two &str fields cannot fail
    serde_json::to_string(&Reading {
        n: component,
        v: value,
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_shape() {
        assert_eq!(
            reading_payload("gpsv1", "45.23, -122.10"),
            r#"{"n":"gpsv1","v":"45.23, -122.10"}"#
        );
    }

    #[test]
    fn test_payload_escapes() {
        assert_eq!(
            reading_payload("reflectorv1", "tail \"open\""),
            r#"{"n":"reflectorv1","v":"tail \"open\""}"#
        );
    }

    #[tokio::test]
    async fn test_send_reaches_agent() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap();

        let client = AgentClient::connect(&addr.to_string()).await.unwrap();
        client.send("gpsv1", "1.0, 2.0").await.unwrap();

        let mut buf = [0u8; 256];
        let n = server.recv(&mut buf).await.unwrap();
        assert_eq!(&buf[..n], br#"{"n":"gpsv1","v":"1.0, 2.0"}"#);
    }
}
