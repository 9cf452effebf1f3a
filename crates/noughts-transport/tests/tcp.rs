//! Integration tests for the TCP transport.
//!
//! These tests open real sockets on loopback so that bytes actually
//! cross the network stack. Binding to port 0 lets the OS pick a free
//! port, which [`TcpTransport::local_addr`] then reports.

use noughts_transport::{Connection, TcpConnection, TcpTransport, Transport, TransportError};

#[tokio::test]
async fn test_tcp_accept_and_exchange_frames() {
    let mut transport = TcpTransport::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = transport.local_addr().expect("should have addr").to_string();

    // Accept in the background so the client can connect concurrently.
    let server_handle =
        tokio::spawn(async move { transport.accept().await.expect("should accept") });

    let client = TcpConnection::connect(&addr).await.expect("should connect");
    let server_conn = server_handle.await.expect("task should complete");

    assert!(server_conn.id().into_inner() > 0);
    assert_ne!(server_conn.id(), client.id());

    // --- Server sends, client receives ---
    server_conn.send(b"SRT").await.expect("send should succeed");
    assert_eq!(client.recv_exact(3).await.unwrap(), b"SRT");

    // --- Client sends, server receives ---
    client.send(&7i32.to_be_bytes()).await.unwrap();
    let received = server_conn.recv_exact(4).await.expect("recv should succeed");
    assert_eq!(received, 7i32.to_be_bytes());

    server_conn.close().await.expect("close should succeed");
}

#[tokio::test]
async fn test_tcp_recv_exact_reports_closed_peer() {
    let mut transport = TcpTransport::bind("127.0.0.1:0").await.unwrap();
    let addr = transport.local_addr().unwrap().to_string();

    let server_handle = tokio::spawn(async move { transport.accept().await.unwrap() });
    let client = TcpConnection::connect(&addr).await.unwrap();
    let server_conn = server_handle.await.unwrap();

    // Half a frame, then end-of-stream.
    client.send(&[0, 0]).await.unwrap();
    client.close().await.unwrap();

    let result = server_conn.recv_exact(4).await;
    assert!(matches!(result, Err(TransportError::ConnectionClosed(_))));
}

#[tokio::test]
async fn test_tcp_connect_to_closed_port_fails() {
    // Bind then drop to find a port that is very likely closed.
    let transport = TcpTransport::bind("127.0.0.1:0").await.unwrap();
    let addr = transport.local_addr().unwrap().to_string();
    drop(transport);

    let result = TcpConnection::connect(&addr).await;
    assert!(matches!(result, Err(TransportError::ConnectFailed(_))));
}
