use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::protocol::{Command, Parser, Request, Response};
use crate::store::{AccountStore, PetStore, Stores};
use crate::upload::UploadStore;

/// HTTP server
pub struct Server {
    listener: TcpListener,
    local_addr: SocketAddr,
    stores: Stores,
}

impl Server {
    /// Create and bind the server for the given configuration
    pub async fn bind(config: &Config) -> std::io::Result<Self> {
        let listener = TcpListener::bind(config.server_addr.as_str()).await?;
        let local_addr = listener.local_addr()?;
        info!("TCP server bound to {}", local_addr);

        let stores = Stores {
            accounts: AccountStore::new(config.accounts_path()),
            pets: PetStore::new(config.pets_path()),
            uploads: UploadStore::new(config.uploads_dir.clone()),
        };

        Ok(Self {
            listener,
            local_addr,
            stores,
        })
    }

    /// Get local listening address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Process a parsed request and return the response
    fn process_request(&self, request: &Request) -> Response {
        Command::execute(request, &self.stores)
    }

    /// Handle a single client connection
    async fn handle_connection(
        self: Arc<Self>,
        mut stream: TcpStream,
        peer_addr: SocketAddr,
    ) -> std::io::Result<()> {
        let mut buffer = vec![0u8; 8192]; // 8KB buffer
        let mut pending = Vec::new(); // Buffer for incomplete requests

        loop {
            match stream.read(&mut buffer).await {
                Ok(0) => {
                    info!("Connection closed by client: {}", peer_addr);
                    break;
                }
                Ok(n) => {
                    // Append new data to pending buffer
                    pending.extend_from_slice(&buffer[..n]);

                    // Try to parse and process complete requests
                    let mut processed = 0;
                    loop {
                        match Parser::parse(&pending[processed..]) {
                            Some((request, consumed)) => {
                                processed += consumed;

                                info!(
                                    "Received {} {} from {}",
                                    request.method, request.path, peer_addr
                                );

                                // Process the request and get response
                                let response = self.process_request(&request);
                                let encoded = response.encode();

                                // Send response
                                if let Err(e) = stream.write_all(&encoded).await {
                                    warn!("Failed to write response to {}: {}", peer_addr, e);
                                    break;
                                }
                            }
                            None => {
                                // No complete request available
                                break;
                            }
                        }
                    }

                    // Remove processed data from pending buffer
                    if processed > 0 {
                        pending = pending.split_off(processed);
                    }
                }
                Err(e) => {
                    error!("Error reading from {}: {}", peer_addr, e);
                    break;
                }
            }
        }

        info!("Connection handler ended for {}", peer_addr);
        Ok(())
    }

    /// Start server, accept and process connections
    pub async fn run(self: Arc<Self>) {
        info!("Server started, listening on {}", self.local_addr);

        loop {
            match self.listener.accept().await {
                Ok((stream, peer_addr)) => {
                    info!("New connection accepted from {}", peer_addr);

                    // Clone the Arc<Server> for the new connection
                    let server = Arc::clone(&self);

                    // Spawn an independent task for each connection
                    tokio::spawn(async move {
                        if let Err(e) = server.handle_connection(stream, peer_addr).await {
                            error!("Error handling connection from {}: {}", peer_addr, e);
                        }
                    });
                }
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                }
            }
        }
    }
}
