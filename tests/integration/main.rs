//! Integration tests for the item service.
//!
//! Each test binds the real router on an ephemeral port with its own store
//! and drives it over HTTP, the way the scripted harness does.
//! Run with: cargo test --test integration

mod items;
mod status;

use std::net::SocketAddr;

use chrono::Utc;
use item_service::api::{create_router, AppState};
use item_service::config::Config;
use item_service::status::StatusReporter;
use item_service::store::ItemStore;
use tokio::net::TcpListener;

/// A server running in the background for the duration of a test.
pub struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a server over the seeded store with default configuration.
    pub async fn start() -> Self {
        Self::start_with(Config::default()).await
    }

    /// Start a server whose version metadata comes from `config`.
    pub async fn start_with(config: Config) -> Self {
        let reporter = StatusReporter::new(config.build_info(Utc::now()));
        let state = AppState::new(ItemStore::seeded(), reporter);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, create_router(state))
                .await
                .expect("test server failed");
        });

        Self {
            addr,
            client: reqwest::Client::new(),
        }
    }

    /// Absolute URL for `path`.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// HTTP client bound to nothing in particular.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}
