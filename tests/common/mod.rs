// Test helpers are intentionally partially used
#![allow(dead_code)]

use reqwest::Client;
use std::sync::Once;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::sleep;
use webinar_api::create_router;

macro_rules! set_env_if_unset {
    // ---
    ($key:expr, $val:expr) => {
        if std::env::var($key).is_err() {
            std::env::set_var($key, $val);
        }
    };
}

static INIT: Once = Once::new();

// ============================================================================
// Test Setup
// ============================================================================

/// Initialize test environment variables once.
///
/// The suite runs against the in-memory store backend so it needs no
/// external infrastructure; set `WEBINAR_REPOSITORY_TYPE=redis` (plus
/// `WEBINAR_REDIS_URL`) in the environment to point it at a live Redis.
pub fn setup_test_env() {
    // ---
    INIT.call_once(|| {
        // ---
        set_env_if_unset!("WEBINAR_REPOSITORY_TYPE", "memory");
        set_env_if_unset!("WEBINAR_METRICS_TYPE", "noop");
    });
}

pub struct TestServer {
    pub addr: std::net::SocketAddr,
    pub client: Client,
}

impl TestServer {
    // ---
    pub async fn new() -> Self {
        // --
        setup_test_env();

        let app = create_router().expect("Should be able to create router");
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the server a moment to start
        sleep(Duration::from_millis(100)).await;

        let client = Client::new();

        Self { addr, client }
    }

    pub fn url(&self, path: &str) -> String {
        // ---
        format!("http://{}{}", self.addr, path)
    }
}

/// A unique email per call, so suites sharing one store never collide.
pub fn random_email() -> String {
    // ---
    use rand::Rng;
    let n: u64 = rand::thread_rng().gen();
    format!("user{n}@example.com")
}
