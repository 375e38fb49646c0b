#![allow(dead_code)]
use async_trait::async_trait;
use scripture::client::ScriptureClient;
use scripture::controller::ReaderController;
use scripture::runtime::fetcher::Fetcher;
use scripture::runtime::store::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, Once};
use tokio::sync::Notify;

pub const BASE: &str = "http://bible.test/api";

pub const ASV_API: &str = "685d1470fe4d5c3b-01";
pub const KJV_API: &str = "de4e12af7f28f599-01";

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

/// Canned-response transport. Responses and failures are keyed by full URL;
/// a `gate` parks the matching fetch until the test releases it, which is
/// how response-ordering races are reproduced deterministically.
#[derive(Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<String, Result<String, String>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    requests: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, url: &str, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(body.to_string()));
    }

    pub fn fail(&self, url: &str, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(url.to_string(), Err(message.to_string()));
    }

    pub fn gate(&self, url: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(url.to_string(), gate.clone());
        gate
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, String> {
        self.requests.lock().unwrap().push(url.to_string());
        let gate = self.gates.lock().unwrap().get(url).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.responses
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(format!("no mock response for {url}")))
    }
}

pub fn client_with(fetcher: Arc<MockFetcher>) -> ScriptureClient {
    ScriptureClient::new(BASE, fetcher)
}

pub fn controller_with(
    fetcher: Arc<MockFetcher>,
    store: Arc<dyn KeyValueStore>,
) -> ReaderController {
    ReaderController::new(client_with(fetcher), store)
}
