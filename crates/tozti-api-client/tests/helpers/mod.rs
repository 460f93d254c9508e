//! Shared helpers for API client integration tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tozti_api_client::ApiClient;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

pub const JSON_API: &str = "application/vnd.api+json";

/// Client bound to the mock server's origin
pub fn client_for(server: &mockito::ServerGuard) -> ApiClient {
    ApiClient::new(&server.url()).expect("client for mock server")
}

/// Counts warn-level events emitted while the guard is alive
pub struct WarnCounter {
    count: Arc<AtomicUsize>,
    _guard: DefaultGuard,
}

impl WarnCounter {
    pub fn install() -> Self {
        let count = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(CountingLayer {
            count: count.clone(),
        });
        let guard = tracing::subscriber::set_default(subscriber);
        Self {
            count,
            _guard: guard,
        }
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

struct CountingLayer {
    count: Arc<AtomicUsize>,
}

impl<S: tracing::Subscriber> Layer<S> for CountingLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::WARN {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }
}
