//! Local HTTP server for integration tests.

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};
use url::Url;

use crate::origin::MockOrigin;

/// An axum router served on a random localhost port until dropped.
pub struct TestHttpServer {
    base_url: Url,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestHttpServer {
    /// Serve `router`. Must be called inside a tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn new(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test HTTP listener");
        let addr = listener
            .local_addr()
            .expect("read test listener local addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let server = axum::serve(listener, router).with_graceful_shutdown(async {
            shutdown_rx.await.ok();
        });
        tokio::spawn(async move {
            if let Err(error) = server.await {
                tracing::warn!(%error, "test HTTP server stopped");
            }
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}/")).expect("parse base URL"),
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Serve a [`MockOrigin`].
    pub async fn origin(origin: &MockOrigin) -> Self {
        Self::new(origin.router()).await
    }

    /// # Panics
    ///
    /// Panics if `path` cannot be joined to the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("join server URL path")
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Where [`MockOrigin`] answers branch lookups.
    #[must_use]
    pub fn api_base(&self) -> String {
        self.url(MockOrigin::API_ROOT).to_string()
    }

    /// Where [`MockOrigin`] serves pinned files.
    #[must_use]
    pub fn cdn_base(&self) -> String {
        self.url(MockOrigin::CDN_ROOT).to_string()
    }
}

impl Drop for TestHttpServer {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}
