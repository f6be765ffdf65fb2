use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use treeloader_net::{Headers, Net, NetResult};
use treeloader_platform::Mutex;
use url::Url;

/// Wraps a [`Net`] and records every URL requested through it.
#[derive(Clone, Debug)]
pub struct CountingNet<N> {
    inner: N,
    requests: Arc<Mutex<Vec<Url>>>,
}

impl<N: Net> CountingNet<N> {
    pub fn new(inner: N) -> Self {
        Self {
            inner,
            requests: Arc::default(),
        }
    }

    #[must_use]
    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl<N: Net> Net for CountingNet<N> {
    async fn get_bytes(&self, url: Url, headers: Option<Headers>) -> NetResult<Bytes> {
        self.requests.lock().push(url.clone());
        self.inner.get_bytes(url, headers).await
    }
}
