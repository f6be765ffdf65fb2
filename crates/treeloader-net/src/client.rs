use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::trace;
use url::Url;

use crate::{
    error::{NetError, NetResult},
    traits::Net,
    types::{Headers, NetOptions},
};

/// reqwest-backed [`Net`] implementation.
///
/// Uses hyper + rustls natively and `fetch` in the browser. No request
/// timeout is configured: a hung request stalls its caller.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// # Errors
    ///
    /// Returns [`NetError::Http`] if the underlying client cannot be built.
    pub fn new(options: &NetOptions) -> NetResult<Self> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .user_agent(options.user_agent.clone())
            .pool_max_idle_per_host(options.pool_max_idle_per_host);
        #[cfg(target_arch = "wasm32")]
        let _ = options;

        let inner = builder.build()?;
        Ok(Self { inner })
    }

    fn apply_headers(
        mut req: reqwest::RequestBuilder,
        headers: Option<Headers>,
    ) -> reqwest::RequestBuilder {
        if let Some(headers) = headers {
            for (k, v) in headers.iter() {
                req = req.header(k, v);
            }
        }
        req
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Net for HttpClient {
    async fn get_bytes(&self, url: Url, headers: Option<Headers>) -> Result<Bytes, NetError> {
        trace!(%url, "GET");
        let req = self.inner.get(url.clone());
        let req = Self::apply_headers(req, headers);

        let resp = req.send().await.map_err(NetError::from)?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.ok();
            return Err(NetError::HttpError {
                url,
                status: status.as_u16(),
                body,
            });
        }

        resp.bytes().await.map_err(NetError::from)
    }
}
