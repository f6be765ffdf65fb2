use async_trait::async_trait;
use bytes::Bytes;
use treeloader_platform::{MaybeSend, MaybeSync};
use url::Url;

use crate::{
    error::{NetError, NetResult},
    types::Headers,
};

/// Minimal GET-only HTTP seam.
///
/// Futures are `Send` on native targets; in the browser they wrap `fetch`
/// promises and are not.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Net: MaybeSend + MaybeSync {
    /// Get all bytes from a URL.
    ///
    /// Non-2xx responses are errors; the body is kept on the error so callers
    /// can inspect structured failure payloads.
    async fn get_bytes(&self, url: Url, headers: Option<Headers>) -> NetResult<Bytes>;

    /// Get a URL's body as UTF-8 text.
    async fn get_text(&self, url: Url, headers: Option<Headers>) -> NetResult<String> {
        let bytes = self.get_bytes(url.clone(), headers).await?;
        String::from_utf8(bytes.to_vec()).map_err(|_| NetError::InvalidUtf8 { url })
    }
}
