//! `<script>` elements as a [`ScriptHost`].

use tracing::debug;
use treeloader_loader::{ScriptCompletion, ScriptError, ScriptHost};
use url::Url;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{Document, HtmlScriptElement};

/// Appends scripts to the document head with `async = false`, so the browser
/// fetches them in parallel and runs them in insertion order.
pub struct DomScriptHost {
    document: Document,
}

impl DomScriptHost {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn insert(&self, url: &Url) -> Result<ScriptCompletion, String> {
        let script: HtmlScriptElement = self
            .document
            .create_element("script")
            .map_err(|error| format!("cannot create script element: {error:?}"))?
            .dyn_into()
            .map_err(|_| "created element is not a script".to_string())?;
        let head = self
            .document
            .head()
            .ok_or_else(|| "document has no head".to_string())?;

        let (signal, completion) = ScriptCompletion::pair(url.clone());
        script.set_src(url.as_str());
        script.set_async(false);

        let loaded = signal.clone();
        let onload = Closure::once_into_js(move || {
            loaded.resolve();
        });
        let failed_url = url.clone();
        let onerror = Closure::once_into_js(move || {
            signal.reject(ScriptError::failed(failed_url, "failed to load"));
        });
        script.set_onload(Some(onload.unchecked_ref()));
        script.set_onerror(Some(onerror.unchecked_ref()));

        head.append_child(&script)
            .map_err(|error| format!("cannot append script: {error:?}"))?;
        debug!(%url, "script appended");
        Ok(completion)
    }
}

impl ScriptHost for DomScriptHost {
    fn append_script(&self, url: &Url) -> ScriptCompletion {
        self.insert(url).unwrap_or_else(|reason| {
            ScriptCompletion::rejected(ScriptError::failed(url.clone(), reason))
        })
    }
}
