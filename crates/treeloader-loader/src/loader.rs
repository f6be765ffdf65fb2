use futures::future::try_join_all;
use tracing::debug;
use treeloader_manifest::ScriptGroup;
use url::Url;

use crate::{
    completion::{ScriptCompletion, ScriptError, ScriptResult},
    host::ScriptHost,
};

/// Loads scripts and script groups through a [`ScriptHost`].
#[derive(Clone, Debug)]
pub struct ResourceLoader<H> {
    host: H,
}

impl<H: ScriptHost> ResourceLoader<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Start loading `path` relative to `base`.
    ///
    /// The request is issued before this returns. A path that cannot be
    /// joined to `base` yields an already-rejected completion.
    pub fn append_resource(&self, base: &Url, path: &str) -> ScriptCompletion {
        match base.join(path) {
            Ok(url) => self.host.append_script(&url),
            Err(error) => ScriptCompletion::rejected(ScriptError::InvalidPath {
                path: path.to_string(),
                reason: error.to_string(),
            }),
        }
    }

    /// Load every script of `group` and wait for all of them.
    ///
    /// All loads are started up front, in declaration order. The first
    /// failure observed is returned; the rest are dropped. An empty group
    /// completes immediately.
    pub async fn append_group(&self, group: &ScriptGroup) -> ScriptResult {
        if group.is_empty() {
            return Ok(());
        }
        debug!(base = %group.base(), scripts = group.len(), "appending group");

        let completions: Vec<ScriptCompletion> = group
            .paths()
            .iter()
            .map(|path| self.append_resource(group.base(), path))
            .collect();
        try_join_all(completions).await?;

        debug!(base = %group.base(), "group complete");
        Ok(())
    }
}
