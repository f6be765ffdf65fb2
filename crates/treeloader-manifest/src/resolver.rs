use tracing::{debug, info, warn};
use treeloader_core::{LoadMode, ResolvedVersion};
use treeloader_net::Net;
use url::Url;

use crate::{
    discovered::parse_document,
    error::{ManifestError, ManifestResult},
    manifest::{ScriptGroup, ScriptManifest},
    options::ManifestOptions,
};

/// Builds the [`ScriptManifest`] of a pinned mod.
#[derive(Clone, Debug)]
pub struct ManifestResolver<N> {
    net: N,
    options: ManifestOptions,
}

impl<N: Net> ManifestResolver<N> {
    pub fn new(net: N, options: ManifestOptions) -> Self {
        Self { net, options }
    }

    pub fn options(&self) -> &ManifestOptions {
        &self.options
    }

    /// Resolve the manifest for `version` in the given mode.
    ///
    /// # Errors
    ///
    /// Discovered mode fails when the document cannot be fetched or declares
    /// no scripts. Both modes fail on paths that cannot be joined to their base.
    pub async fn resolve(
        &self,
        version: &ResolvedVersion,
        mode: LoadMode,
    ) -> ManifestResult<ScriptManifest> {
        let manifest = match mode {
            LoadMode::Static => self.resolve_static(version)?,
            LoadMode::Discovered => self.resolve_discovered(version).await?,
        };
        info!(
            %mode,
            scripts = manifest.script_count(),
            "manifest resolved"
        );
        Ok(manifest)
    }

    fn resolve_static(&self, version: &ResolvedVersion) -> ManifestResult<ScriptManifest> {
        let base = version.base_url();
        let local_root = self.options.local_root.as_ref().unwrap_or(base);
        let local_scripts = join(local_root, &self.options.script_prefix)?;

        Ok(ScriptManifest::new_static(
            ScriptGroup::new(local_scripts.clone(), self.options.static_before.iter().cloned()),
            ScriptGroup::new(base.clone(), [self.options.entry_point.clone()]),
            join(base, &self.options.extension_dir)?,
            ScriptGroup::new(local_scripts, self.options.static_after.iter().cloned()),
        ))
    }

    async fn resolve_discovered(&self, version: &ResolvedVersion) -> ManifestResult<ScriptManifest> {
        let base = version.base_url();
        let url = join(base, &self.options.index_document)?;
        debug!(%url, "fetching discovered document");

        let html = self
            .net
            .get_text(url.clone(), None)
            .await
            .map_err(|source| ManifestError::Fetch {
                url: url.clone(),
                source,
            })?;

        let document = parse_document(
            &html,
            &self.options.script_prefix,
            &self.options.sentinel,
            &self.options.content_region,
        );
        if document.is_empty() {
            return Err(ManifestError::NoScripts {
                url,
                prefix: self.options.script_prefix.clone(),
            });
        }
        if !document.sentinel_found {
            warn!(%url, sentinel = %self.options.sentinel, "sentinel not declared, every script loads before the extensions");
        }
        if document.content.is_none() {
            warn!(%url, region = %self.options.content_region, "content region not found in discovered document");
        }

        Ok(ScriptManifest::new_discovered(
            ScriptGroup::new(base.clone(), document.before),
            join(base, &self.options.extension_dir)?,
            ScriptGroup::new(base.clone(), document.after),
            document.content,
        ))
    }
}

fn join(base: &Url, path: &str) -> ManifestResult<Url> {
    base.join(path).map_err(|error| ManifestError::InvalidPath {
        path: path.to_string(),
        reason: error.to_string(),
    })
}
