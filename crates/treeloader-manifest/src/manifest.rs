use std::collections::HashSet;

use tracing::warn;
use treeloader_core::{LoadMode, Phase};
use url::Url;

use crate::error::{ManifestError, ManifestResult};

/// Scripts loaded together behind one barrier, relative to a shared base.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptGroup {
    base: Url,
    paths: Vec<String>,
}

impl ScriptGroup {
    pub fn new<I, P>(base: Url, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            base,
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn empty(base: Url) -> Self {
        Self {
            base,
            paths: Vec::new(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Resolve one path against the group's base.
    ///
    /// # Errors
    ///
    /// [`ManifestError::InvalidPath`] when the path cannot be joined.
    pub fn resolve(&self, path: &str) -> ManifestResult<Url> {
        self.base
            .join(path)
            .map_err(|error| ManifestError::InvalidPath {
                path: path.to_string(),
                reason: error.to_string(),
            })
    }

    /// Resolved URLs in declaration order; unjoinable paths are skipped.
    pub fn urls(&self) -> impl Iterator<Item = Url> + '_ {
        self.paths.iter().filter_map(|path| self.resolve(path).ok())
    }
}

/// The ordered plan of scripts for one mod.
///
/// Execution order is `before ⧺ [entry point] ⧺ extensions ⧺ after`. The
/// extension group starts empty and is filled by [`splice_extensions`] once
/// the bundle's own scripts have told us which files it has.
///
/// [`splice_extensions`]: ScriptManifest::splice_extensions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptManifest {
    mode: LoadMode,
    before: ScriptGroup,
    entry_point: Option<ScriptGroup>,
    extensions: ScriptGroup,
    after: ScriptGroup,
    content: Option<String>,
}

impl ScriptManifest {
    /// Static manifest: fixed lists around an entry point.
    #[must_use]
    pub fn new_static(
        before: ScriptGroup,
        entry_point: ScriptGroup,
        extension_base: Url,
        after: ScriptGroup,
    ) -> Self {
        Self {
            mode: LoadMode::Static,
            before,
            entry_point: Some(entry_point),
            extensions: ScriptGroup::empty(extension_base),
            after,
            content: None,
        }
    }

    /// Discovered manifest: the lists found in the bundle's document, plus
    /// the markup of its content region when it has one.
    #[must_use]
    pub fn new_discovered(
        before: ScriptGroup,
        extension_base: Url,
        after: ScriptGroup,
        content: Option<String>,
    ) -> Self {
        Self {
            mode: LoadMode::Discovered,
            before,
            entry_point: None,
            extensions: ScriptGroup::empty(extension_base),
            after,
            content,
        }
    }

    #[must_use]
    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    #[must_use]
    pub fn before(&self) -> &ScriptGroup {
        &self.before
    }

    #[must_use]
    pub fn entry_point(&self) -> Option<&ScriptGroup> {
        self.entry_point.as_ref()
    }

    #[must_use]
    pub fn extensions(&self) -> &ScriptGroup {
        &self.extensions
    }

    #[must_use]
    pub fn after(&self) -> &ScriptGroup {
        &self.after
    }

    /// Markup replacing the host's content region once loading completes.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Groups in load order, the entry point only when present.
    #[must_use]
    pub fn phases(&self) -> Vec<(Phase, &ScriptGroup)> {
        let mut phases = vec![(Phase::Before, &self.before)];
        if let Some(entry) = &self.entry_point {
            phases.push((Phase::EntryPoint, entry));
        }
        phases.push((Phase::Extensions, &self.extensions));
        phases.push((Phase::After, &self.after));
        phases
    }

    /// Number of scripts known so far.
    #[must_use]
    pub fn script_count(&self) -> usize {
        self.phases().iter().map(|(_, group)| group.len()).sum()
    }

    /// Every script URL in execution order.
    #[must_use]
    pub fn execution_order(&self) -> Vec<Url> {
        self.phases()
            .into_iter()
            .flat_map(|(_, group)| group.urls())
            .collect()
    }

    /// Place the bundle's extension files between the entry point and
    /// `after`.
    ///
    /// `None` means the bundle declares no extension list, which is not an
    /// error. Files resolving to a URL already in the manifest are dropped so
    /// no script is ever loaded twice.
    pub fn splice_extensions(&mut self, files: Option<Vec<String>>) {
        let Some(files) = files else {
            return;
        };

        let mut seen: HashSet<Url> = self.execution_order().into_iter().collect();
        let mut spliced = Vec::with_capacity(files.len());
        for path in files {
            match self.extensions.resolve(&path) {
                Ok(url) if !seen.insert(url.clone()) => {
                    warn!(%url, "extension already in manifest, skipping");
                }
                // Unjoinable paths are kept; loading them reports the failure.
                _ => spliced.push(path),
            }
        }
        self.extensions.paths = spliced;
    }
}
