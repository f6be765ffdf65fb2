use treeloader_core::{LoadMode, LoadState, Phase};

/// Events emitted while a mod is being loaded.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadEvent {
    /// The attempt moved to a new state.
    StateChanged { from: LoadState, to: LoadState },
    /// The branch was pinned to a commit.
    VersionResolved { commit_id: String, base_url: String },
    /// The script manifest is known (extensions not yet counted).
    ManifestResolved { mode: LoadMode, scripts: usize },
    /// A group was issued to the script host.
    GroupStarted { phase: Phase, scripts: usize },
    /// Every script of the group completed.
    GroupCompleted { phase: Phase },
    /// The attempt failed; `error` is the user-visible message.
    Failed { error: String },
}
