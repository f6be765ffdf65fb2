//! Load attempt state machine.

use std::fmt;

/// Progress of one load attempt.
///
/// Transitions only move forward one step at a time. [`LoadState::Failed`]
/// is reachable from every non-terminal state; `Ready` and `Failed` are
/// terminal for the attempt.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    ResolvingVersion,
    ResolvingManifest,
    LoadingResources,
    Ready,
    Failed(String),
}

impl LoadState {
    fn rank(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::ResolvingVersion => 1,
            Self::ResolvingManifest => 2,
            Self::LoadingResources => 3,
            Self::Ready => 4,
            Self::Failed(_) => u8::MAX,
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed(_))
    }

    /// Whether `next` is a legal successor of `self`.
    #[must_use]
    pub fn can_transition_to(&self, next: &Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Failed(_) => true,
            _ => next.rank() == self.rank() + 1,
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::ResolvingVersion => f.write_str("resolving version"),
            Self::ResolvingManifest => f.write_str("resolving manifest"),
            Self::LoadingResources => f.write_str("loading resources"),
            Self::Ready => f.write_str("ready"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// A group of scripts loaded behind one barrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Scripts that precede the mod's own files.
    Before,
    /// The mod's entry point (static mode only).
    EntryPoint,
    /// Mod-specific files listed by the bundle itself.
    Extensions,
    /// Scripts that depend on the mod's files.
    After,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::EntryPoint => f.write_str("entry point"),
            Self::Extensions => f.write_str("extensions"),
            Self::After => f.write_str("after"),
        }
    }
}
