//! A stand-in for a mod's scripts.
//!
//! Script bodies are read line by line:
//!
//! - `mod_files: a.js, b.js` lists the bundle's extension files;
//! - `defines: load, updateMouse` makes those hooks available;
//! - `throw` makes the script fail when executed.
//!
//! Any other line is ignored.

use std::{collections::HashSet, sync::Arc};

use bytes::Bytes;
use treeloader::Collaborators;
use treeloader_loader::{ScriptError, ScriptExecutor, ScriptResult};
use treeloader_platform::Mutex;
use url::Url;

pub const START_HOOK: &str = "load";
pub const INPUT_HOOK: &str = "updateMouse";

#[derive(Debug, Default)]
struct BundleState {
    executed: Vec<Url>,
    mod_files: Option<Vec<String>>,
    defined: HashSet<String>,
    calls: Vec<&'static str>,
}

/// Shared record of what the bundle's scripts did.
#[derive(Clone, Debug, Default)]
pub struct FakeBundle {
    state: Arc<Mutex<BundleState>>,
}

impl FakeBundle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn executor(&self) -> RecordingExecutor {
        RecordingExecutor {
            bundle: self.clone(),
        }
    }

    #[must_use]
    pub fn collaborators(&self) -> BundleCollaborators {
        BundleCollaborators {
            bundle: self.clone(),
        }
    }

    /// Scripts executed so far, in execution order.
    #[must_use]
    pub fn executed(&self) -> Vec<Url> {
        self.state.lock().executed.clone()
    }

    /// Paths of [`executed`](Self::executed), for terser assertions.
    #[must_use]
    pub fn executed_paths(&self) -> Vec<String> {
        self.executed()
            .iter()
            .map(|url| url.path().to_string())
            .collect()
    }

    /// Hooks invoked so far: `"extension_files"`, `"check"`, `"start"`,
    /// `"input"`.
    #[must_use]
    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().calls.clone()
    }

    fn run(&self, url: &Url, source: &str) -> ScriptResult {
        let mut state = self.state.lock();
        for line in source.lines().map(str::trim) {
            if line == "throw" {
                return Err(ScriptError::failed(url.clone(), "script threw"));
            }
            if let Some(files) = line.strip_prefix("mod_files:") {
                state.mod_files = Some(split_list(files));
            } else if let Some(hooks) = line.strip_prefix("defines:") {
                state.defined.extend(split_list(hooks));
            }
        }
        state.executed.push(url.clone());
        Ok(())
    }

    fn call(&self, hook: &'static str, names: &[&str]) -> Result<(), String> {
        let mut state = self.state.lock();
        state.calls.push(hook);
        match names.iter().find(|name| !state.defined.contains(**name)) {
            Some(missing) => Err(format!("{missing} is not defined")),
            None => Ok(()),
        }
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// [`ScriptExecutor`] feeding a [`FakeBundle`].
#[derive(Clone, Debug)]
pub struct RecordingExecutor {
    bundle: FakeBundle,
}

impl ScriptExecutor for RecordingExecutor {
    fn execute(&self, url: &Url, source: Bytes) -> ScriptResult {
        let source = String::from_utf8_lossy(&source);
        self.bundle.run(url, &source)
    }
}

/// [`Collaborators`] backed by whatever the executed scripts defined.
#[derive(Clone, Debug)]
pub struct BundleCollaborators {
    bundle: FakeBundle,
}

impl Collaborators for BundleCollaborators {
    fn extension_files(&self) -> Option<Vec<String>> {
        let mut state = self.bundle.state.lock();
        state.calls.push("extension_files");
        state.mod_files.clone()
    }

    fn check_hooks(&self) -> Result<(), String> {
        self.bundle.call("check", &[START_HOOK, INPUT_HOOK])
    }

    fn start(&self) -> Result<(), String> {
        self.bundle.call("start", &[START_HOOK])
    }

    fn attach_input_handler(&self) -> Result<(), String> {
        self.bundle.call("input", &[INPUT_HOOK])
    }
}
