use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use futures::channel::oneshot;
use thiserror::Error;
use treeloader_platform::Mutex;
use url::Url;

pub type ScriptResult<T = ()> = Result<T, ScriptError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("{url} failed to load: {reason}")]
    Failed { url: Url, reason: String },

    #[error("{url} was abandoned before it finished loading")]
    Abandoned { url: Url },

    #[error("invalid script path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },
}

impl ScriptError {
    pub fn failed(url: Url, reason: impl Into<String>) -> Self {
        Self::Failed {
            url,
            reason: reason.into(),
        }
    }

    /// URL of the script, when one could be built.
    #[must_use]
    pub fn url(&self) -> Option<&Url> {
        match self {
            Self::Failed { url, .. } | Self::Abandoned { url } => Some(url),
            Self::InvalidPath { .. } => None,
        }
    }

    /// What the failing script was called, URL or raw path.
    #[must_use]
    pub fn resource(&self) -> String {
        match self {
            Self::Failed { url, .. } | Self::Abandoned { url } => url.to_string(),
            Self::InvalidPath { path, .. } => path.clone(),
        }
    }
}

/// Settling side of a script load.
///
/// Clones share one slot: the first [`resolve`](Self::resolve) or
/// [`reject`](Self::reject) wins and every later call is a no-op. When the
/// last clone is dropped unsettled, the completion reports
/// [`ScriptError::Abandoned`].
#[derive(Clone, Debug)]
pub struct ScriptSignal {
    slot: Arc<Mutex<Option<oneshot::Sender<ScriptResult>>>>,
}

impl ScriptSignal {
    pub fn resolve(&self) -> bool {
        self.settle(Ok(()))
    }

    pub fn reject(&self, error: ScriptError) -> bool {
        self.settle(Err(error))
    }

    /// Returns `false` when the signal had already been settled.
    pub fn settle(&self, result: ScriptResult) -> bool {
        match self.slot.lock().take() {
            Some(tx) => {
                // The waiting side may be gone; nothing left to tell it.
                let _ = tx.send(result);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.slot.lock().is_none()
    }
}

enum State {
    Pending { url: Url, rx: oneshot::Receiver<ScriptResult> },
    Settled(Option<ScriptResult>),
}

/// Awaitable outcome of one script load.
#[must_use = "a script completion does nothing unless awaited"]
pub struct ScriptCompletion {
    state: State,
}

impl ScriptCompletion {
    /// A fresh signal and the completion it settles.
    pub fn pair(url: Url) -> (ScriptSignal, Self) {
        let (tx, rx) = oneshot::channel();
        let signal = ScriptSignal {
            slot: Arc::new(Mutex::new(Some(tx))),
        };
        let completion = Self {
            state: State::Pending { url, rx },
        };
        (signal, completion)
    }

    pub fn resolved() -> Self {
        Self {
            state: State::Settled(Some(Ok(()))),
        }
    }

    pub fn rejected(error: ScriptError) -> Self {
        Self {
            state: State::Settled(Some(Err(error))),
        }
    }
}

impl Future for ScriptCompletion {
    type Output = ScriptResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            State::Pending { url, rx } => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(result)) => {
                    this.state = State::Settled(None);
                    Poll::Ready(result)
                }
                Poll::Ready(Err(oneshot::Canceled)) => {
                    let url = url.clone();
                    this.state = State::Settled(None);
                    Poll::Ready(Err(ScriptError::Abandoned { url }))
                }
                Poll::Pending => Poll::Pending,
            },
            State::Settled(result) => match result.take() {
                Some(result) => Poll::Ready(result),
                None => panic!("ScriptCompletion polled after completion"),
            },
        }
    }
}

impl std::fmt::Debug for ScriptCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.state {
            State::Pending { url, .. } => f
                .debug_struct("ScriptCompletion")
                .field("url", &url.as_str())
                .field("settled", &false)
                .finish(),
            State::Settled(_) => f
                .debug_struct("ScriptCompletion")
                .field("settled", &true)
                .finish(),
        }
    }
}
