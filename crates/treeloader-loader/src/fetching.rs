//! Native script host: fetch concurrently, execute in order.

use std::sync::Arc;

use bytes::Bytes;
use futures::channel::oneshot;
use tokio::runtime::Handle;
use tracing::{debug, warn};
use treeloader_net::Net;
use treeloader_platform::Mutex;
use url::Url;

use crate::{
    completion::{ScriptCompletion, ScriptError, ScriptResult},
    host::ScriptHost,
};

/// Runs a fetched script.
pub trait ScriptExecutor: Send + Sync + 'static {
    fn execute(&self, url: &Url, source: Bytes) -> ScriptResult;
}

impl<E: ScriptExecutor + ?Sized> ScriptExecutor for Arc<E> {
    fn execute(&self, url: &Url, source: Bytes) -> ScriptResult {
        (**self).execute(url, source)
    }
}

/// [`ScriptHost`] that downloads through [`Net`] and hands each body to a
/// [`ScriptExecutor`].
///
/// Every appended script gets its own task, so downloads overlap. Execution
/// is serialized by a chain of turns: a script's task waits until the task
/// appended before it has executed (or failed) before running its own body.
pub struct FetchingScriptHost<N, E> {
    net: Arc<N>,
    executor: Arc<E>,
    tail: Mutex<Option<oneshot::Receiver<()>>>,
}

impl<N, E> FetchingScriptHost<N, E>
where
    N: Net + 'static,
    E: ScriptExecutor,
{
    pub fn new(net: N, executor: E) -> Self {
        Self {
            net: Arc::new(net),
            executor: Arc::new(executor),
            tail: Mutex::new(None),
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }
}

impl<N, E> ScriptHost for FetchingScriptHost<N, E>
where
    N: Net + 'static,
    E: ScriptExecutor,
{
    fn append_script(&self, url: &Url) -> ScriptCompletion {
        let Ok(runtime) = Handle::try_current() else {
            return ScriptCompletion::rejected(ScriptError::failed(
                url.clone(),
                "no async runtime to load on",
            ));
        };

        let (signal, completion) = ScriptCompletion::pair(url.clone());
        let (release, turn) = oneshot::channel::<()>();
        let previous = self.tail.lock().replace(turn);

        let net = Arc::clone(&self.net);
        let executor = Arc::clone(&self.executor);
        let url = url.clone();

        runtime.spawn(async move {
            let fetched = net.get_bytes(url.clone(), None).await;

            if let Some(previous) = previous {
                // A cancelled turn means the earlier task is gone; go ahead.
                let _ = previous.await;
            }

            let result = match fetched {
                Ok(source) => {
                    debug!(%url, bytes = source.len(), "executing script");
                    executor.execute(&url, source)
                }
                Err(error) => Err(ScriptError::failed(url.clone(), error.to_string())),
            };
            if let Err(error) = &result {
                warn!(%error, "script failed");
            }

            let _ = release.send(());
            signal.settle(result);
        });

        completion
    }
}
