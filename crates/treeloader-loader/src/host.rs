use treeloader_platform::{MaybeSend, MaybeSync};
use url::Url;

use crate::completion::ScriptCompletion;

/// Where scripts are inserted and executed.
///
/// `append_script` starts the load before returning. Hosts must execute
/// scripts in append order whatever order their fetches finish in, and a
/// script that fails to load must not hold back the ones after it.
pub trait ScriptHost: MaybeSend + MaybeSync {
    fn append_script(&self, url: &Url) -> ScriptCompletion;
}

impl<H: ScriptHost + ?Sized> ScriptHost for std::sync::Arc<H> {
    fn append_script(&self, url: &Url) -> ScriptCompletion {
        (**self).append_script(url)
    }
}

impl<H: ScriptHost + ?Sized> ScriptHost for &H {
    fn append_script(&self, url: &Url) -> ScriptCompletion {
        (**self).append_script(url)
    }
}
