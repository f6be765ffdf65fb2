use std::sync::Arc;

use treeloader_platform::{MaybeSend, MaybeSync};

/// Hooks into the mod bundle once its scripts are in.
///
/// A bundle defines these itself, so none of them can be called before the
/// scripts that define them have executed. Errors are human-readable and
/// name what is missing.
#[cfg_attr(test, unimock::unimock(api = CollaboratorsMock))]
pub trait Collaborators: MaybeSend + MaybeSync {
    /// Mod-specific files, relative to the bundle's script directory.
    ///
    /// `None` when the bundle does not list any.
    fn extension_files(&self) -> Option<Vec<String>>;

    /// Confirm [`start`](Self::start) and
    /// [`attach_input_handler`](Self::attach_input_handler) can both be
    /// invoked, without invoking either.
    fn check_hooks(&self) -> Result<(), String>;

    /// Enter the mod.
    fn start(&self) -> Result<(), String>;

    /// Route pointer movement to the mod.
    fn attach_input_handler(&self) -> Result<(), String>;
}

impl<C: Collaborators + ?Sized> Collaborators for Arc<C> {
    fn extension_files(&self) -> Option<Vec<String>> {
        (**self).extension_files()
    }

    fn check_hooks(&self) -> Result<(), String> {
        (**self).check_hooks()
    }

    fn start(&self) -> Result<(), String> {
        (**self).start()
    }

    fn attach_input_handler(&self) -> Result<(), String> {
        (**self).attach_input_handler()
    }
}
