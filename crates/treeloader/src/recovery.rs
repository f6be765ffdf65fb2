use tracing::error;
use treeloader_core::ModParams;
use treeloader_platform::next_turn;

use crate::{
    error::LoadError,
    surface::{Region, RenderSurface, write_params},
};

/// Shows a failed attempt and hands the selector back to the user,
/// pre-filled with what was tried.
#[derive(Clone, Debug)]
pub struct RecoveryPresenter<S> {
    surface: S,
}

impl<S: RenderSurface> RecoveryPresenter<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// The surface is only touched once the current turn has finished, so
    /// whatever was running when the failure surfaced has settled first.
    pub async fn present(&self, failure: &LoadError, params: &ModParams) {
        error!(error = %failure, owner = %params.owner, "failed to load mod");
        next_turn().await;

        self.surface.set_text(Region::Error, &failure.to_string());
        self.surface.show(Region::Error);
        self.surface.hide(Region::Loading);
        write_params(&self.surface, params);
        self.surface.show(Region::Selector);
    }
}
